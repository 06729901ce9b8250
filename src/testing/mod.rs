//! Testing utilities.
//!
//! Mock collaborators for exercising the release flow without a platform.

mod mock;

pub use mock::{CallLog, MockCall, MockPullRequest, MockResponse, MockStrategies};
