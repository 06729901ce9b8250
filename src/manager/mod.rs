//! Repository manager.
//!
//! `RepositoryManager` is the only component that talks to the platform's
//! REST and Git Data APIs. One instance is scoped to one `(owner, repo)`
//! pair and keeps no other state between calls, so instances are cheap to
//! create per event. Operations are split by resource across the submodules.

mod cleanup;
mod commit;
mod contents;
mod hooks;
mod labels;
mod pulls;
mod refs;

use std::sync::Arc;

use crate::error::Error;
use crate::transport::HttpTransport;

pub use commit::{PipelineState, Stage, UpdateFilesOptions};
pub use pulls::MASTER;

/// Where created webhooks deliver, and the secret they sign with.
#[derive(Debug, Clone)]
pub struct HookSettings {
    pub url: String,
    pub secret: String,
}

/// Facade over one repository's REST and Git Data APIs.
#[derive(Clone)]
pub struct RepositoryManager {
    transport: Arc<HttpTransport>,
    owner: String,
    repo: String,
    hook: HookSettings,
}

impl RepositoryManager {
    /// Create a manager scoped to `owner/repo`.
    pub fn new(transport: Arc<HttpTransport>, owner: &str, repo: &str, hook: HookSettings) -> Self {
        Self {
            transport,
            owner: owner.to_string(),
            repo: repo.to_string(),
            hook,
        }
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// `owner/repo`, for log fields.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// API path below `/repos/{owner}/{repo}`.
    fn path(&self, suffix: &str) -> String {
        format!("/repos/{}/{}{}", self.owner, self.repo, suffix)
    }
}

impl std::fmt::Debug for RepositoryManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryManager")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}

/// Reject empty input before any request is sent.
fn require(value: &str, what: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{what} must not be empty")));
    }
    Ok(())
}
