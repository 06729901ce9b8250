//! Release bot for GitHub repositories.
//!
//! Validates pull requests that ask to be added to a release, routes them to
//! a release strategy, and manages repositories through the Git Data API:
//! multi-file commits, file read-modify-write, labels, hooks and cleanup of
//! merged branches.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use release_bot::{BotClient, Config, UpdateFilesOptions, FileEntry};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = BotClient::new(&Config::from_env()?)?;
//! let manager = client.repository("microadam", "exso-test");
//!
//! let branch = manager.get_branch("feature/test").await?;
//! let sha = manager
//!     .update_files(&UpdateFilesOptions {
//!         files: vec![FileEntry::new("VERSION", "1.2.0\n")],
//!         commit_message: "Bump version".to_string(),
//!         base_sha: branch.head_sha.clone(),
//!         branch: branch.name().to_string(),
//!     })
//!     .await?;
//! println!("committed {sha}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod manager;
pub mod release;
pub mod testing;
pub mod transport;
pub mod types;

// Re-exports
pub use client::BotClient;
pub use codec::BlobCodec;
pub use config::{Config, ConfigError};
pub use error::{ApiError, Error};
pub use manager::{HookSettings, PipelineState, RepositoryManager, Stage, UpdateFilesOptions, MASTER};
pub use release::{
    AddToRelease, Decision, ExistingReleaseStrategy, NewReleaseStrategy, PullRequestHandle,
    Rejection, ReleaseGate, ReleaseKind, ReleaseOutcome, ReleaseRouter, ReleaseTarget,
    RemotePullRequest,
};
pub use transport::HttpTransport;
pub use types::{
    Branch, CombinedStatus, Comment, CommitStatus, Comparison, FileContents, FileEntry, Hook,
    Label, LabelCatalog, PullRequest, StatusState, Tag,
};
