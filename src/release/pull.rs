//! The pull request as seen by the release flow.

use async_trait::async_trait;

use crate::error::Error;
use crate::manager::RepositoryManager;
use crate::types::{CombinedStatus, PullRequest};

/// A pull request the release flow can inspect and reply to.
#[async_trait]
pub trait PullRequestHandle: Send + Sync {
    /// Source branch name.
    fn branch(&self) -> &str;

    /// Base branch name.
    fn base_ref(&self) -> &str;

    fn owner(&self) -> &str;

    fn repo(&self) -> &str;

    /// Post a comment on the pull request.
    async fn add_comment(&self, text: &str) -> Result<(), Error>;

    /// Combined status of the pull request's head commit.
    async fn current_status(&self) -> Result<CombinedStatus, Error>;
}

/// Pull request backed by the platform API.
#[derive(Debug, Clone)]
pub struct RemotePullRequest {
    pull: PullRequest,
    manager: RepositoryManager,
}

impl RemotePullRequest {
    /// Bind a fetched pull request to the manager of its repository.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if the pull request targets a different
    /// repository than `manager`.
    pub fn new(pull: PullRequest, manager: RepositoryManager) -> Result<Self, Error> {
        let matches = pull.owner() == Some(manager.owner()) && pull.repo() == Some(manager.repo());
        if !matches {
            return Err(Error::Validation(format!(
                "pull request #{} does not belong to {}",
                pull.number,
                manager.full_name()
            )));
        }

        Ok(Self { pull, manager })
    }

    #[must_use]
    pub fn pull(&self) -> &PullRequest {
        &self.pull
    }
}

#[async_trait]
impl PullRequestHandle for RemotePullRequest {
    fn branch(&self) -> &str {
        self.pull.branch()
    }

    fn base_ref(&self) -> &str {
        self.pull.base_ref()
    }

    fn owner(&self) -> &str {
        self.manager.owner()
    }

    fn repo(&self) -> &str {
        self.manager.repo()
    }

    async fn add_comment(&self, text: &str) -> Result<(), Error> {
        self.manager.add_comment(self.pull.number, text).await
    }

    async fn current_status(&self) -> Result<CombinedStatus, Error> {
        self.manager.get_combined_status(self.pull.head_sha()).await
    }
}
