//! Dispatch of approved requests to a release strategy.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::pull::PullRequestHandle;
use super::target::ReleaseTarget;
use crate::error::Error;
use crate::manager::RepositoryManager;
use crate::types::Comment;

/// Builds a new release branch and pull request around `pr`.
#[async_trait]
pub trait NewReleaseStrategy: Send + Sync {
    /// `name` is `None` when the release name should be generated.
    async fn create(
        &self,
        name: Option<&str>,
        pr: &dyn PullRequestHandle,
        comment: &Comment,
        manager: &RepositoryManager,
    ) -> Result<(), Error>;
}

/// Merges `pr` into an already open release.
#[async_trait]
pub trait ExistingReleaseStrategy: Send + Sync {
    /// `release` is the number of the release pull request.
    async fn append(
        &self,
        release: u64,
        pr: &dyn PullRequestHandle,
        comment: &Comment,
        manager: &RepositoryManager,
    ) -> Result<(), Error>;
}

/// Which strategy handled a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseKind {
    New,
    Existing,
}

/// Chooses between the two strategies by release target.
#[derive(Clone)]
pub struct ReleaseRouter {
    create: Arc<dyn NewReleaseStrategy>,
    append: Arc<dyn ExistingReleaseStrategy>,
}

impl ReleaseRouter {
    pub fn new(create: Arc<dyn NewReleaseStrategy>, append: Arc<dyn ExistingReleaseStrategy>) -> Self {
        Self { create, append }
    }

    /// Run the strategy matching `target`.
    ///
    /// # Errors
    ///
    /// Returns the strategy's error unchanged.
    pub async fn route(
        &self,
        target: &ReleaseTarget,
        pr: &dyn PullRequestHandle,
        comment: &Comment,
        manager: &RepositoryManager,
    ) -> Result<ReleaseKind, Error> {
        let kind = match target {
            ReleaseTarget::Next => {
                self.create.create(None, pr, comment, manager).await?;
                ReleaseKind::New
            }
            ReleaseTarget::Named(name) => {
                self.create.create(Some(name), pr, comment, manager).await?;
                ReleaseKind::New
            }
            ReleaseTarget::Existing(release) => {
                self.append.append(*release, pr, comment, manager).await?;
                ReleaseKind::Existing
            }
        };

        info!(repo = %manager.full_name(), branch = pr.branch(), ?target, ?kind, "pull request routed to release");
        Ok(kind)
    }
}
