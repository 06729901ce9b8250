//! Adding pull requests to releases.
//!
//! A comment asking for a pull request to be released goes through the
//! [`ReleaseGate`]; if it passes, the [`ReleaseRouter`] hands it to the
//! new-release or existing-release strategy together with a
//! [`RepositoryManager`](crate::manager::RepositoryManager) for the pull
//! request's repository.

pub mod gate;
pub mod pull;
pub mod router;
pub mod target;

use std::sync::Arc;

use crate::client::BotClient;
use crate::error::Error;
use crate::types::Comment;

pub use gate::{Decision, Rejection, ReleaseGate};
pub use pull::{PullRequestHandle, RemotePullRequest};
pub use router::{ExistingReleaseStrategy, NewReleaseStrategy, ReleaseKind, ReleaseRouter};
pub use target::ReleaseTarget;

/// What happened to an "add to release" request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The pull request is itself a release; nothing was done.
    Ignored,
    /// Rejected with an explanatory comment.
    Rejected(Rejection),
    /// Handed to a release strategy, which succeeded.
    Routed(ReleaseKind),
}

/// Runs the gate and, on approval, the router.
pub struct AddToRelease {
    client: Arc<BotClient>,
    gate: ReleaseGate,
    router: ReleaseRouter,
}

impl AddToRelease {
    pub fn new(client: Arc<BotClient>, router: ReleaseRouter) -> Self {
        Self {
            client,
            gate: ReleaseGate,
            router,
        }
    }

    /// Handle one request to add `pr` to `target`.
    ///
    /// # Errors
    ///
    /// Infrastructure failures from the gate or the strategy. Rejections
    /// are not errors.
    pub async fn handle(
        &self,
        pr: &dyn PullRequestHandle,
        comment: &Comment,
        target: &ReleaseTarget,
        skip_status_checks: bool,
    ) -> Result<ReleaseOutcome, Error> {
        match self.gate.evaluate(pr, comment, skip_status_checks).await? {
            Decision::Ignore => Ok(ReleaseOutcome::Ignored),
            Decision::Reject(rejection) => Ok(ReleaseOutcome::Rejected(rejection)),
            Decision::Proceed => {
                let manager = self.client.repository(pr.owner(), pr.repo());
                let kind = self.router.route(target, pr, comment, &manager).await?;
                Ok(ReleaseOutcome::Routed(kind))
            }
        }
    }
}
