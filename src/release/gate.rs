//! Eligibility checks for adding a pull request to a release.

use tracing::{debug, warn};

use super::pull::PullRequestHandle;
use crate::error::Error;
use crate::manager::MASTER;
use crate::types::{CombinedStatus, Comment};

/// Branches created by the release flow itself.
pub const RELEASE_PREFIX: &str = "release/";

/// A branch must contain one of these to be released.
pub const VALID_PREFIXES: [&str; 4] = ["feature/", "feat/", "bug/", "fix/"];

/// Why a pull request cannot be added to a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The pull request is not based on `master`.
    BaseNotMaster,
    /// The source branch lacks a valid prefix.
    InvalidBranchName,
    /// At least one reported status check is not passing.
    ChecksFailing,
}

impl Rejection {
    /// Reply posted on the pull request, addressed to the commenter.
    #[must_use]
    pub fn message(self, comment: &Comment) -> String {
        let mention = comment.mention();
        match self {
            Self::BaseNotMaster => format!(
                "{mention} Only Pull Requests based off of `master` can be merged into a release. \
                 Please merge this Pull Request and then add the base branch to the release."
            ),
            Self::InvalidBranchName => format!(
                "{mention} Pull Request branches must start with `feature/`, `feat/`, `bug/` or `fix/`. \
                 Please recreate this Pull Request with a valid branch name."
            ),
            Self::ChecksFailing => format!(
                "{mention} Not all status checks are passing. Ensure they are before adding to a release."
            ),
        }
    }
}

/// Outcome of evaluating a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Release branches are not eligible; nothing happens.
    Ignore,
    /// Rejected; the reason has been posted as a comment.
    Reject(Rejection),
    Proceed,
}

/// Checks that run without any I/O, in order. `None` means the status
/// still has to be checked.
#[must_use]
pub fn check_branches(branch: &str, base_ref: &str) -> Option<Decision> {
    if branch.starts_with(RELEASE_PREFIX) {
        return Some(Decision::Ignore);
    }
    if base_ref != MASTER {
        return Some(Decision::Reject(Rejection::BaseNotMaster));
    }
    if !VALID_PREFIXES.iter().any(|prefix| branch.contains(prefix)) {
        return Some(Decision::Reject(Rejection::InvalidBranchName));
    }
    None
}

/// Status check. A repository with no checks configured passes.
#[must_use]
pub fn check_status(status: &CombinedStatus, skip_status_checks: bool) -> Option<Rejection> {
    if !skip_status_checks && !status.is_success() && status.has_checks() {
        Some(Rejection::ChecksFailing)
    } else {
        None
    }
}

/// Decides whether an "add to release" request may proceed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleaseGate;

impl ReleaseGate {
    /// Evaluate `pr`, posting exactly one comment when it is rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the status cannot be fetched (no comment is
    /// posted then) or the rejection comment cannot be posted.
    pub async fn evaluate(
        &self,
        pr: &dyn PullRequestHandle,
        comment: &Comment,
        skip_status_checks: bool,
    ) -> Result<Decision, Error> {
        let decision = match check_branches(pr.branch(), pr.base_ref()) {
            Some(decision) => decision,
            None => {
                let status = pr.current_status().await?;
                match check_status(&status, skip_status_checks) {
                    Some(rejection) => Decision::Reject(rejection),
                    None => Decision::Proceed,
                }
            }
        };

        match decision {
            Decision::Ignore => {
                debug!(branch = pr.branch(), "ignoring release branch");
            }
            Decision::Reject(rejection) => {
                warn!(
                    repo = %format!("{}/{}", pr.owner(), pr.repo()),
                    branch = pr.branch(),
                    ?rejection,
                    "pull request rejected from release"
                );
                pr.add_comment(&rejection.message(comment)).await?;
            }
            Decision::Proceed => {}
        }

        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CommitStatus, StatusState};

    fn status(state: StatusState, checks: usize) -> CombinedStatus {
        CombinedStatus {
            state,
            statuses: (0..checks)
                .map(|i| CommitStatus {
                    state,
                    context: format!("ci/{i}"),
                    description: None,
                    target_url: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_release_branch_ignored_before_anything_else() {
        assert_eq!(check_branches("release/2024-01-01", "develop"), Some(Decision::Ignore));
        assert_eq!(check_branches("release/feature/x", "master"), Some(Decision::Ignore));
    }

    #[test]
    fn test_release_prefix_is_anchored() {
        assert_eq!(
            check_branches("feature/release/x", "master"),
            None,
            "release/ only short-circuits at position 0"
        );
    }

    #[test]
    fn test_base_must_be_master() {
        assert_eq!(
            check_branches("feature/x", "develop"),
            Some(Decision::Reject(Rejection::BaseNotMaster))
        );
        assert_eq!(
            check_branches("no-prefix", "main"),
            Some(Decision::Reject(Rejection::BaseNotMaster))
        );
    }

    #[test]
    fn test_prefix_is_substring_match() {
        for branch in ["feature/x", "feat/x", "bug/x", "fix/x", "dom/fix/x"] {
            assert_eq!(check_branches(branch, "master"), None, "{branch}");
        }
        assert_eq!(
            check_branches("hotfix-1", "master"),
            Some(Decision::Reject(Rejection::InvalidBranchName))
        );
    }

    #[test]
    fn test_status_matrix() {
        assert_eq!(check_status(&status(StatusState::Success, 0), false), None);
        assert_eq!(check_status(&status(StatusState::Success, 3), false), None);
        assert_eq!(check_status(&status(StatusState::Pending, 0), false), None);
        assert_eq!(
            check_status(&status(StatusState::Failure, 1), false),
            Some(Rejection::ChecksFailing)
        );
        assert_eq!(
            check_status(&status(StatusState::Pending, 2), false),
            Some(Rejection::ChecksFailing)
        );
        assert_eq!(check_status(&status(StatusState::Failure, 1), true), None);
    }

    #[test]
    fn test_messages_mention_author() {
        let comment = Comment::new("bob", "add to release");

        let base = Rejection::BaseNotMaster.message(&comment);
        assert!(base.starts_with("@bob "));
        assert!(base.contains("master"));

        let prefix = Rejection::InvalidBranchName.message(&comment);
        assert!(prefix.starts_with("@bob "));
        assert!(prefix.contains("recreate"));

        let checks = Rejection::ChecksFailing.message(&comment);
        assert!(checks.contains("Not all status checks are passing"));
    }
}
