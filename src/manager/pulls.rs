//! Pull requests, issue comments and commit statuses.

use std::collections::HashMap;

use tracing::info;

use super::{require, RepositoryManager};
use crate::error::Error;
use crate::types::pulls::{NewComment, NewPull};
use crate::types::{CombinedStatus, Issue, PullRequest};

/// Base branch releases are cut from and merged back into.
pub const MASTER: &str = "master";

impl RepositoryManager {
    /// List open pull requests against `master`, each with its issue labels.
    ///
    /// # Errors
    ///
    /// Returns an error if either listing fails.
    pub async fn get_open_pulls(&self) -> Result<Vec<PullRequest>, Error> {
        let issues_path = self.path("/issues");
        let pulls_path = self.path("/pulls");

        let (issues, pulls) = tokio::try_join!(
            self.transport
                .get_paginated::<Issue>(&issues_path, &[("state", "open")]),
            self.transport
                .get_paginated::<PullRequest>(&pulls_path, &[("state", "open"), ("base", MASTER)]),
        )?;

        let mut labels: HashMap<u64, Vec<String>> = issues
            .iter()
            .map(|issue| (issue.number, issue.label_names()))
            .collect();

        Ok(pulls
            .into_iter()
            .map(|mut pull| {
                pull.labels = labels.remove(&pull.number).unwrap_or_default();
                pull
            })
            .collect())
    }

    /// Fetch one pull request with its issue labels.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the pull request does not exist.
    pub async fn get_pull(&self, number: u64) -> Result<PullRequest, Error> {
        let mut pull: PullRequest = self
            .transport
            .request("GET", &self.path(&format!("/pulls/{number}")), None, None::<&()>)
            .await?;

        let issue: Issue = self
            .transport
            .request("GET", &self.path(&format!("/issues/{number}")), None, None::<&()>)
            .await?;

        pull.labels = issue.label_names();
        Ok(pull)
    }

    /// Open a pull request. `base` defaults to `master`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` for an empty title or head branch.
    pub async fn create_pull(
        &self,
        title: &str,
        body: &str,
        head: &str,
        base: Option<&str>,
    ) -> Result<PullRequest, Error> {
        require(title, "pull request title")?;
        require(head, "head branch")?;

        let request = NewPull {
            title,
            body,
            head,
            base: base.unwrap_or(MASTER),
        };

        let pull: PullRequest = self
            .transport
            .request("POST", &self.path("/pulls"), None, Some(&request))
            .await?;

        info!(repo = %self.full_name(), number = pull.number, head, "pull request opened");
        Ok(pull)
    }

    /// Post a comment on a pull request (pull requests are issues).
    ///
    /// # Errors
    ///
    /// Returns an error if the comment cannot be created.
    pub async fn add_comment(&self, number: u64, body: &str) -> Result<(), Error> {
        require(body, "comment body")?;

        let _: serde_json::Value = self
            .transport
            .request(
                "POST",
                &self.path(&format!("/issues/{number}/comments")),
                None,
                Some(&NewComment { body }),
            )
            .await?;

        Ok(())
    }

    /// Combined status for a commit.
    ///
    /// # Errors
    ///
    /// Returns an error if the status cannot be fetched.
    pub async fn get_combined_status(&self, sha: &str) -> Result<CombinedStatus, Error> {
        require(sha, "commit sha")?;

        self.transport
            .request("GET", &self.path(&format!("/commits/{sha}/status")), None, None::<&()>)
            .await
    }
}
