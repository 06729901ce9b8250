//! Pull request and issue models.

use serde::{Deserialize, Serialize};

/// Account reference (`user`, `owner`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub login: String,
}

/// Repository reference embedded in pull request branches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoRef {
    pub name: String,
    pub owner: Account,
}

/// One side (head or base) of a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullBranch {
    #[serde(rename = "ref")]
    pub name: String,
    pub sha: String,
    #[serde(default)]
    pub repo: Option<RepoRef>,
}

/// Pull request information.
///
/// `labels` is not part of the pulls payload; it is filled in from the
/// matching issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub state: String,
    #[serde(default)]
    pub html_url: Option<String>,
    pub user: Account,
    pub head: PullBranch,
    pub base: PullBranch,
    #[serde(skip_deserializing, default)]
    pub labels: Vec<String>,
}

impl PullRequest {
    /// Source branch name.
    #[must_use]
    pub fn branch(&self) -> &str {
        &self.head.name
    }

    /// Base branch name.
    #[must_use]
    pub fn base_ref(&self) -> &str {
        &self.base.name
    }

    #[must_use]
    pub fn head_sha(&self) -> &str {
        &self.head.sha
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.user.login
    }

    /// Owner of the repository the pull request targets.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.base.repo.as_ref().map(|r| r.owner.login.as_str())
    }

    /// Name of the repository the pull request targets.
    #[must_use]
    pub fn repo(&self) -> Option<&str> {
        self.base.repo.as_ref().map(|r| r.name.as_str())
    }

    #[must_use]
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l == name)
    }
}

/// Request body for opening a pull request.
#[derive(Debug, Clone, Serialize)]
pub struct NewPull<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub head: &'a str,
    pub base: &'a str,
}

/// Label as attached to an issue.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueLabel {
    pub name: String,
}

/// The slice of an issue the bot needs: its number and labels.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub number: u64,
    #[serde(default)]
    pub labels: Vec<IssueLabel>,
}

impl Issue {
    #[must_use]
    pub fn label_names(&self) -> Vec<String> {
        self.labels.iter().map(|l| l.name.clone()).collect()
    }
}

/// Request body for posting an issue comment.
#[derive(Debug, Clone, Serialize)]
pub struct NewComment<'a> {
    pub body: &'a str,
}

/// The comment that triggered an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Handle of the commenter (without `@`)
    pub author: String,
    pub body: String,
}

impl Comment {
    #[must_use]
    pub fn new(author: &str, body: &str) -> Self {
        Self {
            author: author.to_string(),
            body: body.to_string(),
        }
    }

    /// `@author` mention used to address replies.
    #[must_use]
    pub fn mention(&self) -> String {
        format!("@{}", self.author)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PULL_JSON: &str = r#"{
        "number": 11,
        "title": "Add feature",
        "body": null,
        "state": "open",
        "html_url": "https://github.com/microadam/exso-test/pull/11",
        "user": {"login": "microadam"},
        "head": {"ref": "feature/test", "sha": "def456", "repo": {"name": "exso-test", "owner": {"login": "microadam"}}},
        "base": {"ref": "master", "sha": "abc123", "repo": {"name": "exso-test", "owner": {"login": "microadam"}}},
        "labels": [{"name": "ignored-here"}]
    }"#;

    #[test]
    fn test_pull_request_deserialize() {
        let pr: PullRequest = serde_json::from_str(PULL_JSON).expect("Should deserialize");
        assert_eq!(pr.number, 11);
        assert_eq!(pr.branch(), "feature/test");
        assert_eq!(pr.base_ref(), "master");
        assert_eq!(pr.head_sha(), "def456");
        assert_eq!(pr.author(), "microadam");
        assert_eq!(pr.owner(), Some("microadam"));
        assert_eq!(pr.repo(), Some("exso-test"));
        assert!(pr.labels.is_empty());
    }

    #[test]
    fn test_issue_label_names() {
        let issue: Issue =
            serde_json::from_str(r#"{"number": 11, "labels": [{"name": "my-label", "color": "fff"}]}"#)
                .expect("Should deserialize");
        assert_eq!(issue.label_names(), vec!["my-label".to_string()]);
    }

    #[test]
    fn test_comment_mention() {
        assert_eq!(Comment::new("dom", "add to release").mention(), "@dom");
    }
}
