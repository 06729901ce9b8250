//! Git Data API models: refs, trees, commits and contents.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Prefix of branch refs.
pub const HEADS_PREFIX: &str = "refs/heads/";
/// Prefix of tag refs.
pub const TAGS_PREFIX: &str = "refs/tags/";
/// Prefix of pull request refs.
pub const PULL_PREFIX: &str = "refs/pull/";

/// File mode for a regular, non-executable file.
pub const BLOB_MODE: &str = "100644";
/// Tree entry type for file content.
pub const BLOB_TYPE: &str = "blob";

/// Object a reference points at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitObject {
    pub sha: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// A reference as returned by the refs endpoints.
///
/// Some list entries come back without an object, so it is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "ref")]
    pub name: String,
    #[serde(default)]
    pub object: Option<GitObject>,
}

impl Reference {
    /// Sha the reference points at, if reported.
    #[must_use]
    pub fn sha(&self) -> Option<&str> {
        self.object.as_ref().map(|o| o.sha.as_str())
    }

    /// Classify the reference by prefix.
    #[must_use]
    pub fn kind(&self) -> RefKind<'_> {
        if let Some(name) = self.name.strip_prefix(HEADS_PREFIX) {
            RefKind::Branch(name)
        } else if let Some(name) = self.name.strip_prefix(TAGS_PREFIX) {
            RefKind::Tag(name)
        } else if self.name.starts_with(PULL_PREFIX) {
            RefKind::Pull
        } else {
            RefKind::Other
        }
    }
}

/// Reference namespaces the bot distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind<'a> {
    Branch(&'a str),
    Tag(&'a str),
    Pull,
    Other,
}

/// A branch head scoped to its repository.
///
/// Invariant: `reference == "refs/heads/" + name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    #[serde(rename = "ref")]
    pub reference: String,
    pub head_sha: String,
    pub owner: String,
    pub repo: String,
}

impl Branch {
    /// Build a branch from its short name.
    #[must_use]
    pub fn new(name: &str, head_sha: &str, owner: &str, repo: &str) -> Self {
        Self {
            reference: format!("{HEADS_PREFIX}{name}"),
            head_sha: head_sha.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }

    /// Build a branch from a refs endpoint response.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if the reference is not a branch head or
    /// carries no object.
    pub fn from_reference(reference: &Reference, owner: &str, repo: &str) -> Result<Self, Error> {
        let RefKind::Branch(name) = reference.kind() else {
            return Err(Error::Validation(format!("{} is not a branch ref", reference.name)));
        };
        let sha = reference
            .sha()
            .ok_or_else(|| Error::Validation(format!("{} has no target object", reference.name)))?;

        Ok(Self::new(name, sha, owner, repo))
    }

    /// Short branch name (without `refs/heads/`).
    #[must_use]
    pub fn name(&self) -> &str {
        self.reference.strip_prefix(HEADS_PREFIX).unwrap_or(&self.reference)
    }
}

/// A lightweight tag.
///
/// Invariant: `reference == "refs/tags/" + name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "ref")]
    pub reference: String,
    pub sha: String,
}

impl Tag {
    #[must_use]
    pub fn new(name: &str, sha: &str) -> Self {
        Self {
            reference: format!("{TAGS_PREFIX}{name}"),
            sha: sha.to_string(),
        }
    }

    /// Short tag name (without `refs/tags/`).
    #[must_use]
    pub fn name(&self) -> &str {
        self.reference.strip_prefix(TAGS_PREFIX).unwrap_or(&self.reference)
    }
}

/// Entry of the repository tags listing.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoTag {
    pub name: String,
    pub commit: CommitRef,
}

impl From<RepoTag> for Tag {
    fn from(tag: RepoTag) -> Self {
        Self::new(&tag.name, &tag.commit.sha)
    }
}

/// Bare `{ sha }` pointer used by several responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRef {
    pub sha: String,
}

/// Request body for creating a reference.
#[derive(Debug, Clone, Serialize)]
pub struct NewReference<'a> {
    #[serde(rename = "ref")]
    pub name: String,
    pub sha: &'a str,
}

/// Request body for moving a reference.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceUpdate<'a> {
    pub sha: &'a str,
}

/// A file written into a new tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    pub content: String,
    pub mode: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FileEntry {
    /// A regular `100644` blob entry.
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            mode: BLOB_MODE.to_string(),
            kind: BLOB_TYPE.to_string(),
        }
    }
}

/// Request body for creating a tree on top of a base tree.
#[derive(Debug, Clone, Serialize)]
pub struct NewTree<'a> {
    pub base_tree: &'a str,
    pub tree: &'a [FileEntry],
}

/// Request body for creating a commit object.
#[derive(Debug, Clone, Serialize)]
pub struct NewCommit<'a> {
    pub message: &'a str,
    pub tree: &'a str,
    pub parents: Vec<&'a str>,
}

/// Result of comparing two commits.
#[derive(Debug, Clone, Deserialize)]
pub struct Comparison {
    pub ahead_by: u64,
    #[serde(default)]
    pub behind_by: u64,
    #[serde(default)]
    pub status: Option<String>,
}

/// Decoded file content together with its blob sha.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContents {
    pub content: String,
    pub sha: String,
}

/// Raw contents endpoint payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentsPayload {
    pub content: String,
    pub sha: String,
}

/// Request body for the contents write endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ContentsWrite<'a> {
    pub message: &'a str,
    pub content: String,
    pub branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<&'a str>,
}

/// Response of the contents write endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentsWriteResult {
    pub commit: CommitRef,
}
