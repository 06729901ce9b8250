//! Branches, tags, commits and comparisons.

use serde_json::Value;
use tracing::info;

use super::{require, RepositoryManager};
use crate::error::Error;
use crate::transport::encode_segment;
use crate::types::git::{NewReference, RepoTag, HEADS_PREFIX, TAGS_PREFIX};
use crate::types::{Branch, Comparison, Reference, Tag};

impl RepositoryManager {
    /// Path of a single ref, with the ref name escaped into one segment.
    pub(super) fn ref_path(&self, short_ref: &str) -> String {
        self.path(&format!("/git/refs/{}", encode_segment(short_ref)))
    }

    /// Look up a branch by name.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the branch does not exist.
    pub async fn get_branch(&self, name: &str) -> Result<Branch, Error> {
        require(name, "branch name")?;

        let reference: Reference = self
            .transport
            .request("GET", &self.ref_path(&format!("heads/{name}")), None, None::<&()>)
            .await?;

        Branch::from_reference(&reference, &self.owner, &self.repo)
    }

    /// Create `refs/heads/<name>` pointing at `sha`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ref already exists or `sha` is unknown.
    pub async fn create_branch(&self, name: &str, sha: &str) -> Result<Branch, Error> {
        require(name, "branch name")?;
        require(sha, "commit sha")?;

        let body = NewReference {
            name: format!("{HEADS_PREFIX}{name}"),
            sha,
        };
        let reference: Reference = self
            .transport
            .request("POST", &self.path("/git/refs"), None, Some(&body))
            .await?;

        let branch = Branch::from_reference(&reference, &self.owner, &self.repo)?;
        info!(repo = %self.full_name(), branch = branch.name(), sha = %branch.head_sha, "branch created");
        Ok(branch)
    }

    /// Delete a branch ref.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the branch does not exist.
    pub async fn delete_branch(&self, name: &str) -> Result<(), Error> {
        require(name, "branch name")?;

        let _: Value = self
            .transport
            .request("DELETE", &self.ref_path(&format!("heads/{name}")), None, None::<&()>)
            .await?;

        info!(repo = %self.full_name(), branch = name, "branch deleted");
        Ok(())
    }

    /// List the repository's tags.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fails.
    pub async fn get_tags(&self) -> Result<Vec<Tag>, Error> {
        let tags: Vec<RepoTag> = self.transport.get_paginated(&self.path("/tags"), &[]).await?;
        Ok(tags.into_iter().map(Tag::from).collect())
    }

    /// Raw commit object.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the commit does not exist.
    pub async fn get_commit(&self, sha: &str) -> Result<Value, Error> {
        require(sha, "commit sha")?;

        self.transport
            .request("GET", &self.path(&format!("/git/commits/{sha}")), None, None::<&()>)
            .await
    }

    /// Create a lightweight tag `refs/tags/<name>` at `sha`.
    ///
    /// No annotated tag object is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag already exists.
    pub async fn create_tag(&self, name: &str, sha: &str) -> Result<Tag, Error> {
        require(name, "tag name")?;
        require(sha, "commit sha")?;

        let body = NewReference {
            name: format!("{TAGS_PREFIX}{name}"),
            sha,
        };
        let reference: Reference = self
            .transport
            .request("POST", &self.path("/git/refs"), None, Some(&body))
            .await?;

        let tag = Tag::new(name, reference.sha().unwrap_or(sha));
        info!(repo = %self.full_name(), tag = name, sha = %tag.sha, "tag created");
        Ok(tag)
    }

    /// Compare `base...head`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if either side is unknown.
    pub async fn compare(&self, base: &str, head: &str) -> Result<Comparison, Error> {
        require(base, "base")?;
        require(head, "head")?;

        self.transport
            .request("GET", &self.path(&format!("/compare/{base}...{head}")), None, None::<&()>)
            .await
    }
}
