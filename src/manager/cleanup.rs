//! Deleting branches that master already contains.

use futures::future::try_join_all;
use tracing::{debug, warn};

use super::pulls::MASTER;
use super::RepositoryManager;
use crate::error::Error;
use crate::types::{RefKind, Reference};

impl RepositoryManager {
    /// Delete every branch with nothing to add to master.
    ///
    /// Each head other than `master` is compared as `master...branch`; only
    /// branches with `ahead_by == 0` are deleted. Tags, pull refs and any
    /// other namespaces are left alone. Comparisons run concurrently and all
    /// of them finish before anything is deleted.
    ///
    /// Returns the names of the deleted branches.
    ///
    /// # Errors
    ///
    /// Returns the first listing, comparison or deletion failure.
    pub async fn cleanup_branches(&self) -> Result<Vec<String>, Error> {
        let refs: Vec<Reference> = self.transport.get_paginated(&self.path("/git/refs"), &[]).await?;

        let mut master_sha = None;
        let mut heads = Vec::new();
        for reference in &refs {
            if let RefKind::Branch(name) = reference.kind() {
                match (name, reference.sha()) {
                    (MASTER, Some(sha)) => master_sha = Some(sha),
                    (_, Some(sha)) => heads.push((name, sha)),
                    (_, None) => debug!(reference = %reference.name, "skipping ref without object"),
                }
            }
        }

        let Some(master_sha) = master_sha else {
            warn!(repo = %self.full_name(), "no master branch found, skipping cleanup");
            return Ok(Vec::new());
        };

        let comparisons = try_join_all(heads.iter().map(|(name, sha)| async move {
            let comparison = self.compare(master_sha, sha).await?;
            Ok::<_, Error>((*name, comparison.ahead_by))
        }))
        .await?;

        let merged: Vec<&str> = comparisons
            .into_iter()
            .filter(|(_, ahead_by)| *ahead_by == 0)
            .map(|(name, _)| name)
            .collect();

        try_join_all(merged.iter().map(|name| self.delete_branch(name))).await?;

        Ok(merged.into_iter().map(String::from).collect())
    }
}
