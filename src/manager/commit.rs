//! Multi-file commits through the Git Data API.
//!
//! Writing several files in one commit takes three dependent requests:
//! create a tree on top of the base commit, wrap it in a commit whose parent
//! is the base commit, then move the branch ref to the new commit. Each step
//! consumes the sha the previous one produced, so the ref can never point at
//! a commit the platform has not accepted. A failure stops the pipeline and
//! leaves any tree or commit already written unreferenced.

use serde_json::Value;
use tracing::{debug, info, warn};

use super::{require, RepositoryManager};
use crate::error::Error;
use crate::types::git::{CommitRef, NewCommit, NewTree, ReferenceUpdate};
use crate::types::FileEntry;

/// Input of [`RepositoryManager::update_files`].
#[derive(Debug, Clone)]
pub struct UpdateFilesOptions {
    /// Files to write, in order
    pub files: Vec<FileEntry>,
    pub commit_message: String,
    /// Commit the new tree and commit are based on
    pub base_sha: String,
    /// Branch to fast-forward to the new commit
    pub branch: String,
}

impl UpdateFilesOptions {
    fn validate(&self) -> Result<(), Error> {
        if self.files.is_empty() {
            return Err(Error::Validation("at least one file is required".to_string()));
        }
        for file in &self.files {
            require(&file.path, "file path")?;
        }
        require(&self.commit_message, "commit message")?;
        require(&self.base_sha, "base sha")?;
        require(&self.branch, "branch name")
    }
}

/// Request of the pipeline that was running when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Tree,
    Commit,
    Ref,
}

/// Progress of a multi-file commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    BuildingTree,
    BuildingCommit { tree_sha: String },
    UpdatingRef { commit_sha: String },
    Done { commit_sha: String },
    Failed { stage: Stage },
}

impl PipelineState {
    /// Stage the state is about to execute, if any.
    #[must_use]
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::BuildingTree => Some(Stage::Tree),
            Self::BuildingCommit { .. } => Some(Stage::Commit),
            Self::UpdatingRef { .. } => Some(Stage::Ref),
            Self::Done { .. } | Self::Failed { .. } => None,
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. } | Self::Failed { .. })
    }

    /// Transition after the current stage succeeded with `sha`.
    ///
    /// The ref update produces no new sha; it carries the commit through.
    #[must_use]
    pub fn advance(self, sha: String) -> Self {
        match self {
            Self::BuildingTree => Self::BuildingCommit { tree_sha: sha },
            Self::BuildingCommit { .. } => Self::UpdatingRef { commit_sha: sha },
            Self::UpdatingRef { commit_sha } => Self::Done { commit_sha },
            terminal => terminal,
        }
    }

    /// Transition after the current stage failed.
    #[must_use]
    pub fn fail(self) -> Self {
        match self.stage() {
            Some(stage) => Self::Failed { stage },
            None => self,
        }
    }
}

impl RepositoryManager {
    /// Write several files to `branch` in a single commit.
    ///
    /// Returns the sha of the new commit, which the branch now points at.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` for empty input, otherwise the error of
    /// the first request that failed.
    pub async fn update_files(&self, options: &UpdateFilesOptions) -> Result<String, Error> {
        options.validate()?;

        let mut state = PipelineState::BuildingTree;
        loop {
            if let PipelineState::Done { commit_sha } = &state {
                info!(
                    repo = %self.full_name(),
                    branch = %options.branch,
                    commit = %commit_sha,
                    files = options.files.len(),
                    "files committed"
                );
                return Ok(commit_sha.clone());
            }

            debug!(repo = %self.full_name(), state = ?state, "commit pipeline step");
            let result = self.run_stage(&state, options).await;
            match result {
                Ok(sha) => state = state.advance(sha),
                Err(e) => {
                    let failed = state.fail();
                    warn!(repo = %self.full_name(), branch = %options.branch, state = ?failed, error = %e, "commit pipeline failed");
                    return Err(e);
                }
            }
        }
    }

    async fn run_stage(&self, state: &PipelineState, options: &UpdateFilesOptions) -> Result<String, Error> {
        match state {
            PipelineState::BuildingTree => {
                let body = NewTree {
                    base_tree: &options.base_sha,
                    tree: &options.files,
                };
                let tree: CommitRef = self
                    .transport
                    .request("POST", &self.path("/git/trees"), None, Some(&body))
                    .await?;
                Ok(tree.sha)
            }
            PipelineState::BuildingCommit { tree_sha } => {
                let body = NewCommit {
                    message: &options.commit_message,
                    tree: tree_sha,
                    parents: vec![options.base_sha.as_str()],
                };
                let commit: CommitRef = self
                    .transport
                    .request("POST", &self.path("/git/commits"), None, Some(&body))
                    .await?;
                Ok(commit.sha)
            }
            PipelineState::UpdatingRef { commit_sha } => {
                let body = ReferenceUpdate { sha: commit_sha };
                let _: Value = self
                    .transport
                    .request(
                        "PATCH",
                        &self.ref_path(&format!("heads/{}", options.branch)),
                        None,
                        Some(&body),
                    )
                    .await?;
                Ok(commit_sha.clone())
            }
            PipelineState::Done { .. } | PipelineState::Failed { .. } => Err(Error::Validation(
                "commit pipeline already finished".to_string(),
            )),
        }
    }
}
