//! Data model types.

pub mod git;
pub mod hooks;
pub mod labels;
pub mod pulls;
pub mod status;

// Re-exports
pub use git::{
    Branch, Comparison, FileContents, FileEntry, GitObject, RefKind, Reference, Tag, BLOB_MODE,
    BLOB_TYPE,
};
pub use hooks::{Hook, HookConfig, NewHook, HOOK_EVENTS};
pub use labels::{Label, LabelCatalog, REQUIRED_LABELS};
pub use pulls::{Account, Comment, Issue, PullBranch, PullRequest, RepoRef};
pub use status::{CombinedStatus, CommitStatus, StatusState};
