//! Commit status models.

use serde::{Deserialize, Serialize};

/// State of a combined status or an individual status check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    Success,
    Failure,
    Pending,
    Error,
}

/// One reported status check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitStatus {
    pub state: StatusState,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub target_url: Option<String>,
}

/// Aggregate CI result for a commit plus the individual checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedStatus {
    pub state: StatusState,
    #[serde(default)]
    pub statuses: Vec<CommitStatus>,
}

impl CombinedStatus {
    /// A combined status with no checks reported.
    #[must_use]
    pub fn empty(state: StatusState) -> Self {
        Self {
            state,
            statuses: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.state == StatusState::Success
    }

    /// Whether any status check has been configured and reported.
    #[must_use]
    pub fn has_checks(&self) -> bool {
        !self.statuses.is_empty()
    }
}
