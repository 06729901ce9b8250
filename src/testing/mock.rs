//! Mock collaborators for the release flow.
//!
//! `MockPullRequest` stands in for a pull request without touching the
//! platform, and `MockStrategies` records which release strategy ran.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{ApiError, Error};
use crate::manager::RepositoryManager;
use crate::release::{ExistingReleaseStrategy, NewReleaseStrategy, PullRequestHandle};
use crate::types::{CombinedStatus, Comment, StatusState};

/// Record of a method call.
#[derive(Debug, Clone)]
pub struct MockCall {
    /// Method name (e.g., "pr.add_comment", "strategy.create")
    pub method: String,
    /// Arguments passed to the method
    pub args: Vec<String>,
    /// Timestamp of the call
    pub timestamp: DateTime<Utc>,
}

impl MockCall {
    /// Create a new mock call record.
    pub fn new(method: &str, args: Vec<String>) -> Self {
        Self {
            method: method.to_string(),
            args,
            timestamp: Utc::now(),
        }
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub struct MockResponse<T: Clone> {
    /// The data to return
    pub data: Option<T>,
    /// Error to return instead of data
    pub error: Option<ApiError>,
    /// Number of times this response has been used
    pub call_count: u32,
}

impl<T: Clone> Default for MockResponse<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            call_count: 0,
        }
    }
}

impl<T: Clone> MockResponse<T> {
    /// Create a new mock response with data.
    pub fn with_data(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    /// Create a new mock response with an error.
    pub fn with_error(error: ApiError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Get the result, returning either the configured data or error.
    fn get_result(&mut self, default: T) -> Result<T, Error> {
        self.call_count += 1;
        if let Some(error) = &self.error {
            return Err(Error::Api(error.clone()));
        }
        Ok(self.data.clone().unwrap_or(default))
    }
}

/// Shared call log.
#[derive(Debug, Default, Clone)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl CallLog {
    fn record(&self, method: &str, args: Vec<String>) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(MockCall::new(method, args));
    }

    /// Check if a method was called.
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.call_count(method) > 0
    }

    /// Get the number of times a method was called.
    #[must_use]
    pub fn call_count(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|call| call.method == method)
            .count()
    }

    /// Get recorded calls, optionally filtered by method.
    #[must_use]
    pub fn get_calls(&self, method: Option<&str>) -> Vec<MockCall> {
        let calls = self.calls.lock().unwrap_or_else(|e| e.into_inner());
        match method {
            Some(m) => calls.iter().filter(|call| call.method == m).cloned().collect(),
            None => calls.clone(),
        }
    }

    /// Reset all recorded calls.
    pub fn reset(&self) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

/// In-memory pull request.
///
/// Defaults to a successful combined status with no checks.
pub struct MockPullRequest {
    branch: String,
    base_ref: String,
    owner: String,
    repo: String,
    status_response: Mutex<MockResponse<CombinedStatus>>,
    comment_response: Mutex<MockResponse<()>>,
    log: CallLog,
}

impl MockPullRequest {
    /// A pull request from `branch` into `base_ref` on `microadam/exso-test`.
    pub fn new(branch: &str, base_ref: &str) -> Self {
        Self {
            branch: branch.to_string(),
            base_ref: base_ref.to_string(),
            owner: "microadam".to_string(),
            repo: "exso-test".to_string(),
            status_response: Mutex::new(MockResponse::default()),
            comment_response: Mutex::new(MockResponse::default()),
            log: CallLog::default(),
        }
    }

    /// Place the pull request in another repository.
    #[must_use]
    pub fn in_repo(mut self, owner: &str, repo: &str) -> Self {
        self.owner = owner.to_string();
        self.repo = repo.to_string();
        self
    }

    /// Configure the response for current_status() calls.
    pub fn configure_status(&self, response: MockResponse<CombinedStatus>) {
        *self.status_response.lock().unwrap_or_else(|e| e.into_inner()) = response;
    }

    /// Configure the response for add_comment() calls.
    pub fn configure_comment(&self, response: MockResponse<()>) {
        *self.comment_response.lock().unwrap_or_else(|e| e.into_inner()) = response;
    }

    /// Bodies of every comment posted, in order.
    #[must_use]
    pub fn comments(&self) -> Vec<String> {
        self.log
            .get_calls(Some("pr.add_comment"))
            .into_iter()
            .filter_map(|call| call.args.into_iter().next())
            .collect()
    }

    #[must_use]
    pub fn log(&self) -> &CallLog {
        &self.log
    }
}

#[async_trait]
impl PullRequestHandle for MockPullRequest {
    fn branch(&self) -> &str {
        &self.branch
    }

    fn base_ref(&self) -> &str {
        &self.base_ref
    }

    fn owner(&self) -> &str {
        &self.owner
    }

    fn repo(&self) -> &str {
        &self.repo
    }

    async fn add_comment(&self, text: &str) -> Result<(), Error> {
        self.log.record("pr.add_comment", vec![text.to_string()]);
        self.comment_response
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_result(())
    }

    async fn current_status(&self) -> Result<CombinedStatus, Error> {
        self.log.record("pr.current_status", vec![]);
        self.status_response
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_result(CombinedStatus::empty(StatusState::Success))
    }
}

/// Release strategies that only record their invocations.
#[derive(Default)]
pub struct MockStrategies {
    create_response: Mutex<MockResponse<()>>,
    append_response: Mutex<MockResponse<()>>,
    log: CallLog,
}

impl MockStrategies {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Configure the response for create() calls.
    pub fn configure_create(&self, response: MockResponse<()>) {
        *self.create_response.lock().unwrap_or_else(|e| e.into_inner()) = response;
    }

    /// Configure the response for append() calls.
    pub fn configure_append(&self, response: MockResponse<()>) {
        *self.append_response.lock().unwrap_or_else(|e| e.into_inner()) = response;
    }

    #[must_use]
    pub fn log(&self) -> &CallLog {
        &self.log
    }
}

#[async_trait]
impl NewReleaseStrategy for MockStrategies {
    async fn create(
        &self,
        name: Option<&str>,
        pr: &dyn PullRequestHandle,
        comment: &Comment,
        manager: &RepositoryManager,
    ) -> Result<(), Error> {
        self.log.record("strategy.create", vec![
            format!("{name:?}"),
            pr.branch().to_string(),
            comment.author.clone(),
            manager.full_name(),
        ]);
        self.create_response
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_result(())
    }
}

#[async_trait]
impl ExistingReleaseStrategy for MockStrategies {
    async fn append(
        &self,
        release: u64,
        pr: &dyn PullRequestHandle,
        comment: &Comment,
        manager: &RepositoryManager,
    ) -> Result<(), Error> {
        self.log.record("strategy.append", vec![
            release.to_string(),
            pr.branch().to_string(),
            comment.author.clone(),
            manager.full_name(),
        ]);
        self.append_response
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_result(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_pull_request_defaults() {
        let pr = MockPullRequest::new("feature/x", "master");
        let status = pr.current_status().await.unwrap();

        assert_eq!(status.state, StatusState::Success);
        assert!(status.statuses.is_empty());
        assert_eq!(pr.owner(), "microadam");
        assert!(pr.log().was_called("pr.current_status"));
    }

    #[tokio::test]
    async fn test_mock_pull_request_records_comments() {
        let pr = MockPullRequest::new("feature/x", "master").in_repo("acme", "web");
        pr.add_comment("first").await.unwrap();
        pr.add_comment("second").await.unwrap();

        assert_eq!(pr.comments(), vec!["first".to_string(), "second".to_string()]);
        assert_eq!(pr.repo(), "web");

        pr.log().reset();
        assert!(pr.comments().is_empty());
    }

    #[tokio::test]
    async fn test_mock_pull_request_with_error() {
        let pr = MockPullRequest::new("feature/x", "master");
        pr.configure_status(MockResponse::with_error(ApiError::Server {
            message: "Bad Gateway".to_string(),
            request_id: None,
        }));

        let err = pr.current_status().await.unwrap_err();
        assert!(err.is_transient());
    }
}
