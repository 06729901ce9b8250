//! Release flow tests: gate decisions, routing and the orchestrated handler.

use std::sync::Arc;
use std::time::Duration;

use release_bot::testing::{MockPullRequest, MockResponse, MockStrategies};
use release_bot::types::{CombinedStatus, CommitStatus, StatusState};
use release_bot::{
    AddToRelease, ApiError, BotClient, Comment, Decision, HookSettings, Rejection, ReleaseGate,
    ReleaseKind, ReleaseOutcome, ReleaseRouter, ReleaseTarget, RepositoryManager,
};

fn comment() -> Comment {
    Comment::new("dom", "@release-bot add to release")
}

fn status(state: StatusState, checks: usize) -> CombinedStatus {
    CombinedStatus {
        state,
        statuses: (0..checks)
            .map(|i| CommitStatus {
                state,
                context: format!("ci/check-{i}"),
                description: None,
                target_url: None,
            })
            .collect(),
    }
}

fn client(api_url: &str) -> Arc<BotClient> {
    Arc::new(
        BotClient::with_transport(
            api_url,
            "test",
            Duration::from_secs(5),
            HookSettings {
                url: "http://my.site/github/webhook".to_string(),
                secret: "test".to_string(),
            },
        )
        .expect("client creation should succeed"),
    )
}

fn router(strategies: &Arc<MockStrategies>) -> ReleaseRouter {
    ReleaseRouter::new(strategies.clone(), strategies.clone())
}

mod gate {
    use super::*;

    #[tokio::test]
    async fn test_release_branch_is_ignored() {
        let pr = MockPullRequest::new("release/2024-01-01", "develop");

        let decision = ReleaseGate.evaluate(&pr, &comment(), false).await.unwrap();

        assert_eq!(decision, Decision::Ignore);
        assert!(pr.comments().is_empty());
        assert!(!pr.log().was_called("pr.current_status"));
    }

    #[tokio::test]
    async fn test_base_not_master_rejected_once() {
        let pr = MockPullRequest::new("feature/x", "develop");

        let decision = ReleaseGate.evaluate(&pr, &comment(), false).await.unwrap();

        assert_eq!(decision, Decision::Reject(Rejection::BaseNotMaster));
        let comments = pr.comments();
        assert_eq!(comments.len(), 1);
        assert!(comments[0].contains("@dom"));
        assert!(comments[0].contains("master"));
        assert!(!pr.log().was_called("pr.current_status"));
    }

    #[tokio::test]
    async fn test_invalid_branch_name_rejected_once() {
        let pr = MockPullRequest::new("my-change", "master");

        let decision = ReleaseGate.evaluate(&pr, &comment(), false).await.unwrap();

        assert_eq!(decision, Decision::Reject(Rejection::InvalidBranchName));
        let comments = pr.comments();
        assert_eq!(comments.len(), 1);
        assert!(comments[0].starts_with("@dom "));
        assert!(comments[0].contains("recreate"));
    }

    #[tokio::test]
    async fn test_prefix_matches_anywhere_in_branch() {
        let pr = MockPullRequest::new("dom/fix/typo", "master");

        let decision = ReleaseGate.evaluate(&pr, &comment(), false).await.unwrap();

        assert_eq!(decision, Decision::Proceed);
        assert!(pr.comments().is_empty());
    }

    #[tokio::test]
    async fn test_failing_checks_rejected() {
        let pr = MockPullRequest::new("feature/x", "master");
        pr.configure_status(MockResponse::with_data(status(StatusState::Failure, 2)));

        let decision = ReleaseGate.evaluate(&pr, &comment(), false).await.unwrap();

        assert_eq!(decision, Decision::Reject(Rejection::ChecksFailing));
        assert_eq!(pr.comments().len(), 1);
        assert!(pr.comments()[0].contains("status checks"));
    }

    #[tokio::test]
    async fn test_pending_without_checks_proceeds() {
        let pr = MockPullRequest::new("feature/x", "master");
        pr.configure_status(MockResponse::with_data(status(StatusState::Pending, 0)));

        let decision = ReleaseGate.evaluate(&pr, &comment(), false).await.unwrap();

        assert_eq!(decision, Decision::Proceed);
        assert!(pr.comments().is_empty());
    }

    #[tokio::test]
    async fn test_skip_status_checks() {
        let pr = MockPullRequest::new("bug/x", "master");
        pr.configure_status(MockResponse::with_data(status(StatusState::Failure, 3)));

        let decision = ReleaseGate.evaluate(&pr, &comment(), true).await.unwrap();

        assert_eq!(decision, Decision::Proceed);
        assert!(pr.comments().is_empty());
    }

    #[tokio::test]
    async fn test_status_failure_propagates_without_comment() {
        let pr = MockPullRequest::new("feature/x", "master");
        pr.configure_status(MockResponse::with_error(ApiError::Server {
            message: "Service Unavailable".to_string(),
            request_id: None,
        }));

        let err = ReleaseGate.evaluate(&pr, &comment(), false).await.unwrap_err();

        assert!(err.is_transient());
        assert!(pr.comments().is_empty());
    }
}

mod router {
    use super::*;

    fn manager() -> RepositoryManager {
        client("http://127.0.0.1:9").repository("microadam", "exso-test")
    }

    #[tokio::test]
    async fn test_next_release_creates() {
        let strategies = MockStrategies::new();
        let pr = MockPullRequest::new("feature/x", "master");

        let kind = router(&strategies)
            .route(&ReleaseTarget::Next, &pr, &comment(), &manager())
            .await
            .unwrap();

        assert_eq!(kind, ReleaseKind::New);
        let calls = strategies.log().get_calls(Some("strategy.create"));
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].args[0], "None");
        assert_eq!(calls[0].args[3], "microadam/exso-test");
        assert!(!strategies.log().was_called("strategy.append"));
    }

    #[tokio::test]
    async fn test_named_release_creates_with_name() {
        let strategies = MockStrategies::new();
        let pr = MockPullRequest::new("feature/x", "master");

        let kind = router(&strategies)
            .route(&ReleaseTarget::Named("spring".to_string()), &pr, &comment(), &manager())
            .await
            .unwrap();

        assert_eq!(kind, ReleaseKind::New);
        let calls = strategies.log().get_calls(Some("strategy.create"));
        assert_eq!(calls[0].args[0], "Some(\"spring\")");
    }

    #[tokio::test]
    async fn test_existing_release_appends() {
        let strategies = MockStrategies::new();
        let pr = MockPullRequest::new("feature/x", "master");

        let kind = router(&strategies)
            .route(&ReleaseTarget::Existing(42), &pr, &comment(), &manager())
            .await
            .unwrap();

        assert_eq!(kind, ReleaseKind::Existing);
        let calls = strategies.log().get_calls(Some("strategy.append"));
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].args[0], "42");
        assert!(!strategies.log().was_called("strategy.create"));
    }

    #[tokio::test]
    async fn test_strategy_error_propagates() {
        let strategies = MockStrategies::new();
        strategies.configure_append(MockResponse::with_error(ApiError::Conflict {
            message: "Merge conflict".to_string(),
            request_id: None,
        }));
        let pr = MockPullRequest::new("feature/x", "master");

        let err = router(&strategies)
            .route(&ReleaseTarget::parse(Some("#7")), &pr, &comment(), &manager())
            .await
            .unwrap_err();

        assert!(err.is_conflict());
    }
}

mod add_to_release {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use release_bot::RemotePullRequest;

    use super::*;

    #[tokio::test]
    async fn test_approved_request_is_routed_to_pr_repository() {
        let strategies = MockStrategies::new();
        let handler = AddToRelease::new(client("http://127.0.0.1:9"), router(&strategies));
        let pr = MockPullRequest::new("feature/x", "master").in_repo("acme", "web");

        let outcome = handler
            .handle(&pr, &comment(), &ReleaseTarget::Next, false)
            .await
            .unwrap();

        assert_eq!(outcome, ReleaseOutcome::Routed(ReleaseKind::New));
        let calls = strategies.log().get_calls(Some("strategy.create"));
        assert_eq!(calls[0].args[3], "acme/web");
    }

    #[tokio::test]
    async fn test_rejected_request_is_not_routed() {
        let strategies = MockStrategies::new();
        let handler = AddToRelease::new(client("http://127.0.0.1:9"), router(&strategies));
        let pr = MockPullRequest::new("hotfix", "master");

        let outcome = handler
            .handle(&pr, &comment(), &ReleaseTarget::Existing(3), false)
            .await
            .unwrap();

        assert_eq!(outcome, ReleaseOutcome::Rejected(Rejection::InvalidBranchName));
        assert!(strategies.log().get_calls(None).is_empty());
    }

    #[tokio::test]
    async fn test_release_branch_is_ignored() {
        let strategies = MockStrategies::new();
        let handler = AddToRelease::new(client("http://127.0.0.1:9"), router(&strategies));
        let pr = MockPullRequest::new("release/next", "master");

        let outcome = handler
            .handle(&pr, &comment(), &ReleaseTarget::Next, false)
            .await
            .unwrap();

        assert_eq!(outcome, ReleaseOutcome::Ignored);
        assert!(pr.comments().is_empty());
        assert!(strategies.log().get_calls(None).is_empty());
    }

    #[tokio::test]
    async fn test_remote_pull_request_rejection_posts_comment() {
        let server = MockServer::start().await;
        let repo = json!({ "name": "exso-test", "owner": { "login": "microadam" } });

        Mock::given(method("GET"))
            .and(path("/repos/microadam/exso-test/pulls/11"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "number": 11,
                "title": "Thing",
                "state": "open",
                "user": { "login": "microadam" },
                "head": { "ref": "feature/thing", "sha": "def456", "repo": repo },
                "base": { "ref": "master", "sha": "abc123", "repo": repo }
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/repos/microadam/exso-test/issues/11"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "number": 11, "labels": [] })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/repos/microadam/exso-test/commits/def456/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "state": "failure",
                "statuses": [ { "state": "failure", "context": "ci/test" } ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/repos/microadam/exso-test/issues/11/comments"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 1 })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server.uri());
        let manager = client.repository("microadam", "exso-test");
        let pull = manager.get_pull(11).await.expect("Should fetch pull");
        let pr = RemotePullRequest::new(pull, manager).expect("Should bind pull request");

        let strategies = MockStrategies::new();
        let handler = AddToRelease::new(client, router(&strategies));
        let outcome = handler
            .handle(&pr, &comment(), &ReleaseTarget::Next, false)
            .await
            .unwrap();

        assert_eq!(outcome, ReleaseOutcome::Rejected(Rejection::ChecksFailing));
        assert!(strategies.log().get_calls(None).is_empty());
    }

    #[tokio::test]
    async fn test_remote_pull_request_from_other_repository() {
        let server = MockServer::start().await;
        let repo = json!({ "name": "other", "owner": { "login": "someone" } });

        Mock::given(method("GET"))
            .and(path("/repos/microadam/exso-test/pulls/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "number": 5,
                "title": "Thing",
                "state": "open",
                "user": { "login": "someone" },
                "head": { "ref": "feature/thing", "sha": "def456", "repo": repo },
                "base": { "ref": "master", "sha": "abc123", "repo": repo }
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/repos/microadam/exso-test/issues/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "number": 5 })))
            .mount(&server)
            .await;

        let manager = client(&server.uri()).repository("microadam", "exso-test");
        let pull = manager.get_pull(5).await.expect("Should fetch pull");

        assert!(RemotePullRequest::new(pull, manager).is_err());
    }
}
