//! Property-based tests for the release gate and the blob codec.

use proptest::prelude::*;

use release_bot::release::gate::{check_branches, check_status, VALID_PREFIXES};
use release_bot::types::{CombinedStatus, CommitStatus, StatusState};
use release_bot::{BlobCodec, Decision, Rejection, MASTER};

/// Branch name fragments that cannot form a valid prefix on their own.
fn plain_segment() -> impl Strategy<Value = String> {
    "[a-z0-9\\-]{1,20}"
}

fn status_state() -> impl Strategy<Value = StatusState> {
    prop_oneof![
        Just(StatusState::Success),
        Just(StatusState::Failure),
        Just(StatusState::Pending),
        Just(StatusState::Error),
    ]
}

fn combined_status() -> impl Strategy<Value = CombinedStatus> {
    (status_state(), prop::collection::vec(status_state(), 0..5)).prop_map(|(state, checks)| {
        CombinedStatus {
            state,
            statuses: checks
                .into_iter()
                .enumerate()
                .map(|(i, state)| CommitStatus {
                    state,
                    context: format!("ci/{i}"),
                    description: None,
                    target_url: None,
                })
                .collect(),
        }
    })
}

proptest! {
    /// Release branches are ignored whatever their base.
    #[test]
    fn test_release_branches_always_ignored(rest in ".{0,30}", base in ".{0,20}") {
        let branch = format!("release/{rest}");
        prop_assert_eq!(check_branches(&branch, &base), Some(Decision::Ignore));
    }

    /// Any base other than master is rejected before the name is looked at.
    #[test]
    fn test_non_master_base_rejected(branch in plain_segment(), base in plain_segment()) {
        prop_assume!(base != MASTER);
        prop_assert_eq!(
            check_branches(&branch, &base),
            Some(Decision::Reject(Rejection::BaseNotMaster))
        );
    }

    /// Without a valid prefix anywhere, the branch is rejected.
    #[test]
    fn test_branch_without_prefix_rejected(branch in plain_segment()) {
        prop_assert_eq!(
            check_branches(&branch, MASTER),
            Some(Decision::Reject(Rejection::InvalidBranchName))
        );
    }

    /// A valid prefix at any position leaves the decision to the status check.
    #[test]
    fn test_prefixed_branch_reaches_status_check(
        lead in "[a-z]{0,8}",
        prefix in prop::sample::select(VALID_PREFIXES.to_vec()),
        rest in plain_segment(),
    ) {
        let branch = format!("{lead}{prefix}{rest}");
        prop_assume!(!branch.starts_with("release/"));
        prop_assert_eq!(check_branches(&branch, MASTER), None);
    }

    /// Rejected exactly when not skipped, not successful and at least one check exists.
    #[test]
    fn test_status_matrix(status in combined_status(), skip in any::<bool>()) {
        let expected = !skip && status.state != StatusState::Success && !status.statuses.is_empty();
        prop_assert_eq!(
            check_status(&status, skip) == Some(Rejection::ChecksFailing),
            expected
        );
    }

    /// Decoding inverts encoding.
    #[test]
    fn test_codec_decode_inverts_encode(content in ".{0,200}") {
        let encoded = BlobCodec::encode(&content);
        prop_assert_eq!(BlobCodec::decode(&encoded).expect("Should decode"), content);
    }

    /// Content is encoded exactly once: decoding the wire form yields the
    /// original text, never another base64 layer.
    #[test]
    fn test_codec_encodes_once(content in "[a-zA-Z0-9 ]{1,100}") {
        let encoded = BlobCodec::encode(&content);
        let double = BlobCodec::encode(&encoded);
        prop_assert_ne!(&encoded, &double);
        prop_assert_eq!(BlobCodec::decode(&double).expect("Should decode"), encoded);
    }

    /// Line-wrapped and unpadded wire forms decode like the canonical one.
    #[test]
    fn test_codec_tolerates_wrapping(content in ".{0,200}", width in 4usize..76) {
        let encoded = BlobCodec::encode(&content);
        let unpadded = encoded.trim_end_matches('=');
        let wrapped: String = unpadded
            .as_bytes()
            .chunks(width)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join("\n");
        prop_assert_eq!(BlobCodec::decode(&wrapped).expect("Should decode"), content);
    }
}
