//! Repository webhook models.

use serde::{Deserialize, Serialize};

/// Events the bot subscribes to.
pub const HOOK_EVENTS: [&str; 6] = [
    "push",
    "pull_request",
    "issue_comment",
    "create",
    "pull_request_review",
    "commit_comment",
];

/// Delivery settings of a webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookConfig {
    pub url: String,
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

/// Request body for registering a webhook.
#[derive(Debug, Clone, Serialize)]
pub struct NewHook {
    pub name: &'static str,
    pub active: bool,
    pub events: Vec<&'static str>,
    pub config: HookConfig,
}

impl NewHook {
    /// A JSON `web` hook covering [`HOOK_EVENTS`].
    #[must_use]
    pub fn web(url: &str, secret: &str) -> Self {
        Self {
            name: "web",
            active: true,
            events: HOOK_EVENTS.to_vec(),
            config: HookConfig {
                url: url.to_string(),
                content_type: "json".to_string(),
                secret: Some(secret.to_string()),
            },
        }
    }
}

/// A registered webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct Hook {
    pub id: u64,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub events: Vec<String>,
}
