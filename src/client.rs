//! Bot client.
//!
//! Owns the shared HTTP transport and hands out repository managers.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error::Error;
use crate::manager::{HookSettings, RepositoryManager};
use crate::transport::HttpTransport;

/// Entry point for talking to the platform.
///
/// # Example
///
/// ```rust,ignore
/// use release_bot::{BotClient, Config};
///
/// let client = BotClient::new(&Config::from_env()?)?;
/// let manager = client.repository("microadam", "exso-test");
/// let deleted = manager.cleanup_branches().await?;
/// ```
pub struct BotClient {
    transport: Arc<HttpTransport>,
    hook: HookSettings,
}

impl BotClient {
    /// Create a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be created.
    pub fn new(config: &Config) -> Result<Self, Error> {
        Self::with_transport(
            &config.api_url,
            &config.github_token,
            config.http_timeout(),
            HookSettings {
                url: config.webhook_url(),
                secret: config.webhook_secret.clone(),
            },
        )
    }

    /// Create a client against an explicit API endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be created.
    pub fn with_transport(
        api_url: &str,
        token: &str,
        timeout: Duration,
        hook: HookSettings,
    ) -> Result<Self, Error> {
        let transport = Arc::new(HttpTransport::new(api_url, token, timeout)?);
        Ok(Self { transport, hook })
    }

    /// Manager scoped to `owner/repo`.
    #[must_use]
    pub fn repository(&self, owner: &str, repo: &str) -> RepositoryManager {
        RepositoryManager::new(Arc::clone(&self.transport), owner, repo, self.hook.clone())
    }

    /// Get the underlying HTTP transport.
    #[must_use]
    pub fn transport(&self) -> &Arc<HttpTransport> {
        &self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_API_URL;

    #[test]
    fn test_client_from_config() {
        let config = Config {
            github_token: "token".to_string(),
            webhook_secret: "secret".to_string(),
            bot_url: "http://my.site".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            http_timeout_secs: 10,
        };
        let client = BotClient::new(&config).expect("Client creation should succeed");

        assert_eq!(client.transport().base_url(), "https://api.github.com");

        let manager = client.repository("microadam", "exso-test");
        assert_eq!(manager.owner(), "microadam");
        assert_eq!(manager.repo(), "exso-test");
    }
}
