use std::env;
use std::time::Duration;

/// Default GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Path on the bot's public URL that receives webhook deliveries.
pub const WEBHOOK_PATH: &str = "/github/webhook";

/// Bot configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Token used to authenticate against the API
    pub github_token: String,
    /// Secret registered on created webhooks
    pub webhook_secret: String,
    /// Public base URL of the bot (webhooks point at `<bot_url>/github/webhook`)
    pub bot_url: String,
    /// Base URL of the REST API
    pub api_url: String,
    /// Per-request timeout in seconds (default: 30)
    pub http_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let github_token =
            env::var("GITHUB_TOKEN").map_err(|_| ConfigError::MissingEnvVar("GITHUB_TOKEN"))?;

        let webhook_secret =
            env::var("WEBHOOK_SECRET").map_err(|_| ConfigError::MissingEnvVar("WEBHOOK_SECRET"))?;

        let bot_url = env::var("BOT_URL").map_err(|_| ConfigError::MissingEnvVar("BOT_URL"))?;
        if !bot_url.starts_with("http://") && !bot_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue("BOT_URL"));
        }

        let api_url = env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let http_timeout_secs = env::var("HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("HTTP_TIMEOUT_SECS"))?;

        Ok(Self {
            github_token,
            webhook_secret,
            bot_url,
            api_url,
            http_timeout_secs,
        })
    }

    /// URL that created webhooks deliver to.
    #[must_use]
    pub fn webhook_url(&self) -> String {
        format!("{}{}", self.bot_url.trim_end_matches('/'), WEBHOOK_PATH)
    }

    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
