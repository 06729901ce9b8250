//! Webhook registration.

use tracing::info;

use super::RepositoryManager;
use crate::error::Error;
use crate::types::{Hook, NewHook};

impl RepositoryManager {
    /// Register the bot's webhook on the repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the hook cannot be created (e.g. `Unprocessable`
    /// when an identical hook already exists).
    pub async fn create_initial_hook(&self) -> Result<Hook, Error> {
        let body = NewHook::web(&self.hook.url, &self.hook.secret);

        let hook: Hook = self
            .transport
            .request("POST", &self.path("/hooks"), None, Some(&body))
            .await?;

        info!(repo = %self.full_name(), hook_id = hook.id, url = %self.hook.url, "webhook registered");
        Ok(hook)
    }
}
