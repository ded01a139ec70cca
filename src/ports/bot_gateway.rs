//! Bot management port: identity and webhook registration.

use async_trait::async_trait;
use serde::Serialize;

use super::errors::MessengerError;

/// Who the bot is, per the messaging platform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BotIdentity {
    pub id: i64,
    pub username: String,
    pub first_name: String,
}

/// Current webhook registration state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookStatus {
    pub url: String,
    pub pending_update_count: i64,
    pub last_error_message: Option<String>,
}

/// Read and manage the bot's platform registration.
#[async_trait]
pub trait BotGateway: Send + Sync {
    /// Fetches the bot's own identity.
    async fn identity(&self) -> Result<BotIdentity, MessengerError>;

    /// Fetches the current webhook registration.
    async fn webhook_status(&self) -> Result<WebhookStatus, MessengerError>;

    /// Registers the webhook URL updates should be delivered to.
    async fn register_webhook(&self, url: &str) -> Result<(), MessengerError>;

    /// Removes the webhook registration.
    async fn clear_webhook(&self) -> Result<(), MessengerError>;
}
