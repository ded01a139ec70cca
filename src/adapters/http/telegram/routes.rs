//! Routers for Telegram update intake and bot management.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::WebhookAppState;
use super::handlers::{bot_status, clear_webhook, receive_update, set_webhook, webhook_info};

/// Routes mounted under `/webhooks`.
///
/// - `POST /telegram` - bot update intake (always acks)
pub fn telegram_webhook_routes() -> Router<WebhookAppState> {
    Router::new().route("/telegram", post(receive_update))
}

/// Routes mounted under `/bot`.
///
/// - `GET /status` - bot identity, proves the loop and token work
/// - `GET /webhook-info` - current platform-side registration
/// - `POST /webhook/set` - register the configured webhook URL
/// - `POST /webhook/clear` - remove the registration
pub fn bot_management_routes() -> Router<WebhookAppState> {
    Router::new()
        .route("/status", get(bot_status))
        .route("/webhook-info", get(webhook_info))
        .route("/webhook/set", post(set_webhook))
        .route("/webhook/clear", post(clear_webhook))
}
