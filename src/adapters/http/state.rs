//! Shared HTTP application state.

use std::sync::Arc;
use std::time::Duration;

use crate::application::{BotContext, EventLoopBridge};
use crate::domain::payment::StripeSignatureVerifier;

/// State cloned into every request handler.
///
/// Only signature verification runs on the request task; everything touching
/// the bot goes through the bridge to the event-loop thread.
#[derive(Clone)]
pub struct WebhookAppState {
    /// Webhook admission.
    pub verifier: Arc<StripeSignatureVerifier>,

    /// Handle to the event-loop thread.
    pub bridge: EventLoopBridge<BotContext>,

    /// Public URL Telegram should deliver updates to.
    pub bot_webhook_url: String,

    /// How long a request waits for the loop before acknowledging anyway.
    pub process_timeout: Duration,
}
