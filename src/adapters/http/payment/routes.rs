//! Router for payment webhook endpoints.

use axum::{routing::post, Router};

use super::super::state::WebhookAppState;
use super::handlers::handle_stripe_webhook;

/// Routes mounted under `/webhooks`.
///
/// - `POST /stripe` - Stripe payment events (signature verified)
pub fn payment_webhook_routes() -> Router<WebhookAppState> {
    Router::new().route("/stripe", post(handle_stripe_webhook))
}
