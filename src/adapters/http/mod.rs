//! HTTP adapters: webhook intake and operational endpoints.

pub mod error;
pub mod payment;
pub mod state;
pub mod telegram;

use axum::{routing::get, Json, Router};

pub use state::WebhookAppState;

/// GET /health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Builds the complete application router.
pub fn app_router(state: WebhookAppState) -> Router {
    Router::new()
        .nest(
            "/webhooks",
            payment::payment_webhook_routes().merge(telegram::telegram_webhook_routes()),
        )
        .nest("/bot", telegram::bot_management_routes())
        .route("/health", get(health))
        .with_state(state)
}
