//! HTTP handlers for Telegram update intake and bot management.
//!
//! The update endpoint always answers 200 immediately; Telegram retries
//! non-2xx responses with backoff and a stuck queue delays every later
//! update. The management endpoints query the bot through the bridge.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::adapters::telegram::Update;
use crate::application::BotContext;

use super::super::error::{bridge_error_response, gateway_error_response};
use super::super::state::WebhookAppState;
use super::dto::{BotStatusResponse, WebhookChangeResponse, WebhookInfoResponse};

/// POST /webhooks/telegram
pub async fn receive_update(
    State(state): State<WebhookAppState>,
    Json(update): Json<Update>,
) -> StatusCode {
    let update_id = update.update_id;
    let Some(message) = update.into_incoming() else {
        tracing::debug!(update_id, "update carries nothing to dispatch");
        return StatusCode::OK;
    };

    let submitted = state.bridge.submit_forget(move |ctx: Arc<BotContext>| async move {
        ctx.updates.handle(message).await;
    });
    if submitted.is_err() {
        // Still ack: redelivery of a chat message is worse than dropping it
        tracing::error!(update_id, "event loop unavailable, update dropped");
    }
    StatusCode::OK
}

/// GET /bot/status
pub async fn bot_status(State(state): State<WebhookAppState>) -> Response {
    let result = state
        .bridge
        .submit_wait(state.process_timeout, |ctx: Arc<BotContext>| async move {
            ctx.gateway.identity().await
        })
        .await;

    match result {
        Ok(Ok(identity)) => Json(BotStatusResponse::from(identity)).into_response(),
        Ok(Err(err)) => gateway_error_response(err),
        Err(err) => bridge_error_response(err),
    }
}

/// GET /bot/webhook-info
pub async fn webhook_info(State(state): State<WebhookAppState>) -> Response {
    let result = state
        .bridge
        .submit_wait(state.process_timeout, |ctx: Arc<BotContext>| async move {
            ctx.gateway.webhook_status().await
        })
        .await;

    match result {
        Ok(Ok(status)) => Json(WebhookInfoResponse::from(status)).into_response(),
        Ok(Err(err)) => gateway_error_response(err),
        Err(err) => bridge_error_response(err),
    }
}

/// POST /bot/webhook/set
///
/// Registers the configured public URL; the URL is deployment config, not
/// caller input.
pub async fn set_webhook(State(state): State<WebhookAppState>) -> Response {
    if state.bot_webhook_url.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(super::super::error::ErrorResponse::new(
                "WEBHOOK_URL_NOT_CONFIGURED",
                "No public webhook URL is configured",
            )),
        )
            .into_response();
    }
    let url = state.bot_webhook_url.clone();
    let registered_url = url.clone();
    let result = state
        .bridge
        .submit_wait(state.process_timeout, move |ctx: Arc<BotContext>| {
            async move { ctx.gateway.register_webhook(&url).await }
        })
        .await;

    match result {
        Ok(Ok(())) => {
            tracing::info!(url = %registered_url, "webhook registered");
            Json(WebhookChangeResponse {
                ok: true,
                url: Some(registered_url),
            })
            .into_response()
        }
        Ok(Err(err)) => gateway_error_response(err),
        Err(err) => bridge_error_response(err),
    }
}

/// POST /bot/webhook/clear
pub async fn clear_webhook(State(state): State<WebhookAppState>) -> Response {
    let result = state
        .bridge
        .submit_wait(state.process_timeout, |ctx: Arc<BotContext>| async move {
            ctx.gateway.clear_webhook().await
        })
        .await;

    match result {
        Ok(Ok(())) => {
            tracing::info!("webhook cleared");
            Json(WebhookChangeResponse { ok: true, url: None }).into_response()
        }
        Ok(Err(err)) => gateway_error_response(err),
        Err(err) => bridge_error_response(err),
    }
}
