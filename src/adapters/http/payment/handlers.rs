//! HTTP handler for the Stripe webhook endpoint.
//!
//! Admission (signature over the exact raw body) happens on the request
//! task; the admitted event is handed to the event-loop thread through the
//! bridge. A 200 means "do not redeliver", so every post-admission path
//! acks.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};

use crate::application::handlers::payment::ProcessPaymentEventCommand;
use crate::application::{BotContext, BridgeError};
use crate::domain::payment::WebhookError;

use super::super::error::ErrorResponse;
use super::super::state::WebhookAppState;
use super::dto::WebhookAck;

/// POST /webhooks/stripe
pub async fn handle_stripe_webhook(
    State(state): State<WebhookAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = match headers.get("Stripe-Signature").and_then(|v| v.to_str().ok()) {
        Some(value) => value.to_string(),
        None => {
            tracing::warn!("webhook rejected: missing Stripe-Signature header");
            return WebhookApiError(WebhookError::MissingField("Stripe-Signature"))
                .into_response();
        }
    };

    let event = match state.verifier.admit(&body, &signature) {
        Ok(event) => event,
        Err(err) => {
            tracing::warn!(error = %err, "webhook rejected at admission");
            return WebhookApiError(err).into_response();
        }
    };

    let event_id = event.id.clone();
    tracing::info!(event_id = %event_id, kind = event.kind().as_str(), "webhook admitted");

    let result = state
        .bridge
        .submit_wait(state.process_timeout, move |ctx: Arc<BotContext>| {
            async move {
                ctx.payments
                    .handle(ProcessPaymentEventCommand { event })
                    .await
            }
        })
        .await;

    match result {
        Ok(outcome) => {
            tracing::info!(event_id = %event_id, outcome = ?outcome, "webhook processed");
            (StatusCode::OK, Json(WebhookAck::from_outcome(&outcome))).into_response()
        }
        // The job keeps running on the loop; redelivery would only duplicate it
        Err(BridgeError::Timeout) => {
            tracing::warn!(event_id = %event_id, "processing still running at response deadline");
            (StatusCode::OK, Json(WebhookAck::accepted())).into_response()
        }
        Err(BridgeError::LoopUnavailable) => {
            tracing::error!(event_id = %event_id, "event loop unavailable, asking for redelivery");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new(
                    "EVENT_LOOP_DOWN",
                    "Bot event loop is not running",
                )),
            )
                .into_response()
        }
    }
}

/// Admission error with its HTTP mapping.
pub struct WebhookApiError(pub WebhookError);

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let error_code = match &self.0 {
            WebhookError::InvalidSignature => "INVALID_SIGNATURE",
            WebhookError::TimestampOutOfRange => "TIMESTAMP_OUT_OF_RANGE",
            WebhookError::InvalidTimestamp => "INVALID_TIMESTAMP",
            WebhookError::ParseError(_) => "PARSE_ERROR",
            WebhookError::MissingField(_) => "MISSING_FIELD",
            _ => "PROCESSING_ERROR",
        };
        let body = ErrorResponse::new(error_code, self.0.to_string());
        (status, Json(body)).into_response()
    }
}
