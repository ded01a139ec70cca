//! Shared HTTP error response shape.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use crate::application::BridgeError;
use crate::ports::MessengerError;

/// Error body returned by every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

/// Maps a bridge failure on a query endpoint to a response.
///
/// Webhook endpoints handle [`BridgeError::Timeout`] themselves (they ack);
/// this mapping is for endpoints whose whole answer comes from the loop.
pub fn bridge_error_response(err: BridgeError) -> Response {
    match err {
        BridgeError::LoopUnavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::new(
                "EVENT_LOOP_DOWN",
                "Bot event loop is not running",
            )),
        )
            .into_response(),
        BridgeError::Timeout => (
            StatusCode::GATEWAY_TIMEOUT,
            Json(ErrorResponse::new(
                "EVENT_LOOP_TIMEOUT",
                "Bot event loop did not answer in time",
            )),
        )
            .into_response(),
    }
}

/// Maps a messaging API failure behind a management endpoint to a response.
pub fn gateway_error_response(err: MessengerError) -> Response {
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse::new("BOT_API_ERROR", err.to_string())),
    )
        .into_response()
}
