//! Webhook error types for Stripe webhook handling.
//!
//! Defines the error conditions that can occur during webhook admission and
//! processing, with HTTP status code mapping. Rejection before admission is a
//! 4xx; anything after the ledger write is acknowledged so the provider does
//! not redeliver.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur during webhook admission and processing.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Webhook signature verification failed.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Webhook timestamp is outside the acceptable window (5 minutes).
    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    /// Event timestamp is in the future beyond clock skew tolerance.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Failed to parse the webhook payload or signature header.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Required field missing from the webhook payload.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// No purchaser platform id could be resolved from the session.
    #[error("No purchaser id resolvable from checkout session")]
    PurchaserUnresolved,

    /// Event was intentionally ignored (not an error condition).
    #[error("Event ignored: {0}")]
    Ignored(String),

    /// Persistence store operation failed.
    #[error("Store error: {0}")]
    Store(String),

    /// Message delivery to the purchaser failed.
    #[error("Delivery error: {0}")]
    Delivery(String),
}

impl WebhookError {
    /// Maps the error to an HTTP status code.
    ///
    /// Status codes determine Stripe's redelivery behavior:
    /// - 2xx: acknowledged, no redelivery
    /// - 4xx: rejected, no redelivery
    ///
    /// Failures past admission are acknowledged deliberately: a redelivered
    /// event would hit the same failure and the ledger row (when written)
    /// already records the payment for manual remediation.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::InvalidSignature | WebhookError::TimestampOutOfRange => {
                StatusCode::UNAUTHORIZED
            }

            WebhookError::InvalidTimestamp
            | WebhookError::ParseError(_)
            | WebhookError::MissingField(_) => StatusCode::BAD_REQUEST,

            WebhookError::Ignored(_)
            | WebhookError::PurchaserUnresolved
            | WebhookError::Store(_)
            | WebhookError::Delivery(_) => StatusCode::OK,
        }
    }

    /// True when the event was admitted (signature and payload were valid)
    /// and the failure happened during processing.
    pub fn is_post_admission(&self) -> bool {
        self.status_code() == StatusCode::OK
    }
}
