//! Response DTOs for the payment webhook endpoint.

use serde::Serialize;

use crate::application::handlers::payment::PaymentOutcome;

/// Acknowledgement body for an admitted webhook.
///
/// Always paired with HTTP 200; the `outcome` tag is informational only,
/// Stripe does not read it.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
    pub outcome: &'static str,
}

impl WebhookAck {
    pub fn from_outcome(outcome: &PaymentOutcome) -> Self {
        let tag = match outcome {
            PaymentOutcome::Fulfilled { .. } => "fulfilled",
            PaymentOutcome::DuplicateDelivery => "duplicate",
            PaymentOutcome::FailureHandled => "failure_handled",
            PaymentOutcome::Ignored { .. } => "ignored",
            PaymentOutcome::Failed { .. } => "accepted",
        };
        Self {
            received: true,
            outcome: tag,
        }
    }

    /// Ack for work still running on the loop after the wait deadline.
    pub fn accepted() -> Self {
        Self {
            received: true,
            outcome: "accepted",
        }
    }
}
