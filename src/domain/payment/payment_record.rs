//! Payment ledger record.

use chrono::{DateTime, Utc};

use super::checkout_session::CheckoutSession;
use super::plan::Plan;

/// One row of the payment ledger.
///
/// Keyed externally by `payment_id` (the checkout session id), which is what
/// makes ledger writes idempotent across provider redeliveries.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRecord {
    /// External payment id (checkout session id).
    pub payment_id: String,

    /// Purchaser's Telegram id.
    pub purchaser_id: i64,

    /// Purchaser's username, `@`-prefixed when known.
    pub username: Option<String>,

    /// Buyer email collected at checkout.
    pub email: Option<String>,

    /// Amount in minor currency units.
    pub amount_minor: i64,

    /// Three-letter currency code, lowercase.
    pub currency: String,

    /// Provider payment status as received.
    pub status: String,

    /// Payment method type, when the provider reported one.
    pub payment_method: Option<String>,

    /// Plan resolved for this purchase.
    pub plan: Plan,

    /// Session metadata carried through for later auditing.
    pub metadata: serde_json::Value,

    /// Whether the charge ran against the provider's test environment.
    pub is_test_mode: bool,

    /// When this record was written.
    pub created_at: DateTime<Utc>,
}

impl PaymentRecord {
    /// Builds a ledger record from a settled checkout session.
    pub fn from_session(
        session: &CheckoutSession,
        plan: Plan,
        purchaser_id: i64,
        username: Option<String>,
        is_test_mode: bool,
    ) -> Self {
        Self {
            payment_id: session.id.clone(),
            purchaser_id,
            username,
            email: session.email().map(str::to_string),
            amount_minor: session.amount_total.unwrap_or(0),
            currency: session
                .currency
                .as_deref()
                .unwrap_or("usd")
                .to_ascii_lowercase(),
            status: session
                .payment_status
                .as_deref()
                .unwrap_or("unknown")
                .to_string(),
            payment_method: session.payment_method().map(str::to_string),
            plan,
            metadata: serde_json::to_value(&session.metadata)
                .unwrap_or(serde_json::Value::Null),
            is_test_mode,
            created_at: Utc::now(),
        }
    }
}
