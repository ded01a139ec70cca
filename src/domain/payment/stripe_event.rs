//! Stripe webhook event types.
//!
//! Defines the structures for parsing Stripe webhook payloads.
//! Only fields relevant to payment processing are captured.

use serde::{Deserialize, Serialize};

/// Stripe webhook event (simplified).
///
/// Contains the essential fields needed for webhook processing.
/// Additional fields from Stripe's full event schema are ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEvent {
    /// Unique identifier for the event (evt_xxx format).
    pub id: String,

    /// Type of event (e.g., "checkout.session.completed").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Time at which the event was created (Unix timestamp).
    pub created: i64,

    /// Object containing event-specific data.
    pub data: StripeEventData,

    /// Whether this is a live mode event (vs test mode).
    #[serde(default)]
    pub livemode: bool,

    /// API version used to render this event.
    #[serde(default)]
    pub api_version: Option<String>,
}

/// Container for event-specific data.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    /// The object that triggered the event (polymorphic based on event type).
    pub object: serde_json::Value,
}

impl StripeEvent {
    /// Classifies this event into the closed set of handled outcomes.
    pub fn kind(&self) -> PaymentEventKind {
        PaymentEventKind::from_type_tag(&self.event_type)
    }

    /// Attempts to deserialize the data object as the specified type.
    pub fn deserialize_object<T: serde::de::DeserializeOwned>(
        &self,
    ) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data.object.clone())
    }
}

/// The closed set of payment outcomes this service reacts to.
///
/// Every webhook event maps to exactly one variant; anything outside the
/// handled set is `Unrecognized` and gets acknowledged without processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentEventKind {
    /// A checkout session finished with payment settled.
    CheckoutCompleted,
    /// A delayed payment method (bank debit etc.) eventually settled.
    AsyncPaymentSucceeded,
    /// A delayed payment method eventually failed.
    AsyncPaymentFailed,
    /// A payment intent failed outright.
    PaymentIntentFailed,
    /// Any event type outside the handled set.
    Unrecognized,
}

impl PaymentEventKind {
    /// Maps a raw Stripe event type tag to its classification.
    pub fn from_type_tag(tag: &str) -> Self {
        match tag {
            "checkout.session.completed" => Self::CheckoutCompleted,
            "checkout.session.async_payment_succeeded" => Self::AsyncPaymentSucceeded,
            "checkout.session.async_payment_failed" => Self::AsyncPaymentFailed,
            "payment_intent.payment_failed" => Self::PaymentIntentFailed,
            _ => Self::Unrecognized,
        }
    }

    /// Canonical string form of the classification.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckoutCompleted => "checkout.session.completed",
            Self::AsyncPaymentSucceeded => "checkout.session.async_payment_succeeded",
            Self::AsyncPaymentFailed => "checkout.session.async_payment_failed",
            Self::PaymentIntentFailed => "payment_intent.payment_failed",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// True when the variant represents a settled purchase to fulfill.
    pub fn is_settled_purchase(&self) -> bool {
        matches!(self, Self::CheckoutCompleted | Self::AsyncPaymentSucceeded)
    }
}

/// Builder for creating test Stripe events.
#[cfg(test)]
pub struct StripeEventBuilder {
    id: String,
    event_type: String,
    created: i64,
    object: serde_json::Value,
    livemode: bool,
}

#[cfg(test)]
impl StripeEventBuilder {
    pub fn new(event_type: &str) -> Self {
        Self {
            id: "evt_test_123".to_string(),
            event_type: event_type.to_string(),
            created: chrono::Utc::now().timestamp(),
            object: serde_json::json!({}),
            livemode: false,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_object(mut self, object: serde_json::Value) -> Self {
        self.object = object;
        self
    }

    pub fn with_livemode(mut self, livemode: bool) -> Self {
        self.livemode = livemode;
        self
    }

    pub fn build(self) -> StripeEvent {
        StripeEvent {
            id: self.id,
            event_type: self.event_type,
            created: self.created,
            data: StripeEventData {
                object: self.object,
            },
            livemode: self.livemode,
            api_version: Some("2023-10-16".to_string()),
        }
    }
}
