//! Checkout session object model.
//!
//! The `data.object` of checkout webhook events, reduced to the fields the
//! pipeline reads. Everything else Stripe sends is ignored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Payment statuses accepted as settled.
const SETTLED_PAYMENT_STATUSES: &[&str] = &["paid", "complete", "succeeded"];

/// A Stripe checkout session (simplified).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckoutSession {
    /// Session identifier (cs_xxx format); doubles as the external payment id.
    pub id: String,

    /// Total amount in minor currency units (cents).
    #[serde(default)]
    pub amount_total: Option<i64>,

    /// Three-letter currency code.
    #[serde(default)]
    pub currency: Option<String>,

    /// Payment settlement status ("paid", "unpaid", "no_payment_required").
    #[serde(default)]
    pub payment_status: Option<String>,

    /// Session lifecycle status ("open", "complete", "expired").
    #[serde(default)]
    pub status: Option<String>,

    /// Customer contact details collected at checkout.
    #[serde(default)]
    pub customer_details: Option<CustomerDetails>,

    /// Custom fields the checkout page asked the buyer to fill in.
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,

    /// Free-form metadata attached when the session was created.
    #[serde(default)]
    pub metadata: HashMap<String, String>,

    /// Payment method types offered on this session.
    #[serde(default)]
    pub payment_method_types: Vec<String>,
}

/// Customer contact details.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CustomerDetails {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A single custom checkout field.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CustomField {
    pub key: String,
    #[serde(default)]
    pub text: Option<CustomFieldText>,
}

/// Text value of a custom checkout field.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CustomFieldText {
    #[serde(default)]
    pub value: Option<String>,
}

impl CheckoutSession {
    /// Trimmed text value of the custom field with the given key.
    pub fn custom_text(&self, key: &str) -> Option<&str> {
        self.custom_fields
            .iter()
            .find(|f| f.key == key)
            .and_then(|f| f.text.as_ref())
            .and_then(|t| t.value.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Metadata value for the given key, if present and non-empty.
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .map(|s| s.trim())
            .filter(|v| !v.is_empty())
    }

    /// Buyer email from customer details.
    pub fn email(&self) -> Option<&str> {
        self.customer_details
            .as_ref()
            .and_then(|d| d.email.as_deref())
    }

    /// First payment method type offered, if any.
    pub fn payment_method(&self) -> Option<&str> {
        self.payment_method_types.first().map(String::as_str)
    }

    /// True when the session represents money actually received.
    ///
    /// Either the payment status is a settled one, or the session itself
    /// completed (covers delayed-settlement methods where payment_status
    /// lags behind).
    pub fn is_settled(&self) -> bool {
        let status_settled = self
            .payment_status
            .as_deref()
            .map(|s| SETTLED_PAYMENT_STATUSES.contains(&s))
            .unwrap_or(false);
        status_settled || self.status.as_deref() == Some("complete")
    }
}
