//! Purchaser profile model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::payment::Plan;

/// A purchaser profile row in the user store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaserProfile {
    /// Telegram id, the store key.
    pub user_id: i64,

    /// `@`-prefixed username, when known.
    pub username: Option<String>,

    pub email: Option<String>,

    /// Last purchased plan.
    pub plan: Option<Plan>,

    /// Payment status tag ("unpaid", "completed", "failed").
    pub payment_status: String,

    pub first_seen: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,

    #[serde(default)]
    pub is_admin: bool,
}

/// A fresh profile for insert-if-absent.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProfile {
    pub user_id: i64,
    pub username: Option<String>,
    pub email: Option<String>,
    pub plan: Option<Plan>,
    pub payment_status: String,
    pub is_admin: bool,
}

impl NewProfile {
    /// Profile for a purchaser first seen through a settled payment.
    pub fn paid(user_id: i64, username: Option<String>, email: Option<String>, plan: Plan) -> Self {
        Self {
            user_id,
            username,
            email,
            plan: Some(plan),
            payment_status: "completed".to_string(),
            is_admin: false,
        }
    }
}

/// A partial profile update.
///
/// Only fields set to `Some` are written; everything else is left untouched
/// so a sparse webhook payload can never null out existing profile data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub plan: Option<Plan>,
    pub payment_status: Option<String>,
}

impl ProfilePatch {
    /// Patch recording a settled purchase.
    pub fn paid(plan: Plan, username: Option<String>, email: Option<String>) -> Self {
        Self {
            username,
            email,
            plan: Some(plan),
            payment_status: Some("completed".to_string()),
        }
    }

    /// True when nothing would be written.
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.plan.is_none()
            && self.payment_status.is_none()
    }
}

/// Normalizes a username to its `@`-prefixed form.
pub fn normalize_username(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "@" {
        return None;
    }
    if trimmed.starts_with('@') {
        Some(trimmed.to_string())
    } else {
        Some(format!("@{trimmed}"))
    }
}
