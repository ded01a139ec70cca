//! Product plans and their fulfillment policies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two plans on sale.
///
/// Each plan is bound to a fixed fulfillment policy: `Basic` delivers the
/// self-serve course materials, `Premium` gets a single confirmation and a
/// human follow-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Basic,
    Premium,
}

/// Intro video file stem sent before the course documents.
pub const BASIC_INTRO_VIDEO: &str = "course";

/// Course modules delivered to basic purchasers, in sending order.
///
/// Each entry is matched case-insensitively as a substring of file stems in
/// the artifact directory.
pub const BASIC_COURSE_MODULES: [&str; 7] = [
    "Why the weight is not coming off",
    "Nutrition basics",
    "Recipes and lifehacks",
    "How to burn fat",
    "Water, glycogen, cycles",
    "Final - 10 main rules",
    "Bonus module",
];

impl Plan {
    /// Canonical lowercase tag, as stored in the ledger and user profiles.
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Basic => "basic",
            Plan::Premium => "premium",
        }
    }

    /// Parses a plan hint from metadata or custom fields, case-insensitively.
    pub fn from_hint(hint: &str) -> Option<Self> {
        match hint.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(Plan::Basic),
            "premium" => Some(Plan::Premium),
            _ => None,
        }
    }

    /// Human-readable plan name for notifications.
    pub fn display_name(&self) -> &'static str {
        match self {
            Plan::Basic => "Basic meal plan course",
            Plan::Premium => "Premium personal program",
        }
    }

    /// Course modules this plan delivers, in order.
    pub fn course_modules(&self) -> &'static [&'static str] {
        match self {
            Plan::Basic => &BASIC_COURSE_MODULES,
            Plan::Premium => &[],
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
