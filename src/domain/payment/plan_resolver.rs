//! Pure plan resolution.
//!
//! Maps a checkout session to the plan that was purchased. No I/O, no clock:
//! identical inputs always resolve to the same plan.
//!
//! Resolution order:
//! 1. price id lookup in the configured price book
//! 2. explicit plan hint in session metadata
//! 3. explicit plan hint in a custom checkout field
//! 4. amount threshold, unless the active pricing makes all nominal
//!    amounts identical
//! 5. conservative default: `Basic`

use super::checkout_session::CheckoutSession;
use super::plan::Plan;

/// Settled amounts at or above this (in minor units) indicate the premium
/// plan when no stronger signal is present.
pub const PREMIUM_AMOUNT_THRESHOLD_MINOR: i64 = 40_000;

/// Price-id to plan table for the active pricing mode.
#[derive(Debug, Clone, Default)]
pub struct PriceBook {
    entries: Vec<(String, Plan)>,
    uniform_nominal: bool,
}

impl PriceBook {
    /// Builds a price book from (price id, plan) pairs.
    ///
    /// `uniform_nominal` disables the amount heuristic for deployments where
    /// every plan is charged the same nominal amount (smoke-test pricing).
    pub fn new(entries: Vec<(String, Plan)>, uniform_nominal: bool) -> Self {
        Self {
            entries,
            uniform_nominal,
        }
    }

    /// Looks up the plan sold under a price id.
    pub fn plan_for_price(&self, price_id: &str) -> Option<Plan> {
        self.entries
            .iter()
            .find(|(id, _)| id == price_id)
            .map(|(_, plan)| *plan)
    }

    /// True when the amount heuristic cannot distinguish plans.
    pub fn is_uniform_nominal(&self) -> bool {
        self.uniform_nominal
    }
}

/// The signals plan resolution reads from a checkout session.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanSignals<'a> {
    pub price_id: Option<&'a str>,
    pub metadata_hint: Option<&'a str>,
    pub custom_field_hint: Option<&'a str>,
    pub amount_minor: Option<i64>,
}

impl<'a> PlanSignals<'a> {
    /// Extracts resolution signals from a checkout session.
    pub fn from_session(session: &'a CheckoutSession) -> Self {
        Self {
            price_id: session.metadata_value("price_id"),
            metadata_hint: session
                .metadata_value("plan")
                .or_else(|| session.metadata_value("plan_type")),
            custom_field_hint: session.custom_text("plan"),
            amount_minor: session.amount_total,
        }
    }
}

/// Resolves the purchased plan from the session signals and price book.
pub fn resolve_plan(signals: PlanSignals<'_>, book: &PriceBook) -> Plan {
    if let Some(plan) = signals.price_id.and_then(|id| book.plan_for_price(id)) {
        return plan;
    }

    if let Some(plan) = signals.metadata_hint.and_then(Plan::from_hint) {
        return plan;
    }

    if let Some(plan) = signals.custom_field_hint.and_then(Plan::from_hint) {
        return plan;
    }

    if !book.is_uniform_nominal() {
        if let Some(amount) = signals.amount_minor {
            return if amount >= PREMIUM_AMOUNT_THRESHOLD_MINOR {
                Plan::Premium
            } else {
                Plan::Basic
            };
        }
    }

    Plan::Basic
}
