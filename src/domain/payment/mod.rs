//! Payment domain: webhook admission, event classification, plan resolution,
//! and the ledger record model.

mod checkout_session;
mod payment_record;
mod plan;
mod plan_resolver;
mod stripe_event;
mod webhook_errors;
mod webhook_verifier;

pub use checkout_session::{CheckoutSession, CustomField, CustomFieldText, CustomerDetails};
pub use payment_record::PaymentRecord;
pub use plan::{Plan, BASIC_COURSE_MODULES, BASIC_INTRO_VIDEO};
pub use plan_resolver::{
    resolve_plan, PlanSignals, PriceBook, PREMIUM_AMOUNT_THRESHOLD_MINOR,
};
pub use stripe_event::{PaymentEventKind, StripeEvent, StripeEventData};
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{SignatureHeader, StripeSignatureVerifier};

#[cfg(test)]
pub use stripe_event::StripeEventBuilder;
#[cfg(test)]
pub use webhook_verifier::compute_test_signature;
