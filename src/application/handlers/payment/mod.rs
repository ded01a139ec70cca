//! Payment handlers: the webhook processing pipeline.

mod fulfillment;
mod notification;
mod process_payment_event;

pub use fulfillment::{
    ArtifactDelivery, ArtifactStatus, FulfillmentDispatcher, FulfillmentReport,
};
pub use notification::{AdminNotifier, SaleSummary};
pub use process_payment_event::{
    PaymentOutcome, ProcessPaymentEventCommand, ProcessPaymentEventHandler, ProcessingStage,
};
