//! The event-loop context.
//!
//! Everything that may only be touched from the loop thread, bundled as the
//! context the bridge hands to submitted jobs. Built once, on the loop
//! thread, by the wiring in `main`.

use std::sync::Arc;

use crate::ports::BotGateway;

use super::handlers::payment::ProcessPaymentEventHandler;
use super::handlers::telegram::DispatchUpdateHandler;

/// State owned by the event-loop thread.
pub struct BotContext {
    /// The payment webhook pipeline.
    pub payments: ProcessPaymentEventHandler,

    /// Bot update dispatch.
    pub updates: DispatchUpdateHandler,

    /// Bot identity / webhook management, for the status endpoints.
    pub gateway: Arc<dyn BotGateway>,
}
