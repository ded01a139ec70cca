//! Application layer: the event-loop bridge and the use-case handlers.

mod bridge;
mod context;
pub mod handlers;

pub use bridge::{BridgeError, EventLoopBridge};
pub use context::BotContext;
