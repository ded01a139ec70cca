//! Telegram handlers: bot update dispatch.

mod dispatch_update;

pub use dispatch_update::{DispatchUpdateHandler, IncomingMessage};
