//! Ports: interfaces between the application core and the outside world.

mod action_log;
mod bot_gateway;
mod errors;
mod messenger;
mod payment_ledger;
mod purchaser_repository;

pub use action_log::{ActionLog, UserAction};
pub use bot_gateway::{BotGateway, BotIdentity, WebhookStatus};
pub use errors::{MessengerError, StoreError};
pub use messenger::Messenger;
pub use payment_ledger::{LedgerWriteResult, PaymentLedger};
pub use purchaser_repository::{ProfileInsertResult, PurchaserRepository};
