//! Telegram HTTP adapter: update intake and bot management endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{bot_management_routes, telegram_webhook_routes};
