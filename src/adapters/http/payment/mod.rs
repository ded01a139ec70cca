//! Payment webhook HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::payment_webhook_routes;
