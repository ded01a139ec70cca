//! Meal Plan Bot - payment webhook and fulfillment service
//!
//! Receives Stripe payment events and Telegram updates over HTTP, records
//! payments, and delivers purchased course materials through a Telegram bot
//! whose client lives on a single dedicated event-loop thread.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
