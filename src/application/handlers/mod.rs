//! Application handlers, grouped by area.

pub mod payment;
pub mod telegram;
