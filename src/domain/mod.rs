//! Domain layer: pure business types and logic, no I/O.

pub mod conversation;
pub mod payment;
pub mod purchaser;
