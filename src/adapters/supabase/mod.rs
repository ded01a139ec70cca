//! Supabase store adapters.

pub mod action_log;
pub mod client;
pub mod payment_ledger;
pub mod purchaser_repository;

pub use action_log::SupabaseActionLog;
pub use client::SupabaseClient;
pub use payment_ledger::SupabasePaymentLedger;
pub use purchaser_repository::SupabasePurchaserRepository;
