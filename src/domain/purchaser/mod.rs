//! Purchaser domain: profiles and identity resolution.

mod identity;
mod profile;

pub use identity::{resolve_purchaser_id, resolve_username};
pub use profile::{normalize_username, NewProfile, ProfilePatch, PurchaserProfile};
