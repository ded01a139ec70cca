//! Purchaser profile store port.

use async_trait::async_trait;

use crate::domain::purchaser::{NewProfile, ProfilePatch, PurchaserProfile};

use super::errors::StoreError;

/// Result of a conditional profile insert.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileInsertResult {
    /// The profile was created.
    Inserted(PurchaserProfile),

    /// A profile with this user id already exists.
    AlreadyExists,
}

/// Store of purchaser profiles keyed by Telegram id.
#[async_trait]
pub trait PurchaserRepository: Send + Sync {
    /// Fetches a profile by id.
    async fn find(&self, user_id: i64) -> Result<Option<PurchaserProfile>, StoreError>;

    /// Creates a profile unless one already exists for the id.
    ///
    /// Conditional on the store side, so concurrent first-time events for
    /// the same purchaser cannot race an exists-check.
    async fn insert_if_absent(
        &self,
        profile: NewProfile,
    ) -> Result<ProfileInsertResult, StoreError>;

    /// Applies a partial update; only `Some` fields are written, and the
    /// profile's last-activity timestamp is refreshed.
    async fn update(&self, user_id: i64, patch: ProfilePatch) -> Result<(), StoreError>;
}
