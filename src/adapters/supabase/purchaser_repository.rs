//! Purchaser profile store backed by the Supabase `users` table.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Map, Value};

use crate::domain::purchaser::{NewProfile, ProfilePatch, PurchaserProfile};
use crate::ports::{ProfileInsertResult, PurchaserRepository, StoreError};

use super::client::SupabaseClient;

const USERS_TABLE: &str = "users";

pub struct SupabasePurchaserRepository {
    client: Arc<SupabaseClient>,
}

impl SupabasePurchaserRepository {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

fn parse_profile(row: Value) -> Result<PurchaserProfile, StoreError> {
    serde_json::from_value(row).map_err(|e| StoreError::BadResponse(e.to_string()))
}

fn new_profile_row(profile: &NewProfile) -> Value {
    let now = Utc::now().to_rfc3339();
    json!({
        "user_id": profile.user_id,
        "username": profile.username,
        "email": profile.email,
        "plan": profile.plan,
        "payment_status": profile.payment_status,
        "first_seen": now,
        "last_activity": now,
        "is_admin": profile.is_admin,
    })
}

/// Builds the PATCH body: only supplied fields, plus a last-activity refresh.
fn patch_body(patch: &ProfilePatch) -> Value {
    let mut fields = Map::new();
    if let Some(username) = &patch.username {
        fields.insert("username".to_string(), json!(username));
    }
    if let Some(email) = &patch.email {
        fields.insert("email".to_string(), json!(email));
    }
    if let Some(plan) = &patch.plan {
        fields.insert("plan".to_string(), json!(plan));
    }
    if let Some(status) = &patch.payment_status {
        fields.insert("payment_status".to_string(), json!(status));
    }
    fields.insert("last_activity".to_string(), json!(Utc::now().to_rfc3339()));
    Value::Object(fields)
}

#[async_trait]
impl PurchaserRepository for SupabasePurchaserRepository {
    async fn find(&self, user_id: i64) -> Result<Option<PurchaserProfile>, StoreError> {
        let rows = self
            .client
            .select(USERS_TABLE, &[("user_id", format!("eq.{user_id}"))])
            .await?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(parse_profile(row)?)),
            None => Ok(None),
        }
    }

    async fn insert_if_absent(
        &self,
        profile: NewProfile,
    ) -> Result<ProfileInsertResult, StoreError> {
        let rows = self
            .client
            .insert_returning(USERS_TABLE, &new_profile_row(&profile), Some("user_id"))
            .await?;
        match rows.into_iter().next() {
            Some(row) => Ok(ProfileInsertResult::Inserted(parse_profile(row)?)),
            None => Ok(ProfileInsertResult::AlreadyExists),
        }
    }

    async fn update(&self, user_id: i64, patch: ProfilePatch) -> Result<(), StoreError> {
        self.client
            .patch(
                USERS_TABLE,
                &[("user_id", format!("eq.{user_id}"))],
                &patch_body(&patch),
            )
            .await
    }
}
