//! Action log backed by the Supabase `user_actions` table.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::ports::{ActionLog, StoreError, UserAction};

use super::client::SupabaseClient;

const ACTIONS_TABLE: &str = "user_actions";

pub struct SupabaseActionLog {
    client: Arc<SupabaseClient>,
}

impl SupabaseActionLog {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

fn action_row(action: &UserAction) -> Value {
    json!({
        "user_id": action.user_id,
        "username": action.username,
        "action": action.action,
        "action_type": action.action_type,
        "metadata": action.metadata,
        "timestamp": action.timestamp.to_rfc3339(),
    })
}

#[async_trait]
impl ActionLog for SupabaseActionLog {
    async fn record(&self, action: UserAction) -> Result<(), StoreError> {
        self.client
            .insert_minimal(ACTIONS_TABLE, &action_row(&action))
            .await
    }
}
