//! User action log port (analytics trail).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::errors::StoreError;

/// One analytics entry.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAction {
    pub user_id: i64,
    pub username: Option<String>,
    pub action: String,
    pub action_type: String,
    pub metadata: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl UserAction {
    /// Entry recording a fully processed payment.
    pub fn payment_processed(
        user_id: i64,
        username: Option<String>,
        metadata: serde_json::Value,
    ) -> Self {
        Self {
            user_id,
            username,
            action: "payment_processed".to_string(),
            action_type: "payment".to_string(),
            metadata,
            timestamp: Utc::now(),
        }
    }
}

/// Append-only analytics log. Failures here never affect processing.
#[async_trait]
pub trait ActionLog: Send + Sync {
    async fn record(&self, action: UserAction) -> Result<(), StoreError>;
}
