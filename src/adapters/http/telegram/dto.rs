//! Response DTOs for the bot management endpoints.

use serde::Serialize;

use crate::ports::{BotIdentity, WebhookStatus};

/// GET /bot/status response.
#[derive(Debug, Serialize)]
pub struct BotStatusResponse {
    pub id: i64,
    pub username: String,
    pub first_name: String,
}

impl From<BotIdentity> for BotStatusResponse {
    fn from(identity: BotIdentity) -> Self {
        Self {
            id: identity.id,
            username: identity.username,
            first_name: identity.first_name,
        }
    }
}

/// GET /bot/webhook-info response.
#[derive(Debug, Serialize)]
pub struct WebhookInfoResponse {
    pub url: String,
    pub pending_update_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error_message: Option<String>,
}

impl From<WebhookStatus> for WebhookInfoResponse {
    fn from(status: WebhookStatus) -> Self {
        Self {
            url: status.url,
            pending_update_count: status.pending_update_count,
            last_error_message: status.last_error_message,
        }
    }
}

/// Response to webhook set/clear.
#[derive(Debug, Serialize)]
pub struct WebhookChangeResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webhook_info_omits_absent_error() {
        let response = WebhookInfoResponse::from(WebhookStatus {
            url: "https://example.com/webhooks/telegram".to_string(),
            pending_update_count: 3,
            last_error_message: None,
        });
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("last_error_message").is_none());
        assert_eq!(json["pending_update_count"], 3);
    }
}
