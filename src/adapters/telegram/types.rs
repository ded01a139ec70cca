//! Telegram Bot API wire types.
//!
//! Only the slices of the Bot API schema this service touches.

use serde::Deserialize;

use crate::application::handlers::telegram::IncomingMessage;

/// Envelope every Bot API response comes in.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(default = "none")]
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
}

fn none<T>() -> Option<T> {
    None
}

/// getMe result.
#[derive(Debug, Clone, Deserialize)]
pub struct TgUser {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
}

/// getWebhookInfo result.
#[derive(Debug, Clone, Deserialize)]
pub struct TgWebhookInfo {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub pending_update_count: i64,
    #[serde(default)]
    pub last_error_message: Option<String>,
}

/// An incoming bot update.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<TgMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TgMessage {
    pub chat: TgChat,
    #[serde(default)]
    pub from: Option<TgUser>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub photo: Option<serde_json::Value>,
    #[serde(default)]
    pub document: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TgChat {
    pub id: i64,
}

impl Update {
    /// Reduces the update to what dispatch consumes, if it carries a message.
    pub fn into_incoming(self) -> Option<IncomingMessage> {
        let message = self.message?;
        let from = message.from.as_ref();
        Some(IncomingMessage {
            chat_id: message.chat.id,
            from_id: from.map(|u| u.id).unwrap_or(message.chat.id),
            username: from.and_then(|u| u.username.clone()),
            has_media: message.photo.is_some() || message.document.is_some(),
            text: message.text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_with_photo_becomes_media_message() {
        let update: Update = serde_json::from_value(serde_json::json!({
            "update_id": 1,
            "message": {
                "chat": { "id": 7 },
                "from": { "id": 7, "username": "buyer" },
                "photo": [ { "file_id": "abc" } ]
            }
        }))
        .unwrap();

        let incoming = update.into_incoming().unwrap();
        assert_eq!(incoming.chat_id, 7);
        assert_eq!(incoming.from_id, 7);
        assert_eq!(incoming.username.as_deref(), Some("buyer"));
        assert!(incoming.has_media);
        assert!(incoming.text.is_none());
    }

    #[test]
    fn update_without_message_is_dropped() {
        let update: Update =
            serde_json::from_value(serde_json::json!({ "update_id": 1 })).unwrap();
        assert!(update.into_incoming().is_none());
    }

    #[test]
    fn sender_defaults_to_chat_for_channel_style_updates() {
        let update: Update = serde_json::from_value(serde_json::json!({
            "update_id": 1,
            "message": { "chat": { "id": 9 }, "text": "hi" }
        }))
        .unwrap();

        let incoming = update.into_incoming().unwrap();
        assert_eq!(incoming.from_id, 9);
        assert_eq!(incoming.text.as_deref(), Some("hi"));
    }

    #[test]
    fn api_error_envelope_parses() {
        let response: ApiResponse<TgUser> = serde_json::from_value(serde_json::json!({
            "ok": false,
            "error_code": 403,
            "description": "Forbidden: bot was blocked by the user"
        }))
        .unwrap();

        assert!(!response.ok);
        assert_eq!(response.error_code, Some(403));
        assert!(response.result.is_none());
    }
}
