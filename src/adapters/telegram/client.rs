//! Telegram Bot API client.
//!
//! One reqwest-backed client implementing the [`Messenger`] and
//! [`BotGateway`] ports. The production instance is owned by the event-loop
//! thread and never shared across threads.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use crate::ports::{BotGateway, BotIdentity, Messenger, MessengerError, WebhookStatus};

use super::types::{ApiResponse, TgUser, TgWebhookInfo};

const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Telegram Bot API client.
pub struct TelegramClient {
    http: reqwest::Client,
    api_base: String,
    token: SecretString,
}

impl TelegramClient {
    /// Creates a client for the given bot token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            token: SecretString::new(token.into()),
        }
    }

    /// Points the client at a different API base (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into();
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_base,
            self.token.expose_secret(),
            method
        )
    }

    /// Calls a JSON-body Bot API method and unwraps the response envelope.
    async fn call<P: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        payload: &P,
    ) -> Result<T, MessengerError> {
        let response = self
            .http
            .post(self.method_url(method))
            .json(payload)
            .send()
            .await
            .map_err(|e| MessengerError::Network(e.to_string()))?;

        Self::unwrap_envelope(
            response
                .json::<ApiResponse<T>>()
                .await
                .map_err(|e| MessengerError::Network(e.to_string()))?,
        )
    }

    /// Calls a multipart Bot API method (file uploads).
    async fn call_multipart<T: DeserializeOwned>(
        &self,
        method: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, MessengerError> {
        let response = self
            .http
            .post(self.method_url(method))
            .multipart(form)
            .send()
            .await
            .map_err(|e| MessengerError::Network(e.to_string()))?;

        Self::unwrap_envelope(
            response
                .json::<ApiResponse<T>>()
                .await
                .map_err(|e| MessengerError::Network(e.to_string()))?,
        )
    }

    fn unwrap_envelope<T>(envelope: ApiResponse<T>) -> Result<T, MessengerError> {
        if envelope.ok {
            return envelope.result.ok_or_else(|| {
                MessengerError::Network("ok response without result".to_string())
            });
        }
        Err(classify_api_error(
            envelope.error_code.unwrap_or(0),
            envelope.description.unwrap_or_default(),
        ))
    }

    async fn file_part(path: &Path) -> Result<reqwest::multipart::Part, MessengerError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| MessengerError::Io(format!("{}: {e}", path.display())))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();
        Ok(reqwest::multipart::Part::bytes(bytes).file_name(file_name))
    }
}

/// Maps a Bot API error to the port taxonomy.
///
/// "Chat not found" and "Forbidden" style errors mean the recipient cannot
/// be reached; everything else is a real API failure.
fn classify_api_error(code: i64, description: String) -> MessengerError {
    let lowered = description.to_lowercase();
    if lowered.contains("chat not found")
        || lowered.contains("bot was blocked")
        || lowered.contains("user is deactivated")
        || lowered.contains("forbidden")
    {
        MessengerError::Unreachable(description)
    } else {
        MessengerError::Api { code, description }
    }
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), MessengerError> {
        let _: serde_json::Value = self
            .call(
                "sendMessage",
                &serde_json::json!({ "chat_id": chat_id, "text": text }),
            )
            .await?;
        Ok(())
    }

    async fn send_document(&self, chat_id: i64, path: &Path) -> Result<(), MessengerError> {
        let form = reqwest::multipart::Form::new()
            .text("chat_id", chat_id.to_string())
            .part("document", Self::file_part(path).await?);
        let _: serde_json::Value = self.call_multipart("sendDocument", form).await?;
        Ok(())
    }

    async fn send_video(&self, chat_id: i64, path: &Path) -> Result<(), MessengerError> {
        let form = reqwest::multipart::Form::new()
            .text("chat_id", chat_id.to_string())
            .part("video", Self::file_part(path).await?);
        let _: serde_json::Value = self.call_multipart("sendVideo", form).await?;
        Ok(())
    }
}

#[async_trait]
impl BotGateway for TelegramClient {
    async fn identity(&self) -> Result<BotIdentity, MessengerError> {
        let user: TgUser = self.call("getMe", &serde_json::json!({})).await?;
        Ok(BotIdentity {
            id: user.id,
            username: user.username.unwrap_or_default(),
            first_name: user.first_name.unwrap_or_default(),
        })
    }

    async fn webhook_status(&self) -> Result<WebhookStatus, MessengerError> {
        let info: TgWebhookInfo = self.call("getWebhookInfo", &serde_json::json!({})).await?;
        Ok(WebhookStatus {
            url: info.url,
            pending_update_count: info.pending_update_count,
            last_error_message: info.last_error_message,
        })
    }

    async fn register_webhook(&self, url: &str) -> Result<(), MessengerError> {
        let _: serde_json::Value = self
            .call("setWebhook", &serde_json::json!({ "url": url }))
            .await?;
        Ok(())
    }

    async fn clear_webhook(&self) -> Result<(), MessengerError> {
        let _: serde_json::Value = self.call("deleteWebhook", &serde_json::json!({})).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_not_found_is_unreachable() {
        let err = classify_api_error(400, "Bad Request: chat not found".to_string());
        assert!(err.is_unreachable());
    }

    #[test]
    fn blocked_bot_is_unreachable() {
        let err = classify_api_error(403, "Forbidden: bot was blocked by the user".to_string());
        assert!(err.is_unreachable());
    }

    #[test]
    fn flood_wait_is_an_api_error() {
        let err = classify_api_error(429, "Too Many Requests: retry after 30".to_string());
        assert!(!err.is_unreachable());
        assert!(matches!(err, MessengerError::Api { code: 429, .. }));
    }

    #[test]
    fn token_stays_out_of_the_url_type() {
        let client = TelegramClient::new("123:secret").with_base_url("http://localhost:1");
        assert_eq!(
            client.method_url("getMe"),
            "http://localhost:1/bot123:secret/getMe"
        );
    }

    #[test]
    fn ok_envelope_unwraps_result() {
        let envelope: ApiResponse<i64> =
            serde_json::from_value(serde_json::json!({ "ok": true, "result": 5 })).unwrap();
        assert_eq!(TelegramClient::unwrap_envelope(envelope).unwrap(), 5);
    }

    #[test]
    fn error_envelope_maps_to_port_error() {
        let envelope: ApiResponse<i64> = serde_json::from_value(serde_json::json!({
            "ok": false,
            "error_code": 401,
            "description": "Unauthorized"
        }))
        .unwrap();
        let err = TelegramClient::unwrap_envelope(envelope).unwrap_err();
        assert!(matches!(err, MessengerError::Api { code: 401, .. }));
    }
}
