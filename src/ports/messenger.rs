//! Outbound messaging port.

use async_trait::async_trait;
use std::path::Path;

use super::errors::MessengerError;

/// Sends messages and files to chats.
///
/// Implementations are only ever driven from the event-loop thread; the
/// trait bounds exist for the test doubles, not for cross-thread sharing of
/// the production client.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends a plain text message.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), MessengerError>;

    /// Sends a document from the local filesystem.
    async fn send_document(&self, chat_id: i64, path: &Path) -> Result<(), MessengerError>;

    /// Sends a video from the local filesystem.
    async fn send_video(&self, chat_id: i64, path: &Path) -> Result<(), MessengerError>;
}
