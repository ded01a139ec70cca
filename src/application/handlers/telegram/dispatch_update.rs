//! Bot update dispatch.
//!
//! Runs on the event-loop thread for every incoming bot update. Purchase
//! conversations themselves live with the sales team; the service only
//! reacts to messages from purchasers the state store says we are waiting
//! on, and stays silent otherwise.

use std::sync::Arc;

use crate::domain::conversation::{ConversationState, ConversationStateStore};
use crate::ports::Messenger;

/// A bot update reduced to what dispatch needs.
#[derive(Debug, Clone, Default)]
pub struct IncomingMessage {
    pub chat_id: i64,
    pub from_id: i64,
    pub username: Option<String>,
    pub text: Option<String>,
    pub has_media: bool,
}

/// Dispatches incoming bot updates against conversational state.
pub struct DispatchUpdateHandler {
    messenger: Arc<dyn Messenger>,
    states: Arc<ConversationStateStore>,
}

impl DispatchUpdateHandler {
    pub fn new(messenger: Arc<dyn Messenger>, states: Arc<ConversationStateStore>) -> Self {
        Self { messenger, states }
    }

    /// Handles one update. Fire-and-forget: errors are logged, never raised.
    pub async fn handle(&self, message: IncomingMessage) {
        if message.text.is_none() && !message.has_media {
            return;
        }

        match self.states.take(message.from_id) {
            Some(ConversationState::AwaitingPaymentProof { plan }) => {
                tracing::info!(purchaser_id = message.from_id, plan = %plan,
                    "payment proof received, forwarding to manual review");
                let reply = "Thank you! Your payment confirmation has been passed on. \
                     A manager will verify it and unlock your access shortly.";
                if let Err(e) = self.messenger.send_message(message.chat_id, reply).await {
                    tracing::warn!(chat_id = message.chat_id, error = %e,
                        "could not acknowledge payment proof");
                }
            }
            None => {
                tracing::debug!(chat_id = message.chat_id, "update without pending state, ignoring");
            }
        }
    }
}
