//! Conversational state domain.

mod state;

pub use state::{ConversationState, ConversationStateStore};
