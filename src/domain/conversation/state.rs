//! Ephemeral per-purchaser conversational state.
//!
//! A keyed in-memory store consulted when a purchaser messages the bot
//! outside a command. Entries live until consumed or replaced; there is no
//! expiry, matching the process-lifetime semantics the flows rely on.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::payment::Plan;

/// What the bot is currently waiting on from a purchaser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationState {
    /// Purchaser chose manual payment and owes a proof-of-payment screenshot.
    AwaitingPaymentProof { plan: Plan },
}

/// Keyed conversational state store.
///
/// Shared behind the loop-thread context; the mutex only guards map access,
/// never spans an await.
#[derive(Debug, Default)]
pub struct ConversationStateStore {
    states: Mutex<HashMap<i64, ConversationState>>,
}

impl ConversationStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the state for a purchaser, replacing any previous one.
    pub fn set(&self, purchaser_id: i64, state: ConversationState) {
        self.guard().insert(purchaser_id, state);
    }

    /// Current state for a purchaser, if any.
    pub fn get(&self, purchaser_id: i64) -> Option<ConversationState> {
        self.guard().get(&purchaser_id).cloned()
    }

    /// Removes and returns the state for a purchaser.
    pub fn take(&self, purchaser_id: i64) -> Option<ConversationState> {
        self.guard().remove(&purchaser_id)
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, HashMap<i64, ConversationState>> {
        // A poisoned map is still a valid map
        self.states.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_take_cycle() {
        let store = ConversationStateStore::new();
        assert!(store.get(1).is_none());

        store.set(1, ConversationState::AwaitingPaymentProof { plan: Plan::Basic });
        assert_eq!(
            store.get(1),
            Some(ConversationState::AwaitingPaymentProof { plan: Plan::Basic })
        );

        // take consumes
        assert!(store.take(1).is_some());
        assert!(store.get(1).is_none());
        assert!(store.take(1).is_none());
    }

    #[test]
    fn states_are_keyed_per_purchaser() {
        let store = ConversationStateStore::new();
        store.set(1, ConversationState::AwaitingPaymentProof { plan: Plan::Basic });
        store.set(
            2,
            ConversationState::AwaitingPaymentProof {
                plan: Plan::Premium,
            },
        );

        assert_eq!(
            store.get(2),
            Some(ConversationState::AwaitingPaymentProof {
                plan: Plan::Premium
            })
        );
        store.take(1);
        assert!(store.get(2).is_some());
    }

    #[test]
    fn set_replaces_previous_state() {
        let store = ConversationStateStore::new();
        store.set(1, ConversationState::AwaitingPaymentProof { plan: Plan::Basic });
        store.set(
            1,
            ConversationState::AwaitingPaymentProof {
                plan: Plan::Premium,
            },
        );
        assert_eq!(
            store.get(1),
            Some(ConversationState::AwaitingPaymentProof {
                plan: Plan::Premium
            })
        );
    }
}
