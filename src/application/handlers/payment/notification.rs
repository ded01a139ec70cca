//! Admin sale notifications.
//!
//! Broadcast a sale summary to every configured admin. Notification is
//! best-effort: an unreachable admin (never started the bot, blocked it) is
//! logged at warn, any other failure at error, and neither stops the
//! remaining admins nor fails the event.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::payment::Plan;
use crate::ports::Messenger;

/// The sale facts admins get told about.
#[derive(Debug, Clone)]
pub struct SaleSummary {
    pub purchaser_id: i64,
    pub username: Option<String>,
    pub amount_minor: i64,
    pub currency: String,
    pub price_id: Option<String>,
    pub plan: Plan,
    pub timestamp: DateTime<Utc>,
}

impl SaleSummary {
    fn format_message(&self) -> String {
        let who = match &self.username {
            Some(username) => format!("{} (id {})", username, self.purchaser_id),
            None => format!("id {}", self.purchaser_id),
        };
        let price = self.price_id.as_deref().unwrap_or("-");
        format!(
            "💰 New payment!\n\
             Buyer: {who}\n\
             Amount: {}.{:02} {}\n\
             Plan: {}\n\
             Price: {price}\n\
             Time: {}",
            self.amount_minor / 100,
            self.amount_minor % 100,
            self.currency,
            self.plan.display_name(),
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        )
    }
}

/// Fan-out of sale summaries to admin chats.
pub struct AdminNotifier {
    messenger: Arc<dyn Messenger>,
    admin_ids: Vec<i64>,
}

impl AdminNotifier {
    pub fn new(messenger: Arc<dyn Messenger>, admin_ids: Vec<i64>) -> Self {
        Self {
            messenger,
            admin_ids,
        }
    }

    /// Notifies every admin. Never fails.
    pub async fn notify_sale(&self, sale: &SaleSummary) {
        let text = sale.format_message();
        for admin_id in &self.admin_ids {
            match self.messenger.send_message(*admin_id, &text).await {
                Ok(()) => {}
                Err(e) if e.is_unreachable() => {
                    tracing::warn!(admin_id, error = %e, "admin unreachable, skipping");
                }
                Err(e) => {
                    tracing::error!(admin_id, error = %e, "admin notification failed");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MessengerError;
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockMessenger {
        sent: Mutex<Vec<(i64, String)>>,
        unreachable: Vec<i64>,
    }

    #[async_trait]
    impl Messenger for MockMessenger {
        async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), MessengerError> {
            if self.unreachable.contains(&chat_id) {
                return Err(MessengerError::Unreachable("chat not found".to_string()));
            }
            self.sent.lock().unwrap().push((chat_id, text.to_string()));
            Ok(())
        }

        async fn send_document(&self, _: i64, _: &Path) -> Result<(), MessengerError> {
            unimplemented!("not used by notifications")
        }

        async fn send_video(&self, _: i64, _: &Path) -> Result<(), MessengerError> {
            unimplemented!("not used by notifications")
        }
    }

    fn sale() -> SaleSummary {
        SaleSummary {
            purchaser_id: 424242,
            username: Some("@buyer".to_string()),
            amount_minor: 2900,
            currency: "usd".to_string(),
            price_id: Some("price_basic".to_string()),
            plan: Plan::Basic,
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn notifies_every_admin() {
        let messenger = Arc::new(MockMessenger::default());
        let notifier = AdminNotifier::new(messenger.clone(), vec![1, 2, 3]);

        notifier.notify_sale(&sale()).await;

        let sent = messenger.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 3);
        assert_eq!(
            sent.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[tokio::test]
    async fn unreachable_admin_does_not_stop_the_rest() {
        let messenger = Arc::new(MockMessenger {
            unreachable: vec![2],
            ..Default::default()
        });
        let notifier = AdminNotifier::new(messenger.clone(), vec![1, 2, 3]);

        notifier.notify_sale(&sale()).await;

        let sent = messenger.sent.lock().unwrap().clone();
        assert_eq!(
            sent.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[tokio::test]
    async fn message_carries_the_sale_facts() {
        let messenger = Arc::new(MockMessenger::default());
        let notifier = AdminNotifier::new(messenger.clone(), vec![1]);

        notifier.notify_sale(&sale()).await;

        let sent = messenger.sent.lock().unwrap().clone();
        let text = &sent[0].1;
        assert!(text.contains("@buyer"));
        assert!(text.contains("424242"));
        assert!(text.contains("29.00 usd"));
        assert!(text.contains("price_basic"));
        assert!(text.contains("Basic meal plan course"));
    }

    #[tokio::test]
    async fn no_admins_is_a_quiet_noop() {
        let messenger = Arc::new(MockMessenger::default());
        let notifier = AdminNotifier::new(messenger.clone(), vec![]);

        notifier.notify_sale(&sale()).await;

        assert!(messenger.sent.lock().unwrap().is_empty());
    }
}
