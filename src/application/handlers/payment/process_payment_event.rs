//! Payment event pipeline.
//!
//! Drives an admitted webhook event through classification, plan resolution,
//! the ledger write, the profile upsert, fulfillment, and admin notification.
//!
//! Failure policy: once the event is admitted, the provider always gets an
//! acknowledgment. Failures before the ledger write abort quietly; failures
//! at or after it are logged with enough context for manual remediation and
//! the event is still acknowledged, so redelivery storms cannot happen.
//! Redeliveries are detected by the conditional ledger write and never
//! re-fulfill.

use std::sync::Arc;

use crate::domain::payment::{
    resolve_plan, CheckoutSession, PaymentEventKind, PaymentRecord, Plan, PlanSignals, PriceBook,
    StripeEvent,
};
use crate::domain::purchaser::{
    resolve_purchaser_id, resolve_username, NewProfile, ProfilePatch,
};
use crate::ports::{
    ActionLog, LedgerWriteResult, PaymentLedger, ProfileInsertResult, PurchaserRepository,
    UserAction,
};

use super::fulfillment::FulfillmentDispatcher;
use super::notification::{AdminNotifier, SaleSummary};

/// Stages an event moves through. Used for logging and failure reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Received,
    SignatureVerified,
    Classified,
    PlanResolved,
    Ledgered,
    UserUpdated,
    Fulfilled,
    Notified,
    Acknowledged,
}

impl ProcessingStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::SignatureVerified => "signature_verified",
            Self::Classified => "classified",
            Self::PlanResolved => "plan_resolved",
            Self::Ledgered => "ledgered",
            Self::UserUpdated => "user_updated",
            Self::Fulfilled => "fulfilled",
            Self::Notified => "notified",
            Self::Acknowledged => "acknowledged",
        }
    }
}

/// Command to process one admitted webhook event.
#[derive(Debug, Clone)]
pub struct ProcessPaymentEventCommand {
    pub event: StripeEvent,
}

/// Terminal outcome of the pipeline. Every variant is acknowledged with 200.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    /// A settled purchase was fully processed.
    Fulfilled { plan: Plan, purchaser_id: i64 },

    /// The ledger already held this payment id: provider redelivery,
    /// nothing was re-run.
    DuplicateDelivery,

    /// A failure event was handled (purchaser notified or failure logged).
    FailureHandled,

    /// The event needed no processing.
    Ignored { reason: String },

    /// Processing stopped at `stage`; logged for manual remediation.
    Failed {
        stage: ProcessingStage,
        message: String,
    },
}

/// Orchestrates the payment pipeline. Lives on the event-loop thread.
pub struct ProcessPaymentEventHandler {
    ledger: Arc<dyn PaymentLedger>,
    purchasers: Arc<dyn PurchaserRepository>,
    actions: Arc<dyn ActionLog>,
    fulfillment: FulfillmentDispatcher,
    notifier: AdminNotifier,
    price_book: PriceBook,
    is_test_mode: bool,
}

impl ProcessPaymentEventHandler {
    pub fn new(
        ledger: Arc<dyn PaymentLedger>,
        purchasers: Arc<dyn PurchaserRepository>,
        actions: Arc<dyn ActionLog>,
        fulfillment: FulfillmentDispatcher,
        notifier: AdminNotifier,
        price_book: PriceBook,
        is_test_mode: bool,
    ) -> Self {
        Self {
            ledger,
            purchasers,
            actions,
            fulfillment,
            notifier,
            price_book,
            is_test_mode,
        }
    }

    /// Runs the pipeline for one event.
    pub async fn handle(&self, command: ProcessPaymentEventCommand) -> PaymentOutcome {
        let event = command.event;
        let kind = event.kind();
        tracing::debug!(event_id = %event.id, kind = kind.as_str(),
            stage = ProcessingStage::Classified.as_str(), "event classified");

        match kind {
            PaymentEventKind::CheckoutCompleted | PaymentEventKind::AsyncPaymentSucceeded => {
                self.process_settled(&event).await
            }
            PaymentEventKind::AsyncPaymentFailed => self.process_async_failure(&event).await,
            PaymentEventKind::PaymentIntentFailed => {
                tracing::warn!(event_id = %event.id, "payment intent failed");
                PaymentOutcome::FailureHandled
            }
            PaymentEventKind::Unrecognized => {
                tracing::info!(event_id = %event.id, event_type = %event.event_type,
                    "unrecognized event type, acknowledging without processing");
                PaymentOutcome::Ignored {
                    reason: format!("unhandled event type {}", event.event_type),
                }
            }
        }
    }

    async fn process_settled(&self, event: &StripeEvent) -> PaymentOutcome {
        let session: CheckoutSession = match event.deserialize_object() {
            Ok(session) => session,
            Err(e) => {
                tracing::error!(event_id = %event.id, error = %e,
                    "checkout session object malformed");
                return PaymentOutcome::Failed {
                    stage: ProcessingStage::Classified,
                    message: format!("malformed checkout session: {e}"),
                };
            }
        };

        if !session.is_settled() {
            tracing::info!(event_id = %event.id, session_id = %session.id,
                payment_status = ?session.payment_status, "payment not settled, skipping");
            return PaymentOutcome::Ignored {
                reason: "payment not settled".to_string(),
            };
        }

        // Plan resolution is pure; it cannot fail
        let plan = resolve_plan(PlanSignals::from_session(&session), &self.price_book);
        tracing::debug!(event_id = %event.id, plan = %plan,
            stage = ProcessingStage::PlanResolved.as_str(), "plan resolved");

        let Some(purchaser_id) = resolve_purchaser_id(&session) else {
            tracing::error!(event_id = %event.id, session_id = %session.id,
                "no purchaser id resolvable; payment needs manual handling");
            return PaymentOutcome::Failed {
                stage: ProcessingStage::PlanResolved,
                message: "no purchaser id resolvable from checkout session".to_string(),
            };
        };
        let username = resolve_username(&session);

        let record = PaymentRecord::from_session(
            &session,
            plan,
            purchaser_id,
            username.clone(),
            self.is_test_mode,
        );
        match self.ledger.insert_if_absent(record).await {
            Ok(LedgerWriteResult::Inserted(_)) => {
                tracing::info!(event_id = %event.id, purchaser_id, plan = %plan,
                    stage = ProcessingStage::Ledgered.as_str(), "payment ledgered");
            }
            Ok(LedgerWriteResult::AlreadyExists) => {
                tracing::info!(event_id = %event.id, session_id = %session.id,
                    "payment already ledgered, treating as redelivery");
                return PaymentOutcome::DuplicateDelivery;
            }
            Err(e) => {
                tracing::error!(event_id = %event.id, purchaser_id, error = %e,
                    "ledger write failed; payment NOT fulfilled");
                return PaymentOutcome::Failed {
                    stage: ProcessingStage::Ledgered,
                    message: format!("ledger write failed: {e}"),
                };
            }
        }

        if let Err(e) = self.upsert_purchaser(&session, plan, purchaser_id, &username).await {
            tracing::error!(event_id = %event.id, purchaser_id, error = %e,
                "purchaser profile update failed; payment is ledgered but unfulfilled");
            return PaymentOutcome::Failed {
                stage: ProcessingStage::UserUpdated,
                message: e,
            };
        }
        tracing::debug!(event_id = %event.id, purchaser_id,
            stage = ProcessingStage::UserUpdated.as_str(), "purchaser profile updated");

        let report = self.fulfillment.deliver(plan, purchaser_id).await;
        tracing::debug!(event_id = %event.id, purchaser_id, sent = report.sent_count(),
            stage = ProcessingStage::Fulfilled.as_str(), "fulfillment finished");

        let sale = SaleSummary {
            purchaser_id,
            username: username.clone(),
            amount_minor: session.amount_total.unwrap_or(0),
            currency: session.currency.clone().unwrap_or_else(|| "usd".to_string()),
            price_id: session.metadata_value("price_id").map(str::to_string),
            plan,
            timestamp: chrono::Utc::now(),
        };
        self.notifier.notify_sale(&sale).await;
        tracing::debug!(event_id = %event.id,
            stage = ProcessingStage::Notified.as_str(), "admins notified");

        // Analytics trail; failure here never affects the outcome
        let action = UserAction::payment_processed(
            purchaser_id,
            username,
            serde_json::json!({
                "payment_id": session.id,
                "plan": plan.as_str(),
                "amount_minor": session.amount_total,
                "event_id": event.id,
            }),
        );
        if let Err(e) = self.actions.record(action).await {
            tracing::warn!(event_id = %event.id, error = %e, "action log write failed");
        }

        tracing::info!(event_id = %event.id, purchaser_id, plan = %plan,
            stage = ProcessingStage::Acknowledged.as_str(), "payment processed");
        PaymentOutcome::Fulfilled { plan, purchaser_id }
    }

    /// Insert-if-absent, then patch when the profile already existed.
    async fn upsert_purchaser(
        &self,
        session: &CheckoutSession,
        plan: Plan,
        purchaser_id: i64,
        username: &Option<String>,
    ) -> Result<(), String> {
        let email = session.email().map(str::to_string);
        let profile = NewProfile::paid(purchaser_id, username.clone(), email.clone(), plan);

        match self.purchasers.insert_if_absent(profile).await {
            Ok(ProfileInsertResult::Inserted(_)) => Ok(()),
            Ok(ProfileInsertResult::AlreadyExists) => {
                let patch = ProfilePatch::paid(plan, username.clone(), email);
                self.purchasers
                    .update(purchaser_id, patch)
                    .await
                    .map_err(|e| format!("profile patch failed: {e}"))
            }
            Err(e) => Err(format!("profile insert failed: {e}")),
        }
    }

    /// A delayed payment method ultimately failed: tell the purchaser when
    /// we can identify them, otherwise just log.
    async fn process_async_failure(&self, event: &StripeEvent) -> PaymentOutcome {
        let session: Option<CheckoutSession> = event.deserialize_object().ok();

        let purchaser_id = session.as_ref().and_then(resolve_purchaser_id);
        match purchaser_id {
            Some(purchaser_id) => {
                tracing::warn!(event_id = %event.id, purchaser_id, "async payment failed");
                let text = "Unfortunately your payment did not go through. \
                     No money was taken. You can try again with /start.";
                if let Err(e) = self
                    .fulfillment
                    .messenger()
                    .send_message(purchaser_id, text)
                    .await
                {
                    tracing::warn!(event_id = %event.id, purchaser_id, error = %e,
                        "could not notify purchaser about failed payment");
                }
            }
            None => {
                tracing::warn!(event_id = %event.id,
                    "async payment failed for unidentifiable purchaser");
            }
        }
        PaymentOutcome::FailureHandled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::StripeEventBuilder;
    use crate::domain::purchaser::PurchaserProfile;
    use crate::ports::{Messenger, MessengerError, StoreError};
    use async_trait::async_trait;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;
    use std::time::Duration;

    // ══════════════════════════════════════════════════════════════
    // Mock Ports
    // ══════════════════════════════════════════════════════════════

    #[derive(Default)]
    struct MockLedger {
        records: Mutex<Vec<PaymentRecord>>,
        duplicate: bool,
        fail: bool,
    }

    #[async_trait]
    impl PaymentLedger for MockLedger {
        async fn insert_if_absent(
            &self,
            record: PaymentRecord,
        ) -> Result<LedgerWriteResult, StoreError> {
            if self.fail {
                return Err(StoreError::Unavailable("store down".to_string()));
            }
            if self.duplicate {
                return Ok(LedgerWriteResult::AlreadyExists);
            }
            self.records.lock().unwrap().push(record.clone());
            Ok(LedgerWriteResult::Inserted(record))
        }
    }

    #[derive(Default)]
    struct MockPurchasers {
        existing: bool,
        inserts: Mutex<Vec<NewProfile>>,
        patches: Mutex<Vec<(i64, ProfilePatch)>>,
    }

    #[async_trait]
    impl PurchaserRepository for MockPurchasers {
        async fn find(&self, _user_id: i64) -> Result<Option<PurchaserProfile>, StoreError> {
            Ok(None)
        }

        async fn insert_if_absent(
            &self,
            profile: NewProfile,
        ) -> Result<ProfileInsertResult, StoreError> {
            if self.existing {
                return Ok(ProfileInsertResult::AlreadyExists);
            }
            let stored = PurchaserProfile {
                user_id: profile.user_id,
                username: profile.username.clone(),
                email: profile.email.clone(),
                plan: profile.plan,
                payment_status: profile.payment_status.clone(),
                first_seen: chrono::Utc::now(),
                last_activity: chrono::Utc::now(),
                is_admin: profile.is_admin,
            };
            self.inserts.lock().unwrap().push(profile);
            Ok(ProfileInsertResult::Inserted(stored))
        }

        async fn update(&self, user_id: i64, patch: ProfilePatch) -> Result<(), StoreError> {
            self.patches.lock().unwrap().push((user_id, patch));
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockActionLog {
        actions: Mutex<Vec<UserAction>>,
    }

    #[async_trait]
    impl ActionLog for MockActionLog {
        async fn record(&self, action: UserAction) -> Result<(), StoreError> {
            self.actions.lock().unwrap().push(action);
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockMessenger {
        messages: Mutex<Vec<(i64, String)>>,
        documents: Mutex<Vec<(i64, PathBuf)>>,
        videos: Mutex<Vec<(i64, PathBuf)>>,
    }

    #[async_trait]
    impl Messenger for MockMessenger {
        async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), MessengerError> {
            self.messages
                .lock()
                .unwrap()
                .push((chat_id, text.to_string()));
            Ok(())
        }

        async fn send_document(&self, chat_id: i64, path: &Path) -> Result<(), MessengerError> {
            self.documents
                .lock()
                .unwrap()
                .push((chat_id, path.to_path_buf()));
            Ok(())
        }

        async fn send_video(&self, chat_id: i64, path: &Path) -> Result<(), MessengerError> {
            self.videos
                .lock()
                .unwrap()
                .push((chat_id, path.to_path_buf()));
            Ok(())
        }
    }

    struct Fixture {
        handler: ProcessPaymentEventHandler,
        ledger: Arc<MockLedger>,
        purchasers: Arc<MockPurchasers>,
        actions: Arc<MockActionLog>,
        messenger: Arc<MockMessenger>,
        _dir: tempfile::TempDir,
    }

    fn fixture_with(ledger: MockLedger, purchasers: MockPurchasers) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("course.mp4"), b"v").unwrap();
        for module in Plan::Basic.course_modules() {
            std::fs::write(dir.path().join(format!("{module}.pdf")), b"d").unwrap();
        }

        let ledger = Arc::new(ledger);
        let purchasers = Arc::new(purchasers);
        let actions = Arc::new(MockActionLog::default());
        let messenger = Arc::new(MockMessenger::default());

        let fulfillment = FulfillmentDispatcher::new(
            messenger.clone(),
            dir.path().to_path_buf(),
            Duration::ZERO,
            None,
        );
        let notifier = AdminNotifier::new(messenger.clone(), vec![9001, 9002]);
        let price_book = PriceBook::new(
            vec![
                ("price_basic".to_string(), Plan::Basic),
                ("price_premium".to_string(), Plan::Premium),
            ],
            false,
        );

        let handler = ProcessPaymentEventHandler::new(
            ledger.clone(),
            purchasers.clone(),
            actions.clone(),
            fulfillment,
            notifier,
            price_book,
            true,
        );

        Fixture {
            handler,
            ledger,
            purchasers,
            actions,
            messenger,
            _dir: dir,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(MockLedger::default(), MockPurchasers::default())
    }

    fn checkout_event(amount: i64, metadata: serde_json::Value) -> StripeEvent {
        StripeEventBuilder::new("checkout.session.completed")
            .with_id("evt_1")
            .with_object(serde_json::json!({
                "id": "cs_1",
                "amount_total": amount,
                "currency": "usd",
                "payment_status": "paid",
                "customer_details": { "email": "buyer@example.com" },
                "custom_fields": [
                    { "key": "telegram_user_id", "text": { "value": "424242" } },
                    { "key": "username", "text": { "value": "buyer" } }
                ],
                "metadata": metadata,
                "payment_method_types": ["card"]
            }))
            .build()
    }

    // ══════════════════════════════════════════════════════════════
    // Settled Purchase Tests
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn basic_purchase_runs_full_pipeline() {
        let f = fixture();
        let event = checkout_event(2900, serde_json::json!({ "price_id": "price_basic" }));

        let outcome = f
            .handler
            .handle(ProcessPaymentEventCommand { event })
            .await;

        assert_eq!(
            outcome,
            PaymentOutcome::Fulfilled {
                plan: Plan::Basic,
                purchaser_id: 424242
            }
        );

        // Ledgered once
        let records = f.ledger.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].payment_id, "cs_1");
        assert_eq!(records[0].plan, Plan::Basic);
        assert!(records[0].is_test_mode);

        // Profile inserted with the paid status
        let inserts = f.purchasers.inserts.lock().unwrap();
        assert_eq!(inserts.len(), 1);
        assert_eq!(inserts[0].user_id, 424242);
        assert_eq!(inserts[0].payment_status, "completed");
        assert_eq!(inserts[0].username.as_deref(), Some("@buyer"));

        // Intro video + all course documents to the purchaser
        assert_eq!(f.messenger.videos.lock().unwrap().len(), 1);
        assert_eq!(f.messenger.documents.lock().unwrap().len(), 7);

        // Both admins notified
        let messages = f.messenger.messages.lock().unwrap();
        let admin_messages: Vec<_> = messages
            .iter()
            .filter(|(id, _)| *id == 9001 || *id == 9002)
            .collect();
        assert_eq!(admin_messages.len(), 2);
        assert!(admin_messages[0].1.contains("New payment"));

        // Analytics trail written
        let actions = f.actions.actions.lock().unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action, "payment_processed");
    }

    #[tokio::test]
    async fn premium_purchase_sends_single_confirmation() {
        let f = fixture();
        let event = checkout_event(49_000, serde_json::json!({}));

        let outcome = f
            .handler
            .handle(ProcessPaymentEventCommand { event })
            .await;

        assert_eq!(
            outcome,
            PaymentOutcome::Fulfilled {
                plan: Plan::Premium,
                purchaser_id: 424242
            }
        );

        // No course artifacts for premium
        assert!(f.messenger.videos.lock().unwrap().is_empty());
        assert!(f.messenger.documents.lock().unwrap().is_empty());

        // Exactly one purchaser-facing message plus the admin fan-out
        let messages = f.messenger.messages.lock().unwrap();
        let purchaser_messages: Vec<_> =
            messages.iter().filter(|(id, _)| *id == 424242).collect();
        assert_eq!(purchaser_messages.len(), 1);
    }

    #[tokio::test]
    async fn existing_profile_gets_patched_not_reinserted() {
        let f = fixture_with(
            MockLedger::default(),
            MockPurchasers {
                existing: true,
                ..Default::default()
            },
        );
        let event = checkout_event(2900, serde_json::json!({ "price_id": "price_basic" }));

        let outcome = f
            .handler
            .handle(ProcessPaymentEventCommand { event })
            .await;

        assert!(matches!(outcome, PaymentOutcome::Fulfilled { .. }));
        assert!(f.purchasers.inserts.lock().unwrap().is_empty());

        let patches = f.purchasers.patches.lock().unwrap();
        assert_eq!(patches.len(), 1);
        let (id, patch) = &patches[0];
        assert_eq!(*id, 424242);
        assert_eq!(patch.plan, Some(Plan::Basic));
        assert_eq!(patch.payment_status.as_deref(), Some("completed"));
    }

    // ══════════════════════════════════════════════════════════════
    // Idempotency & Failure Tests
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn redelivered_event_is_not_refulfilled() {
        let f = fixture_with(
            MockLedger {
                duplicate: true,
                ..Default::default()
            },
            MockPurchasers::default(),
        );
        let event = checkout_event(2900, serde_json::json!({}));

        let outcome = f
            .handler
            .handle(ProcessPaymentEventCommand { event })
            .await;

        assert_eq!(outcome, PaymentOutcome::DuplicateDelivery);
        assert!(f.messenger.messages.lock().unwrap().is_empty());
        assert!(f.messenger.documents.lock().unwrap().is_empty());
        assert!(f.purchasers.inserts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn ledger_failure_aborts_before_fulfillment() {
        let f = fixture_with(
            MockLedger {
                fail: true,
                ..Default::default()
            },
            MockPurchasers::default(),
        );
        let event = checkout_event(2900, serde_json::json!({}));

        let outcome = f
            .handler
            .handle(ProcessPaymentEventCommand { event })
            .await;

        assert!(matches!(
            outcome,
            PaymentOutcome::Failed {
                stage: ProcessingStage::Ledgered,
                ..
            }
        ));
        // Nothing downstream ran
        assert!(f.purchasers.inserts.lock().unwrap().is_empty());
        assert!(f.messenger.messages.lock().unwrap().is_empty());
        assert!(f.actions.actions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unresolvable_purchaser_fails_without_ledgering() {
        let f = fixture();
        let event = StripeEventBuilder::new("checkout.session.completed")
            .with_object(serde_json::json!({
                "id": "cs_1",
                "amount_total": 2900,
                "payment_status": "paid",
                "customer_details": { "email": "buyer@example.com" }
            }))
            .build();

        let outcome = f
            .handler
            .handle(ProcessPaymentEventCommand { event })
            .await;

        assert!(matches!(outcome, PaymentOutcome::Failed { .. }));
        assert!(f.ledger.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unsettled_payment_is_ignored() {
        let f = fixture();
        let event = StripeEventBuilder::new("checkout.session.completed")
            .with_object(serde_json::json!({
                "id": "cs_1",
                "payment_status": "unpaid",
                "status": "open",
                "custom_fields": [
                    { "key": "telegram_user_id", "text": { "value": "424242" } }
                ]
            }))
            .build();

        let outcome = f
            .handler
            .handle(ProcessPaymentEventCommand { event })
            .await;

        assert!(matches!(outcome, PaymentOutcome::Ignored { .. }));
        assert!(f.ledger.records.lock().unwrap().is_empty());
    }

    // ══════════════════════════════════════════════════════════════
    // Non-purchase Event Tests
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn unrecognized_event_is_acknowledged_untouched() {
        let f = fixture();
        let event = StripeEventBuilder::new("invoice.paid").build();

        let outcome = f
            .handler
            .handle(ProcessPaymentEventCommand { event })
            .await;

        assert!(matches!(outcome, PaymentOutcome::Ignored { .. }));
        assert!(f.ledger.records.lock().unwrap().is_empty());
        assert!(f.messenger.messages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn async_payment_failure_notifies_the_purchaser() {
        let f = fixture();
        let event = StripeEventBuilder::new("checkout.session.async_payment_failed")
            .with_object(serde_json::json!({
                "id": "cs_1",
                "metadata": { "telegram_user_id": "424242" }
            }))
            .build();

        let outcome = f
            .handler
            .handle(ProcessPaymentEventCommand { event })
            .await;

        assert_eq!(outcome, PaymentOutcome::FailureHandled);
        let messages = f.messenger.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, 424242);
        assert!(messages[0].1.contains("did not go through"));
    }

    #[tokio::test]
    async fn payment_intent_failure_is_logged_only() {
        let f = fixture();
        let event = StripeEventBuilder::new("payment_intent.payment_failed").build();

        let outcome = f
            .handler
            .handle(ProcessPaymentEventCommand { event })
            .await;

        assert_eq!(outcome, PaymentOutcome::FailureHandled);
        assert!(f.messenger.messages.lock().unwrap().is_empty());
    }
}
