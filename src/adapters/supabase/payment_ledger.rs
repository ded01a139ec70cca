//! Payment ledger backed by the Supabase `payments` table.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::payment::PaymentRecord;
use crate::ports::{LedgerWriteResult, PaymentLedger, StoreError};

use super::client::SupabaseClient;

const PAYMENTS_TABLE: &str = "payments";

/// Writes ledger rows with a conditional insert keyed by `payment_id`.
pub struct SupabasePaymentLedger {
    client: Arc<SupabaseClient>,
}

impl SupabasePaymentLedger {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

/// Serializes a record into the ledger row shape.
///
/// The table stores the amount in major units, so the minor-unit amount is
/// converted at the boundary and nowhere else.
fn ledger_row(record: &PaymentRecord) -> Value {
    json!({
        "payment_id": record.payment_id,
        "telegram_user_id": record.purchaser_id,
        "username": record.username,
        "email": record.email,
        "amount": record.amount_minor as f64 / 100.0,
        "currency": record.currency,
        "status": record.status,
        "payment_method": record.payment_method,
        "plan": record.plan,
        "metadata": record.metadata,
        "is_test_mode": record.is_test_mode,
        "created_at": record.created_at.to_rfc3339(),
    })
}

#[async_trait]
impl PaymentLedger for SupabasePaymentLedger {
    async fn insert_if_absent(
        &self,
        record: PaymentRecord,
    ) -> Result<LedgerWriteResult, StoreError> {
        let rows = self
            .client
            .insert_returning(PAYMENTS_TABLE, &ledger_row(&record), Some("payment_id"))
            .await?;

        // An empty representation means the conflict target matched and the
        // insert was skipped: this payment id was already ledgered.
        if rows.is_empty() {
            return Ok(LedgerWriteResult::AlreadyExists);
        }
        Ok(LedgerWriteResult::Inserted(record))
    }
}
