//! Payment ledger port.

use async_trait::async_trait;

use crate::domain::payment::PaymentRecord;

use super::errors::StoreError;

/// Result of a conditional ledger write.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerWriteResult {
    /// The record was written; this event owns fulfillment.
    Inserted(PaymentRecord),

    /// A record with this payment id already exists: provider redelivery,
    /// fulfillment must not run again.
    AlreadyExists,
}

/// Append-only payment ledger keyed by external payment id.
#[async_trait]
pub trait PaymentLedger: Send + Sync {
    /// Writes a record unless one with the same payment id exists.
    ///
    /// The uniqueness check and the write are one store operation, so two
    /// concurrent deliveries of the same event cannot both insert.
    async fn insert_if_absent(
        &self,
        record: PaymentRecord,
    ) -> Result<LedgerWriteResult, StoreError>;
}
