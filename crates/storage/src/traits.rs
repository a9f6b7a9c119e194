use async_trait::async_trait;

use crate::error::StorageError;
use crate::record::TableRecord;

/// The write path of the durable store.
///
/// Semantics are upsert-by-key: a record overwrites any existing record
/// with the same `(partition_key, sort_key)`, so re-delivering a
/// notification is a safe no-op at the data-model level.
///
/// One call covers one ingestion invocation's worth of records, possibly
/// spanning several executions. Implementations sub-batch internally when
/// the provider imposes a request-size limit. There is no rollback: a
/// failure partway through may leave some records persisted and others
/// not, and surfaces as an error to the caller.
///
/// Implementations must be `Send + Sync + 'static` so a single store can
/// be shared across async task boundaries for the life of the process.
#[async_trait]
pub trait RecordStore: std::fmt::Debug + Send + Sync + 'static {
    /// Upsert the given records, in order.
    async fn put_records(&self, records: &[TableRecord]) -> Result<(), StorageError>;
}
