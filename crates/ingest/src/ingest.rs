//! The batch-ingestion driver.
//!
//! Pure dispatch: parse each delivered message, hand it to the normalizer,
//! flatten everything into one record sequence, write it in one batched
//! call. The driver never branches on notification content.

use std::sync::Arc;

use tracing::info;

use chronicle_core::{DatastoreConfig, HistoryApiConfig, LoggingLevel};
use chronicle_storage::{RecordStore, TableRecord};

use crate::client::HttpHistoryClient;
use crate::error::IngestError;
use crate::history::ExecutionHistoryApi;
use crate::normalize::normalize_records;
use crate::notification::{CompletionNotification, NotificationBatch};

/// Owns the two collaborators and drives one batch at a time.
pub struct Ingestor {
    history: Arc<dyn ExecutionHistoryApi>,
    store: Arc<dyn RecordStore>,
}

impl Ingestor {
    pub fn new(history: Arc<dyn ExecutionHistoryApi>, store: Arc<dyn RecordStore>) -> Self {
        Ingestor { history, store }
    }

    /// Wire up from process configuration. The store backend is selected
    /// here, once; an unimplemented backend fails construction.
    pub async fn from_env() -> Result<Self, IngestError> {
        let store = chronicle_storage::connect(&DatastoreConfig::from_env()?).await?;
        let client = HttpHistoryClient::new(HistoryApiConfig::from_env()?);
        Ok(Ingestor::new(Arc::new(client), store))
    }

    /// Ingest one delivered batch.
    ///
    /// Notifications are processed in delivery order; each produces its
    /// summary record first, followed by its history records. All records
    /// across the batch go to the store in a single batched upsert. The
    /// first failure aborts the whole invocation -- and since the batched
    /// write has no rollback, a failure inside it can leave some
    /// executions persisted and others not. Redelivery then overwrites
    /// the same keys.
    pub async fn ingest(&self, batch: &NotificationBatch) -> Result<(), IngestError> {
        // Re-read the verbosity policy on every invocation; operators can
        // flip it at runtime without a restart.
        let level = LoggingLevel::from_env();

        let mut records: Vec<TableRecord> = Vec::new();
        for message in &batch.records {
            let notification: CompletionNotification = serde_json::from_str(&message.body)
                .map_err(|source| IngestError::MalformedNotification {
                    message_id: message.message_id.clone(),
                    source,
                })?;
            records.extend(
                normalize_records(&notification.detail, level, self.history.as_ref()).await?,
            );
        }

        info!(
            messages = batch.records.len(),
            records = records.len(),
            "persisting ingested batch"
        );
        self.store.put_records(&records).await?;
        Ok(())
    }
}
