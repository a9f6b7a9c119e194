//! Durable storage for Chronicle execution records.
//!
//! One execution produces one summary record plus zero or more step-history
//! records, all sharing a partition key so a single range query returns the
//! whole execution. Writes are upsert-by-key: re-delivering the same
//! notification overwrites the same keys, which is what makes redelivery
//! safe.
//!
//! The backend is selected once, at construction, via [`connect`]. The
//! DynamoDB path is the implemented backend; Postgres is a declared,
//! explicitly unimplemented gap.

pub mod attr;
mod dynamo;
mod error;
mod memory;
mod postgres;
mod record;
mod traits;

pub use dynamo::DynamoStore;
pub use error::StorageError;
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use record::{
    FailedSummaryRecord, FailureDetails, HistoryRecord, RecordIdentity, RecordKey, SummaryRecord,
    TableRecord,
};
pub use traits::RecordStore;

use std::sync::Arc;

use chronicle_core::{DatastoreConfig, DatastoreKind};

/// Construct the store selected by the given configuration.
///
/// Backend selection happens exactly once, here; callers hold the returned
/// trait object for the life of the process. Selecting `Postgres` fails
/// immediately with [`StorageError::Unimplemented`].
pub async fn connect(config: &DatastoreConfig) -> Result<Arc<dyn RecordStore>, StorageError> {
    match config.kind {
        DatastoreKind::Dynamodb => Ok(Arc::new(DynamoStore::connect(config.table_name()).await?)),
        DatastoreKind::Postgres => Ok(Arc::new(PostgresStore::connect(&config.resource_arn)?)),
    }
}
