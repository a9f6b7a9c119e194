//! Relational write path -- declared, not implemented.
//!
//! The backend selector accepts `Postgres` so deployments can reserve the
//! configuration surface, but construction fails with an explicit
//! [`StorageError::Unimplemented`]. It must never silently no-op.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::record::TableRecord;
use crate::traits::RecordStore;

/// Placeholder for a relational store.
#[derive(Debug)]
pub struct PostgresStore {
    _dsn: String,
}

impl PostgresStore {
    /// Always fails: the relational write path does not exist yet.
    pub fn connect(_dsn: &str) -> Result<Self, StorageError> {
        Err(StorageError::Unimplemented {
            backend: "Postgres",
        })
    }
}

#[async_trait]
impl RecordStore for PostgresStore {
    async fn put_records(&self, _records: &[TableRecord]) -> Result<(), StorageError> {
        Err(StorageError::Unimplemented {
            backend: "Postgres",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_fails_immediately() {
        let err = PostgresStore::connect("postgres://localhost/chronicle").unwrap_err();
        assert!(matches!(
            err,
            StorageError::Unimplemented {
                backend: "Postgres"
            }
        ));
    }
}
