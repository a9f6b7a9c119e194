//! Chronicle core types -- execution identity, the orchestration service's
//! status vocabulary, timestamp normalization, and process configuration.
//!
//! Everything here is pure and synchronous; the remote collaborators live
//! in the storage and ingest crates.

pub mod config;
pub mod identity;
pub mod status;
pub mod timestamp;

pub use config::{ConfigError, DatastoreConfig, DatastoreKind, HistoryApiConfig, LoggingLevel};
pub use identity::{ExecutionIdentity, IdentityError};
pub use status::ExecutionStatus;
pub use timestamp::{format_epoch_millis, parse_timestamp, TimestampError};
