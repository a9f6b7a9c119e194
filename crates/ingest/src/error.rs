use chronicle_core::{ConfigError, IdentityError, TimestampError};
use chronicle_storage::StorageError;

/// Errors raised while ingesting a notification batch.
///
/// Every variant is fatal for the invocation: the pipeline performs no
/// local recovery, so the delivery collaborator sees the failure and can
/// redeliver. Upsert-by-key writes make that redelivery safe.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// A message body was not a well-formed completion notification.
    #[error("malformed notification body (message {message_id}): {source}")]
    MalformedNotification {
        message_id: String,
        #[source]
        source: serde_json::Error,
    },

    /// An execution `input`/`output` payload was not valid JSON.
    #[error("malformed '{field}' payload for execution {execution_id}: {source}")]
    MalformedPayload {
        field: &'static str,
        execution_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Timestamp(#[from] TimestampError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The history API returned a non-success status the transport does
    /// not retry.
    #[error("history API rejected the request with status {status}: {message}")]
    HistoryApi { status: u16, message: String },

    /// The history API was unreachable past the transport's retry budget.
    #[error("history API transport failure: {message}")]
    HistoryTransport { message: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}
