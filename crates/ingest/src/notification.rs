//! Delivery-collaborator envelope and notification payload types.
//!
//! A batch arrives as `{"Records": [...]}`; each record's `body` is a
//! JSON-encoded completion notification whose `detail` block carries the
//! execution summary. Fields the pipeline does not consume are tolerated
//! and ignored.

use serde::Deserialize;

use chronicle_core::ExecutionStatus;

/// One delivered batch of queue messages.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationBatch {
    #[serde(rename = "Records")]
    pub records: Vec<QueueMessage>,
}

/// One message as handed over by the delivery queue.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueMessage {
    pub message_id: String,
    #[serde(default)]
    pub receipt_handle: Option<String>,
    /// JSON-encoded [`CompletionNotification`].
    pub body: String,
    #[serde(default)]
    pub event_source_arn: Option<String>,
}

/// The completion event wrapping the execution summary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionNotification {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    pub detail: ExecutionDetail,
}

/// The execution summary as reported by the orchestration service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionDetail {
    pub execution_arn: String,
    #[serde(default)]
    pub state_machine_arn: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub status: ExecutionStatus,
    /// Epoch milliseconds.
    pub start_date: i64,
    /// Epoch milliseconds.
    pub stop_date: i64,
    /// JSON-encoded input payload.
    pub input: String,
    /// JSON-encoded output payload, or empty when the execution produced
    /// none (e.g. aborted before finishing).
    pub output: String,
}
