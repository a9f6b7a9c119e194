//! The orchestration service's execution-history contract, and the
//! fetcher that walks it.
//!
//! The service returns history pages: an ordered slice of events
//! (ascending sequence id) plus an optional continuation token. The
//! fetcher requests pages until the service stops returning a token,
//! forwarding each response's token into the next request, and
//! concatenates the pages in order.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::IngestError;

/// One atomic state transition recorded during an execution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEvent {
    /// Monotonically increasing sequence id assigned by the service.
    pub id: i64,
    /// Sequence id of the causally preceding event; 0 for the first.
    #[serde(default)]
    pub previous_event_id: i64,
    #[serde(rename = "type")]
    pub event_type: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    /// Type-specific payload, passed through to the persisted record.
    #[serde(default)]
    pub detail: Map<String, Value>,
}

/// One page of history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    pub events: Vec<HistoryEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

/// The history API at its interface boundary: one page per call.
///
/// Implementations own transport concerns (auth, bounded retries); the
/// fetcher above them owns pagination and nothing else.
#[async_trait]
pub trait ExecutionHistoryApi: Send + Sync {
    async fn history_page(
        &self,
        execution_arn: &str,
        next_token: Option<&str>,
    ) -> Result<HistoryPage, IngestError>;
}

/// Fetch the complete, time-ordered history of an execution.
pub async fn fetch_history(
    api: &dyn ExecutionHistoryApi,
    execution_arn: &str,
) -> Result<Vec<HistoryEvent>, IngestError> {
    let mut events = Vec::new();
    let mut next_token: Option<String> = None;
    loop {
        let page = api.history_page(execution_arn, next_token.as_deref()).await?;
        events.extend(page.events);
        match page.next_token {
            Some(token) => next_token = Some(token),
            None => break,
        }
    }
    debug!(execution_arn, events = events.len(), "fetched execution history");
    Ok(events)
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
