//! The record schema persisted for each execution.
//!
//! Three record shapes share a common base (execution id, workflow name,
//! sort key) by embedding [`RecordIdentity`]; a failed execution's summary
//! additionally embeds [`FailureDetails`]. Records are created once at
//! ingestion time and never read back or mutated, so they are
//! `Serialize`-only.
//!
//! Sort keys are timestamp-prefixed (`{ts}_summary`, `{ts}_{event_id}`)
//! with the fixed-width normalized timestamp form, so a lexicographic range
//! scan over one partition returns the execution in chronological order.

use serde::Serialize;
use serde_json::{Map, Value};

use chronicle_core::{ExecutionIdentity, ExecutionStatus};

/// The `(partition, sort)` pair a record is written under.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey {
    pub partition_key: String,
    pub sort_key: String,
}

/// Base fields shared by every record of an execution.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecordIdentity {
    pub execution_id: String,
    pub workflow_name: String,
    /// Sort key: `{normalized_ts}_summary` or `{normalized_ts}_{event_id}`.
    pub step_id: String,
}

impl RecordIdentity {
    /// Identity for the execution's single summary record.
    pub fn summary(identity: &ExecutionIdentity, start_ts: &str) -> Self {
        RecordIdentity {
            execution_id: identity.execution_id.clone(),
            workflow_name: identity.workflow_name.clone(),
            step_id: format!("{start_ts}_summary"),
        }
    }

    /// Identity for one step-history record.
    pub fn step(identity: &ExecutionIdentity, event_ts: &str, event_id: i64) -> Self {
        RecordIdentity {
            execution_id: identity.execution_id.clone(),
            workflow_name: identity.workflow_name.clone(),
            step_id: format!("{event_ts}_{event_id}"),
        }
    }

    fn key(&self) -> RecordKey {
        RecordKey {
            partition_key: self.execution_id.clone(),
            sort_key: self.step_id.clone(),
        }
    }
}

/// The execution-level summary, always produced, exactly once.
///
/// The start/stop instants are kept in both normalized-string and raw
/// epoch-millisecond form so range queries can use either.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryRecord {
    #[serde(flatten)]
    pub identity: RecordIdentity,
    pub status: ExecutionStatus,
    pub input: Value,
    /// Parsed output payload, or the empty string when the execution
    /// produced none.
    pub output: Value,
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "stopDate")]
    pub stop_date: String,
    #[serde(rename = "startDate_raw")]
    pub start_date_raw: i64,
    #[serde(rename = "stopDate_raw")]
    pub stop_date_raw: i64,
}

/// Which step failed, and why, lifted out of the history so a failed
/// execution can be triaged without scanning step records.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FailureDetails {
    pub failed_step_name: String,
    /// Raw input payload of the failing step, as the service reported it.
    pub failed_step_input: String,
    pub failed_step_error_name: String,
    pub failed_step_error_message: String,
}

/// Summary record for a failed execution: the plain summary plus the
/// failure details, flattened side by side.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FailedSummaryRecord {
    #[serde(flatten)]
    pub summary: SummaryRecord,
    #[serde(flatten)]
    pub failure: FailureDetails,
}

/// One record per history event, materialized only under full verbosity.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistoryRecord {
    #[serde(flatten)]
    pub identity: RecordIdentity,
    /// The service's event sequence id. The event's own `id` field is
    /// renamed so it cannot collide with the sort-key semantics.
    pub step_number: i64,
    /// Sequence id of the causally preceding event; 0 for the first.
    #[serde(rename = "previousEventId")]
    pub previous_event_id: i64,
    #[serde(rename = "type")]
    pub event_type: String,
    pub timestamp: String,
    /// Type-specific event payload, passed through unmodified.
    #[serde(flatten)]
    pub detail: Map<String, Value>,
}

/// The closed set of record shapes the pipeline produces.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum TableRecord {
    Summary(SummaryRecord),
    Failed(FailedSummaryRecord),
    History(HistoryRecord),
}

impl TableRecord {
    /// The `(partition, sort)` pair this record is upserted under.
    pub fn key(&self) -> RecordKey {
        self.identity().key()
    }

    /// The record-type discriminator stored alongside the attributes.
    pub fn kind(&self) -> &'static str {
        match self {
            TableRecord::Summary(_) => "summary",
            TableRecord::Failed(_) => "failed",
            TableRecord::History(_) => "history",
        }
    }

    pub fn identity(&self) -> &RecordIdentity {
        match self {
            TableRecord::Summary(r) => &r.identity,
            TableRecord::Failed(r) => &r.summary.identity,
            TableRecord::History(r) => &r.identity,
        }
    }

    /// True for both summary shapes (plain and failed).
    pub fn is_summary(&self) -> bool {
        !matches!(self, TableRecord::History(_))
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
