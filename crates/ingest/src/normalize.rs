//! The record normalizer: one notification in, an ordered set of durable
//! records out.
//!
//! Exactly one summary record is always produced. Under full verbosity the
//! execution's history is fetched and one record is appended per event, in
//! service order, after the summary. When a failed execution's history is
//! available, the failing step and its error are lifted into the summary.

use serde_json::Value;

use chronicle_core::{
    format_epoch_millis, ExecutionIdentity, ExecutionStatus, LoggingLevel,
};
use chronicle_storage::{
    FailedSummaryRecord, FailureDetails, HistoryRecord, RecordIdentity, SummaryRecord, TableRecord,
};

use crate::error::IngestError;
use crate::history::{fetch_history, ExecutionHistoryApi, HistoryEvent};
use crate::notification::ExecutionDetail;

/// Normalize one execution-completion notification into the records to
/// persist. The summary record is always first.
pub async fn normalize_records(
    detail: &ExecutionDetail,
    level: LoggingLevel,
    history: &dyn ExecutionHistoryApi,
) -> Result<Vec<TableRecord>, IngestError> {
    let identity = ExecutionIdentity::from_arn(&detail.execution_arn)?;

    let input = parse_payload("input", &identity, &detail.input)?;
    // An execution that never produced output (aborted, failed early)
    // reports an empty string; keep it as-is rather than failing the parse.
    let output = if detail.output.is_empty() {
        Value::String(String::new())
    } else {
        parse_payload("output", &identity, &detail.output)?
    };

    let start_ts = format_epoch_millis(detail.start_date)?;
    let stop_ts = format_epoch_millis(detail.stop_date)?;

    let summary = SummaryRecord {
        identity: RecordIdentity::summary(&identity, &start_ts),
        status: detail.status,
        input,
        output,
        start_date: start_ts,
        stop_date: stop_ts,
        start_date_raw: detail.start_date,
        stop_date_raw: detail.stop_date,
    };

    if level == LoggingLevel::Summary {
        return Ok(vec![TableRecord::Summary(summary)]);
    }

    let events = fetch_history(history, &detail.execution_arn).await?;

    let mut records = Vec::with_capacity(events.len() + 1);
    records.push(match failure_details(detail.status, &events) {
        Some(failure) => TableRecord::Failed(FailedSummaryRecord { summary, failure }),
        None => TableRecord::Summary(summary),
    });
    for event in &events {
        records.push(step_record(&identity, event)?);
    }
    Ok(records)
}

fn parse_payload(
    field: &'static str,
    identity: &ExecutionIdentity,
    raw: &str,
) -> Result<Value, IngestError> {
    serde_json::from_str(raw).map_err(|source| IngestError::MalformedPayload {
        field,
        execution_id: identity.execution_id.clone(),
        source,
    })
}

fn step_record(
    identity: &ExecutionIdentity,
    event: &HistoryEvent,
) -> Result<TableRecord, IngestError> {
    let event_ts = format_epoch_millis(event.timestamp)?;
    Ok(TableRecord::History(HistoryRecord {
        identity: RecordIdentity::step(identity, &event_ts, event.id),
        step_number: event.id,
        previous_event_id: event.previous_event_id,
        event_type: event.event_type.clone(),
        timestamp: event_ts,
        detail: event.detail.clone(),
    }))
}

/// For a failed execution, recover which step failed and why from the
/// history: the terminal failure event carries the error, the most recent
/// state-entered event before it names the step.
fn failure_details(
    status: ExecutionStatus,
    events: &[HistoryEvent],
) -> Option<FailureDetails> {
    if status != ExecutionStatus::Failed {
        return None;
    }

    let mut last_entered: Option<&Value> = None;
    for event in events {
        if let Some(entered) = event.detail.get("stateEnteredEventDetails") {
            last_entered = Some(entered);
        }
        if event.event_type == "ExecutionFailed" {
            let failed = event.detail.get("executionFailedEventDetails");
            return Some(FailureDetails {
                failed_step_name: text(last_entered, "name"),
                failed_step_input: text(last_entered, "input"),
                failed_step_error_name: text(failed, "error"),
                failed_step_error_message: text(failed, "cause"),
            });
        }
    }
    None
}

fn text(value: Option<&Value>, key: &str) -> String {
    value
        .and_then(|v| v.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
