//! Record → DynamoDB item conversion.
//!
//! DynamoDB numbers are arbitrary-precision decimals carried as text, so
//! every JSON number is routed through [`rust_decimal::Decimal`] and
//! re-rendered canonically. Nothing on this path passes through binary
//! floating point. A number the store cannot represent exactly (DynamoDB
//! caps at 38 significant digits, `Decimal` at 28) is rejected as a
//! serialization error rather than rounded.

use std::collections::HashMap;
use std::str::FromStr;

use aws_sdk_dynamodb::types::AttributeValue;
use rust_decimal::Decimal;
use serde_json::{Number, Value};

use crate::error::StorageError;
use crate::record::TableRecord;

/// Attribute carrying the record-type discriminator.
pub const RECORD_TYPE_ATTR: &str = "record_type";

/// Convert a record into a DynamoDB item map.
pub fn record_to_item(
    record: &TableRecord,
) -> Result<HashMap<String, AttributeValue>, StorageError> {
    let value = serde_json::to_value(record).map_err(|e| StorageError::Serialization {
        message: e.to_string(),
    })?;
    let Value::Object(fields) = value else {
        return Err(StorageError::Serialization {
            message: "record did not serialize to an object".to_string(),
        });
    };

    let mut item = HashMap::with_capacity(fields.len() + 1);
    for (name, field) in fields {
        item.insert(name, to_attribute(field)?);
    }
    item.insert(
        RECORD_TYPE_ATTR.to_string(),
        AttributeValue::S(record.kind().to_string()),
    );
    Ok(item)
}

fn to_attribute(value: Value) -> Result<AttributeValue, StorageError> {
    Ok(match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(numeric_text(&n)?),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(items) => AttributeValue::L(
            items
                .into_iter()
                .map(to_attribute)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Object(entries) => AttributeValue::M(
            entries
                .into_iter()
                .map(|(k, v)| Ok((k, to_attribute(v)?)))
                .collect::<Result<HashMap<_, _>, StorageError>>()?,
        ),
    })
}

/// Canonical exact-decimal text for a JSON number.
fn numeric_text(number: &Number) -> Result<String, StorageError> {
    let raw = number.to_string();
    let decimal = Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .map_err(|e| StorageError::Serialization {
            message: format!("number '{raw}' is not representable exactly: {e}"),
        })?;
    Ok(decimal.normalize().to_string())
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RecordIdentity, SummaryRecord};
    use chronicle_core::{ExecutionIdentity, ExecutionStatus};

    fn summary_with_input(input: Value) -> TableRecord {
        let identity = ExecutionIdentity {
            execution_id: "run-1".to_string(),
            workflow_name: "orders".to_string(),
        };
        TableRecord::Summary(SummaryRecord {
            identity: RecordIdentity::summary(&identity, "1970-01-01T00:00:01.000000+0000"),
            status: ExecutionStatus::Succeeded,
            input,
            output: Value::String(String::new()),
            start_date: "1970-01-01T00:00:01.000000+0000".to_string(),
            stop_date: "1970-01-01T00:00:02.000000+0000".to_string(),
            start_date_raw: 1000,
            stop_date_raw: 2000,
        })
    }

    #[test]
    fn item_carries_keys_and_record_type() {
        let item = record_to_item(&summary_with_input(Value::Null)).unwrap();
        assert_eq!(
            item["execution_id"],
            AttributeValue::S("run-1".to_string())
        );
        assert_eq!(
            item["step_id"],
            AttributeValue::S("1970-01-01T00:00:01.000000+0000_summary".to_string())
        );
        assert_eq!(
            item[RECORD_TYPE_ATTR],
            AttributeValue::S("summary".to_string())
        );
        assert_eq!(item["startDate_raw"], AttributeValue::N("1000".to_string()));
        assert_eq!(item["output"], AttributeValue::S(String::new()));
    }

    #[test]
    fn payload_numbers_stay_exact() {
        // More fractional digits than f64 can hold.
        let input: Value =
            serde_json::from_str(r#"{"pi": 3.14159265358979323846, "qty": 7}"#).unwrap();
        let item = record_to_item(&summary_with_input(input)).unwrap();
        let AttributeValue::M(payload) = &item["input"] else {
            panic!("input should map to an M attribute");
        };
        assert_eq!(
            payload["pi"],
            AttributeValue::N("3.14159265358979323846".to_string())
        );
        assert_eq!(payload["qty"], AttributeValue::N("7".to_string()));
    }

    #[test]
    fn nested_payload_shapes_map_through() {
        let input: Value =
            serde_json::from_str(r#"{"tags": ["a", "b"], "flags": {"dry_run": false}, "note": null}"#)
                .unwrap();
        let item = record_to_item(&summary_with_input(input)).unwrap();
        let AttributeValue::M(payload) = &item["input"] else {
            panic!("input should map to an M attribute");
        };
        assert_eq!(
            payload["tags"],
            AttributeValue::L(vec![
                AttributeValue::S("a".to_string()),
                AttributeValue::S("b".to_string()),
            ])
        );
        let AttributeValue::M(flags) = &payload["flags"] else {
            panic!("flags should map to an M attribute");
        };
        assert_eq!(flags["dry_run"], AttributeValue::Bool(false));
        assert_eq!(payload["note"], AttributeValue::Null(true));
    }

    #[test]
    fn scientific_notation_is_canonicalized() {
        let input: Value = serde_json::from_str(r#"{"big": 1e3}"#).unwrap();
        let item = record_to_item(&summary_with_input(input)).unwrap();
        let AttributeValue::M(payload) = &item["input"] else {
            panic!("input should map to an M attribute");
        };
        assert_eq!(payload["big"], AttributeValue::N("1000".to_string()));
    }

    #[test]
    fn failed_summary_keeps_numbers_exact_through_flattening() {
        let TableRecord::Summary(summary) = summary_with_input(
            serde_json::from_str(r#"{"amount": 19.999999999999999999}"#).unwrap(),
        ) else {
            unreachable!();
        };
        let record = TableRecord::Failed(crate::record::FailedSummaryRecord {
            summary,
            failure: crate::record::FailureDetails {
                failed_step_name: "Transform".to_string(),
                failed_step_input: "{}".to_string(),
                failed_step_error_name: "States.TaskFailed".to_string(),
                failed_step_error_message: "boom".to_string(),
            },
        });

        let item = record_to_item(&record).unwrap();
        assert_eq!(
            item[RECORD_TYPE_ATTR],
            AttributeValue::S("failed".to_string())
        );
        assert_eq!(
            item["failed_step_name"],
            AttributeValue::S("Transform".to_string())
        );
        let AttributeValue::M(payload) = &item["input"] else {
            panic!("input should map to an M attribute");
        };
        assert_eq!(
            payload["amount"],
            AttributeValue::N("19.999999999999999999".to_string())
        );
    }

    #[test]
    fn unrepresentable_number_is_rejected_not_rounded() {
        // 40 significant digits exceeds what the store can hold exactly.
        let input: Value =
            serde_json::from_str(r#"{"n": 1234567890123456789012345678901234567890}"#).unwrap();
        let err = record_to_item(&summary_with_input(input)).unwrap_err();
        assert!(matches!(err, StorageError::Serialization { .. }));
    }
}
