//! Execution identity derivation.
//!
//! An execution is addressed by a fully-qualified, colon-delimited resource
//! identifier. The last segment is the unique execution id, the
//! second-to-last is the workflow (state machine) name. All records for one
//! execution are keyed off this pair.

use serde::Serialize;

/// Errors raised while deriving an execution identity.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum IdentityError {
    /// The identifier does not carry a `...:workflow:execution` tail.
    #[error("malformed execution identifier '{arn}': expected at least two non-empty colon-delimited segments")]
    Malformed { arn: String },
}

/// The `(execution id, workflow name)` pair derived from an execution ARN.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExecutionIdentity {
    pub execution_id: String,
    pub workflow_name: String,
}

impl ExecutionIdentity {
    /// Derive the identity from a colon-delimited execution identifier.
    ///
    /// Pure and total for well-formed identifiers; anything with fewer than
    /// two segments, or with an empty tail segment, is
    /// [`IdentityError::Malformed`].
    pub fn from_arn(arn: &str) -> Result<Self, IdentityError> {
        let mut tail = arn.rsplit(':');
        let execution_id = tail.next().unwrap_or_default();
        let workflow_name = tail.next().unwrap_or_default();

        if execution_id.is_empty() || workflow_name.is_empty() {
            return Err(IdentityError::Malformed {
                arn: arn.to_string(),
            });
        }

        Ok(ExecutionIdentity {
            execution_id: execution_id.to_string(),
            workflow_name: workflow_name.to_string(),
        })
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_last_two_segments() {
        let id = ExecutionIdentity::from_arn(
            "arn:aws:states:us-east-1:123456789012:execution:ingest-machine:run-42",
        )
        .unwrap();
        assert_eq!(id.execution_id, "run-42");
        assert_eq!(id.workflow_name, "ingest-machine");
    }

    #[test]
    fn minimal_two_segment_identifier() {
        let id = ExecutionIdentity::from_arn("workflow:exec").unwrap();
        assert_eq!(id.execution_id, "exec");
        assert_eq!(id.workflow_name, "workflow");
    }

    #[test]
    fn no_colon_is_malformed() {
        let err = ExecutionIdentity::from_arn("just-a-name").unwrap_err();
        assert!(matches!(err, IdentityError::Malformed { .. }));
    }

    #[test]
    fn empty_tail_segment_is_malformed() {
        assert!(ExecutionIdentity::from_arn("a:b:").is_err());
        assert!(ExecutionIdentity::from_arn("a::exec").is_err());
        assert!(ExecutionIdentity::from_arn("").is_err());
    }
}
