//! Process-wide configuration.
//!
//! The verbosity policy is deliberately re-read from the environment on
//! every ingestion invocation, then threaded through as a plain value, so
//! operators can flip it at runtime and tests never have to mutate the
//! environment. Backend selection, by contrast, happens once, when the
//! store is constructed.

use std::env;
use std::str::FromStr;

/// Environment variable holding the verbosity policy.
pub const EVENT_LOGGING_LEVEL_VAR: &str = "EVENT_LOGGING_LEVEL";
/// Environment variable selecting the datastore backend.
pub const DATASTORE_TYPE_VAR: &str = "DATASTORE_TYPE";
/// Environment variable holding the datastore resource identifier.
pub const DATASTORE_ARN_VAR: &str = "DATASTORE_ARN";
/// Environment variable holding the execution-history API endpoint.
pub const HISTORY_API_URL_VAR: &str = "HISTORY_API_URL";
/// Environment variable holding an optional bearer token for the API.
pub const HISTORY_API_TOKEN_VAR: &str = "HISTORY_API_TOKEN";

/// Errors raised while reading process configuration.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable '{name}' is not set")]
    MissingVar { name: &'static str },

    #[error("unknown datastore backend '{value}' (expected 'Dynamodb' or 'Postgres')")]
    UnknownBackend { value: String },
}

// ──────────────────────────────────────────────
// Verbosity policy
// ──────────────────────────────────────────────

/// How much of an execution is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoggingLevel {
    /// Only the execution summary record.
    Summary,
    /// The summary plus one record per history event.
    #[default]
    Full,
}

impl LoggingLevel {
    /// Interpret a raw policy value: `SUMMARY` narrows to summary-only;
    /// anything else, including unset, means full history.
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some("SUMMARY") => LoggingLevel::Summary,
            _ => LoggingLevel::Full,
        }
    }

    /// Read the policy from the environment. Called once per ingestion
    /// invocation, never cached at startup.
    pub fn from_env() -> Self {
        Self::from_value(env::var(EVENT_LOGGING_LEVEL_VAR).ok().as_deref())
    }
}

// ──────────────────────────────────────────────
// Datastore selection
// ──────────────────────────────────────────────

/// The durable store backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatastoreKind {
    Dynamodb,
    /// Declared but not implemented; selecting it fails at construction.
    Postgres,
}

impl FromStr for DatastoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Dynamodb" => Ok(DatastoreKind::Dynamodb),
            "Postgres" => Ok(DatastoreKind::Postgres),
            other => Err(ConfigError::UnknownBackend {
                value: other.to_string(),
            }),
        }
    }
}

/// Which store to write to, and where it lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatastoreConfig {
    pub kind: DatastoreKind,
    /// Provider-specific resource identifier, e.g. a table ARN.
    pub resource_arn: String,
}

impl DatastoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let kind = env::var(DATASTORE_TYPE_VAR)
            .map_err(|_| ConfigError::MissingVar {
                name: DATASTORE_TYPE_VAR,
            })?
            .parse()?;
        let resource_arn = env::var(DATASTORE_ARN_VAR).map_err(|_| ConfigError::MissingVar {
            name: DATASTORE_ARN_VAR,
        })?;
        Ok(DatastoreConfig { kind, resource_arn })
    }

    /// The table name is the final `/`-delimited segment of the resource
    /// identifier.
    pub fn table_name(&self) -> &str {
        self.resource_arn
            .rsplit('/')
            .next()
            .unwrap_or(&self.resource_arn)
    }
}

// ──────────────────────────────────────────────
// History API endpoint
// ──────────────────────────────────────────────

/// Where the orchestration service's execution-history API lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryApiConfig {
    pub base_url: String,
    pub auth_token: Option<String>,
    /// Transport-level retry budget; the pipeline itself never retries.
    pub max_attempts: u32,
}

impl HistoryApiConfig {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

    pub fn new(base_url: impl Into<String>) -> Self {
        HistoryApiConfig {
            base_url: base_url.into(),
            auth_token: None,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var(HISTORY_API_URL_VAR).map_err(|_| ConfigError::MissingVar {
            name: HISTORY_API_URL_VAR,
        })?;
        Ok(HistoryApiConfig {
            base_url,
            auth_token: env::var(HISTORY_API_TOKEN_VAR).ok(),
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
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
    fn summary_only_when_exactly_summary() {
        assert_eq!(
            LoggingLevel::from_value(Some("SUMMARY")),
            LoggingLevel::Summary
        );
    }

    #[test]
    fn anything_else_means_full() {
        assert_eq!(LoggingLevel::from_value(None), LoggingLevel::Full);
        assert_eq!(LoggingLevel::from_value(Some("")), LoggingLevel::Full);
        assert_eq!(LoggingLevel::from_value(Some("FULL")), LoggingLevel::Full);
        assert_eq!(
            LoggingLevel::from_value(Some("summary")),
            LoggingLevel::Full
        );
    }

    #[test]
    fn backend_selector_parses() {
        assert_eq!(
            "Dynamodb".parse::<DatastoreKind>().unwrap(),
            DatastoreKind::Dynamodb
        );
        assert_eq!(
            "Postgres".parse::<DatastoreKind>().unwrap(),
            DatastoreKind::Postgres
        );
        assert!(matches!(
            "Sqlite".parse::<DatastoreKind>(),
            Err(ConfigError::UnknownBackend { .. })
        ));
    }

    #[test]
    fn table_name_is_final_arn_segment() {
        let config = DatastoreConfig {
            kind: DatastoreKind::Dynamodb,
            resource_arn: "arn:aws:dynamodb:us-east-1:123456789012:table/execution-events"
                .to_string(),
        };
        assert_eq!(config.table_name(), "execution-events");

        let bare = DatastoreConfig {
            kind: DatastoreKind::Dynamodb,
            resource_arn: "execution-events".to_string(),
        };
        assert_eq!(bare.table_name(), "execution-events");
    }
}
