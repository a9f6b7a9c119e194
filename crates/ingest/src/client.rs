//! HTTP client for the execution-history API.
//!
//! Uses `ureq` (sync) wrapped in `tokio::task::spawn_blocking` to avoid
//! blocking the async runtime. Retries live here, at the transport
//! boundary, and nowhere above: transport failures and 5xx responses are
//! retried up to the configured bounded budget, 4xx responses fail fast.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use chronicle_core::HistoryApiConfig;

use crate::error::IngestError;
use crate::history::{ExecutionHistoryApi, HistoryPage};

/// Client for a history endpoint speaking JSON over HTTP.
///
/// Requests are `POST {base_url}/history` with body
/// `{"executionArn": ..., "nextToken": ...}`; responses are a
/// [`HistoryPage`]. A bearer token is attached when configured.
pub struct HttpHistoryClient {
    config: HistoryApiConfig,
}

impl HttpHistoryClient {
    pub fn new(config: HistoryApiConfig) -> Self {
        HttpHistoryClient { config }
    }

    fn endpoint(&self) -> String {
        format!("{}/history", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ExecutionHistoryApi for HttpHistoryClient {
    async fn history_page(
        &self,
        execution_arn: &str,
        next_token: Option<&str>,
    ) -> Result<HistoryPage, IngestError> {
        let url = self.endpoint();
        let auth_token = self.config.auth_token.clone();
        let max_attempts = self.config.max_attempts.max(1);
        let body = json!({
            "executionArn": execution_arn,
            "nextToken": next_token,
        });
        debug!(url = %url, has_token = next_token.is_some(), "requesting history page");

        tokio::task::spawn_blocking(move || {
            fetch_page(&url, auth_token.as_deref(), &body, max_attempts)
        })
        .await
        .map_err(|e| IngestError::HistoryTransport {
            message: format!("task join error: {e}"),
        })?
    }
}

fn fetch_page(
    url: &str,
    auth_token: Option<&str>,
    body: &serde_json::Value,
    max_attempts: u32,
) -> Result<HistoryPage, IngestError> {
    let agent = ureq::Agent::new_with_defaults();
    let mut attempt = 0;
    loop {
        attempt += 1;
        let mut request = agent.post(url);
        if let Some(token) = auth_token {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }

        let error = match request.send_json(body) {
            Ok(response) => {
                return response.into_body().read_json::<HistoryPage>().map_err(|e| {
                    IngestError::HistoryTransport {
                        message: format!("failed to parse history page: {e}"),
                    }
                });
            }
            Err(e) => e,
        };

        if !is_retryable(&error) || attempt >= max_attempts {
            return Err(classify(error));
        }
        warn!(attempt, max_attempts, error = %error, "history request failed, retrying");
        std::thread::sleep(Duration::from_millis(100 * u64::from(attempt)));
    }
}

/// Transport failures, throttling, and server-side errors are worth
/// another attempt; other client-side rejections are not.
fn is_retryable(error: &ureq::Error) -> bool {
    match error {
        ureq::Error::StatusCode(code) => *code >= 500 || *code == 429,
        _ => true,
    }
}

fn classify(error: ureq::Error) -> IngestError {
    match error {
        ureq::Error::StatusCode(code) => IngestError::HistoryApi {
            status: code,
            message: "history request rejected".to_string(),
        },
        other => IngestError::HistoryTransport {
            message: other.to_string(),
        },
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
