//! DynamoDB write path.
//!
//! Records are written with `BatchWriteItem`, at most [`MAX_BATCH_ITEMS`]
//! per request (the provider's batch-size limit). Items the provider
//! returns as unprocessed are re-submitted with linear backoff up to a
//! bounded number of attempts; anything still unprocessed after that is an
//! error. Transport-level retries are the SDK's, configured in standard
//! mode with a bounded attempt budget.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use tracing::{debug, warn};

use crate::attr::record_to_item;
use crate::error::StorageError;
use crate::record::TableRecord;
use crate::traits::RecordStore;

/// DynamoDB caps `BatchWriteItem` at 25 write requests.
pub const MAX_BATCH_ITEMS: usize = 25;

/// Transport retry budget, standard mode.
const MAX_CLIENT_ATTEMPTS: u32 = 10;

/// Re-submission budget for items the provider returns as unprocessed.
const MAX_UNPROCESSED_ROUNDS: u32 = 5;

/// Store backed by a DynamoDB table.
#[derive(Debug)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    /// Build a store against the ambient AWS environment.
    pub async fn connect(table_name: &str) -> Result<Self, StorageError> {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .retry_config(RetryConfig::standard().with_max_attempts(MAX_CLIENT_ATTEMPTS))
            .load()
            .await;
        Ok(DynamoStore {
            client: Client::new(&config),
            table_name: table_name.to_string(),
        })
    }

    /// Build a store around an existing client.
    pub fn with_client(client: Client, table_name: impl Into<String>) -> Self {
        DynamoStore {
            client,
            table_name: table_name.into(),
        }
    }

    async fn write_chunk(
        &self,
        mut requests: Vec<WriteRequest>,
    ) -> Result<(), StorageError> {
        let mut round = 0;
        while !requests.is_empty() {
            round += 1;
            let resp = self
                .client
                .batch_write_item()
                .request_items(self.table_name.clone(), requests)
                .send()
                .await
                .map_err(|e| StorageError::Backend(format!("batch_write_item failed: {e}")))?;

            requests = resp
                .unprocessed_items()
                .and_then(|m| m.get(&self.table_name).cloned())
                .unwrap_or_default();

            if requests.is_empty() {
                break;
            }
            if round >= MAX_UNPROCESSED_ROUNDS {
                return Err(StorageError::UnprocessedItems {
                    count: requests.len(),
                    attempts: round,
                });
            }
            warn!(
                unprocessed = requests.len(),
                round, "provider returned unprocessed items, re-submitting"
            );
            tokio::time::sleep(Duration::from_millis(50 * u64::from(round))).await;
        }
        Ok(())
    }
}

fn to_write_request(item: HashMap<String, AttributeValue>) -> Result<WriteRequest, StorageError> {
    let put = PutRequest::builder()
        .set_item(Some(item))
        .build()
        .map_err(|e| StorageError::Serialization {
            message: e.to_string(),
        })?;
    Ok(WriteRequest::builder().put_request(put).build())
}

#[async_trait]
impl RecordStore for DynamoStore {
    async fn put_records(&self, records: &[TableRecord]) -> Result<(), StorageError> {
        let mut requests = Vec::with_capacity(records.len());
        for record in records {
            requests.push(to_write_request(record_to_item(record)?)?);
        }
        debug!(
            records = requests.len(),
            table = %self.table_name,
            "writing record batch"
        );
        for chunk in requests.chunks(MAX_BATCH_ITEMS) {
            self.write_chunk(chunk.to_vec()).await?;
        }
        Ok(())
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_batches_at_provider_limit() {
        let sizes: Vec<usize> = (0..60)
            .collect::<Vec<usize>>()
            .chunks(MAX_BATCH_ITEMS)
            .map(<[usize]>::len)
            .collect();
        assert_eq!(sizes, vec![25, 25, 10]);
    }
}
