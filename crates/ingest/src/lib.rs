//! Chronicle ingestion pipeline.
//!
//! Consumes batches of execution-completion notifications, reconstructs
//! each execution's step history from the orchestration service, and
//! persists normalized summary + step records through
//! `chronicle-storage`.
//!
//! The pipeline is invoked by the message-delivery collaborator -- there
//! is no CLI or server surface here. One invocation processes one batch
//! to completion; the only suspension points are the remote calls
//! (history pagination, the batched store write).

mod client;
mod error;
mod history;
mod ingest;
mod normalize;
mod notification;

pub use client::HttpHistoryClient;
pub use error::IngestError;
pub use history::{fetch_history, ExecutionHistoryApi, HistoryEvent, HistoryPage};
pub use ingest::Ingestor;
pub use normalize::normalize_records;
pub use notification::{
    CompletionNotification, ExecutionDetail, NotificationBatch, QueueMessage,
};
