//! crates/prompt_analyzer_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of specific external implementations like the
//! result store or the worker's webhook transport.

use crate::domain::{AnalysisJob, RecommendedPrompt};
use async_trait::async_trait;
use std::time::Duration;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., store, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The per-session result store shared between the analysis worker (writer,
/// via the ingestion endpoint) and the status poller (reader).
///
/// Delivery is delete-on-read: `take` consumes the entry, so a completed
/// result is handed out exactly once and the first of two concurrent pollers
/// wins. Entries self-clean after their time-to-live.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Stores a result set for a session. Last write wins; the worker may
    /// retry its callback and each retry simply overwrites.
    async fn put(
        &self,
        session_id: &str,
        prompts: Vec<RecommendedPrompt>,
        ttl: Duration,
    ) -> PortResult<()>;

    /// Removes and returns the result set for a session, or `None` if the
    /// worker has not written one yet (or it expired unread).
    async fn take(&self, session_id: &str) -> PortResult<Option<Vec<RecommendedPrompt>>>;
}

/// The outbound trigger for the external analysis worker.
#[async_trait]
pub trait AnalysisDispatcher: Send + Sync {
    /// Forwards one job to the worker's webhook. Callers that need
    /// fire-and-forget semantics run this on a detached task.
    async fn dispatch(&self, job: &AnalysisJob) -> PortResult<()>;
}
