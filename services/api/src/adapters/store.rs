//! services/api/src/adapters/store.rs
//!
//! The in-memory result store adapter, the concrete implementation of the
//! `ResultStore` port. Results live under `session:{id}` keys with a bounded
//! time-to-live and are consumed on read, so each completed analysis is
//! delivered at most once.

use async_trait::async_trait;
use prompt_analyzer_core::domain::RecommendedPrompt;
use prompt_analyzer_core::ports::{PortResult, ResultStore};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

struct Entry {
    prompts: Vec<RecommendedPrompt>,
    expires_at: Instant,
}

/// A TTL key-value store holding per-session analysis output.
///
/// Two parties touch each key: the analysis worker writes (via the ingestion
/// endpoint) and the status poller takes. Keys are unique per session, so a
/// single mutex over the map is all the coordination required; concurrent
/// takes for the same session serialize and exactly one of them wins.
#[derive(Default)]
pub struct InMemoryResultStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(session_id: &str) -> String {
        format!("session:{session_id}")
    }

    /// Drops every expired entry. Reads already ignore expired entries; this
    /// keeps abandoned sessions from accumulating between reads and is run
    /// periodically from the server binary.
    pub async fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn put(
        &self,
        session_id: &str,
        prompts: Vec<RecommendedPrompt>,
        ttl: Duration,
    ) -> PortResult<()> {
        let entry = Entry {
            prompts,
            expires_at: Instant::now() + ttl,
        };
        // Last write wins: the worker may retry its callback.
        self.entries.lock().await.insert(Self::key(session_id), entry);
        Ok(())
    }

    async fn take(&self, session_id: &str) -> PortResult<Option<Vec<RecommendedPrompt>>> {
        let mut entries = self.entries.lock().await;
        match entries.remove(&Self::key(session_id)) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.prompts)),
            // Expired entries read as absent and stay removed.
            _ => Ok(None),
        }
    }
}
