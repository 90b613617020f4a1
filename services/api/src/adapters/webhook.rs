//! services/api/src/adapters/webhook.rs
//!
//! This module contains the adapter that triggers the external analysis
//! worker. It implements the `AnalysisDispatcher` port from the `core` crate
//! by POSTing the job payload to the worker's webhook URL.

use async_trait::async_trait;
use prompt_analyzer_core::domain::AnalysisJob;
use prompt_analyzer_core::ports::{AnalysisDispatcher, PortError, PortResult};

/// A webhook dispatcher that implements the `AnalysisDispatcher` port.
#[derive(Clone)]
pub struct WebhookDispatcher {
    client: reqwest::Client,
    webhook_url: String,
}

impl WebhookDispatcher {
    /// Creates a new `WebhookDispatcher` targeting the configured webhook URL.
    pub fn new(client: reqwest::Client, webhook_url: String) -> Self {
        Self {
            client,
            webhook_url,
        }
    }
}

#[async_trait]
impl AnalysisDispatcher for WebhookDispatcher {
    async fn dispatch(&self, job: &AnalysisJob) -> PortResult<()> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(job)
            .send()
            .await
            .map_err(|e| PortError::Unexpected(format!("webhook request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PortError::Unexpected(format!(
                "webhook returned {status}: {body}"
            )));
        }
        Ok(())
    }
}
