//! services/cli/src/client.rs
//!
//! A thin HTTP client for the analyzer API. Wire types come from the core
//! crate, so this module is only transport plus error mapping.

use crate::error::CliError;
use prompt_analyzer_core::domain::{
    AnalysisRequest, AnalysisStatus, ErrorResponse, StartAnalysisResponse,
};

/// Client for the analyzer API's submission and polling endpoints.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Submits an analysis job and returns the minted session id.
    pub async fn start_analysis(&self, request: &AnalysisRequest) -> Result<String, CliError> {
        let response = self
            .http
            .post(format!("{}/analyze", self.base_url))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|e| e.message)
                .unwrap_or_else(|_| "Failed to start analysis.".to_string());
            return Err(CliError::Api(message));
        }

        let started: StartAnalysisResponse = response.json().await?;
        if !started.success {
            return Err(CliError::Api("Failed to start analysis.".to_string()));
        }
        Ok(started.session_id)
    }

    /// Fetches the current status of a session. A 500 from the API still
    /// parses into `AnalysisStatus::Error`, which the orchestrator treats as
    /// one more retryable attempt.
    pub async fn poll_status(&self, session_id: &str) -> Result<AnalysisStatus, CliError> {
        let response = self
            .http
            .get(format!("{}/analyze/status/{session_id}", self.base_url))
            .send()
            .await?;
        Ok(response.json::<AnalysisStatus>().await?)
    }
}
