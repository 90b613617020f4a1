//! services/cli/src/orchestrator.rs
//!
//! The submit → poll state machine. Drives one analysis session from
//! submission through bounded polling to delivered results, mirroring the
//! `idle → processing → complete` lifecycle (errors drop back to idle so the
//! user can retry).

use crate::client::ApiClient;
use crate::error::CliError;
use prompt_analyzer_core::domain::{
    validate_request, AnalysisRequest, AnalysisStatus, RecommendedPrompt,
};
use std::time::Duration;
use tracing::{debug, info, warn};

/// How long to wait between poll attempts.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// How many polls to attempt before giving up (60 × 5 s ⇒ 5-minute ceiling).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 60;

/// The visible lifecycle of one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisState {
    Idle,
    Processing,
    Complete,
}

pub struct Orchestrator {
    client: ApiClient,
    poll_interval: Duration,
    max_attempts: u32,
    state: AnalysisState,
}

impl Orchestrator {
    pub fn new(client: ApiClient, poll_interval: Duration, max_attempts: u32) -> Self {
        Self {
            client,
            poll_interval,
            max_attempts,
            state: AnalysisState::Idle,
        }
    }

    pub fn state(&self) -> AnalysisState {
        self.state
    }

    /// Runs one full session: validate locally, submit, poll to completion.
    ///
    /// Validation failures never reach the network. Submission failures and
    /// an exhausted polling budget both return the machine to `Idle`; only a
    /// delivered result set lands in `Complete`.
    pub async fn run(
        &mut self,
        request: AnalysisRequest,
    ) -> Result<Vec<RecommendedPrompt>, CliError> {
        validate_request(&request)?;
        self.state = AnalysisState::Processing;

        let session_id = match self.client.start_analysis(&request).await {
            Ok(session_id) => session_id,
            Err(e) => {
                self.state = AnalysisState::Idle;
                return Err(e);
            }
        };
        info!(%session_id, "Analysis session started");

        match self.poll_until_complete(&session_id).await {
            Ok(data) => {
                self.state = AnalysisState::Complete;
                Ok(data)
            }
            Err(e) => {
                self.state = AnalysisState::Idle;
                Err(e)
            }
        }
    }

    /// The polling loop proper: strictly sequential, one outstanding poll at
    /// a time, wait-then-poll-then-decide. Transport hiccups and explicit
    /// `error` statuses both count as spent attempts and are retried on the
    /// same cadence.
    async fn poll_until_complete(
        &self,
        session_id: &str,
    ) -> Result<Vec<RecommendedPrompt>, CliError> {
        for attempt in 1..=self.max_attempts {
            tokio::time::sleep(self.poll_interval).await;

            match self.client.poll_status(session_id).await {
                Ok(AnalysisStatus::Complete { data }) => {
                    info!(%session_id, attempt, "Analysis complete");
                    return Ok(data);
                }
                Ok(AnalysisStatus::Processing) => {
                    debug!(%session_id, attempt, "Still processing");
                }
                Ok(AnalysisStatus::Error { message }) => {
                    warn!(%session_id, attempt, "Status endpoint reported an error: {message}");
                }
                Err(e) => {
                    warn!(%session_id, attempt, "Poll failed: {e}");
                }
            }
        }

        Err(CliError::Timeout(
            (self.poll_interval * self.max_attempts).as_secs(),
        ))
    }
}
