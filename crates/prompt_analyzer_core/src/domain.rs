//! crates/prompt_analyzer_core/src/domain.rs
//!
//! Defines the core data structures and wire envelopes for the analyzer.
//! These structs double as the JSON contract shared by the API service, the
//! CLI orchestrator, and the external analysis worker, so serde lives here.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// The minimum number of candidate prompts a submission must carry.
pub const MIN_PROMPTS: usize = 5;

/// The input payload for one analysis job: a website domain plus the
/// user-authored candidate prompts to evaluate against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub domain: String,
    pub prompts: Vec<String>,
}

/// The outbound payload forwarded to the analysis worker's webhook: the
/// original request merged with the freshly minted session id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisJob {
    pub domain: String,
    pub prompts: Vec<String>,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

impl AnalysisJob {
    pub fn new(request: AnalysisRequest, session_id: String) -> Self {
        Self {
            domain: request.domain,
            prompts: request.prompts,
            session_id,
        }
    }
}

/// One ranked output record, produced by the external worker and consumed
/// verbatim. Field names are the wire names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedPrompt {
    pub rank: u32,
    pub prompt_text: String,
    pub final_score: f64,
    pub ai_opportunity_score: f64,
    pub seo_opportunity_score: f64,
    pub score_reasoning: String,
    // AI-citation signals
    pub perplexity_cited: bool,
    pub gemini_cited: bool,
    pub perplexity_citation_rank: Option<u32>,
    pub gemini_citation_rank: Option<u32>,
    pub perplexity_first_paragraph: bool,
    pub gemini_first_paragraph: bool,
    pub engine_consensus: f64,
    // SEO metrics
    pub search_volume: u64,
    pub keyword_difficulty: f64,
    pub cpc: f64,
    pub trend_yoy: f64,
    pub trend_mom: f64,
    pub has_featured_snippet: bool,
    pub has_paa: bool,
    pub has_ai_overview: bool,
    /// The worker stamps its own session id onto each record; optional on
    /// the wire and skipped when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// The response sent after a submission has been accepted and dispatched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartAnalysisResponse {
    pub success: bool,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// The polling envelope. Serializes as `{"status": "processing"}`,
/// `{"status": "complete", "data": [...]}` or
/// `{"status": "error", "message": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnalysisStatus {
    Processing,
    Complete { data: Vec<RecommendedPrompt> },
    Error { message: String },
}

/// The ingestion callback body posted by the analysis worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreResultsRequest {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub top_prompts: Vec<RecommendedPrompt>,
}

/// The minimal JSON error envelope returned by every endpoint on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

//=========================================================================================
// Input Validation
//=========================================================================================

/// Why a submission was rejected before reaching the analysis worker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a valid domain (e.g., example.com or https://example.com)")]
    InvalidDomain,
    #[error("Please add at least {min} prompts for analysis (got {got})")]
    TooFewPrompts { got: usize, min: usize },
    #[error("Prompts must not be blank")]
    BlankPrompt,
}

fn domain_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Host-like token with at least one dot and a 2+ letter TLD,
        // optional scheme and path.
        Regex::new(r"^(?:https?://)?(?:www\.)?(?:[A-Za-z0-9-]+\.)+[A-Za-z]{2,}(?:/.*)?$")
            .expect("domain pattern is valid")
    })
}

/// Checks whether a string looks like a bare or schemed hostname.
pub fn validate_domain(domain: &str) -> bool {
    domain_pattern().is_match(domain)
}

/// Validates a full submission: domain pattern, prompt minimum, and no
/// blank prompt strings. Used client-side before any network call and
/// re-applied server-side so the contract does not rest on client trust.
pub fn validate_request(request: &AnalysisRequest) -> Result<(), ValidationError> {
    if !validate_domain(request.domain.trim()) {
        return Err(ValidationError::InvalidDomain);
    }
    if request.prompts.len() < MIN_PROMPTS {
        return Err(ValidationError::TooFewPrompts {
            got: request.prompts.len(),
            min: MIN_PROMPTS,
        });
    }
    if request.prompts.iter().any(|p| p.trim().is_empty()) {
        return Err(ValidationError::BlankPrompt);
    }
    Ok(())
}
