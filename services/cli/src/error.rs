//! services/cli/src/error.rs
//!
//! Defines the primary error type for the `cli` client.

use prompt_analyzer_core::domain::ValidationError;

/// The primary error type for the `cli` client.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Local input validation failed; no network call was made.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The API rejected a request or reported a failure.
    #[error("{0}")]
    Api(String),

    /// The transport itself failed (connection refused, DNS, etc.).
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The polling budget ran out before results arrived. Kept distinct from
    /// other failures: the underlying job may still complete later, with no
    /// way for the client to learn of it.
    #[error("Analysis timed out after {0} seconds. Please try again.")]
    Timeout(u64),

    /// Reading a prompts file failed.
    #[error("Could not read prompts file: {0}")]
    Io(#[from] std::io::Error),
}
