//! Error types for the Recruit CLI
//!
//! Every variant is user-facing: the message says what went wrong and, where
//! possible, how to fix it.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// The tracking service answered with a non-success status
    #[error("Tracking service returned HTTP {status}: {body}. Check the API token and URL.")]
    Api { status: u16, body: String },

    /// The service has no account at the requested index
    #[error("Account #{index} not available ({available} account(s) visible to this token). Pass a smaller --account.")]
    AccountNotFound { index: usize, available: usize },

    /// Ingestion failed; the checkpoint already reflects the furthest attempted row
    #[error("{0}. Fix the problem and run the same command again to resume.")]
    Ingest(#[from] recruit_common::RecruitError),

    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    #[error("Network request failed: {0}. Check your internet connection and the API URL.")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}. Check your command line or environment variables.")]
    Config(String),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
