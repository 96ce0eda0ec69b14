//! Error types for the ingestion pipeline
//!
//! A field parser that cannot find a value is not an error (it yields no
//! contribution). Everything in [`RecruitError`] is fatal to the current run;
//! the ingestion loop still flushes its checkpoint before returning one.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Recruit operations
pub type Result<T> = std::result::Result<T, RecruitError>;

/// Main error type for Recruit
#[derive(Error, Debug)]
pub enum RecruitError {
    #[error("Failed to open source '{path}': {reason}")]
    SourceOpen { path: PathBuf, reason: String },

    #[error("Source is not open")]
    SourceNotOpen,

    #[error("Row {row} has {cells} cell(s) but {expected} field parser(s) are configured")]
    RowTooShort {
        row: usize,
        cells: usize,
        expected: usize,
    },

    #[error("Row numbers start at 1")]
    InvalidRowNumber,

    #[error("Field '{key}' is produced by more than one parser")]
    DuplicateField { key: String },

    #[error("Field '{field}' could not be converted: {reason}")]
    FieldFault { field: String, reason: String },

    #[error("Invalid checkpoint in '{path}': {content:?} is not a row number")]
    CorruptCheckpoint { path: PathBuf, content: String },

    #[error("Submission of row {row} failed: {source}")]
    Submission {
        row: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RecruitError {
    /// Create a source-open error
    pub fn source_open(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::SourceOpen {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_too_short_message() {
        let err = RecruitError::RowTooShort {
            row: 4,
            cells: 3,
            expected: 5,
        };
        assert_eq!(
            err.to_string(),
            "Row 4 has 3 cell(s) but 5 field parser(s) are configured"
        );
    }

    #[test]
    fn test_submission_keeps_source() {
        let err = RecruitError::Submission {
            row: 7,
            source: anyhow::anyhow!("connection reset"),
        };
        assert!(err.to_string().contains("row 7"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
