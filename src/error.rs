//! Error types for the reconstruction pipeline.
//!
//! This module defines all error types that can occur while analyzing,
//! reconstructing, segmenting, and finalizing a document.

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document reconstruction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required input (source document, section log, ...) does not exist
    #[error("Input not found: {0}")]
    InputMissing(String),

    /// A single page's content could not be parsed
    #[error("Failed to parse page {page}: {reason}")]
    PageParse {
        /// 1-based page number where the failure occurred
        page: u32,
        /// Reason for the parse failure
        reason: String,
    },

    /// The structured-section log exists but contains no records
    #[error("Section log is empty: {0}")]
    EmptySectionLog(String),

    /// Invalid configuration value (e.g. a heading pattern that does not compile)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_missing_error() {
        let err = Error::InputMissing("book.pdf".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Input not found"));
        assert!(msg.contains("book.pdf"));
    }

    #[test]
    fn test_page_parse_error() {
        let err = Error::PageParse {
            page: 17,
            reason: "truncated operation stream".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("17"));
        assert!(msg.contains("truncated operation stream"));
    }

    #[test]
    fn test_empty_section_log_error() {
        let err = Error::EmptySectionLog("sections.jsonl".to_string());
        assert!(format!("{}", err).contains("sections.jsonl"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
