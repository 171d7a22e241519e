//! Custom error types for the sitelens report renderer.
//!
//! Upstream contract violations (bad scores, unknown categories, misaligned
//! chart data) are surfaced as errors instead of being papered over with
//! defaults, so a broken scanner never produces a plausible-looking page.

use std::path::PathBuf;

/// The main error type for sitelens operations.
#[derive(Debug, thiserror::Error)]
pub enum SitelensError {
    /// I/O error (file read/write, permissions, etc.)
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A category score outside 1..=5
    #[error("Score {score} for '{category}' is outside 1..=5")]
    ScoreOutOfRange { category: String, score: i64 },

    /// A scored category has no entry in the category catalog
    #[error("Category '{0}' is not present in the category catalog")]
    UnknownCategory(String),

    /// Chart arrays differ in length from each other or from the score list
    #[error("Chart data misaligned: {labels} labels, {data} values, {colors} colors for {scores} scores")]
    ChartMisaligned {
        labels: usize,
        data: usize,
        colors: usize,
        scores: usize,
    },

    /// Chart entry disagrees with the score list at the same index
    #[error("Chart entry {index} ('{label}' = {value}) does not match score list ('{category}' = {score})")]
    ChartMismatch {
        index: usize,
        label: String,
        value: u8,
        category: String,
        score: u8,
    },

    /// Overall score outside [0, 5] or not finite
    #[error("Overall score {0} is outside 0..=5")]
    OverallOutOfRange(f64),

    /// Target URL rejected by validation
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Category catalog failed to load or is malformed
    #[error("Invalid category catalog: {0}")]
    Catalog(String),

    /// Progress bar template error
    #[error("Failed to build progress display: {0}")]
    ProgressTemplate(String),
}

/// Result type alias using SitelensError
pub type SitelensResult<T> = Result<T, SitelensError>;

impl SitelensError {
    /// Create an I/O error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a URL validation error
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Convert from raw I/O errors (without path context)
impl From<std::io::Error> for SitelensError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { path: None, source }
    }
}

impl From<indicatif::style::TemplateError> for SitelensError {
    fn from(err: indicatif::style::TemplateError) -> Self {
        Self::ProgressTemplate(err.to_string())
    }
}
