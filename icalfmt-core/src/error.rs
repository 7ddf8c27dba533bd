//! Error types for icalfmt.

use thiserror::Error;

/// Errors that can occur while decoding and normalizing a calendar feed.
#[derive(Error, Debug)]
pub enum IcalFmtError {
    #[error("Event #{index} has no properties")]
    MissingProperties { index: usize },

    #[error("Event #{index}: failed to decode {field} value '{value}'")]
    DateParse {
        field: &'static str,
        index: usize,
        value: String,
    },

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for icalfmt operations.
pub type IcalFmtResult<T> = Result<T, IcalFmtError>;
