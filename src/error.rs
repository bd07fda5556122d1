//! Error types for the student console
//!
//! Every failure is surfaced to the user as the text of a status message, so
//! these enums exist for logging and for tests rather than for recovery.

use thiserror::Error;

/// Failures talking to the student API
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, ...)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status
    #[error("server returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body, for display
        body: String,
    },

    /// The response body was not the JSON shape we expected
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Problems with user input caught before any request is sent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A required field was left blank
    #[error("{0} is required")]
    Missing(&'static str),

    /// An integer field could not be parsed
    #[error("{field} must be a whole number, got '{value}'")]
    NotAnInteger {
        /// Field label
        field: &'static str,
        /// What the user typed
        value: String,
    },

    /// An integer field is outside its allowed range
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        /// Field label
        field: &'static str,
        /// Inclusive lower bound
        min: i64,
        /// Inclusive upper bound
        max: i64,
    },

    /// Grades are a single letter A-F
    #[error("Grade must be one letter (A-F), got '{0}'")]
    InvalidGrade(String),

    /// Names made only of digits are almost always a mistyped id
    #[error("Name can't be numeric")]
    NumericName,
}
