//! Error taxonomy for the oncall application.
//!
//! Three families cover everything that can go wrong:
//!
//! - [`ConfigError`]: the invocation cannot proceed (missing token, unknown
//!   shift, empty team). Always fatal at the CLI boundary.
//! - [`ParseError`]: a date or timestamp did not match its wire format.
//! - [`FetchError`]: one schedule request failed. Recoverable per shift.

use std::path::PathBuf;
use thiserror::Error;

/// Problems with process configuration or command arguments.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Environment variable {0} must be set")]
    MissingToken(&'static str),

    #[error("Please specify a user name")]
    MissingUserName,

    #[error("Unknown shift '{name}', expected one of: {available}")]
    UnknownShift { name: String, available: String },

    #[error("No shifts configured, add them to {0}")]
    NoShifts(String),

    #[error("Team allow-list is empty, add PagerDuty user ids to \"team\" in {0}")]
    EmptyTeam(String),

    #[error("Failed to read configuration {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A date or timestamp that does not match the expected format.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid timestamp '{input}': {reason}")]
    Timestamp { input: String, reason: String },

    #[error("invalid date '{input}', expected YYYY-MM-DD: {reason}")]
    Date { input: String, reason: String },

    #[error("start date {start} is after end date {end}")]
    InvalidRange { start: String, end: String },
}

/// Failure of a single schedule request.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Any status other than `200 OK`, carrying the status text.
    #[error("{0}")]
    Status(String),

    #[error("failed to decode schedule: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("worker stopped before returning: {0}")]
    Aborted(String),
}
