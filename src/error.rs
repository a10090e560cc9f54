//! Crate-level error type for whole runs.

use crate::io::{ParseError, WriteError};
use crate::policy::PolicyError;
use crate::walker::WalkerError;

/// Any condition that aborts a run.
#[derive(Debug, thiserror::Error)]
pub enum SlideshowError {
    /// Malformed or unreadable input.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    /// Walk could not start (empty catalog).
    #[error("Walk error: {0}")]
    Walk(#[from] WalkerError),
    /// Submission could not be written.
    #[error("Write error: {0}")]
    Write(#[from] WriteError),
    /// Policy file or overrides are invalid.
    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),
    /// Run report could not be written.
    #[error("Cannot write report {path}: {source}")]
    Report {
        /// Report path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}
