//! Per-attempt failure kinds and attempt history.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::client::ClientError;

/// Why an attempt did not yield a usable object.
///
/// These never leave the pipeline; they end up in the fallback question or
/// in the [`ExtractionReport`](super::ExtractionReport).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    /// The model call itself failed.
    #[error("Model call failed: {0}")]
    Client(#[from] ClientError),

    /// The candidate text was not valid JSON.
    #[error("JSON parsing failed: {0}")]
    Parse(String),

    /// The parsed value failed the shape check.
    #[error("Shape check failed: {0}")]
    Shape(String),
}

/// Which call an attempt was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStage {
    /// The primary extraction call.
    Primary,
    /// The single repair call.
    Repair,
}

impl fmt::Display for AttemptStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("primary"),
            Self::Repair => f.write_str("repair"),
        }
    }
}

/// Record of a failed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord {
    /// The attempt number (1-indexed).
    pub attempt_number: usize,
    /// Primary or repair.
    pub stage: AttemptStage,
    /// Raw model text, when the call returned any.
    pub raw_output: Option<String>,
    /// What went wrong.
    pub error: AttemptError,
    /// Elapsed pipeline time at the end of this attempt.
    pub elapsed: Duration,
}
