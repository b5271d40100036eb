//! The degraded record returned when both attempts fail.

use serde_json::{json, Map, Value};

use super::error::AttemptError;
use crate::result::{ExtractionResult, Meta, Mode};

/// The `why` attached to the fallback question.
pub const FALLBACK_WHY: &str = "Model output invalid or timed out.";

/// Builds a schema-conformant fallback record.
///
/// Every list is empty, every weekly report field is empty, and `questions`
/// holds exactly one entry carrying `message`.
#[must_use]
pub fn build_fallback(message: &str, received_chars: usize) -> ExtractionResult {
    let weekly_report: Map<String, Value> = ["done", "next", "risks", "asks"]
        .into_iter()
        .map(|key| (key.to_string(), Value::Array(Vec::new())))
        .collect();

    ExtractionResult {
        priorities: Vec::new(),
        tasks: Vec::new(),
        blockers: Vec::new(),
        weekly_report,
        questions: vec![json!({"question": message, "why": FALLBACK_WHY})],
        meta: Meta {
            received_chars,
            mode: Mode::Fallback,
        },
    }
}

/// Caller-facing text for the error that ended the run.
#[must_use]
pub fn diagnostic_message(error: &AttemptError) -> String {
    match error {
        AttemptError::Shape(reason) => format!("Model output invalid after retry: {reason}"),
        AttemptError::Parse(message) => format!("Model error: {message}"),
        AttemptError::Client(err) => format!("Model error: {err}"),
    }
}
