//! Typed mirror of the output contract.
//!
//! [`ExtractionResult`](crate::ExtractionResult) keeps nested items as raw
//! JSON so that lenient model output reaches callers as-is. The structs here
//! describe what those items are *supposed* to look like; they drive the
//! published JSON Schema and the advisory [`nested_deviations`] report.

use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::result::Meta;

/// The six top-level keys, sorted.
pub const REQUIRED_TOP_KEYS: [&str; 6] = [
    "blockers",
    "meta",
    "priorities",
    "questions",
    "tasks",
    "weekly_report",
];

/// Priority urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// Needs attention now.
    High,
    /// This week.
    Medium,
    /// When convenient.
    Low,
}

/// Task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Not started.
    Todo,
    /// In progress.
    Doing,
    /// Finished.
    Done,
    /// Waiting on something.
    Blocked,
}

/// Blocker severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Minor friction.
    Low,
    /// Slows work down.
    Medium,
    /// Stops work.
    High,
}

/// A priority item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Priority {
    /// Short title.
    pub title: String,
    /// Why it matters.
    pub reason: String,
    /// How urgent it is.
    pub urgency: Urgency,
}

/// A task item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Task {
    /// Short title.
    pub title: String,
    /// Owner name, or `"unassigned"`.
    pub owner: String,
    /// Due date as written in the notes, if stated.
    pub due: Option<String>,
    /// Current status.
    pub status: Status,
    /// Model confidence in the extraction.
    pub confidence: f64,
}

/// A blocker item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Blocker {
    /// Short title.
    pub title: String,
    /// What it affects.
    pub impacts: Vec<String>,
    /// Proposed way forward.
    pub suggested_fix: String,
    /// How bad it is.
    pub severity: Severity,
}

/// The weekly report block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WeeklyReport {
    /// Completed items.
    pub done: Vec<String>,
    /// Upcoming items.
    pub next: Vec<String>,
    /// Known risks.
    pub risks: Vec<String>,
    /// Requests for help.
    pub asks: Vec<String>,
}

/// A clarifying question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Question {
    /// The question.
    pub question: String,
    /// Why it is being asked.
    pub why: String,
}

/// Fully typed output record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OpsRecord {
    /// Priorities.
    pub priorities: Vec<Priority>,
    /// Tasks.
    pub tasks: Vec<Task>,
    /// Blockers.
    pub blockers: Vec<Blocker>,
    /// Weekly report.
    pub weekly_report: WeeklyReport,
    /// Clarifying questions.
    pub questions: Vec<Question>,
    /// Pipeline metadata.
    pub meta: Meta,
}

/// JSON Schema of the output contract.
#[must_use]
pub fn output_schema() -> Value {
    schema_for!(OpsRecord).to_value()
}

/// Lists every place a record departs from the typed contract.
///
/// Advisory only: the pipeline logs these and still returns the record.
#[must_use]
pub fn nested_deviations(record: &Value) -> Vec<String> {
    let schema = output_schema();
    match jsonschema::Validator::new(&schema) {
        Ok(validator) => validator
            .iter_errors(record)
            .map(|error| format!("At path '{}': {}", error.instance_path, error))
            .collect(),
        Err(e) => vec![format!("Schema compilation error: {e}")],
    }
}
