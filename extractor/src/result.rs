//! The record returned to callers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Where the structured content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Produced by the model, possibly after one repair.
    Success,
    /// Deterministic degraded record.
    Fallback,
}

/// Pipeline-owned metadata. Never taken from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Meta {
    /// Character count of the input notes.
    pub received_chars: usize,
    /// Which path produced the record.
    pub mode: Mode,
}

/// Structured ops record with exactly six top-level fields.
///
/// Top-level containers are fixed by the type. Items inside them are kept as
/// the model produced them: enum values, nested keys and number ranges are
/// not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// `{title, reason, urgency}` items.
    pub priorities: Vec<Value>,
    /// `{title, owner, due, status, confidence}` items.
    pub tasks: Vec<Value>,
    /// `{title, impacts, suggested_fix, severity}` items.
    pub blockers: Vec<Value>,
    /// `{done, next, risks, asks}` object.
    pub weekly_report: Map<String, Value>,
    /// `{question, why}` items.
    pub questions: Vec<Value>,
    /// Pipeline metadata.
    pub meta: Meta,
}

impl ExtractionResult {
    /// Builds a success record from a shape-checked model object.
    ///
    /// Keys beyond the six are dropped and `meta` is replaced wholesale.
    /// A container with the wrong type becomes empty, which cannot happen
    /// once the object has passed
    /// [`validate_shape`](crate::extraction::validate_shape).
    #[must_use]
    pub fn from_model_object(mut object: Map<String, Value>, received_chars: usize) -> Self {
        Self {
            priorities: take_array(&mut object, "priorities"),
            tasks: take_array(&mut object, "tasks"),
            blockers: take_array(&mut object, "blockers"),
            weekly_report: take_object(&mut object, "weekly_report"),
            questions: take_array(&mut object, "questions"),
            meta: Meta {
                received_chars,
                mode: Mode::Success,
            },
        }
    }

    /// Whether the record came from the fallback path.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.meta.mode == Mode::Fallback
    }
}

fn take_array(object: &mut Map<String, Value>, key: &str) -> Vec<Value> {
    match object.remove(key) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

fn take_object(object: &mut Map<String, Value>, key: &str) -> Map<String, Value> {
    match object.remove(key) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_model_object_drops_extras_and_restamps_meta() {
        let object = json!({
            "priorities": [{"title": "ship", "urgency": "HIGH"}],
            "tasks": [],
            "blockers": [],
            "weekly_report": {"done": ["x"]},
            "questions": [],
            "meta": {"received_chars": 99999, "mode": "nova", "model": "m"},
            "summary": "extra"
        });
        let Value::Object(map) = object else {
            unreachable!()
        };

        let result = ExtractionResult::from_model_object(map, 12);
        let wire = serde_json::to_value(&result).unwrap();

        let keys: Vec<&String> = wire.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 6);
        assert!(wire.get("summary").is_none());
        assert_eq!(wire["meta"], json!({"received_chars": 12, "mode": "success"}));
        // Nested values pass through untouched.
        assert_eq!(wire["priorities"][0]["urgency"], "HIGH");
        assert_eq!(wire["weekly_report"], json!({"done": ["x"]}));
    }
}
