//! Shallow structural check of a parsed model response.
//!
//! Only the top level is strict: the object, its six keys, and whether each
//! is a list or an object. Nested items are not inspected; wrong enum values
//! or missing nested fields go through to the caller untouched.

use serde_json::Value;

use crate::schema::REQUIRED_TOP_KEYS;

const LIST_KEYS: [&str; 4] = ["tasks", "blockers", "priorities", "questions"];
const OBJECT_KEYS: [&str; 2] = ["weekly_report", "meta"];

/// Result of [`validate_shape`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The value has the required top-level shape.
    Valid,
    /// The first check that failed.
    Invalid(String),
}

impl ValidationOutcome {
    /// Whether the value passed.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Diagnostic text; `"ok"` when valid.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::Valid => "ok",
            Self::Invalid(reason) => reason,
        }
    }
}

/// Checks, in order, stopping at the first failure:
///
/// 1. the value is an object;
/// 2. all six required keys are present (missing ones reported sorted);
/// 3. `tasks`, `blockers`, `priorities`, `questions` are arrays;
/// 4. `weekly_report` and `meta` are objects.
#[must_use]
pub fn validate_shape(value: &Value) -> ValidationOutcome {
    let Some(object) = value.as_object() else {
        return ValidationOutcome::Invalid("Root is not an object.".to_string());
    };

    let missing: Vec<&str> = REQUIRED_TOP_KEYS
        .iter()
        .copied()
        .filter(|key| !object.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return ValidationOutcome::Invalid(format!("Missing keys: {missing:?}"));
    }

    for key in LIST_KEYS {
        if !object[key].is_array() {
            return ValidationOutcome::Invalid(format!("{key} must be a list"));
        }
    }

    for key in OBJECT_KEYS {
        if !object[key].is_object() {
            return ValidationOutcome::Invalid(format!("{key} must be an object"));
        }
    }

    ValidationOutcome::Valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> Value {
        json!({
            "priorities": [],
            "tasks": [],
            "blockers": [],
            "weekly_report": {},
            "questions": [],
            "meta": {}
        })
    }

    #[test]
    fn test_minimal_object_is_valid() {
        let outcome = validate_shape(&minimal());
        assert!(outcome.is_valid());
        assert_eq!(outcome.reason(), "ok");
    }

    #[test]
    fn test_root_must_be_object() {
        for value in [json!([]), json!("text"), json!(3), json!(null)] {
            assert_eq!(
                validate_shape(&value),
                ValidationOutcome::Invalid("Root is not an object.".to_string())
            );
        }
    }

    #[test]
    fn test_missing_keys_reported_sorted() {
        let mut value = minimal();
        let object = value.as_object_mut().unwrap();
        object.remove("tasks");
        object.remove("meta");
        object.remove("blockers");

        assert_eq!(
            validate_shape(&value).reason(),
            r#"Missing keys: ["blockers", "meta", "tasks"]"#
        );
    }

    #[test]
    fn test_missing_keys_checked_before_types() {
        let mut value = minimal();
        value["tasks"] = json!("not a list");
        value.as_object_mut().unwrap().remove("questions");

        assert_eq!(
            validate_shape(&value).reason(),
            r#"Missing keys: ["questions"]"#
        );
    }

    #[test]
    fn test_list_checks_in_order() {
        let mut value = minimal();
        value["questions"] = json!({});
        value["blockers"] = json!(null);
        assert_eq!(validate_shape(&value).reason(), "blockers must be a list");

        let mut value = minimal();
        value["priorities"] = json!("p");
        assert_eq!(validate_shape(&value).reason(), "priorities must be a list");
    }

    #[test]
    fn test_object_checks() {
        let mut value = minimal();
        value["weekly_report"] = json!([]);
        assert_eq!(
            validate_shape(&value).reason(),
            "weekly_report must be an object"
        );

        let mut value = minimal();
        value["meta"] = json!(5);
        assert_eq!(validate_shape(&value).reason(), "meta must be an object");
    }

    #[test]
    fn test_nested_content_is_not_inspected() {
        let value = json!({
            "priorities": [{"urgency": "CRITICAL"}],
            "tasks": [42, "free text", {"status": "pending", "confidence": 7}],
            "blockers": [{}],
            "weekly_report": {"done": "everything"},
            "questions": [null],
            "meta": {"mode": "nova"},
            "extra": true
        });
        assert!(validate_shape(&value).is_valid());
    }
}
