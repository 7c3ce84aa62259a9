//! User-supplied resource selectors.
//!
//! The host UI lets a user either type an identifier literally or pick it
//! from a searchable list; the picked variant arrives as a
//! `{mode, value}` object. Both shapes are resolved here, once, so the
//! operation modules never see the distinction.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DeckError, Result};

/// A literal-or-picked identifier input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selector {
    /// Picked from an interactive list: `{"mode": "list", "value": "42"}`
    Picker { mode: String, value: String },
    /// Typed directly: `"42"`
    Literal(String),
}

impl Selector {
    /// Build a selector from a raw parameter value (string, number, or
    /// `{mode, value}` object).
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(Self::Literal(s.clone())),
            Value::Number(n) => Ok(Self::Literal(n.to_string())),
            Value::Object(map) => {
                let mode = map
                    .get("mode")
                    .and_then(Value::as_str)
                    .unwrap_or("list")
                    .to_string();
                let picked = match map.get("value") {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Number(n)) => n.to_string(),
                    _ => return Err(DeckError::invalid_identifier(value.to_string())),
                };
                Ok(Self::Picker {
                    mode,
                    value: picked,
                })
            }
            other => Err(DeckError::invalid_identifier(other.to_string())),
        }
    }

    /// The raw selected value, regardless of how it was entered
    pub fn value(&self) -> &str {
        match self {
            Self::Literal(value) => value,
            Self::Picker { value, .. } => value,
        }
    }

    /// Resolve to a numeric ID (base 10). Fails with `InvalidIdentifier`
    /// when the value does not parse; callers must treat that as terminal
    /// for the input row.
    pub fn numeric_id(&self) -> Result<i64> {
        let raw = self.value().trim();
        raw.parse::<i64>()
            .map_err(|_| DeckError::invalid_identifier(raw))
    }

    /// Resolve to a string key (used for user identifiers, which are not
    /// numeric).
    pub fn string_id(&self) -> &str {
        self.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_literal_and_picker_resolve_alike() {
        let literal = Selector::from_value(&json!("42")).unwrap();
        let picker = Selector::from_value(&json!({"mode": "list", "value": "42"})).unwrap();

        assert_eq!(literal.numeric_id().unwrap(), 42);
        assert_eq!(picker.numeric_id().unwrap(), 42);
    }

    #[test]
    fn test_numeric_value_accepted() {
        let selector = Selector::from_value(&json!(17)).unwrap();
        assert_eq!(selector.numeric_id().unwrap(), 17);
    }

    #[test]
    fn test_non_numeric_is_invalid_identifier() {
        let selector = Selector::from_value(&json!({"mode": "list", "value": "abc"})).unwrap();
        let err = selector.numeric_id().unwrap_err();
        assert!(matches!(err, DeckError::InvalidIdentifier { value } if value == "abc"));
    }

    #[test]
    fn test_string_id_keeps_raw_value() {
        let selector = Selector::from_value(&json!({"mode": "list", "value": "jdoe"})).unwrap();
        assert_eq!(selector.string_id(), "jdoe");

        let selector = Selector::from_value(&json!("jdoe")).unwrap();
        assert_eq!(selector.string_id(), "jdoe");
    }

    #[test]
    fn test_object_without_value_rejected() {
        let err = Selector::from_value(&json!({"mode": "list"})).unwrap_err();
        assert!(matches!(err, DeckError::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_untagged_deserialization() {
        let picker: Selector = serde_json::from_value(json!({"mode": "id", "value": "7"})).unwrap();
        assert!(matches!(picker, Selector::Picker { .. }));

        let literal: Selector = serde_json::from_value(json!("7")).unwrap();
        assert_eq!(literal, Selector::Literal("7".into()));
    }
}
