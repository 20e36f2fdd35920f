//! Token subject value.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::errors::ValidationError;

/// Identity a token is bound to.
///
/// Callers may identify users by number or by string. The two are kept
/// apart, so `Int(123)` and `Text("123")` are different subjects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Subject {
    Int(i64),
    Text(String),
}

impl Subject {
    /// Builds a subject from a JSON request value.
    ///
    /// Integers and non-empty strings are accepted; everything else is an
    /// `InvalidFormat` error for `field`.
    pub fn from_json(value: &Value, field: &str) -> Result<Self, ValidationError> {
        match value {
            Value::Number(number) => number
                .as_i64()
                .map(Subject::Int)
                .ok_or_else(|| ValidationError::InvalidFormat {
                    field: field.to_string(),
                }),
            Value::String(text) if !text.is_empty() => Ok(Subject::Text(text.clone())),
            Value::String(_) => Err(ValidationError::RequiredField {
                field: field.to_string(),
            }),
            _ => Err(ValidationError::InvalidFormat {
                field: field.to_string(),
            }),
        }
    }

    /// Builds a subject from form input, where every value arrives as text.
    ///
    /// With `coerce_int` set, text that parses as an integer becomes `Int`.
    pub fn from_form(raw: &str, coerce_int: bool) -> Self {
        if coerce_int {
            if let Ok(number) = raw.trim().parse::<i64>() {
                return Subject::Int(number);
            }
        }
        Subject::Text(raw.to_string())
    }

    /// JSON representation used in responses
    pub fn to_json(&self) -> Value {
        match self {
            Subject::Int(number) => Value::from(*number),
            Subject::Text(text) => Value::from(text.as_str()),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Int(number) => write!(f, "{}", number),
            Subject::Text(text) => write!(f, "{}", text),
        }
    }
}

impl From<i64> for Subject {
    fn from(value: i64) -> Self {
        Subject::Int(value)
    }
}

impl From<&str> for Subject {
    fn from(value: &str) -> Self {
        Subject::Text(value.to_string())
    }
}

impl From<String> for Subject {
    fn from(value: String) -> Self {
        Subject::Text(value)
    }
}
