//! List payload normalization.
//!
//! The backend answers list endpoints either with a bare JSON array or with
//! an object carrying the array under a fixed field. Every list response
//! goes through [`normalize_list`] so callers only ever see a `Vec<T>`.

use crate::FetchError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Field the backend uses for enveloped arrays unless configured otherwise.
pub const DEFAULT_ENVELOPE_FIELD: &str = "data";

/// Turn a bare array or an `{ "<field>": [...] }` envelope into a list.
///
/// `null` is treated as an empty list. Any other shape is a parse error.
pub fn normalize_list<T: DeserializeOwned>(value: Value, field: &str) -> Result<Vec<T>, FetchError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        Value::Object(mut map) => match map.remove(field) {
            Some(Value::Array(items)) => items,
            Some(Value::Null) => return Ok(Vec::new()),
            Some(other) => {
                return Err(FetchError::ParseError(format!(
                    "envelope field `{}` is {}, expected an array",
                    field,
                    kind(&other)
                )))
            }
            None => {
                return Err(FetchError::ParseError(format!(
                    "object has no `{}` field",
                    field
                )))
            }
        },
        other => {
            return Err(FetchError::ParseError(format!(
                "expected an array or an object, got {}",
                kind(&other)
            )))
        }
    };

    serde_json::from_value(Value::Array(items)).map_err(|e| FetchError::ParseError(e.to_string()))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
