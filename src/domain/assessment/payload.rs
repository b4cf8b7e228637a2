//! Helpers for reading structured model output.
//!
//! Models frequently wrap JSON in markdown fences even when asked not to.
//! `strip_code_fences` removes them; the field readers turn a parsed
//! `serde_json::Value` into typed values with field-level errors.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::errors::AnalysisError;
use crate::domain::foundation::ValidationError;

/// Removes every ```` ```json ```` and ```` ``` ```` marker (with one trailing
/// newline each) and trims the result.
pub fn strip_code_fences(raw: &str) -> String {
    let mut out = raw.to_string();
    for marker in ["```json\r\n", "```json\n", "```json", "```\r\n", "```\n", "```"] {
        out = out.replace(marker, "");
    }
    out.trim().to_string()
}

/// Cleans and parses model output into a JSON value.
pub fn parse_payload(raw: &str) -> Result<Value, AnalysisError> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(&cleaned).map_err(|e| AnalysisError::Parse(e.to_string()))
}

pub(crate) fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::invalid_format(path, "expected a JSON object"))
}

pub(crate) fn required<'a>(
    obj: &'a Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<&'a Value, ValidationError> {
    match obj.get(key) {
        Some(Value::Null) | None => Err(ValidationError::empty_field(join(path, key))),
        Some(v) => Ok(v),
    }
}

/// Reads a closed-set string into its enum.
pub(crate) fn one_of<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<T, ValidationError> {
    let value = required(obj, path, key)?;
    serde_json::from_value(value.clone()).map_err(|_| {
        ValidationError::invalid_format(join(path, key), format!("unexpected value {}", value))
    })
}

/// Reads a number constrained to `0..=100`.
pub(crate) fn percent(obj: &Map<String, Value>, path: &str, key: &str) -> Result<f64, ValidationError> {
    let field = join(path, key);
    let value = required(obj, path, key)?
        .as_f64()
        .ok_or_else(|| ValidationError::invalid_format(&field, "expected a number"))?;
    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::out_of_range(field, 0.0, 100.0, value));
    }
    Ok(value)
}

pub(crate) fn text(obj: &Map<String, Value>, path: &str, key: &str) -> Result<String, ValidationError> {
    required(obj, path, key)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ValidationError::invalid_format(join(path, key), "expected a string"))
}

pub(crate) fn text_list(obj: &Map<String, Value>, path: &str, key: &str) -> Result<Vec<String>, ValidationError> {
    let field = join(path, key);
    let items = required(obj, path, key)?
        .as_array()
        .ok_or_else(|| ValidationError::invalid_format(&field, "expected an array of strings"))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| ValidationError::invalid_format(&field, "expected an array of strings"))
        })
        .collect()
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}
