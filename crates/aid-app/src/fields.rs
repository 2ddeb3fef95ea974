// Rust guideline compliant 2026-10-16

//! Typed access to untyped request fields.
//!
//! Bodies arrive as JSON objects and query strings as string pairs. Both
//! end up in a [`Fields`] map; the accessors below accept either a native
//! JSON value or its string spelling, so `"4"` and `4` read the same.

use crate::error::{AppError, Result};
use aid_core::Error as CoreError;
use serde_json::{Map, Value};
use std::str::FromStr;

/// Raw request fields keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Map<String, Value>);

impl Fields {
    /// Creates an empty field map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a JSON request body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::default()),
            other => Err(AppError::InvalidInput(format!(
                "Request body must be a JSON object, got {}",
                type_name(&other)
            ))),
        }
    }

    /// Builds a field map from query-string pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        )
    }

    /// Returns a copy with `key` set to `value`.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Returns `true` if `key` was sent, even as `null`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns `true` if no field was sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn present(&self, key: &str) -> Option<&Value> {
        match self.0.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(value) => Some(value),
        }
    }

    /// Reads a required, non-blank string.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is missing, blank or not a string.
    pub fn required_str(&self, key: &str) -> Result<String> {
        self.optional_str(key)?
            .ok_or_else(|| AppError::InvalidInput(format!("{key} is required")))
    }

    /// Reads an optional string. Blank counts as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is present but not a string.
    pub fn optional_str(&self, key: &str) -> Result<Option<String>> {
        match self.present(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
            Some(other) => Err(wrong_type(key, "a string", other)),
        }
    }

    /// Reads a string that may be explicitly cleared.
    ///
    /// `None` means the field was not sent; `Some(None)` means it was sent
    /// as `null` or blank.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is present but not a string.
    pub fn nullable_str(&self, key: &str) -> Result<Option<Option<String>>> {
        if !self.contains(key) {
            return Ok(None);
        }
        self.optional_str(key).map(Some)
    }

    /// Reads an optional finite number.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is present but not a finite number.
    pub fn optional_f64(&self, key: &str) -> Result<Option<f64>> {
        let Some(value) = self.present(key) else {
            return Ok(None);
        };
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(n) if n.is_finite() => Ok(Some(n)),
            _ => Err(wrong_type(key, "a finite number", value)),
        }
    }

    /// Reads a number that may be explicitly cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is present but not a finite number.
    pub fn nullable_f64(&self, key: &str) -> Result<Option<Option<f64>>> {
        if !self.contains(key) {
            return Ok(None);
        }
        self.optional_f64(key).map(Some)
    }

    /// Reads an optional integer. Fractional values are rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is present but not an integer.
    pub fn optional_i64(&self, key: &str) -> Result<Option<i64>> {
        let Some(value) = self.present(key) else {
            return Ok(None);
        };
        let parsed = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        parsed
            .map(Some)
            .ok_or_else(|| wrong_type(key, "an integer", value))
    }

    /// Reads an optional boolean (`true`/`false`, native or string).
    ///
    /// # Errors
    ///
    /// Returns an error if the field is present but not a boolean.
    pub fn optional_bool(&self, key: &str) -> Result<Option<bool>> {
        let Some(value) = self.present(key) else {
            return Ok(None);
        };
        match value {
            Value::Bool(b) => Ok(Some(*b)),
            Value::String(s) if s == "true" => Ok(Some(true)),
            Value::String(s) if s == "false" => Ok(Some(false)),
            other => Err(wrong_type(key, "a boolean", other)),
        }
    }

    /// Reads an optional vocabulary value such as a status or priority.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is present but not a known value.
    pub fn optional_parsed<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr<Err = CoreError>,
    {
        match self.optional_str(key)? {
            None => Ok(None),
            Some(raw) => Ok(Some(raw.parse::<T>()?)),
        }
    }

    /// Reads a required vocabulary value.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is missing or not a known value.
    pub fn required_parsed<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr<Err = CoreError>,
    {
        Ok(self.required_str(key)?.parse::<T>()?)
    }
}

fn wrong_type(key: &str, expected: &str, value: &Value) -> AppError {
    AppError::InvalidInput(format!("{key} must be {expected}, got {}", type_name(value)))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
