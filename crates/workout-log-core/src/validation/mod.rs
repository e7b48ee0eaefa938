// ABOUTME: Field-level validation primitives for untyped JSON request input
// ABOUTME: Collects ordered (field path, message) errors instead of failing on the first one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Request Validation
//!
//! Each schema in [`schemas`] is a pure function from an untyped
//! [`serde_json::Value`] to either a typed model or [`ValidationErrors`].
//! Field checks append to a shared error list and keep going, so a single
//! pass reports every offending field in schema order.

/// Per-operation schemas
pub mod schemas;

pub use schemas::{
    validate_new_user, validate_user_id, validate_workout_key, validate_workout_upsert,
};

use crate::constants::limits::DATE_FORMAT;
use chrono::NaiveDate;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// A single rule violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dot-joined path of the offending field; empty for the input root
    pub path: String,
    /// Human-readable rule description
    pub message: String,
}

impl FieldError {
    /// Create a field error
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// One entry renders as `{ "<path>": "<message>" }`
impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.path, &self.message)?;
        map.end()
    }
}

/// Ordered list of rule violations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Create an empty list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a violation
    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(path, message));
    }

    /// Number of violations
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no violation was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate violations in the order they were found
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// First violation recorded for `path`
    #[must_use]
    pub fn for_path(&self, path: &str) -> Option<&FieldError> {
        self.0.iter().find(|error| error.path == path)
    }

    /// `Ok(value)` when nothing was recorded, otherwise the collected errors
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one violation was recorded.
    pub fn into_result<T>(self, value: impl FnOnce() -> Option<T>) -> Result<T, Self> {
        if !self.is_empty() {
            return Err(self);
        }
        match value() {
            Some(value) => Ok(value),
            None => Err(self),
        }
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for error in &self.0 {
            seq.serialize_element(error)?;
        }
        seq.end()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.path, error.message)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// JSON type name as reported in "Expected X, received Y" messages
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_mismatch(expected: &str, received: &Value) -> String {
    format!("Expected {expected}, received {}", json_type_name(received))
}

/// Join a parent path and a child segment with a dot
pub(crate) fn join_path(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_owned()
    } else {
        format!("{parent}.{child}")
    }
}

/// Require `value` to be a JSON object
pub(crate) fn expect_object<'a>(
    value: &'a Value,
    path: &str,
    errors: &mut ValidationErrors,
) -> Option<&'a Map<String, Value>> {
    if let Value::Object(map) = value {
        Some(map)
    } else {
        errors.push(path, type_mismatch("object", value));
        None
    }
}

/// Require `object[field]` to be present and a string
pub(crate) fn string_field<'a>(
    object: &'a Map<String, Value>,
    parent: &str,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<&'a str> {
    let path = join_path(parent, field);
    match object.get(field) {
        None => {
            errors.push(path, "Required");
            None
        }
        Some(Value::String(s)) => Some(s.as_str()),
        Some(other) => {
            errors.push(path, type_mismatch("string", other));
            None
        }
    }
}

/// Check a string's length against a lower bound, counted in characters
pub(crate) fn check_min_length(
    value: &str,
    min: usize,
    path: String,
    errors: &mut ValidationErrors,
) -> bool {
    if value.chars().count() >= min {
        true
    } else {
        errors.push(path, format!("String must contain at least {min} character(s)"));
        false
    }
}

/// Check a string's exact length, counted in characters
pub(crate) fn check_exact_length(
    value: &str,
    length: usize,
    path: String,
    errors: &mut ValidationErrors,
) -> bool {
    if value.chars().count() == length {
        true
    } else {
        errors.push(
            path,
            format!("String must contain exactly {length} character(s)"),
        );
        false
    }
}

/// Parse a string field into one of a fixed set of wire values
pub(crate) fn enum_field<T>(
    object: &Map<String, Value>,
    parent: &str,
    field: &str,
    allowed: &[&str],
    parse: impl Fn(&str) -> Option<T>,
    errors: &mut ValidationErrors,
) -> Option<T> {
    let raw = string_field(object, parent, field, errors)?;
    let parsed = parse(raw);
    if parsed.is_none() {
        let expected = allowed
            .iter()
            .map(|value| format!("'{value}'"))
            .collect::<Vec<_>>()
            .join(" | ");
        errors.push(
            join_path(parent, field),
            format!("Invalid enum value. Expected {expected}, received '{raw}'"),
        );
    }
    parsed
}

/// Parse a strict `YYYY-MM-DD` calendar date
#[must_use]
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Require `object[field]` to be a strict calendar date string
pub(crate) fn date_field(
    object: &Map<String, Value>,
    parent: &str,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<NaiveDate> {
    let raw = string_field(object, parent, field, errors)?;
    let date = parse_calendar_date(raw);
    if date.is_none() {
        errors.push(join_path(parent, field), "Invalid date");
    }
    date
}

/// Require `object[field]` to be a number strictly greater than zero
pub(crate) fn positive_number_field(
    object: &Map<String, Value>,
    parent: &str,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<f64> {
    let path = join_path(parent, field);
    let number = match object.get(field) {
        None => {
            errors.push(path, "Required");
            return None;
        }
        Some(Value::Number(n)) => n.as_f64(),
        Some(other) => {
            errors.push(path, type_mismatch("number", other));
            return None;
        }
    };
    match number {
        Some(n) if n > 0.0 => Some(n),
        _ => {
            errors.push(path, "Number must be greater than 0");
            None
        }
    }
}
