//! Validation error types.
//!
//! Conversion itself never fails; these types describe why an instance was
//! rejected by a [`Validator`](crate::Validator).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Coarse classification of a JSON value, used in type mismatch issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    Array,
    Object,
    Null,
    /// The key was absent from its parent object.
    Missing,
}

impl ValueKind {
    /// Classify an optional value; `None` means the key was absent.
    pub fn of(value: Option<&Value>) -> Self {
        match value {
            None => ValueKind::Missing,
            Some(Value::Null) => ValueKind::Null,
            Some(Value::Bool(_)) => ValueKind::Boolean,
            Some(Value::Number(_)) => ValueKind::Number,
            Some(Value::String(_)) => ValueKind::String,
            Some(Value::Array(_)) => ValueKind::Array,
            Some(Value::Object(_)) => ValueKind::Object,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
            ValueKind::Null => "null",
            ValueKind::Missing => "missing",
        };
        f.write_str(name)
    }
}

/// What went wrong at a single location of the instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum IssueKind {
    /// The value has the wrong JSON type (or is missing).
    InvalidType {
        expected: ValueKind,
        received: ValueKind,
    },
    /// A string outside the allowed literal set.
    InvalidEnumValue {
        options: Vec<String>,
        received: String,
    },
    /// Keys present on a strict object that its schema does not declare.
    UnrecognizedKeys { keys: Vec<String> },
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::InvalidType { expected, received } => {
                write!(f, "expected {expected}, received {received}")
            }
            IssueKind::InvalidEnumValue { options, received } => {
                let options: Vec<String> = options.iter().map(|o| format!("'{o}'")).collect();
                write!(
                    f,
                    "invalid enum value '{received}', expected one of [{}]",
                    options.join(", ")
                )
            }
            IssueKind::UnrecognizedKeys { keys } => {
                let keys: Vec<String> = keys.iter().map(|k| format!("'{k}'")).collect();
                write!(f, "unrecognized key(s) in object: {}", keys.join(", "))
            }
        }
    }
}

/// A single rejected location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// JSON Pointer into the validated instance (e.g. `/users/0/email`).
    /// The empty string designates the root.
    pub path: String,
    pub kind: IssueKind,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "at (root): {}", self.kind)
        } else {
            write!(f, "at {}: {}", self.path, self.kind)
        }
    }
}

/// Every issue found while validating one instance.
///
/// Always holds at least one issue.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct ValidationError {
    pub issues: Vec<Issue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.issues.as_slice() {
            [single] => write!(f, "validation failed {single}"),
            issues => {
                write!(f, "validation failed with {} issues:", issues.len())?;
                for issue in issues {
                    write!(f, "\n  - {issue}")?;
                }
                Ok(())
            }
        }
    }
}
