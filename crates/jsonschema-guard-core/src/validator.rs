//! Validator tree produced by the converter.
//!
//! A [`Validator`] is an owned, composable description of an accepted value
//! shape. It supports exactly the primitives the converter needs: scalar
//! kinds, enumerated string literals, arrays, objects with named fields,
//! nullable wrapping, human-readable annotations and a strict/passthrough
//! toggle for undeclared object keys.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Issue, IssueKind, ValidationError, ValueKind};

/// How an object validator treats keys it does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKeys {
    /// Undeclared keys are tolerated.
    #[default]
    Passthrough,
    /// Undeclared keys are rejected.
    Strict,
}

/// A named field of an object validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub validator: Validator,
}

/// The shape checked by a [`Validator`] node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidatorKind {
    String,
    /// Any JSON number; integers are not distinguished.
    Number,
    Boolean,
    /// Accepts every value, including an absent key.
    Any,
    /// A string restricted to the listed literals.
    Enum { values: Vec<String> },
    Array { element: Box<Validator> },
    Object {
        fields: Vec<Field>,
        unknown_keys: UnknownKeys,
    },
    /// Accepts `null` in addition to whatever `inner` accepts.
    Nullable { inner: Box<Validator> },
}

/// A node of the validator tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validator {
    #[serde(flatten)]
    pub kind: ValidatorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<ValidatorKind> for Validator {
    fn from(kind: ValidatorKind) -> Self {
        Self {
            kind,
            description: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl Validator {
    pub fn string() -> Self {
        ValidatorKind::String.into()
    }

    pub fn number() -> Self {
        ValidatorKind::Number.into()
    }

    pub fn boolean() -> Self {
        ValidatorKind::Boolean.into()
    }

    pub fn any() -> Self {
        ValidatorKind::Any.into()
    }

    /// A string validator restricted to `values`, in order.
    ///
    /// An empty list yields a validator that rejects everything.
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ValidatorKind::Enum {
            values: values.into_iter().map(Into::into).collect(),
        }
        .into()
    }

    pub fn array(element: Validator) -> Self {
        ValidatorKind::Array {
            element: Box::new(element),
        }
        .into()
    }

    /// An object validator in passthrough mode with fields in the given order.
    pub fn object<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, Validator)>,
        S: Into<String>,
    {
        ValidatorKind::Object {
            fields: fields
                .into_iter()
                .map(|(name, validator)| Field {
                    name: name.into(),
                    validator,
                })
                .collect(),
            unknown_keys: UnknownKeys::Passthrough,
        }
        .into()
    }

    /// The degenerate "any object, extra keys allowed" validator.
    pub fn passthrough_object() -> Self {
        Self::object(std::iter::empty::<(String, Validator)>())
    }

    /// Wrap so that `null` is accepted as well.
    pub fn nullable(self) -> Self {
        ValidatorKind::Nullable {
            inner: Box::new(self),
        }
        .into()
    }

    /// Attach a human-readable annotation.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Reject undeclared keys. No effect on non-object validators.
    pub fn strict(self) -> Self {
        self.with_unknown_keys(UnknownKeys::Strict)
    }

    /// Tolerate undeclared keys. No effect on non-object validators.
    pub fn passthrough(self) -> Self {
        self.with_unknown_keys(UnknownKeys::Passthrough)
    }

    fn with_unknown_keys(mut self, mode: UnknownKeys) -> Self {
        if let ValidatorKind::Object { unknown_keys, .. } = &mut self.kind {
            *unknown_keys = mode;
        }
        self
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self.kind, ValidatorKind::Nullable { .. })
    }

    /// Look up a declared field of an object validator.
    pub fn field(&self, name: &str) -> Option<&Validator> {
        match &self.kind {
            ValidatorKind::Object { fields, .. } => fields
                .iter()
                .find(|field| field.name == name)
                .map(|field| &field.validator),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

impl Validator {
    /// Validate `value`, collecting every issue rather than stopping at the
    /// first one.
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        let mut path = String::new();
        self.check(Some(value), &mut path, &mut issues);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    pub fn is_valid(&self, value: &Value) -> bool {
        self.validate(value).is_ok()
    }

    /// `value` is `None` when the key is absent from the parent object.
    fn check(&self, value: Option<&Value>, path: &mut String, issues: &mut Vec<Issue>) {
        match (&self.kind, value) {
            (ValidatorKind::Any, _) => {}
            (ValidatorKind::Nullable { .. }, Some(Value::Null)) => {}
            (ValidatorKind::Nullable { inner }, _) => inner.check(value, path, issues),
            (ValidatorKind::String, Some(Value::String(_)))
            | (ValidatorKind::Number, Some(Value::Number(_)))
            | (ValidatorKind::Boolean, Some(Value::Bool(_))) => {}
            (ValidatorKind::Enum { values }, Some(Value::String(s))) => {
                if !values.iter().any(|v| v == s) {
                    issues.push(Issue {
                        path: path.clone(),
                        kind: IssueKind::InvalidEnumValue {
                            options: values.clone(),
                            received: s.clone(),
                        },
                    });
                }
            }
            (ValidatorKind::Array { element }, Some(Value::Array(items))) => {
                for (index, item) in items.iter().enumerate() {
                    let len = path.len();
                    push_segment(path, &index.to_string());
                    element.check(Some(item), path, issues);
                    path.truncate(len);
                }
            }
            (
                ValidatorKind::Object {
                    fields,
                    unknown_keys,
                },
                Some(Value::Object(map)),
            ) => check_object(fields, *unknown_keys, map, path, issues),
            (kind, value) => issues.push(Issue {
                path: path.clone(),
                kind: IssueKind::InvalidType {
                    expected: expected_kind(kind),
                    received: ValueKind::of(value),
                },
            }),
        }
    }
}

fn check_object(
    fields: &[Field],
    unknown_keys: UnknownKeys,
    map: &Map<String, Value>,
    path: &mut String,
    issues: &mut Vec<Issue>,
) {
    for field in fields {
        let len = path.len();
        push_segment(path, &field.name);
        field.validator.check(map.get(&field.name), path, issues);
        path.truncate(len);
    }

    if unknown_keys == UnknownKeys::Strict {
        let unrecognized: Vec<String> = map
            .keys()
            .filter(|key| !fields.iter().any(|field| &field.name == *key))
            .cloned()
            .collect();
        if !unrecognized.is_empty() {
            issues.push(Issue {
                path: path.clone(),
                kind: IssueKind::UnrecognizedKeys { keys: unrecognized },
            });
        }
    }
}

fn expected_kind(kind: &ValidatorKind) -> ValueKind {
    match kind {
        ValidatorKind::String | ValidatorKind::Enum { .. } => ValueKind::String,
        ValidatorKind::Number => ValueKind::Number,
        ValidatorKind::Boolean => ValueKind::Boolean,
        ValidatorKind::Array { .. } => ValueKind::Array,
        ValidatorKind::Object { .. } => ValueKind::Object,
        ValidatorKind::Nullable { inner } => expected_kind(&inner.kind),
        // Any never reports issues.
        ValidatorKind::Any => ValueKind::Null,
    }
}

/// Append a JSON Pointer segment (RFC 6901 escaping).
pub(crate) fn push_segment(path: &mut String, segment: &str) {
    path.push('/');
    for ch in segment.chars() {
        match ch {
            '~' => path.push_str("~0"),
            '/' => path.push_str("~1"),
            c => path.push(c),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
