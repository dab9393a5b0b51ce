//! Decoding of untyped schema values into a closed set of node shapes.
//!
//! The converter never inspects raw JSON directly; it matches on
//! [`SchemaNode`] instead. Anything that does not fit a recognized shape
//! decodes to a fallback variant which the converter maps to a permissive
//! validator.

use serde_json::{Map, Value};

/// Keywords that carry meaning for the conversion.
pub const SUPPORTED_KEYWORDS: &[&str] = &[
    "type",
    "properties",
    "required",
    "items",
    "enum",
    "description",
    "additionalProperties",
];

/// Keywords that only annotate and are never worth reporting when ignored.
pub const ANNOTATION_KEYWORDS: &[&str] = &[
    "$schema",
    "$id",
    "$comment",
    "title",
    "default",
    "examples",
];

/// Primitive a nullable union collapses to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    /// Any other (or no) main type.
    Any,
}

impl Primitive {
    fn from_type_name(name: Option<&str>) -> Self {
        match name {
            Some("string") => Primitive::String,
            Some("number") | Some("integer") => Primitive::Number,
            Some("boolean") => Primitive::Boolean,
            _ => Primitive::Any,
        }
    }
}

/// The `enum` keyword of a string node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumDecl<'a> {
    /// A JSON array. `skipped` holds indices of non-string members.
    Literals {
        values: Vec<&'a str>,
        skipped: Vec<usize>,
    },
    /// Present but not an array.
    Invalid,
}

/// A decoded `type: "object"` node.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectNode<'a> {
    /// Declared properties in declaration order.
    pub properties: Vec<(&'a str, &'a Value)>,
    /// Names listed in `required`; non-string members are dropped.
    pub required: Vec<&'a str>,
    /// `additionalProperties` is literally `false`.
    pub strict: bool,
}

impl ObjectNode<'_> {
    pub fn is_required(&self, key: &str) -> bool {
        self.required.iter().any(|name| *name == key)
    }
}

/// Closed set of recognized schema node shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode<'a> {
    /// Not a JSON object (and not an array).
    Malformed,
    Object(ObjectNode<'a>),
    /// `type: "array"`. `items` is whatever the keyword holds, if present.
    Array { items: Option<&'a Value> },
    /// `type: "string"`, optionally restricted by `enum`.
    String { enumeration: Option<EnumDecl<'a>> },
    /// `type: "number"` or `type: "integer"`.
    Number { integer: bool },
    Boolean,
    /// A type union containing `"null"`.
    NullableUnion {
        main: Primitive,
        /// First member other than `"null"`; it alone decides `main`.
        main_member: Option<&'a Value>,
        /// String members other than `"null"`, in declaration order.
        members: Vec<&'a str>,
        /// Every string member, `"null"` included, in declaration order.
        declared: Vec<&'a str>,
        /// Indices of non-string members.
        skipped: Vec<usize>,
    },
    /// A type union without `"null"`.
    Union {
        members: Vec<&'a str>,
        skipped: Vec<usize>,
    },
    /// No `type` keyword (or a JSON array used as a schema).
    Untyped,
    /// A `type` string outside the supported set.
    Unknown { name: &'a str },
    /// A `type` keyword that is neither a string nor an array.
    InvalidType,
}

impl<'a> SchemaNode<'a> {
    /// Decode a raw schema value.
    pub fn decode(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Self::decode_map(map),
            Value::Array(_) => SchemaNode::Untyped,
            _ => SchemaNode::Malformed,
        }
    }

    /// Decode an optional value; an absent value is malformed.
    pub fn decode_opt(value: Option<&'a Value>) -> Self {
        value.map_or(SchemaNode::Malformed, Self::decode)
    }

    fn decode_map(map: &'a Map<String, Value>) -> Self {
        match map.get("type") {
            None => SchemaNode::Untyped,
            Some(Value::String(name)) => Self::decode_scalar(name, map),
            Some(Value::Array(members)) => Self::decode_union(members),
            Some(_) => SchemaNode::InvalidType,
        }
    }

    fn decode_scalar(name: &'a str, map: &'a Map<String, Value>) -> Self {
        match name {
            "object" => SchemaNode::Object(ObjectNode {
                properties: match map.get("properties") {
                    Some(Value::Object(props)) => {
                        props.iter().map(|(k, v)| (k.as_str(), v)).collect()
                    }
                    _ => Vec::new(),
                },
                required: match map.get("required") {
                    Some(Value::Array(names)) => names.iter().filter_map(Value::as_str).collect(),
                    _ => Vec::new(),
                },
                strict: map.get("additionalProperties") == Some(&Value::Bool(false)),
            }),
            "array" => SchemaNode::Array {
                items: map.get("items"),
            },
            "string" => SchemaNode::String {
                enumeration: map.get("enum").map(decode_enum),
            },
            "number" => SchemaNode::Number { integer: false },
            "integer" => SchemaNode::Number { integer: true },
            "boolean" => SchemaNode::Boolean,
            other => SchemaNode::Unknown { name: other },
        }
    }

    fn decode_union(members: &'a [Value]) -> Self {
        let mut declared = Vec::with_capacity(members.len());
        let mut skipped = Vec::new();
        for (index, member) in members.iter().enumerate() {
            match member.as_str() {
                Some(name) => declared.push(name),
                None => skipped.push(index),
            }
        }

        if declared.contains(&"null") {
            let main_member = members.iter().find(|m| m.as_str() != Some("null"));
            SchemaNode::NullableUnion {
                main: Primitive::from_type_name(main_member.and_then(Value::as_str)),
                main_member,
                members: declared.iter().copied().filter(|n| *n != "null").collect(),
                declared,
                skipped,
            }
        } else {
            SchemaNode::Union {
                members: declared,
                skipped,
            }
        }
    }
}

fn decode_enum(value: &Value) -> EnumDecl<'_> {
    match value {
        Value::Array(items) => {
            let mut values = Vec::with_capacity(items.len());
            let mut skipped = Vec::new();
            for (index, item) in items.iter().enumerate() {
                match item.as_str() {
                    Some(s) => values.push(s),
                    None => skipped.push(index),
                }
            }
            EnumDecl::Literals { values, skipped }
        }
        _ => EnumDecl::Invalid,
    }
}

/// Non-empty string `description` of a raw schema value.
pub fn description(value: &Value) -> Option<&str> {
    value
        .get("description")
        .and_then(Value::as_str)
        .filter(|d| !d.is_empty())
}

/// Keywords of `value` outside both the supported and annotation sets.
pub fn ignored_keywords(value: &Value) -> Vec<&str> {
    match value {
        Value::Object(map) => map
            .keys()
            .map(String::as_str)
            .filter(|k| !SUPPORTED_KEYWORDS.contains(k) && !ANNOTATION_KEYWORDS.contains(k))
            .collect(),
        _ => Vec::new(),
    }
}
