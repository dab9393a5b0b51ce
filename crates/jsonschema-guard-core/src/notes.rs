//! Notes emitted during conversion when a node is handled lossily or falls
//! back to a permissive validator.

use serde::{Deserialize, Serialize};

/// A lossy or fallback decision taken at one schema location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionNote {
    /// Schema location (e.g. "#/properties/users/items").
    pub schema_path: String,
    pub kind: NoteKind,
}

/// Classification of conversion notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NoteKind {
    /// The node is not a JSON object. A passthrough object validator was
    /// used at schema positions and a permissive one for property values.
    MalformedNode,
    /// `integer` was mapped to the generic number validator.
    IntegerWidened,
    /// A union without `null` became a permissive validator.
    UnionCollapsed { members: Vec<String> },
    /// Non-null union members after the first were discarded.
    UnionMembersDropped { kept: String, dropped: Vec<String> },
    /// A union used directly as a property type became a permissive validator.
    /// `members` lists every string member as declared, `null` included.
    UnionInField { members: Vec<String> },
    /// A `type` name outside the supported set.
    UnknownType { name: String },
    /// `type` is neither a string nor an array.
    InvalidTypeField,
    /// A non-string member of a `type` array was skipped.
    NonStringTypeMember { index: usize },
    /// `enum` has no string members; the validator rejects every value.
    EmptyEnum,
    /// A non-string `enum` member was skipped.
    NonStringEnumValue { index: usize },
    /// `enum` is not an array and was ignored.
    InvalidEnumField,
    /// The node lies beyond the configured depth limit.
    DepthLimit,
    /// A keyword outside the supported subset had no effect.
    IgnoredKeyword { keyword: String },
}
