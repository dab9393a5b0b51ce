//! # jsonschema-guard-core
//!
//! Turn the JSON Schema subset emitted by structured-output generation APIs
//! into a runtime [`Validator`] that can check model output.
//!
//! ```
//! use jsonschema_guard_core::convert;
//! use serde_json::json;
//!
//! let validator = convert(&json!({
//!     "type": "object",
//!     "properties": {
//!         "city": { "type": "string" },
//!         "population": { "type": "integer" }
//!     },
//!     "required": ["city"],
//!     "additionalProperties": false
//! }));
//!
//! assert!(validator.is_valid(&json!({ "city": "Oslo", "population": null })));
//! assert!(!validator.is_valid(&json!({ "city": "Oslo" })));
//! assert!(!validator.is_valid(&json!({ "city": "Oslo", "population": 1, "extra": true })));
//! ```
//!
//! Two policies differ from standard JSON Schema semantics:
//!
//! - a property missing from `required` must still be present, but may be
//!   `null`;
//! - a `type` union of two or more non-null types accepts any value.
//!
//! Conversion is total. Unsupported or malformed nodes become permissive
//! validators; [`convert_with`] reports each such decision as a
//! [`ConversionNote`].

pub mod config;
pub mod convert;
pub mod error;
pub mod node;
pub mod notes;
pub mod validator;

pub use config::ConvertOptions;
pub use convert::{convert_with, ConvertResult};
pub use error::{Issue, IssueKind, ValidationError, ValueKind};
pub use node::SchemaNode;
pub use notes::{ConversionNote, NoteKind};
pub use validator::{Field, UnknownKeys, Validator, ValidatorKind};

use serde_json::Value;

/// Convert a schema with default options, discarding conversion notes.
pub fn convert(schema: &Value) -> Validator {
    convert_with(schema, &ConvertOptions::default()).validator
}
