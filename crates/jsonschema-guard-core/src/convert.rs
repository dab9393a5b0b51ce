//! JSON Schema to validator conversion.
//!
//! A single recursive walk over the schema. Every node is first decoded
//! into a [`SchemaNode`] and then mapped to a [`Validator`] by pattern
//! matching. Unrecognized shapes degrade to permissive validators at that
//! node, so conversion is total. Each lossy decision is recorded as a
//! [`ConversionNote`].

use serde_json::Value;

use crate::config::ConvertOptions;
use crate::node::{self, EnumDecl, ObjectNode, Primitive, SchemaNode};
use crate::notes::{ConversionNote, NoteKind};
use crate::validator::{push_segment, Validator};

/// Result of converting one schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertResult {
    /// The validator tree, owned by the caller.
    pub validator: Validator,
    /// Lossy or fallback decisions, in walk order.
    pub notes: Vec<ConversionNote>,
}

/// Convert a schema with explicit options.
///
/// Never fails: malformed input at any depth maps to a permissive validator.
pub fn convert_with(schema: &Value, options: &ConvertOptions) -> ConvertResult {
    let _span = tracing::debug_span!("convert", max_depth = options.max_depth).entered();

    let mut converter = Converter {
        options,
        notes: Vec::new(),
        path: String::from("#"),
    };
    let validator = converter.dispatch(Some(schema), Position::Schema, 0);

    tracing::debug!(notes = converter.notes.len(), "conversion finished");
    ConvertResult {
        validator,
        notes: converter.notes,
    }
}

/// Where a node sits; property values follow a narrower dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// The root, an `items` schema or a nested object.
    Schema,
    /// The value of an entry in `properties`.
    Field,
}

struct Converter<'o> {
    options: &'o ConvertOptions,
    notes: Vec<ConversionNote>,
    /// Schema pointer of the node being converted.
    path: String,
}

impl Converter<'_> {
    fn dispatch(&mut self, value: Option<&Value>, position: Position, depth: usize) -> Validator {
        if depth > self.options.max_depth {
            self.note(NoteKind::DepthLimit);
            return Validator::any();
        }
        if let Some(value) = value {
            self.report_ignored(value);
        }

        match (SchemaNode::decode_opt(value), position) {
            (SchemaNode::Malformed, Position::Schema) => {
                self.note(NoteKind::MalformedNode);
                Validator::passthrough_object()
            }
            (SchemaNode::Malformed, Position::Field) => {
                self.note(NoteKind::MalformedNode);
                Validator::any()
            }
            (
                SchemaNode::NullableUnion {
                    main,
                    main_member,
                    members,
                    skipped,
                    ..
                },
                Position::Schema,
            ) => {
                self.skipped_type_members(skipped);
                self.nullable_union(main, main_member, &members)
            }
            (SchemaNode::Union { members, skipped }, Position::Schema) => {
                self.skipped_type_members(skipped);
                self.note(NoteKind::UnionCollapsed {
                    members: owned(&members),
                });
                Validator::any()
            }
            (
                SchemaNode::NullableUnion {
                    declared: members,
                    skipped,
                    ..
                }
                | SchemaNode::Union { members, skipped },
                Position::Field,
            ) => {
                self.skipped_type_members(skipped);
                self.note(NoteKind::UnionInField {
                    members: owned(&members),
                });
                Validator::any()
            }
            (SchemaNode::Object(object), _) => self.object(&object, depth),
            (SchemaNode::Array { items }, _) => {
                let element = self.at(&["items"], |c| c.dispatch(items, Position::Schema, depth + 1));
                Validator::array(element)
            }
            (SchemaNode::String { enumeration }, _) => self.string(enumeration),
            (SchemaNode::Number { integer }, _) => {
                if integer {
                    self.note(NoteKind::IntegerWidened);
                }
                Validator::number()
            }
            (SchemaNode::Boolean, _) => Validator::boolean(),
            (SchemaNode::Untyped, _) => Validator::any(),
            (SchemaNode::Unknown { name }, _) => {
                self.note(NoteKind::UnknownType { name: name.into() });
                Validator::any()
            }
            (SchemaNode::InvalidType, _) => {
                self.note(NoteKind::InvalidTypeField);
                Validator::any()
            }
        }
    }

    fn object(&mut self, object: &ObjectNode<'_>, depth: usize) -> Validator {
        let mut fields = Vec::with_capacity(object.properties.len());

        for (key, prop) in object.properties.iter().copied() {
            let mut field = self.at(&["properties", key], |c| {
                c.dispatch(Some(prop), Position::Field, depth + 1)
            });
            // Not required means nullable, not absent.
            if !object.is_required(key) {
                field = field.nullable();
            }
            if let Some(text) = node::description(prop) {
                field = field.describe(text);
            }
            fields.push((key, field));
        }

        let validator = Validator::object(fields);
        if object.strict {
            validator.strict()
        } else {
            validator
        }
    }

    fn nullable_union(
        &mut self,
        main: Primitive,
        main_member: Option<&Value>,
        members: &[&str],
    ) -> Validator {
        if let Some(member) = main_member {
            // A non-string main member is kept verbatim; every string member is dropped.
            let (kept, dropped) = match member.as_str() {
                Some(name) => (name.to_string(), members.get(1..).unwrap_or_default()),
                None => (member.to_string(), members),
            };
            if kept == "integer" {
                self.note(NoteKind::IntegerWidened);
            }
            if !dropped.is_empty() {
                self.note(NoteKind::UnionMembersDropped {
                    kept,
                    dropped: owned(dropped),
                });
            }
        }

        let inner = match main {
            Primitive::String => Validator::string(),
            Primitive::Number => Validator::number(),
            Primitive::Boolean => Validator::boolean(),
            Primitive::Any => Validator::any(),
        };
        inner.nullable()
    }

    fn string(&mut self, enumeration: Option<EnumDecl<'_>>) -> Validator {
        match enumeration {
            None => Validator::string(),
            Some(EnumDecl::Invalid) => {
                self.note(NoteKind::InvalidEnumField);
                Validator::string()
            }
            Some(EnumDecl::Literals { values, skipped }) => {
                for index in skipped {
                    self.note(NoteKind::NonStringEnumValue { index });
                }
                if values.is_empty() {
                    self.note(NoteKind::EmptyEnum);
                }
                Validator::enumeration(values)
            }
        }
    }

    fn skipped_type_members(&mut self, skipped: Vec<usize>) {
        for index in skipped {
            self.note(NoteKind::NonStringTypeMember { index });
        }
    }

    fn report_ignored(&mut self, value: &Value) {
        if !self.options.report_ignored_keywords {
            return;
        }
        for keyword in node::ignored_keywords(value) {
            self.note(NoteKind::IgnoredKeyword {
                keyword: keyword.to_string(),
            });
        }
    }

    /// Run `f` with `segments` appended to the current schema path.
    fn at<F>(&mut self, segments: &[&str], f: F) -> Validator
    where
        F: FnOnce(&mut Self) -> Validator,
    {
        let len = self.path.len();
        for segment in segments {
            push_segment(&mut self.path, segment);
        }
        let validator = f(self);
        self.path.truncate(len);
        validator
    }

    fn note(&mut self, kind: NoteKind) {
        match &kind {
            NoteKind::EmptyEnum => {
                tracing::warn!(schema_path = %self.path, "enum has no string values; every value will be rejected");
            }
            NoteKind::DepthLimit => {
                tracing::warn!(
                    schema_path = %self.path,
                    max_depth = self.options.max_depth,
                    "schema nesting exceeds depth limit; accepting any value"
                );
            }
            kind => tracing::debug!(schema_path = %self.path, ?kind, "lossy conversion"),
        }
        self.notes.push(ConversionNote {
            schema_path: self.path.clone(),
            kind,
        });
    }
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::validator::ValidatorKind;

    fn run(schema: Value) -> ConvertResult {
        convert_with(&schema, &ConvertOptions::default())
    }

    fn convert(schema: Value) -> Validator {
        run(schema).validator
    }

    fn note_kinds(result: &ConvertResult) -> Vec<&NoteKind> {
        result.notes.iter().map(|n| &n.kind).collect()
    }

    // -----------------------------------------------------------------------
    // Test 1: Degenerate input becomes a passthrough object
    // -----------------------------------------------------------------------
    #[test]
    fn test_malformed_root_is_passthrough_object() {
        for input in [json!(null), json!(0), json!(false), json!("object"), json!(3.5)] {
            let result = run(input.clone());
            assert_eq!(result.validator, Validator::passthrough_object(), "{input}");
            assert_eq!(note_kinds(&result), vec![&NoteKind::MalformedNode]);
        }
    }

    #[test]
    fn test_array_root_is_untyped() {
        assert_eq!(convert(json!([{"type": "string"}])), Validator::any());
    }

    // -----------------------------------------------------------------------
    // Test 2: Scalar dispatch
    // -----------------------------------------------------------------------
    #[test]
    fn test_scalar_dispatch() {
        assert_eq!(convert(json!({"type": "string"})), Validator::string());
        assert_eq!(convert(json!({"type": "number"})), Validator::number());
        assert_eq!(convert(json!({"type": "boolean"})), Validator::boolean());
        assert_eq!(convert(json!({"type": "null"})), Validator::any());
        assert_eq!(convert(json!({})), Validator::any());
    }

    #[test]
    fn test_integer_widened_to_number() {
        let result = run(json!({"type": "integer"}));
        assert_eq!(result.validator, Validator::number());
        assert_eq!(note_kinds(&result), vec![&NoteKind::IntegerWidened]);
        assert!(result.validator.is_valid(&json!(1.5)));
    }

    #[test]
    fn test_unknown_and_invalid_type_fields() {
        let unknown = run(json!({"type": "date"}));
        assert_eq!(unknown.validator, Validator::any());
        assert_eq!(
            note_kinds(&unknown),
            vec![&NoteKind::UnknownType { name: "date".into() }]
        );

        let invalid = run(json!({"type": {"nested": true}}));
        assert_eq!(invalid.validator, Validator::any());
        assert_eq!(note_kinds(&invalid), vec![&NoteKind::InvalidTypeField]);
    }

    // -----------------------------------------------------------------------
    // Test 3: Enums
    // -----------------------------------------------------------------------
    #[test]
    fn test_string_enum_preserves_order() {
        let v = convert(json!({"type": "string", "enum": ["b", "a", "c"]}));
        assert_eq!(v, Validator::enumeration(["b", "a", "c"]));
    }

    #[test]
    fn test_enum_on_non_string_type_is_ignored() {
        let v = convert(json!({"type": "number", "enum": [1, 2]}));
        assert_eq!(v, Validator::number());
    }

    #[test]
    fn test_empty_enum_is_reported() {
        let result = run(json!({"type": "string", "enum": []}));
        assert_eq!(result.validator, Validator::enumeration(Vec::<String>::new()));
        assert_eq!(note_kinds(&result), vec![&NoteKind::EmptyEnum]);
    }

    #[test]
    fn test_enum_edge_shapes() {
        let mixed = run(json!({"type": "string", "enum": ["a", 2]}));
        assert_eq!(mixed.validator, Validator::enumeration(["a"]));
        assert_eq!(
            note_kinds(&mixed),
            vec![&NoteKind::NonStringEnumValue { index: 1 }]
        );

        let not_array = run(json!({"type": "string", "enum": "a"}));
        assert_eq!(not_array.validator, Validator::string());
        assert_eq!(note_kinds(&not_array), vec![&NoteKind::InvalidEnumField]);
    }

    // -----------------------------------------------------------------------
    // Test 4: Type unions
    // -----------------------------------------------------------------------
    #[test]
    fn test_nullable_union_uses_first_non_null_member() {
        assert_eq!(
            convert(json!({"type": ["string", "null"]})),
            Validator::string().nullable()
        );
        assert_eq!(
            convert(json!({"type": ["null", "boolean"]})),
            Validator::boolean().nullable()
        );
        assert_eq!(
            convert(json!({"type": ["null"]})),
            Validator::any().nullable()
        );
        assert_eq!(
            convert(json!({"type": ["array", "null"]})),
            Validator::any().nullable()
        );

        let result = run(json!({"type": ["integer", "string", "null"]}));
        assert_eq!(result.validator, Validator::number().nullable());
        assert_eq!(
            note_kinds(&result),
            vec![
                &NoteKind::IntegerWidened,
                &NoteKind::UnionMembersDropped {
                    kept: "integer".into(),
                    dropped: vec!["string".into()],
                },
            ]
        );
    }

    #[test]
    fn test_non_string_union_members_are_skipped() {
        let result = run(json!({"type": ["string", 1, "null"]}));
        assert_eq!(result.validator, Validator::string().nullable());
        assert_eq!(
            note_kinds(&result),
            vec![&NoteKind::NonStringTypeMember { index: 1 }]
        );
        assert!(result.validator.is_valid(&json!("x")));
        assert!(result.validator.is_valid(&json!(null)));
        assert!(!result.validator.is_valid(&json!(7)));

        let result = run(json!({"type": [1, "string", "null"]}));
        assert_eq!(result.validator, Validator::any().nullable());
        assert_eq!(
            note_kinds(&result),
            vec![
                &NoteKind::NonStringTypeMember { index: 0 },
                &NoteKind::UnionMembersDropped {
                    kept: "1".into(),
                    dropped: vec!["string".into()],
                },
            ]
        );

        let result = run(json!({"type": ["string", {}]}));
        assert_eq!(result.validator, Validator::any());
        assert_eq!(
            note_kinds(&result),
            vec![
                &NoteKind::NonStringTypeMember { index: 1 },
                &NoteKind::UnionCollapsed {
                    members: vec!["string".into()],
                },
            ]
        );
    }

    #[test]
    fn test_union_without_null_collapses() {
        let result = run(json!({"type": ["string", "number"]}));
        assert_eq!(result.validator, Validator::any());
        assert_eq!(
            note_kinds(&result),
            vec![&NoteKind::UnionCollapsed {
                members: vec!["string".into(), "number".into()],
            }]
        );
    }

    // -----------------------------------------------------------------------
    // Test 5: Arrays
    // -----------------------------------------------------------------------
    #[test]
    fn test_array_recurses_into_items() {
        assert_eq!(
            convert(json!({"type": "array", "items": {"type": "boolean"}})),
            Validator::array(Validator::boolean())
        );
        assert_eq!(
            convert(json!({"type": "array", "items": {"type": ["string", "null"]}})),
            Validator::array(Validator::string().nullable())
        );
    }

    #[test]
    fn test_array_without_items_holds_passthrough_objects() {
        let result = run(json!({"type": "array"}));
        assert_eq!(
            result.validator,
            Validator::array(Validator::passthrough_object())
        );
        assert_eq!(result.notes[0].schema_path, "#/items");
        assert!(result.validator.is_valid(&json!([{"a": 1}])));
        assert!(!result.validator.is_valid(&json!([1])));
    }

    // -----------------------------------------------------------------------
    // Test 6: Objects
    // -----------------------------------------------------------------------
    #[test]
    fn test_object_fields_required_nullable_described() {
        let schema = json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "description": "Display name" },
                "age": { "type": "number" },
                "tags": { "type": "array", "items": { "type": "string" }, "description": "" },
                "mode": { "type": "string", "enum": ["a", "b"], "description": "Mode" }
            },
            "required": ["name", "mode"]
        });

        let expected = Validator::object([
            ("name", Validator::string().describe("Display name")),
            ("age", Validator::number().nullable()),
            ("tags", Validator::array(Validator::string()).nullable()),
            (
                "mode",
                Validator::enumeration(["a", "b"]).describe("Mode"),
            ),
        ]);
        assert_eq!(convert(schema), expected);
    }

    #[test]
    fn test_description_attaches_to_nullable_wrapper() {
        let v = convert(json!({
            "type": "object",
            "properties": { "x": { "type": "number", "description": "count" } }
        }));
        let field = v.field("x").unwrap();
        assert!(field.is_nullable());
        assert_eq!(field.description.as_deref(), Some("count"));
    }

    #[test]
    fn test_field_order_follows_declaration() {
        let v = convert(json!({
            "type": "object",
            "properties": { "zulu": {}, "alpha": {}, "mike": {} }
        }));
        let ValidatorKind::Object { fields, .. } = &v.kind else {
            panic!("expected object validator");
        };
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["zulu", "alpha", "mike"]);
    }

    #[test]
    fn test_field_unions_and_malformed_props_are_any() {
        let result = run(json!({
            "type": "object",
            "properties": {
                "maybe": { "type": ["string", "null"] },
                "bare": true
            },
            "required": ["maybe", "bare"]
        }));
        assert_eq!(
            result.validator,
            Validator::object([("maybe", Validator::any()), ("bare", Validator::any())])
        );
        assert_eq!(
            note_kinds(&result),
            vec![
                &NoteKind::UnionInField {
                    members: vec!["string".into(), "null".into()],
                },
                &NoteKind::MalformedNode,
            ]
        );
        assert_eq!(result.notes[0].schema_path, "#/properties/maybe");
        assert_eq!(result.notes[1].schema_path, "#/properties/bare");
    }

    #[test]
    fn test_nested_object_recurses() {
        let v = convert(json!({
            "type": "object",
            "properties": {
                "inner": {
                    "type": "object",
                    "properties": { "flag": { "type": "boolean" } },
                    "required": ["flag"],
                    "additionalProperties": false
                }
            },
            "required": ["inner"]
        }));
        assert_eq!(
            v,
            Validator::object([(
                "inner",
                Validator::object([("flag", Validator::boolean())]).strict()
            )])
        );
    }

    #[test]
    fn test_additional_properties_only_literal_false_is_strict() {
        let strict = convert(json!({"type": "object", "additionalProperties": false}));
        assert_eq!(strict, Validator::passthrough_object().strict());

        for value in [json!(true), json!("false"), json!(0), json!({})] {
            let loose = convert(json!({"type": "object", "additionalProperties": value}));
            assert_eq!(loose, Validator::passthrough_object());
        }
    }

    #[test]
    fn test_odd_properties_and_required_shapes_default_to_empty() {
        let v = convert(json!({
            "type": "object",
            "properties": "nope",
            "required": "x"
        }));
        assert_eq!(v, Validator::passthrough_object());
    }

    // -----------------------------------------------------------------------
    // Test 7: Ignored keywords
    // -----------------------------------------------------------------------
    #[test]
    fn test_ignored_keywords_reported_with_paths() {
        let schema = json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object",
            "title": "Person",
            "properties": {
                "age": { "type": "number", "minimum": 0 },
                "email": { "type": "string", "format": "email" }
            },
            "anyOf": [{ "required": ["age"] }],
            "required": ["age", "email"]
        });

        let result = run(schema.clone());
        let found: Vec<(&str, &NoteKind)> = result
            .notes
            .iter()
            .map(|n| (n.schema_path.as_str(), &n.kind))
            .collect();
        assert_eq!(
            found,
            vec![
                ("#", &NoteKind::IgnoredKeyword { keyword: "anyOf".into() }),
                (
                    "#/properties/age",
                    &NoteKind::IgnoredKeyword { keyword: "minimum".into() }
                ),
                (
                    "#/properties/email",
                    &NoteKind::IgnoredKeyword { keyword: "format".into() }
                ),
            ]
        );

        let quiet = convert_with(
            &schema,
            &ConvertOptions {
                report_ignored_keywords: false,
                ..ConvertOptions::default()
            },
        );
        assert!(quiet.notes.is_empty());
        assert_eq!(quiet.validator, result.validator);
    }

    // -----------------------------------------------------------------------
    // Test 8: Depth guard
    // -----------------------------------------------------------------------
    #[test]
    fn test_depth_guard_degrades_to_any() {
        let input = json!({
            "type": "object",
            "properties": {
                "nested": {
                    "type": "object",
                    "properties": {
                        "deep": { "type": "string" }
                    },
                    "required": ["deep"]
                }
            },
            "required": ["nested"]
        });

        let options = ConvertOptions {
            max_depth: 1,
            ..ConvertOptions::default()
        };

        let result = convert_with(&input, &options);
        assert_eq!(
            result.validator,
            Validator::object([(
                "nested",
                Validator::object([("deep", Validator::any())])
            )])
        );
        assert_eq!(result.notes.len(), 1);
        assert_eq!(result.notes[0].kind, NoteKind::DepthLimit);
        assert_eq!(result.notes[0].schema_path, "#/properties/nested/properties/deep");
    }

    #[test]
    fn test_escaped_property_names_in_note_paths() {
        let result = run(json!({
            "type": "object",
            "properties": { "a/b~c": { "type": "integer" } }
        }));
        assert_eq!(result.notes[0].schema_path, "#/properties/a~1b~0c");
    }

    // -----------------------------------------------------------------------
    // Test 9: Independence of repeated conversions
    // -----------------------------------------------------------------------
    #[test]
    fn test_repeated_conversions_are_equal_and_independent() {
        let schema = json!({
            "type": "object",
            "properties": { "x": { "type": "string" } },
            "required": ["x"]
        });
        let first = convert(schema.clone());
        let mut second = convert(schema);
        assert_eq!(first, second);

        second = second.strict();
        assert!(first.is_valid(&json!({"x": "a", "y": 1})));
        assert!(!second.is_valid(&json!({"x": "a", "y": 1})));
    }
}
