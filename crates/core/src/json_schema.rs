//! JSON Schema (draft 4) rendering of a resolved Refract tree.
//!
//! Two visitors cooperate. [`SchemaRenderer`] turns an element into a
//! standalone schema. [`PropertyRenderer`] handles the children of an
//! object, collecting them into an [`ObjectSchema`] whose parts are written
//! out once the object is complete. Type-attribute flags travel down with
//! every call; see [`crate::flags`] for the propagation rules.

use log::{debug, warn};
use serde_json::{json, Map, Value};

use crate::element::{Body, Element, ElementKind, Visitor};
use crate::error::RenderError;
use crate::flags::{TypeFlags, FIXED};
use crate::merge::merge_element;
use crate::serialize::number_value;
use crate::validate::{check_resolved, unresolved};
use crate::JSON_SCHEMA_DRAFT;

type Schema = Map<String, Value>;

/// Render a complete JSON Schema document for `e`.
///
/// All references must already carry their `resolved` attribute; an
/// unresolved one fails the call before any output is built.
pub fn generate_json_schema(e: &Element) -> Result<Value, RenderError> {
    check_resolved(e)?;

    let mut schema = Schema::new();
    schema.insert("$schema".to_owned(), json!(JSON_SCHEMA_DRAFT));
    render_into(&mut schema, e, TypeFlags::NONE)?;
    Ok(Value::Object(schema))
}

/// Render `e` as a schema fragment under `flags`, without the `$schema`
/// header and without the resolution check.
pub fn make_schema(e: &Element, flags: TypeFlags) -> Result<Value, RenderError> {
    let mut schema = Schema::new();
    render_into(&mut schema, e, flags)?;
    Ok(Value::Object(schema))
}

fn render_into(schema: &mut Schema, e: &Element, flags: TypeFlags) -> Result<(), RenderError> {
    debug!(element = e.element_name(), flags:? = flags; "rendering element to JSON Schema");
    e.accept(&mut SchemaRenderer { schema, flags })
}

fn typed(name: &str) -> Schema {
    let mut schema = Schema::new();
    schema.insert("type".to_owned(), json!(name));
    schema
}

fn null_schema() -> Value {
    Value::Object(typed("null"))
}

// ──────────────────────────────────────────────
// Object parts
// ──────────────────────────────────────────────

/// Parts of an object schema, filled while its children are visited.
#[derive(Debug, Default)]
pub struct ObjectSchema {
    properties: Schema,
    pattern_properties: Schema,
    required: Vec<Value>,
    all_of: Vec<Value>,
}

impl ObjectSchema {
    fn add_property(&mut self, name: &str, schema: Value, required: bool) {
        self.properties.insert(name.to_owned(), schema);
        if required && !self.required.iter().any(|r| r.as_str() == Some(name)) {
            self.required.push(json!(name));
        }
    }

    /// The first schema registered for a pattern is kept.
    fn add_pattern_property(&mut self, pattern: String, schema: Value) {
        self.pattern_properties.entry(pattern).or_insert(schema);
    }

    /// Write the non-empty parts into `schema`, in the order properties,
    /// patternProperties, allOf, required.
    fn write_into(self, schema: &mut Schema) {
        if !self.properties.is_empty() {
            schema.insert("properties".to_owned(), Value::Object(self.properties));
        }
        if !self.pattern_properties.is_empty() {
            schema.insert(
                "patternProperties".to_owned(),
                Value::Object(self.pattern_properties),
            );
        }
        if !self.all_of.is_empty() {
            schema.insert("allOf".to_owned(), Value::Array(self.all_of));
        }
        if !self.required.is_empty() {
            schema.insert("required".to_owned(), Value::Array(self.required));
        }
    }

    fn into_value(self) -> Value {
        let mut schema = Schema::new();
        self.write_into(&mut schema);
        Value::Object(schema)
    }
}

// ──────────────────────────────────────────────
// Standalone schemas
// ──────────────────────────────────────────────

struct SchemaRenderer<'s> {
    schema: &'s mut Schema,
    flags: TypeFlags,
}

impl SchemaRenderer<'_> {
    /// Write `base` out, as `anyOf: [null, base]` when nullable.
    fn emit(&mut self, flags: TypeFlags, base: Schema) {
        if flags.nullable() {
            self.schema.insert(
                "anyOf".to_owned(),
                json!([null_schema(), Value::Object(base)]),
            );
        } else {
            self.schema.extend(base);
        }
    }

    fn primitive(&mut self, e: &Element, name: &str, value: Option<Value>) -> Result<(), RenderError> {
        let flags = self.flags.update(e);
        let mut base = typed(name);
        if flags.fixed() {
            if let Some(value) = value {
                base.insert("enum".to_owned(), json!([value]));
            }
        }
        self.emit(flags, base);
        Ok(())
    }

    /// `anyOf` over enumeration candidates, each rendered with inherited
    /// flags. Nullable enums list `null` first.
    fn candidates(&mut self, flags: TypeFlags, candidates: &[Element]) -> Result<(), RenderError> {
        let mut any_of = Vec::with_capacity(candidates.len() + 1);
        if flags.nullable() {
            any_of.push(null_schema());
        }
        for candidate in candidates {
            any_of.push(make_schema(candidate, flags.inherit(candidate.kind()))?);
        }
        self.schema.insert("anyOf".to_owned(), Value::Array(any_of));
        Ok(())
    }
}

/// An `enum`-tagged object wrapping a single `enum`-tagged array: the
/// shape enum properties take after conversion. Decoded documents carry the
/// inner sequence as an object.
fn legacy_enum_candidates<'e>(e: &Element, items: Option<&'e [Element]>) -> Option<&'e Element> {
    if !e.is_element("enum") {
        return None;
    }
    match items {
        Some([inner])
            if inner.is_element("enum")
                && matches!(inner.kind(), ElementKind::Array | ElementKind::Object) =>
        {
            Some(inner)
        }
        _ => None,
    }
}

impl Visitor for SchemaRenderer<'_> {
    type Output = Result<(), RenderError>;

    fn visit_null(&mut self, e: &Element) -> Self::Output {
        self.primitive(e, "null", None)
    }

    fn visit_boolean(&mut self, e: &Element, value: Option<bool>) -> Self::Output {
        self.primitive(e, "boolean", value.map(Value::Bool))
    }

    fn visit_number(&mut self, e: &Element, value: Option<f64>) -> Self::Output {
        self.primitive(e, "number", value.map(number_value))
    }

    fn visit_string(&mut self, e: &Element, value: Option<&str>) -> Self::Output {
        self.primitive(e, "string", value.map(|s| json!(s)))
    }

    fn visit_enum(&mut self, e: &Element, _value: Option<&Element>) -> Self::Output {
        let flags = self.flags.update(e);
        match e.attribute("enumerations") {
            Some(enumerations) => match &enumerations.body {
                Body::Array(items) => {
                    self.candidates(flags, items.as_deref().unwrap_or_default())
                }
                _ => Err(RenderError::InvalidEnumerations {
                    element: enumerations.element_name().to_owned(),
                }),
            },
            None => {
                warn!(element = e.element_name(); "enum without enumerations renders no candidates");
                self.candidates(flags, &[])
            }
        }
    }

    fn visit_array(&mut self, e: &Element, items: Option<&[Element]>) -> Self::Output {
        let flags = self.flags.update(e);
        let items = items.unwrap_or_default();
        let mut base = typed("array");

        if flags.closed() && items.is_empty() {
            warn!(element = e.element_name(); "fixed array has no items");
        }

        if flags.fixed_type() {
            let any_of = items
                .iter()
                .map(|item| make_schema(item, flags.inherit(item.kind())))
                .collect::<Result<Vec<_>, _>>()?;
            base.insert("items".to_owned(), json!({ "anyOf": any_of }));
        } else if flags.fixed() {
            let tuple = items
                .iter()
                .map(|item| make_schema(item, flags.inherit(item.kind())))
                .collect::<Result<Vec<_>, _>>()?;
            base.insert("minItems".to_owned(), json!(items.len()));
            base.insert("items".to_owned(), Value::Array(tuple));
            base.insert("additionalItems".to_owned(), json!(false));
        }

        self.emit(flags, base);
        Ok(())
    }

    fn visit_object(&mut self, e: &Element, items: Option<&[Element]>) -> Self::Output {
        if let Some(inner) = legacy_enum_candidates(e, items) {
            let flags = self.flags.update(e).update(inner);
            return self.candidates(flags, inner.children().unwrap_or_default());
        }

        let flags = self.flags.update(e);

        let mut parts = ObjectSchema::default();
        match items {
            Some(items) => {
                for item in items {
                    render_property(&mut parts, item, flags.inherit_or_required(item.kind()))?;
                }
            }
            None => warn!(element = e.element_name(); "object has no content"),
        }

        let mut base = typed("object");
        parts.write_into(&mut base);
        if flags.closed() {
            base.insert("additionalProperties".to_owned(), json!(false));
        }
        self.emit(flags, base);
        Ok(())
    }

    fn visit_member(&mut self, e: &Element, _key: &Element, _value: Option<&Element>) -> Self::Output {
        Err(RenderError::InvalidSchemaElement {
            element: e.element_name().to_owned(),
        })
    }

    fn visit_ref(&mut self, e: &Element, _content: Option<&[Element]>) -> Self::Output {
        let resolved = e.attribute("resolved").ok_or_else(|| unresolved(e))?;
        render_into(self.schema, resolved, self.flags.pass())
    }

    fn visit_select(&mut self, e: &Element, _options: Option<&[Element]>) -> Self::Output {
        Err(RenderError::InvalidSchemaElement {
            element: e.element_name().to_owned(),
        })
    }

    fn visit_extend(&mut self, e: &Element, _overlays: Option<&[Element]>) -> Self::Output {
        match merge_element(e) {
            Some(merged) => render_into(self.schema, &merged, self.flags.pass()),
            None => Ok(()),
        }
    }
}

// ──────────────────────────────────────────────
// Object properties
// ──────────────────────────────────────────────

fn render_property(parts: &mut ObjectSchema, e: &Element, flags: TypeFlags) -> Result<(), RenderError> {
    debug!(element = e.element_name(), flags:? = flags; "rendering object property");
    e.accept(&mut PropertyRenderer { parts, flags })
}

struct PropertyRenderer<'p> {
    parts: &'p mut ObjectSchema,
    flags: TypeFlags,
}

impl PropertyRenderer<'_> {
    /// A named element is a property keyed by its `name` meta, carrying its
    /// own type attributes as property markers.
    fn named(&mut self, e: &Element) -> Result<(), RenderError> {
        let Some(name) = e.name() else {
            return Err(RenderError::InvalidProperty {
                element: e.element_name().to_owned(),
            });
        };
        let flags = self.flags.member_overrides(e);
        let schema = make_schema(e, flags.pass())?;

        if e.is_variable() {
            let pattern = key_pattern(&Element::string(name), flags);
            self.parts.add_pattern_property(pattern, schema);
        } else {
            self.parts.add_property(name, schema, flags.required());
        }
        Ok(())
    }

    /// Objects without a name splice their members into the enclosing
    /// object. Members see inherited flags only; of the object's own
    /// markers just `fixed` carries over.
    fn spliced(&mut self, e: &Element, items: Option<&[Element]>) -> Result<(), RenderError> {
        let flags = self
            .flags
            .with_fixed(self.flags.fixed() || e.has_type_attribute(FIXED));
        let items = items.unwrap_or_default();
        if items.is_empty() {
            warn!(element = e.element_name(); "spliced object has no members");
        }
        for item in items {
            render_property(self.parts, item, flags.inherit(item.kind()))?;
        }
        Ok(())
    }
}

impl Visitor for PropertyRenderer<'_> {
    type Output = Result<(), RenderError>;

    fn visit_null(&mut self, e: &Element) -> Self::Output {
        self.named(e)
    }

    fn visit_boolean(&mut self, e: &Element, _value: Option<bool>) -> Self::Output {
        self.named(e)
    }

    fn visit_number(&mut self, e: &Element, _value: Option<f64>) -> Self::Output {
        self.named(e)
    }

    fn visit_string(&mut self, e: &Element, _value: Option<&str>) -> Self::Output {
        self.named(e)
    }

    fn visit_enum(&mut self, e: &Element, _value: Option<&Element>) -> Self::Output {
        self.named(e)
    }

    fn visit_array(&mut self, e: &Element, _items: Option<&[Element]>) -> Self::Output {
        self.named(e)
    }

    fn visit_object(&mut self, e: &Element, items: Option<&[Element]>) -> Self::Output {
        if e.name().is_some() {
            self.named(e)
        } else {
            self.spliced(e, items)
        }
    }

    fn visit_member(&mut self, e: &Element, key: &Element, value: Option<&Element>) -> Self::Output {
        let flags = self.flags.member_overrides(e);
        let schema = match value {
            Some(value) => make_schema(value, flags.pass())?,
            None => {
                warn!(element = e.element_name(); "member without value renders an empty schema");
                Value::Object(Schema::new())
            }
        };

        let key = member_key(key)?;
        if e.is_variable() || key.is_variable() {
            let pattern = key_pattern(&key, flags);
            self.parts.add_pattern_property(pattern, schema);
        } else {
            let name = key.as_str().unwrap_or_default();
            self.parts.add_property(name, schema, flags.required());
        }
        Ok(())
    }

    fn visit_ref(&mut self, e: &Element, _content: Option<&[Element]>) -> Self::Output {
        let resolved = e.attribute("resolved").ok_or_else(|| unresolved(e))?;
        render_property(self.parts, resolved, self.flags.pass())
    }

    fn visit_select(&mut self, e: &Element, options: Option<&[Element]>) -> Self::Output {
        let options = options.unwrap_or_default();
        if options.is_empty() {
            warn!(element = e.element_name(); "select has no options");
        }

        let mut one_of = Vec::with_capacity(options.len());
        for option in options {
            let entries = match &option.body {
                Body::Object(Some(entries)) => entries.as_slice(),
                Body::Object(None) => return Err(RenderError::EmptyOption),
                _ => std::slice::from_ref(option),
            };
            if entries.is_empty() {
                warn!(element = option.element_name(); "option has no members");
            }
            let mut parts = ObjectSchema::default();
            for entry in entries {
                render_property(&mut parts, entry, self.flags.pass())?;
            }
            one_of.push(parts.into_value());
        }

        self.parts.all_of.push(json!({ "oneOf": one_of }));
        Ok(())
    }

    fn visit_extend(&mut self, e: &Element, _overlays: Option<&[Element]>) -> Self::Output {
        match merge_element(e) {
            Some(merged) => render_property(self.parts, &merged, self.flags.pass()),
            None => Ok(()),
        }
    }
}

// ──────────────────────────────────────────────
// Keys
// ──────────────────────────────────────────────

/// Member key as a string element. Extend keys are merged first.
fn member_key(key: &Element) -> Result<Element, RenderError> {
    let invalid = |element: &Element| RenderError::InvalidKey {
        element: element.element_name().to_owned(),
    };
    match key.kind() {
        ElementKind::String => Ok(key.clone()),
        ElementKind::Extend => match merge_element(key) {
            Some(merged) if merged.kind() == ElementKind::String => Ok(merged),
            Some(merged) => Err(invalid(&merged)),
            None => Err(invalid(key)),
        },
        _ => Err(invalid(key)),
    }
}

/// Pattern for a variable key: an exact match of the key text when the
/// property or its key is fixed, anything otherwise.
fn key_pattern(key: &Element, flags: TypeFlags) -> String {
    if !(flags.fixed() || key.has_type_attribute(FIXED)) {
        return "(?:)".to_owned();
    }
    match key.as_str() {
        Some(text) => format!("^{}$", regex::escape(text)),
        None => r"^(?![\s\S])".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(markers: &[&str]) -> Element {
        Element::array(markers.iter().map(|m| Element::string(*m)).collect())
    }

    fn marked(e: Element, markers: &[&str]) -> Element {
        e.with_attribute("typeAttributes", attrs(markers))
    }

    fn prop(key: &str, value: Element) -> Element {
        Element::member(Element::string(key), Some(value))
    }

    fn render(e: &Element) -> Value {
        make_schema(e, TypeFlags::NONE).unwrap()
    }

    #[test]
    fn document_carries_schema_header() {
        let schema = generate_json_schema(&Element::string("x")).unwrap();
        assert_eq!(
            schema,
            json!({ "$schema": JSON_SCHEMA_DRAFT, "type": "string" })
        );
    }

    #[test]
    fn required_property() {
        let object = Element::object(vec![marked(prop("count", Element::number(5.0)), &["required"])]);
        assert_eq!(
            render(&object),
            json!({
                "type": "object",
                "properties": { "count": { "type": "number" } },
                "required": ["count"]
            })
        );
    }

    #[test]
    fn fixed_string_pins_value() {
        let e = marked(Element::string("abc"), &["fixed"]);
        assert_eq!(render(&e), json!({ "type": "string", "enum": ["abc"] }));

        let empty = marked(Element::empty(ElementKind::String), &["fixed"]);
        assert_eq!(render(&empty), json!({ "type": "string" }));
    }

    #[test]
    fn integral_numbers_render_without_fraction() {
        let e = marked(Element::number(3.0), &["fixed"]);
        assert_eq!(render(&e).to_string(), r#"{"type":"number","enum":[3]}"#);
        let e = marked(Element::number(1.5), &["fixed"]);
        assert_eq!(render(&e), json!({ "type": "number", "enum": [1.5] }));
    }

    #[test]
    fn fixed_array_is_a_tuple() {
        let e = marked(
            Element::array(vec![Element::number(1.0), Element::string("a")]),
            &["fixed"],
        );
        assert_eq!(
            render(&e),
            json!({
                "type": "array",
                "minItems": 2,
                "items": [
                    { "type": "number", "enum": [1] },
                    { "type": "string", "enum": ["a"] }
                ],
                "additionalItems": false
            })
        );
    }

    #[test]
    fn fixed_type_array_lists_item_types() {
        let e = marked(
            Element::array(vec![Element::number(1.0), Element::string("a")]),
            &["fixedType"],
        );
        assert_eq!(
            render(&e),
            json!({
                "type": "array",
                "items": { "anyOf": [{ "type": "number" }, { "type": "string" }] }
            })
        );
    }

    #[test]
    fn plain_array_has_no_items() {
        let e = Element::array(vec![Element::number(1.0)]);
        assert_eq!(render(&e), json!({ "type": "array" }));
    }

    #[test]
    fn fixed_object_requires_all_but_optional() {
        let object = marked(
            Element::object(vec![
                prop("a", Element::string("x")),
                marked(prop("b", Element::string("y")), &["optional"]),
            ]),
            &["fixed"],
        );
        assert_eq!(
            render(&object),
            json!({
                "type": "object",
                "properties": {
                    "a": { "type": "string", "enum": ["x"] },
                    "b": { "type": "string", "enum": ["y"] }
                },
                "required": ["a"],
                "additionalProperties": false
            })
        );
    }

    #[test]
    fn fixed_type_object_does_not_pin_values() {
        let object = marked(
            Element::object(vec![prop("a", Element::string("x"))]),
            &["fixedType"],
        );
        assert_eq!(
            render(&object),
            json!({
                "type": "object",
                "properties": { "a": { "type": "string" } },
                "required": ["a"],
                "additionalProperties": false
            })
        );
    }

    #[test]
    fn nullable_wraps_in_any_of() {
        let e = marked(Element::string("x"), &["nullable"]);
        assert_eq!(
            render(&e),
            json!({ "anyOf": [{ "type": "null" }, { "type": "string" }] })
        );
    }

    #[test]
    fn nullable_member_value() {
        let object = Element::object(vec![marked(prop("a", Element::number(1.0)), &["nullable"])]);
        assert_eq!(
            render(&object),
            json!({
                "type": "object",
                "properties": {
                    "a": { "anyOf": [{ "type": "null" }, { "type": "number" }] }
                }
            })
        );
    }

    #[test]
    fn variable_key_becomes_pattern_property() {
        let key = Element::string("foo").with_attribute("variable", Element::boolean(true));
        let open = Element::object(vec![Element::member(key.clone(), Some(Element::string("v")))]);
        assert_eq!(
            render(&open),
            json!({
                "type": "object",
                "patternProperties": { "(?:)": { "type": "string" } }
            })
        );

        let fixed = marked(
            Element::object(vec![Element::member(key, Some(Element::string("v")))]),
            &["fixed"],
        );
        let schema = render(&fixed);
        assert_eq!(
            schema["patternProperties"]["^foo$"],
            json!({ "type": "string", "enum": ["v"] })
        );
    }

    #[test]
    fn pattern_escapes_regex_syntax() {
        let key = Element::string("a.b").with_attribute("variable", Element::boolean(true));
        let pattern = key_pattern(&key, TypeFlags::NONE.with_fixed(true));
        assert_eq!(pattern, r"^a\.b$");
        let empty = Element::empty(ElementKind::String);
        assert_eq!(key_pattern(&empty, TypeFlags::NONE.with_fixed(true)), r"^(?![\s\S])");
    }

    #[test]
    fn fixed_key_alone_gives_exact_pattern() {
        let key = marked(Element::string("xid"), &["fixed"])
            .with_attribute("variable", Element::boolean(true));
        assert_eq!(key_pattern(&key, TypeFlags::NONE), r"^xid$");

        let open = Element::string("xid").with_attribute("variable", Element::boolean(true));
        assert_eq!(key_pattern(&open, TypeFlags::NONE), "(?:)");

        let object = Element::object(vec![Element::member(key, Some(Element::string("v")))]);
        let schema = render(&object);
        assert_eq!(
            schema["patternProperties"],
            json!({ r"^xid$": { "type": "string" } })
        );
    }

    #[test]
    fn first_pattern_property_wins() {
        let key = || Element::string("k").with_attribute("variable", Element::boolean(true));
        let object = Element::object(vec![
            Element::member(key(), Some(Element::string("a"))),
            Element::member(key(), Some(Element::number(1.0))),
        ]);
        assert_eq!(
            render(&object)["patternProperties"]["(?:)"],
            json!({ "type": "string" })
        );
    }

    #[test]
    fn named_elements_are_properties() {
        let object = Element::object(vec![
            marked(Element::number(5.0), &["required"]).with_meta("name", Element::string("count")),
            Element::string("x")
                .with_meta("name", Element::string("k"))
                .with_attribute("variable", Element::boolean(true)),
        ]);
        assert_eq!(
            render(&object),
            json!({
                "type": "object",
                "properties": { "count": { "type": "number" } },
                "patternProperties": { "(?:)": { "type": "string" } },
                "required": ["count"]
            })
        );
    }

    #[test]
    fn unnamed_scalar_is_not_a_property() {
        let object = Element::object(vec![Element::string("x")]);
        assert_eq!(
            make_schema(&object, TypeFlags::NONE),
            Err(RenderError::InvalidProperty {
                element: "string".to_owned()
            })
        );
    }

    #[test]
    fn select_becomes_one_of_in_all_of() {
        let object = Element::object(vec![Element::select(vec![
            Element::option(vec![prop("a", Element::string("x"))]),
            Element::option(vec![prop("b", Element::number(1.0))]),
        ])]);
        assert_eq!(
            render(&object),
            json!({
                "type": "object",
                "allOf": [{
                    "oneOf": [
                        { "properties": { "a": { "type": "string" } } },
                        { "properties": { "b": { "type": "number" } } }
                    ]
                }]
            })
        );
    }

    #[test]
    fn empty_option_fails() {
        let object = Element::object(vec![Element::select(vec![
            Element::empty(ElementKind::Object).with_element("option"),
        ])]);
        assert_eq!(make_schema(&object, TypeFlags::NONE), Err(RenderError::EmptyOption));
    }

    #[test]
    fn members_and_selects_are_not_schemas() {
        for e in [prop("a", Element::null()), Element::select(vec![])] {
            assert!(matches!(
                make_schema(&e, TypeFlags::NONE),
                Err(RenderError::InvalidSchemaElement { .. })
            ));
        }
    }

    #[test]
    fn enum_renders_candidates() {
        let e = marked(Element::empty(ElementKind::Enum), &["nullable"]).with_attribute(
            "enumerations",
            Element::array(vec![Element::string("red"), Element::number(1.0)]),
        );
        assert_eq!(
            render(&e),
            json!({
                "anyOf": [
                    { "type": "null" },
                    { "type": "string" },
                    { "type": "number" }
                ]
            })
        );

        let bad = Element::empty(ElementKind::Enum).with_attribute("enumerations", Element::string("x"));
        assert!(matches!(
            make_schema(&bad, TypeFlags::NONE),
            Err(RenderError::InvalidEnumerations { .. })
        ));
    }

    #[test]
    fn fixed_enum_pins_candidates() {
        let e = marked(Element::empty(ElementKind::Enum), &["fixed"])
            .with_attribute("enumerations", Element::array(vec![Element::string("red")]));
        assert_eq!(
            render(&e),
            json!({ "anyOf": [{ "type": "string", "enum": ["red"] }] })
        );
    }

    #[test]
    fn enum_inside_fixed_array_is_not_pinned() {
        let en = Element::empty(ElementKind::Enum)
            .with_attribute("enumerations", Element::array(vec![Element::string("red")]));
        let e = marked(Element::array(vec![en]), &["fixed"]);
        assert_eq!(
            render(&e)["items"],
            json!([{ "anyOf": [{ "type": "string" }] }])
        );
    }

    #[test]
    fn wrapped_enum_property() {
        let candidates = Element::array(vec![Element::string("red"), Element::string("green")])
            .with_element("enum");
        let color = Element::object(vec![candidates])
            .with_element("enum")
            .with_meta("name", Element::string("color"));
        let object = Element::object(vec![color]);
        assert_eq!(
            render(&object),
            json!({
                "type": "object",
                "properties": {
                    "color": { "anyOf": [{ "type": "string" }, { "type": "string" }] }
                }
            })
        );
    }

    #[test]
    fn spliced_object_members_are_not_forced_required() {
        let inner = Element::object(vec![prop("a", Element::string("x"))]);
        let outer = marked(Element::object(vec![inner]), &["fixedType"]);
        assert_eq!(
            render(&outer),
            json!({
                "type": "object",
                "properties": { "a": { "type": "string" } },
                "additionalProperties": false
            })
        );

        let marked_inner = marked(
            Element::object(vec![prop("a", Element::string("x"))]),
            &["required"],
        );
        let plain = Element::object(vec![marked_inner]);
        assert!(render(&plain).get("required").is_none());
    }

    #[test]
    fn resolved_mixin_in_fixed_type_object_is_not_forced_required() {
        let target = Element::object(vec![prop("id", Element::empty(ElementKind::Number))]);
        let reference = Element::reference(vec![
            Element::string("Person").with_meta("name", Element::string("href")),
        ])
        .with_attribute("resolved", target);
        let object = marked(Element::object(vec![reference]), &["fixedType"]);
        assert_eq!(
            render(&object),
            json!({
                "type": "object",
                "properties": { "id": { "type": "number" } },
                "additionalProperties": false
            })
        );
    }

    #[test]
    fn spliced_object_carries_its_fixed_marker() {
        let inner = marked(
            Element::object(vec![prop("a", Element::string("x"))]),
            &["fixed"],
        );
        let schema = render(&Element::object(vec![inner]));
        assert_eq!(schema["properties"]["a"], json!({ "type": "string", "enum": ["x"] }));
        assert!(schema.get("required").is_none());
    }

    #[test]
    fn enum_without_enumerations_has_no_candidates() {
        assert_eq!(render(&Element::empty(ElementKind::Enum)), json!({ "anyOf": [] }));
        let nullable = marked(Element::empty(ElementKind::Enum), &["nullable"]);
        assert_eq!(render(&nullable), json!({ "anyOf": [{ "type": "null" }] }));
    }

    #[test]
    fn resolved_ref_is_rendered_in_place() {
        let target = Element::object(vec![prop("id", Element::number(1.0))]);
        let reference = Element::reference(vec![
            Element::string("Person").with_meta("name", Element::string("href")),
        ])
        .with_attribute("resolved", target);
        let object = Element::object(vec![reference, prop("x", Element::null())]);
        assert_eq!(
            render(&object),
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "number" },
                    "x": { "type": "null" }
                }
            })
        );

        let unresolved = Element::reference(vec![
            Element::string("Person").with_meta("name", Element::string("href")),
        ]);
        assert_eq!(
            generate_json_schema(&Element::object(vec![unresolved])),
            Err(RenderError::UnresolvedRef {
                href: "Person".to_owned()
            })
        );
    }

    #[test]
    fn extend_renders_merged_element() {
        let extend = Element::extend(vec![
            Element::object(vec![prop("a", Element::string("x"))]),
            Element::object(vec![prop("b", Element::number(1.0))]),
        ]);
        assert_eq!(
            render(&extend),
            json!({
                "type": "object",
                "properties": {
                    "a": { "type": "string" },
                    "b": { "type": "number" }
                }
            })
        );
        assert_eq!(render(&Element::empty(ElementKind::Extend)), json!({}));
    }

    #[test]
    fn extend_key_is_merged() {
        let key = Element::extend(vec![Element::string("a"), Element::string("b")]);
        let object = Element::object(vec![Element::member(key, Some(Element::null()))]);
        assert_eq!(
            render(&object)["properties"],
            json!({ "b": { "type": "null" } })
        );

        let bad = Element::object(vec![Element::member(Element::number(1.0), Some(Element::null()))]);
        assert!(matches!(
            make_schema(&bad, TypeFlags::NONE),
            Err(RenderError::InvalidKey { .. })
        ));
    }

    #[test]
    fn member_without_value_is_unconstrained() {
        let object = Element::object(vec![Element::member(Element::string("a"), None)]);
        assert_eq!(render(&object)["properties"], json!({ "a": {} }));
    }
}
