//! Refract element tree <-> generic JSON document tree.
//!
//! An element serializes as
//! `{"element": ..., "meta"?: {...}, "attributes"?: {...}, "content"?: ...}`.
//! The `element` field carries the semantic name when one is set, the base
//! kind otherwise. Empty maps and absent content are left out.

use serde_json::{json, Map, Number, Value};

use crate::element::{Body, Element, ElementKind, InfoMap};
use crate::error::DecodeError;

/// JSON number for `n`. Integral values within the exact `f64` range are
/// written without a fractional part; non-finite values become `null`.
pub(crate) fn number_value(n: f64) -> Value {
    const EXACT: f64 = 9_007_199_254_740_992.0;
    if n.fract() == 0.0 && n.abs() <= EXACT {
        return json!(n as i64);
    }
    Number::from_f64(n).map_or(Value::Null, Value::Number)
}

pub fn serialize(e: &Element) -> Value {
    let mut out = Map::new();
    out.insert("element".to_owned(), json!(e.element_name()));
    if !e.meta.is_empty() {
        out.insert("meta".to_owned(), serialize_info(&e.meta));
    }
    if !e.attributes.is_empty() {
        out.insert("attributes".to_owned(), serialize_info(&e.attributes));
    }
    if let Some(content) = serialize_content(e) {
        out.insert("content".to_owned(), content);
    }
    Value::Object(out)
}

fn serialize_info(info: &InfoMap) -> Value {
    Value::Object(
        info.iter()
            .map(|(key, value)| (key.clone(), serialize(value)))
            .collect(),
    )
}

fn serialize_content(e: &Element) -> Option<Value> {
    match &e.body {
        Body::Null => None,
        Body::Boolean(value) => value.map(Value::Bool),
        Body::Number(value) => value.map(number_value),
        Body::String(value) => value.as_deref().map(|s| json!(s)),
        Body::Enum(value) => value.as_deref().map(serialize),
        Body::Member(key, value) => {
            let mut member = Map::new();
            member.insert("key".to_owned(), serialize(key));
            if let Some(value) = value {
                member.insert("value".to_owned(), serialize(value));
            }
            Some(Value::Object(member))
        }
        Body::Array(items)
        | Body::Object(items)
        | Body::Ref(items)
        | Body::Select(items)
        | Body::Extend(items) => items.as_deref().map(|items| {
            if e.compact {
                serialize_compact(items)
            } else {
                Value::Array(items.iter().map(serialize).collect())
            }
        }),
    }
}

/// `name -> value` object for compact content. Falls back to the list form
/// when some child has no name.
fn serialize_compact(items: &[Element]) -> Value {
    if !items.iter().all(|item| item.name().is_some()) {
        return Value::Array(items.iter().map(serialize).collect());
    }
    let mut out = Map::new();
    for item in items {
        let value = match &item.body {
            Body::Null => Value::Null,
            Body::Boolean(Some(b)) => Value::Bool(*b),
            Body::Number(Some(n)) => number_value(*n),
            Body::String(Some(s)) => json!(s),
            _ => serialize(item),
        };
        out.insert(item.name().unwrap_or_default().to_owned(), value);
    }
    Value::Object(out)
}

// ──────────────────────────────────────────────
// Decoding
// ──────────────────────────────────────────────

/// Read an element back from the serialized form.
///
/// Base kind names select the kind directly when the content fits it. Any
/// other name (`option`, named types, ...) becomes the semantic name, and
/// the kind follows the content: scalars by their JSON type, member objects
/// as members, everything else as an object.
pub fn deserialize(value: &Value) -> Result<Element, DecodeError> {
    let fields = value.as_object().ok_or(DecodeError::NotAnObject)?;
    let name = fields
        .get("element")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingName)?;
    let content = fields.get("content").filter(|c| !c.is_null());

    let mut e = match ElementKind::from_name(name).filter(|kind| fits(*kind, content)) {
        Some(kind) => decode_body(kind, name, content)?,
        None => decode_body(kind_from_shape(content), name, content)?.with_element(name),
    };

    e.meta = deserialize_info(fields.get("meta"), "meta", name)?;
    e.attributes = deserialize_info(fields.get("attributes"), "attributes", name)?;
    Ok(e)
}

fn deserialize_info(
    value: Option<&Value>,
    field: &'static str,
    element: &str,
) -> Result<InfoMap, DecodeError> {
    let Some(value) = value else {
        return Ok(InfoMap::new());
    };
    let entries = value.as_object().ok_or_else(|| DecodeError::InvalidInfo {
        field,
        element: element.to_owned(),
    })?;
    entries
        .iter()
        .map(|(key, value)| Ok::<_, DecodeError>((key.clone(), deserialize(value)?)))
        .collect()
}

fn is_member_content(content: &Value) -> bool {
    content.as_object().is_some_and(|m| m.contains_key("key"))
}

fn fits(kind: ElementKind, content: Option<&Value>) -> bool {
    let Some(content) = content else {
        return true;
    };
    match kind {
        ElementKind::Null => false,
        ElementKind::Boolean => content.is_boolean(),
        ElementKind::Number => content.is_number(),
        ElementKind::String => content.is_string(),
        ElementKind::Enum => content.is_object() && !is_member_content(content),
        ElementKind::Member => is_member_content(content),
        ElementKind::Array
        | ElementKind::Object
        | ElementKind::Ref
        | ElementKind::Select
        | ElementKind::Extend => content.is_array() || content.is_object(),
    }
}

fn kind_from_shape(content: Option<&Value>) -> ElementKind {
    match content {
        Some(Value::Bool(_)) => ElementKind::Boolean,
        Some(Value::Number(_)) => ElementKind::Number,
        Some(Value::String(_)) => ElementKind::String,
        Some(c) if is_member_content(c) => ElementKind::Member,
        _ => ElementKind::Object,
    }
}

fn decode_body(kind: ElementKind, name: &str, content: Option<&Value>) -> Result<Element, DecodeError> {
    let invalid = || DecodeError::InvalidContent {
        kind,
        element: name.to_owned(),
    };
    let Some(content) = content else {
        return Ok(Element::empty(kind));
    };

    let e = match kind {
        ElementKind::Null => return Err(invalid()),
        ElementKind::Boolean => Element::boolean(content.as_bool().ok_or_else(invalid)?),
        ElementKind::Number => Element::number(content.as_f64().ok_or_else(invalid)?),
        ElementKind::String => Element::string(content.as_str().ok_or_else(invalid)?),
        ElementKind::Enum => Element::enumeration(Some(deserialize(content)?)),
        ElementKind::Member => {
            let fields = content.as_object().ok_or_else(invalid)?;
            let key = deserialize(fields.get("key").ok_or_else(invalid)?)?;
            let value = fields
                .get("value")
                .filter(|v| !v.is_null())
                .map(deserialize)
                .transpose()?;
            Element::member(key, value)
        }
        ElementKind::Array
        | ElementKind::Object
        | ElementKind::Ref
        | ElementKind::Select
        | ElementKind::Extend => {
            let mut e = Element::empty(kind);
            let (items, compact) = match content {
                Value::Array(items) => (
                    items.iter().map(deserialize).collect::<Result<Vec<_>, _>>()?,
                    false,
                ),
                Value::Object(entries) => (
                    entries
                        .iter()
                        .map(|(key, value)| deserialize_compact_entry(key, value))
                        .collect::<Result<Vec<_>, _>>()?,
                    true,
                ),
                _ => return Err(invalid()),
            };
            e.compact = compact;
            if let Some(children) = e.children_mut() {
                *children = items;
            }
            e
        }
    };
    Ok(e)
}

fn deserialize_compact_entry(key: &str, value: &Value) -> Result<Element, DecodeError> {
    let e = match value {
        Value::Null => Element::null(),
        Value::Bool(b) => Element::boolean(*b),
        Value::Number(n) => Element::number(n.as_f64().unwrap_or_default()),
        Value::String(s) => Element::string(s.clone()),
        Value::Object(_) => deserialize(value)?,
        Value::Array(_) => {
            return Err(DecodeError::InvalidContent {
                kind: ElementKind::Array,
                element: key.to_owned(),
            })
        }
    };
    Ok(e.with_meta("name", Element::string(key)))
}
