//! Value and type extraction: literal text to typed Refract content.
//!
//! Extraction targets are either scalar (boolean, number, string) or
//! composite (array, object). Scalars take exactly one literal; composites
//! take one child per literal, or the converted elements of a type section.

use crate::convert;
use crate::element::{Element, ElementKind};
use crate::error::ConvertError;
use crate::mson::{self, BaseTypeName, TypeName, TypeSection, ValueDefinition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Boolean,
    Number,
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeKind {
    Array,
    Object,
}

/// What an element's content is extracted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Scalar(ScalarKind),
    Composite(CompositeKind),
}

impl Target {
    /// Extraction target for an element kind. Kinds that never receive
    /// literal content have none.
    pub fn of(kind: ElementKind) -> Option<Target> {
        match kind {
            ElementKind::Boolean => Some(Target::Scalar(ScalarKind::Boolean)),
            ElementKind::Number => Some(Target::Scalar(ScalarKind::Number)),
            ElementKind::String => Some(Target::Scalar(ScalarKind::String)),
            ElementKind::Array => Some(Target::Composite(CompositeKind::Array)),
            ElementKind::Object => Some(Target::Composite(CompositeKind::Object)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Boolean(bool),
    Number(f64),
    String(String),
}

impl Scalar {
    pub fn into_element(self) -> Element {
        match self {
            Scalar::Boolean(b) => Element::boolean(b),
            Scalar::Number(n) => Element::number(n),
            Scalar::String(s) => Element::string(s),
        }
    }
}

/// Content produced by extraction, ready to be set on an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    Scalar(Scalar),
    Children(Vec<Element>),
}

impl Extracted {
    pub fn describe(&self) -> &'static str {
        match self {
            Extracted::Scalar(Scalar::Boolean(_)) => "boolean",
            Extracted::Scalar(Scalar::Number(_)) => "number",
            Extracted::Scalar(Scalar::String(_)) => "string",
            Extracted::Children(_) => "element sequence",
        }
    }
}

// ──────────────────────────────────────────────
// Literals
// ──────────────────────────────────────────────

/// Convert literal text into a scalar of `kind`.
///
/// Booleans are `true` only for the exact text `"true"`. Numbers parse the
/// longest decimal prefix and fall back to `0`.
pub fn literal_to_scalar(literal: &str, kind: ScalarKind) -> Scalar {
    match kind {
        ScalarKind::Boolean => Scalar::Boolean(literal == "true"),
        ScalarKind::Number => Scalar::Number(parse_number(literal)),
        ScalarKind::String => Scalar::String(literal.to_owned()),
    }
}

/// Locale-independent decimal parse of the leading numeric part of `text`.
pub fn parse_number(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return 0.0;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse().unwrap_or(0.0)
}

// ──────────────────────────────────────────────
// Value sets
// ──────────────────────────────────────────────

/// The sole literal of `values`, converted to `kind`.
pub fn extract_scalar(values: &[mson::Value], kind: ScalarKind) -> Result<Scalar, ConvertError> {
    match values {
        [] => Err(ConvertError::EmptyValueSet),
        [value] => Ok(literal_to_scalar(&value.literal, kind)),
        _ => Err(ConvertError::TooManyValues {
            count: values.len(),
        }),
    }
}

/// Builds a leaf element from literal text.
pub type LeafFactory = fn(&str) -> Element;

fn boolean_leaf(literal: &str) -> Element {
    literal_to_scalar(literal, ScalarKind::Boolean).into_element()
}

fn number_leaf(literal: &str) -> Element {
    literal_to_scalar(literal, ScalarKind::Number).into_element()
}

fn string_leaf(literal: &str) -> Element {
    literal_to_scalar(literal, ScalarKind::String).into_element()
}

/// Leaf factory for a nested base type. Named (undefined base) types fall
/// back to strings.
pub fn leaf_factory(base: BaseTypeName) -> Result<LeafFactory, ConvertError> {
    match base {
        BaseTypeName::Boolean => Ok(boolean_leaf),
        BaseTypeName::Number => Ok(number_leaf),
        BaseTypeName::String | BaseTypeName::Undefined => Ok(string_leaf),
        BaseTypeName::Array | BaseTypeName::Enum | BaseTypeName::Object => {
            Err(ConvertError::UnsupportedNestedType {
                base: base.as_str(),
            })
        }
    }
}

/// One leaf per literal, typed by the single declared nested type or as
/// strings when zero or several nested types are declared.
pub fn extract_children(
    values: &[mson::Value],
    nested_types: &[TypeName],
) -> Result<Vec<Element>, ConvertError> {
    if values.is_empty() {
        return Err(ConvertError::EmptyValueSet);
    }
    let factory = match nested_types {
        [single] => leaf_factory(single.base)?,
        _ => string_leaf as LeafFactory,
    };
    Ok(values.iter().map(|v| factory(&v.literal)).collect())
}

/// Extract the values of a value definition for `target`.
pub fn extract_values(vd: &ValueDefinition, target: Target) -> Result<Extracted, ConvertError> {
    match target {
        Target::Scalar(kind) => extract_scalar(&vd.values, kind).map(Extracted::Scalar),
        Target::Composite(_) => extract_children(
            &vd.values,
            &vd.type_definition.type_specification.nested_types,
        )
        .map(Extracted::Children),
    }
}

// ──────────────────────────────────────────────
// Type sections
// ──────────────────────────────────────────────

/// Extract a type section's content for `target`: the raw value text for
/// scalars, the converted nested elements for composites.
pub fn extract_from_section(
    section: &TypeSection,
    target: Target,
) -> Result<Extracted, ConvertError> {
    match target {
        Target::Scalar(kind) => Ok(Extracted::Scalar(literal_to_scalar(
            &section.content.value,
            kind,
        ))),
        Target::Composite(_) => {
            if section.content.elements.is_empty() {
                return Err(ConvertError::EmptyValueSet);
            }
            convert::convert_elements(&section.content.elements).map(Extracted::Children)
        }
    }
}
