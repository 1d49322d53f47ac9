//! MSON to Refract conversion.
//!
//! Each MSON element becomes zero or more Refract elements: properties and
//! values map to typed elements named after their key, mixins to compact
//! references, one-of groups to selects, and plain groups are spliced into
//! the surrounding sequence.

use log::debug;

use crate::element::{Body, Element, ElementKind};
use crate::error::ConvertError;
use crate::extract::{self, Extracted, Scalar, Target};
use crate::mson::{
    self, BaseTypeName, DataStructure, Mixin, PropertyMember, PropertyName, TypeAttributes,
    TypeSectionClass, ValueMember, ValueMemberRef,
};

/// Convert a sequence of MSON elements, splicing groups in place.
pub fn convert_elements(elements: &[mson::Element]) -> Result<Vec<Element>, ConvertError> {
    let mut out = Vec::with_capacity(elements.len());
    for element in elements {
        push_converted(&mut out, element)?;
    }
    Ok(out)
}

/// Convert a single MSON element. Groups yield their children, every other
/// class yields exactly one element.
pub fn convert_element(element: &mson::Element) -> Result<Vec<Element>, ConvertError> {
    let mut out = Vec::new();
    push_converted(&mut out, element)?;
    Ok(out)
}

fn push_converted(out: &mut Vec<Element>, element: &mson::Element) -> Result<(), ConvertError> {
    debug!(class = element.class_name(); "converting MSON element");
    match element {
        mson::Element::Property(property) => out.push(property_to_refract(property)?),
        mson::Element::Value(value) => out.push(value_to_refract(value)?),
        mson::Element::Mixin(mixin) => out.push(mixin_to_refract(mixin)),
        mson::Element::OneOf(alternatives) => out.push(one_of_to_refract(alternatives)?),
        mson::Element::Group(children) => {
            for child in children {
                push_converted(out, child)?;
            }
        }
    }
    Ok(())
}

// ──────────────────────────────────────────────
// Members
// ──────────────────────────────────────────────

/// Convert a property member. The result carries the property's key as
/// meta `name`.
pub fn property_to_refract(property: &PropertyMember) -> Result<Element, ConvertError> {
    let value = property.as_value();
    let mut element = match property.value_definition.type_definition.base() {
        BaseTypeName::Boolean => element_from_value(ElementKind::Boolean, value)?,
        BaseTypeName::Number => element_from_value(ElementKind::Number, value)?,
        BaseTypeName::String => element_from_value(ElementKind::String, value)?,
        BaseTypeName::Array => element_from_value(ElementKind::Array, value)?,
        BaseTypeName::Object => element_from_value(ElementKind::Object, value)?,
        BaseTypeName::Enum => array_to_enum(element_from_value(ElementKind::Array, value)?),
        BaseTypeName::Undefined if has_children(value) => {
            element_from_value(ElementKind::Object, value)?
        }
        BaseTypeName::Undefined => element_from_value(ElementKind::String, value)?,
    };

    let (name, variable) = property_key(&property.name);
    element
        .meta
        .shift_insert(0, "name".to_owned(), Element::string(name));
    if variable {
        element.set_attribute("variable", Element::boolean(true));
    }
    Ok(element)
}

/// Convert a value member. Only primitive values are supported.
pub fn value_to_refract(value: &ValueMember) -> Result<Element, ConvertError> {
    let kind = match value.value_definition.type_definition.base() {
        BaseTypeName::Boolean => ElementKind::Boolean,
        BaseTypeName::Number => ElementKind::Number,
        BaseTypeName::String | BaseTypeName::Undefined => ElementKind::String,
        base @ (BaseTypeName::Array | BaseTypeName::Enum | BaseTypeName::Object) => {
            return Err(ConvertError::UnhandledValueType {
                base: base.as_str(),
            })
        }
    };
    element_from_value(kind, value.as_value())
}

/// A mixin becomes a compact `ref` pointing at the mixed-in type.
pub fn mixin_to_refract(mixin: &Mixin) -> Element {
    let path = Element::string("content").with_meta("name", Element::string("path"));
    let href = Element::string(mixin.type_specification.name.symbol.literal.clone())
        .with_meta("name", Element::string("href"));
    Element::reference(vec![path, href])
        .with_element("ref")
        .with_compact()
}

/// A one-of becomes a select with one option per alternative, in order.
pub fn one_of_to_refract(alternatives: &[mson::Element]) -> Result<Element, ConvertError> {
    let options = alternatives
        .iter()
        .map(|alternative| convert_element(alternative).map(Element::option))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Element::select(options))
}

/// Convert a named data structure into an object element.
pub fn data_structure_to_refract(ds: &DataStructure) -> Result<Element, ConvertError> {
    let mut object = Element::object(Vec::new());

    let base = &ds.type_definition.type_specification.name.symbol.literal;
    if !base.is_empty() {
        object.element = Some(base.clone());
    }
    object.set_meta("id", Element::string(ds.name.symbol.literal.clone()));
    object.set_meta("title", Element::string(ds.name.symbol.literal.clone()));

    for section in &ds.sections {
        if section.class == TypeSectionClass::BlockDescription {
            object.set_meta("description", Element::string(section.content.description.clone()));
            continue;
        }
        let converted = convert_elements(&section.content.elements)?;
        if let Some(children) = object.children_mut() {
            children.extend(converted);
        }
    }
    Ok(object)
}

// ──────────────────────────────────────────────
// Decoration
// ──────────────────────────────────────────────

fn element_from_value(kind: ElementKind, value: ValueMemberRef<'_>) -> Result<Element, ConvertError> {
    let target = Target::of(kind).ok_or(ConvertError::ContentMismatch {
        content: "literal",
        target: kind,
    })?;
    let vd = value.value_definition;
    let mut element = Element::empty(kind);

    if !vd.values.is_empty() {
        set_content(&mut element, extract::extract_values(vd, target)?)?;
    }

    if let Some(attrs) = type_attributes_element(&vd.type_definition.attributes) {
        element.set_attribute("typeAttributes", attrs);
    }

    if !value.description.is_empty() {
        element.set_meta("description", Element::string(value.description));
    }

    let mut defaults = Vec::new();
    let mut samples = Vec::new();

    for section in value.sections {
        match section.class {
            TypeSectionClass::MemberType => {
                if !element.is_empty() {
                    return Err(ConvertError::ContentAlreadySet);
                }
                set_content(&mut element, extract::extract_from_section(section, target)?)?;
            }
            TypeSectionClass::Default | TypeSectionClass::Sample => {
                let mut e = Element::empty(kind);
                set_content(&mut e, extract::extract_from_section(section, target)?)?;
                if section.class == TypeSectionClass::Default {
                    defaults.push(e);
                } else {
                    samples.push(e);
                }
            }
            TypeSectionClass::BlockDescription => {
                append_description(&mut element, &section.content.description);
            }
        }
    }

    if let Some(sample) = simplify(samples) {
        element.set_attribute("sample", sample);
    }
    if let Some(default) = simplify(defaults) {
        element.set_attribute("default", default);
    }

    Ok(element)
}

/// Set extracted content on an element whose content is still empty or
/// about to be replaced by a type section.
fn set_content(element: &mut Element, content: Extracted) -> Result<(), ConvertError> {
    let target = element.kind();
    match (&mut element.body, content) {
        (Body::Boolean(slot), Extracted::Scalar(Scalar::Boolean(b))) => *slot = Some(b),
        (Body::Number(slot), Extracted::Scalar(Scalar::Number(n))) => *slot = Some(n),
        (Body::String(slot), Extracted::Scalar(Scalar::String(s))) => *slot = Some(s),
        (Body::Array(slot) | Body::Object(slot), Extracted::Children(children)) => {
            *slot = Some(children)
        }
        (_, content) => {
            return Err(ConvertError::ContentMismatch {
                content: content.describe(),
                target,
            })
        }
    }
    Ok(())
}

/// The single highest-priority type attribute as a one-entry array.
fn type_attributes_element(attributes: &TypeAttributes) -> Option<Element> {
    attributes
        .primary()
        .map(|name| Element::array(vec![Element::string(name)]))
}

fn append_description(element: &mut Element, text: &str) {
    if text.is_empty() {
        return;
    }
    let description = match element.meta("description").and_then(Element::as_str) {
        Some(existing) if !existing.is_empty() => format!("{existing}\n\n{text}"),
        _ => text.to_owned(),
    };
    element.set_meta("description", Element::string(description));
}

/// A single element as-is, several wrapped in an array, none as nothing.
fn simplify(mut elements: Vec<Element>) -> Option<Element> {
    match elements.len() {
        0 => None,
        1 => elements.pop(),
        _ => Some(Element::array(elements)),
    }
}

fn has_children(value: ValueMemberRef<'_>) -> bool {
    value.value_definition.values.len() > 1
        || value
            .sections
            .iter()
            .any(|s| s.class == TypeSectionClass::MemberType)
}

/// Wrap the candidates array of an enum property in an `enum` object. The
/// wrapper is the property itself: it takes over the description and every
/// attribute, leaving the inner array with the candidates only.
fn array_to_enum(mut array: Element) -> Element {
    array.element = Some("enum".to_owned());
    let attributes = std::mem::take(&mut array.attributes);
    let description = array.meta.shift_remove("description");
    let mut wrapper = Element::object(Vec::new()).with_element("enum");
    wrapper.attributes = attributes;
    if let Some(description) = description {
        wrapper.set_meta("description", description);
    }
    if let Some(children) = wrapper.children_mut() {
        children.push(array);
    }
    wrapper
}

/// Property key text and whether it is a variable (non-literal) key.
fn property_key(name: &PropertyName) -> (String, bool) {
    if name.literal.is_empty() {
        if let Some(first) = name.variable.values.first() {
            return (first.literal.clone(), true);
        }
    }
    (name.literal.clone(), false)
}
