//! MSON AST types consumed by the converter.
//!
//! The AST arrives fully formed from the API-description parser; these
//! types only mirror its shape. They deserialize from JSON so that the AST
//! can be handed over as a document.

use serde::{Deserialize, Serialize};

/// Raw literal text as written in the description.
pub type Literal = String;

// ──────────────────────────────────────────────
// Values and type names
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Value {
    pub literal: Literal,
    pub variable: bool,
}

impl Value {
    pub fn new(literal: impl Into<Literal>) -> Self {
        Value {
            literal: literal.into(),
            variable: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Symbol {
    pub literal: Literal,
    pub variable: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BaseTypeName {
    #[default]
    Undefined,
    Boolean,
    String,
    Number,
    Array,
    Enum,
    Object,
}

impl BaseTypeName {
    pub fn as_str(self) -> &'static str {
        match self {
            BaseTypeName::Undefined => "undefined",
            BaseTypeName::Boolean => "boolean",
            BaseTypeName::String => "string",
            BaseTypeName::Number => "number",
            BaseTypeName::Array => "array",
            BaseTypeName::Enum => "enum",
            BaseTypeName::Object => "object",
        }
    }
}

/// Either a base type or a named (symbol) type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeName {
    pub base: BaseTypeName,
    pub symbol: Symbol,
}

impl TypeName {
    pub fn base(base: BaseTypeName) -> Self {
        TypeName {
            base,
            symbol: Symbol::default(),
        }
    }

    pub fn symbol(literal: impl Into<Literal>) -> Self {
        TypeName {
            base: BaseTypeName::Undefined,
            symbol: Symbol {
                literal: literal.into(),
                variable: false,
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.base == BaseTypeName::Undefined && self.symbol.literal.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypeSpecification {
    pub name: TypeName,
    pub nested_types: Vec<TypeName>,
}

/// Type attribute markers, e.g. `(required, fixed)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeAttributes {
    pub required: bool,
    pub optional: bool,
    pub default: bool,
    pub sample: bool,
    pub fixed: bool,
}

impl TypeAttributes {
    /// The single recorded attribute, picked by priority
    /// required > optional > default > sample > fixed.
    pub fn primary(&self) -> Option<&'static str> {
        if self.required {
            Some("required")
        } else if self.optional {
            Some("optional")
        } else if self.default {
            Some("default")
        } else if self.sample {
            Some("sample")
        } else if self.fixed {
            Some("fixed")
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypeDefinition {
    pub type_specification: TypeSpecification,
    pub attributes: TypeAttributes,
}

impl TypeDefinition {
    pub fn base(&self) -> BaseTypeName {
        self.type_specification.name.base
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValueDefinition {
    pub values: Vec<Value>,
    pub type_definition: TypeDefinition,
}

impl ValueDefinition {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.type_definition == TypeDefinition::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyName {
    pub literal: Literal,
    pub variable: ValueDefinition,
}

// ──────────────────────────────────────────────
// Sections and members
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeSectionClass {
    #[default]
    BlockDescription,
    MemberType,
    Sample,
    Default,
}

impl TypeSectionClass {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeSectionClass::BlockDescription => "blockDescription",
            TypeSectionClass::MemberType => "memberType",
            TypeSectionClass::Sample => "sample",
            TypeSectionClass::Default => "default",
        }
    }
}

/// Section content: markdown description, a raw literal value, or nested
/// MSON elements. Only one of the three is expected to be populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeSectionContent {
    pub description: String,
    pub value: Literal,
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeSection {
    pub class: TypeSectionClass,
    pub content: TypeSectionContent,
}

impl TypeSection {
    pub fn value(class: TypeSectionClass, value: impl Into<Literal>) -> Self {
        TypeSection {
            class,
            content: TypeSectionContent {
                value: value.into(),
                ..TypeSectionContent::default()
            },
        }
    }

    pub fn elements(class: TypeSectionClass, elements: Vec<Element>) -> Self {
        TypeSection {
            class,
            content: TypeSectionContent {
                elements,
                ..TypeSectionContent::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValueMember {
    pub description: String,
    pub value_definition: ValueDefinition,
    pub sections: Vec<TypeSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PropertyMember {
    pub name: PropertyName,
    pub description: String,
    pub value_definition: ValueDefinition,
    pub sections: Vec<TypeSection>,
}

impl PropertyMember {
    /// The value part of the property, shared with value members.
    pub fn as_value(&self) -> ValueMemberRef<'_> {
        ValueMemberRef {
            description: &self.description,
            value_definition: &self.value_definition,
            sections: &self.sections,
        }
    }
}

impl ValueMember {
    pub fn as_value(&self) -> ValueMemberRef<'_> {
        ValueMemberRef {
            description: &self.description,
            value_definition: &self.value_definition,
            sections: &self.sections,
        }
    }
}

/// Borrowed view over the fields property and value members share.
#[derive(Debug, Clone, Copy)]
pub struct ValueMemberRef<'a> {
    pub description: &'a str,
    pub value_definition: &'a ValueDefinition,
    pub sections: &'a [TypeSection],
}

pub type Mixin = TypeDefinition;

/// An MSON element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", content = "content", rename_all = "camelCase")]
pub enum Element {
    Property(PropertyMember),
    Value(ValueMember),
    Mixin(Mixin),
    OneOf(Vec<Element>),
    Group(Vec<Element>),
}

impl Element {
    pub fn class_name(&self) -> &'static str {
        match self {
            Element::Property(_) => "property",
            Element::Value(_) => "value",
            Element::Mixin(_) => "mixin",
            Element::OneOf(_) => "oneOf",
            Element::Group(_) => "group",
        }
    }
}

/// A named MSON type with its sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NamedType {
    pub name: TypeName,
    pub type_definition: TypeDefinition,
    pub sections: Vec<TypeSection>,
}

/// A data structure as found in attributes sections and the data structures
/// section of a blueprint.
pub type DataStructure = NamedType;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_attribute_follows_priority() {
        let all = TypeAttributes {
            required: true,
            optional: true,
            default: true,
            sample: true,
            fixed: true,
        };
        assert_eq!(all.primary(), Some("required"));

        let no_required = TypeAttributes {
            required: false,
            ..all
        };
        assert_eq!(no_required.primary(), Some("optional"));

        let fixed_only = TypeAttributes {
            fixed: true,
            ..TypeAttributes::default()
        };
        assert_eq!(fixed_only.primary(), Some("fixed"));
        assert_eq!(TypeAttributes::default().primary(), None);
    }

    #[test]
    fn deserializes_property_from_json() {
        let json = serde_json::json!({
            "class": "property",
            "content": {
                "name": { "literal": "count" },
                "valueDefinition": {
                    "values": [{ "literal": "5" }],
                    "typeDefinition": {
                        "typeSpecification": { "name": { "base": "number" } },
                        "attributes": { "required": true }
                    }
                }
            }
        });
        let element: Element = serde_json::from_value(json).unwrap();
        let Element::Property(p) = element else {
            panic!("expected property");
        };
        assert_eq!(p.name.literal, "count");
        assert_eq!(p.value_definition.values, vec![Value::new("5")]);
        assert_eq!(p.value_definition.type_definition.base(), BaseTypeName::Number);
        assert!(p.value_definition.type_definition.attributes.required);
        assert!(p.sections.is_empty());
    }

    #[test]
    fn deserializes_nested_one_of() {
        let json = serde_json::json!({
            "class": "oneOf",
            "content": [
                { "class": "property", "content": { "name": { "literal": "a" } } },
                { "class": "group", "content": [] }
            ]
        });
        let element: Element = serde_json::from_value(json).unwrap();
        match element {
            Element::OneOf(alternatives) => {
                assert_eq!(alternatives.len(), 2);
                assert_eq!(alternatives[1].class_name(), "group");
            }
            other => panic!("expected oneOf, got {}", other.class_name()),
        }
    }
}
