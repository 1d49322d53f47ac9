//! Legacy AST document tree.
//!
//! Every AST node has a `wrap_*` function producing its JSON shape. The
//! blueprint root carries `_version` ([`AST_SERIALIZATION_VERSION`]). Data
//! structures are emitted as serialized Refract, which is why the wrappers
//! that reach one return a [`ConvertError`].

use serde_json::{json, Map, Value};

use crate::blueprint::{
    Action, Blueprint, BlueprintElement, Category, KeyValue, Parameter, ParameterUse, Payload,
    Reference, Resource, TransactionExample,
};
use crate::convert::data_structure_to_refract;
use crate::error::ConvertError;
use crate::mson::{
    self, BaseTypeName, DataStructure, Mixin, NamedType, PropertyMember, PropertyName, Symbol,
    TypeAttributes, TypeDefinition, TypeName, TypeSection, TypeSpecification, ValueDefinition,
    ValueMember,
};
use crate::serialize::serialize;
use crate::AST_SERIALIZATION_VERSION;

fn wrap_all<T>(items: &[T], wrap: impl Fn(&T) -> Value) -> Value {
    Value::Array(items.iter().map(wrap).collect())
}

fn try_wrap_all<T>(
    items: &[T],
    wrap: impl Fn(&T) -> Result<Value, ConvertError>,
) -> Result<Value, ConvertError> {
    items
        .iter()
        .map(wrap)
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

// ──────────────────────────────────────────────
// MSON
// ──────────────────────────────────────────────

pub fn wrap_value(value: &mson::Value) -> Value {
    json!({ "literal": value.literal, "variable": value.variable })
}

pub fn wrap_symbol(symbol: &Symbol) -> Value {
    json!({ "literal": symbol.literal, "variable": symbol.variable })
}

/// `null` when empty, the base name for primitive types, the symbol for
/// named types.
pub fn wrap_type_name(name: &TypeName) -> Value {
    if name.is_empty() {
        return Value::Null;
    }
    match name.base {
        BaseTypeName::Undefined => wrap_symbol(&name.symbol),
        base => json!(base.as_str()),
    }
}

pub fn wrap_type_specification(spec: &TypeSpecification) -> Value {
    json!({
        "name": wrap_type_name(&spec.name),
        "nestedTypes": wrap_all(&spec.nested_types, wrap_type_name),
    })
}

/// Only the highest-priority attribute is written.
pub fn wrap_type_attributes(attributes: &TypeAttributes) -> Value {
    Value::Array(attributes.primary().map(|a| json!(a)).into_iter().collect())
}

pub fn wrap_type_definition(definition: &TypeDefinition) -> Value {
    json!({
        "typeSpecification": wrap_type_specification(&definition.type_specification),
        "attributes": wrap_type_attributes(&definition.attributes),
    })
}

pub fn wrap_value_definition(definition: &ValueDefinition) -> Value {
    json!({
        "values": wrap_all(&definition.values, wrap_value),
        "typeDefinition": wrap_type_definition(&definition.type_definition),
    })
}

pub fn wrap_property_name(name: &PropertyName) -> Value {
    let mut out = Map::new();
    if !name.literal.is_empty() {
        out.insert("literal".to_owned(), json!(name.literal));
    } else if !name.variable.is_empty() {
        out.insert("variable".to_owned(), wrap_value_definition(&name.variable));
    }
    Value::Object(out)
}

/// Content is the first non-empty of description, value and elements.
pub fn wrap_type_section(section: &TypeSection) -> Value {
    let mut out = Map::new();
    out.insert("class".to_owned(), json!(section.class.as_str()));
    let content = &section.content;
    if !content.description.is_empty() {
        out.insert("content".to_owned(), json!(content.description));
    } else if !content.value.is_empty() {
        out.insert("content".to_owned(), json!(content.value));
    } else if !content.elements.is_empty() {
        out.insert(
            "content".to_owned(),
            wrap_all(&content.elements, wrap_mson_element),
        );
    }
    Value::Object(out)
}

pub fn wrap_property_member(member: &PropertyMember) -> Value {
    json!({
        "name": wrap_property_name(&member.name),
        "description": member.description,
        "valueDefinition": wrap_value_definition(&member.value_definition),
        "sections": wrap_all(&member.sections, wrap_type_section),
    })
}

pub fn wrap_value_member(member: &ValueMember) -> Value {
    json!({
        "description": member.description,
        "valueDefinition": wrap_value_definition(&member.value_definition),
        "sections": wrap_all(&member.sections, wrap_type_section),
    })
}

pub fn wrap_mixin(mixin: &Mixin) -> Value {
    wrap_type_definition(mixin)
}

pub fn wrap_mson_element(element: &mson::Element) -> Value {
    let content = match element {
        mson::Element::Property(property) => wrap_property_member(property),
        mson::Element::Value(value) => wrap_value_member(value),
        mson::Element::Mixin(mixin) => wrap_mixin(mixin),
        mson::Element::OneOf(elements) | mson::Element::Group(elements) => {
            wrap_all(elements, wrap_mson_element)
        }
    };
    json!({ "class": element.class_name(), "content": content })
}

pub fn wrap_named_type(named: &NamedType) -> Value {
    json!({
        "name": wrap_type_name(&named.name),
        "typeDefinition": wrap_type_definition(&named.type_definition),
        "sections": wrap_all(&named.sections, wrap_type_section),
    })
}

// ──────────────────────────────────────────────
// Blueprint
// ──────────────────────────────────────────────

pub fn wrap_key_value(pair: &KeyValue) -> Value {
    json!({ "name": pair.name, "value": pair.value })
}

pub fn wrap_reference(reference: &Reference) -> Value {
    json!({ "id": reference.id })
}

/// A data structure as serialized Refract.
pub fn wrap_data_structure(ds: &DataStructure) -> Result<Value, ConvertError> {
    data_structure_to_refract(ds).map(|e| serialize(&e))
}

pub fn wrap_asset(asset: &str, role: &str) -> Value {
    json!({
        "element": "asset",
        "attributes": { "role": role },
        "content": asset,
    })
}

pub fn wrap_payload(payload: &Payload) -> Result<Value, ConvertError> {
    let mut out = Map::new();
    if !payload.reference.id.is_empty() {
        out.insert("reference".to_owned(), wrap_reference(&payload.reference));
    }
    out.insert("name".to_owned(), json!(payload.name));
    out.insert("description".to_owned(), json!(payload.description));
    out.insert("headers".to_owned(), wrap_all(&payload.headers, wrap_key_value));
    out.insert("body".to_owned(), json!(payload.body));
    out.insert("schema".to_owned(), json!(payload.schema));

    let mut content = Vec::new();
    if let Some(attributes) = &payload.attributes {
        content.push(wrap_data_structure(attributes)?);
    }
    if !payload.body.is_empty() {
        content.push(wrap_asset(&payload.body, "bodyExample"));
    }
    if !payload.schema.is_empty() {
        content.push(wrap_asset(&payload.schema, "bodySchema"));
    }
    out.insert("content".to_owned(), Value::Array(content));
    Ok(Value::Object(out))
}

pub fn wrap_parameter(parameter: &Parameter) -> Value {
    json!({
        "name": parameter.name,
        "description": parameter.description,
        "type": parameter.type_name,
        "required": parameter.usage != ParameterUse::Optional,
        "default": parameter.default_value,
        "example": parameter.example_value,
        "values": parameter.values.iter().map(|v| json!({ "value": v })).collect::<Vec<_>>(),
    })
}

pub fn wrap_transaction_example(example: &TransactionExample) -> Result<Value, ConvertError> {
    Ok(json!({
        "name": example.name,
        "description": example.description,
        "requests": try_wrap_all(&example.requests, wrap_payload)?,
        "responses": try_wrap_all(&example.responses, wrap_payload)?,
    }))
}

fn attributes_content(attributes: Option<&DataStructure>) -> Result<Value, ConvertError> {
    let content = attributes.map(wrap_data_structure).transpose()?;
    Ok(Value::Array(content.into_iter().collect()))
}

pub fn wrap_action(action: &Action) -> Result<Value, ConvertError> {
    Ok(json!({
        "name": action.name,
        "description": action.description,
        "method": action.method,
        "parameters": wrap_all(&action.parameters, wrap_parameter),
        "attributes": {
            "relation": action.relation,
            "uriTemplate": action.uri_template,
        },
        "content": attributes_content(action.attributes.as_ref())?,
        "examples": try_wrap_all(&action.examples, wrap_transaction_example)?,
    }))
}

/// A resource without a model name writes an empty `model` object.
pub fn wrap_resource(resource: &Resource) -> Result<Value, ConvertError> {
    let model = if resource.model.name.is_empty() {
        json!({})
    } else {
        wrap_payload(&resource.model)?
    };
    Ok(json!({
        "element": "resource",
        "name": resource.name,
        "description": resource.description,
        "uriTemplate": resource.uri_template,
        "model": model,
        "parameters": wrap_all(&resource.parameters, wrap_parameter),
        "actions": try_wrap_all(&resource.actions, wrap_action)?,
        "content": attributes_content(resource.attributes.as_ref())?,
    }))
}

/// Resource group summary: its resources, and its copy blocks joined into
/// one description.
pub fn wrap_resource_group(group: &Category) -> Result<Value, ConvertError> {
    let mut description = String::new();
    let mut resources = Vec::new();
    for element in &group.elements {
        match element {
            BlueprintElement::Resource(resource) => resources.push(wrap_resource(resource)?),
            BlueprintElement::Copy(copy) => {
                if !description.is_empty() {
                    description.push_str("\n\n");
                }
                description.push_str(copy);
            }
            _ => {}
        }
    }
    Ok(json!({
        "name": group.name,
        "description": description,
        "resources": resources,
    }))
}

pub fn wrap_element(element: &BlueprintElement) -> Result<Value, ConvertError> {
    match element {
        BlueprintElement::DataStructure(ds) => wrap_data_structure(ds),
        BlueprintElement::Resource(resource) => wrap_resource(resource),
        BlueprintElement::Copy(copy) => Ok(json!({ "element": "copy", "content": copy })),
        BlueprintElement::Category(category) => {
            let mut out = Map::new();
            out.insert("element".to_owned(), json!("category"));
            if !category.name.is_empty() {
                out.insert("attributes".to_owned(), json!({ "name": category.name }));
            }
            out.insert(
                "content".to_owned(),
                try_wrap_all(&category.elements, wrap_element)?,
            );
            Ok(Value::Object(out))
        }
    }
}

pub fn wrap_blueprint(blueprint: &Blueprint) -> Result<Value, ConvertError> {
    let resource_groups = blueprint
        .content
        .iter()
        .filter_map(|element| match element {
            BlueprintElement::Category(group) if element.is_resource_group() => {
                Some(wrap_resource_group(group))
            }
            _ => None,
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(json!({
        "_version": AST_SERIALIZATION_VERSION,
        "metadata": wrap_all(&blueprint.metadata, wrap_key_value),
        "name": blueprint.name,
        "description": blueprint.description,
        "element": "category",
        "resourceGroups": resource_groups,
        "content": try_wrap_all(&blueprint.content, wrap_element)?,
    }))
}
