//! API description AST: blueprint, resource groups, resources, actions and
//! payloads. Attribute sections are MSON data structures.

use serde::{Deserialize, Serialize};

use crate::mson::DataStructure;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyValue {
    pub name: String,
    pub value: String,
}

pub type Metadata = KeyValue;
pub type Header = KeyValue;

/// Reference to a model payload defined elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reference {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Payload {
    pub name: String,
    pub description: String,
    pub reference: Reference,
    pub headers: Vec<Header>,
    pub body: String,
    pub schema: String,
    pub attributes: Option<DataStructure>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterUse {
    #[default]
    Undefined,
    Optional,
    Required,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(rename = "use")]
    pub usage: ParameterUse,
    pub default_value: String,
    pub example_value: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionExample {
    pub name: String,
    pub description: String,
    pub requests: Vec<Payload>,
    pub responses: Vec<Payload>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Action {
    pub name: String,
    pub description: String,
    pub method: String,
    pub relation: String,
    pub uri_template: String,
    pub parameters: Vec<Parameter>,
    pub attributes: Option<DataStructure>,
    pub examples: Vec<TransactionExample>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Resource {
    pub name: String,
    pub description: String,
    pub uri_template: String,
    pub model: Payload,
    pub parameters: Vec<Parameter>,
    pub actions: Vec<Action>,
    pub attributes: Option<DataStructure>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryKind {
    #[default]
    Undefined,
    ResourceGroup,
    DataStructureGroup,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub kind: CategoryKind,
    pub name: String,
    pub elements: Vec<BlueprintElement>,
}

/// One entry of blueprint or category content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "element", content = "content", rename_all = "camelCase")]
pub enum BlueprintElement {
    Category(Category),
    Copy(String),
    Resource(Resource),
    DataStructure(DataStructure),
}

impl BlueprintElement {
    pub fn class_name(&self) -> &'static str {
        match self {
            BlueprintElement::Category(_) => "category",
            BlueprintElement::Copy(_) => "copy",
            BlueprintElement::Resource(_) => "resource",
            BlueprintElement::DataStructure(_) => "dataStructure",
        }
    }

    pub fn is_resource_group(&self) -> bool {
        matches!(
            self,
            BlueprintElement::Category(Category {
                kind: CategoryKind::ResourceGroup,
                ..
            })
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Blueprint {
    pub name: String,
    pub description: String,
    pub metadata: Vec<Metadata>,
    pub content: Vec<BlueprintElement>,
}
