//! Refract element tree.
//!
//! Every node is an [`Element`]: an optional semantic name, ordered `meta`
//! and `attributes` maps, and a [`Body`] that fixes the variant and holds
//! the content. The variant set is closed; consumers dispatch through
//! [`Visitor`] so that adding a variant breaks every dispatch site at
//! compile time.

use indexmap::IndexMap;

/// Ordered `meta` / `attributes` mapping. Keys are unique, insertion order
/// is kept for serialization.
pub type InfoMap = IndexMap<String, Element>;

// ──────────────────────────────────────────────
// Kinds
// ──────────────────────────────────────────────

/// Runtime variant tag of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Null,
    Boolean,
    Number,
    String,
    Enum,
    Array,
    Object,
    Member,
    Ref,
    Select,
    Extend,
}

impl ElementKind {
    pub const ALL: [ElementKind; 11] = [
        ElementKind::Null,
        ElementKind::Boolean,
        ElementKind::Number,
        ElementKind::String,
        ElementKind::Enum,
        ElementKind::Array,
        ElementKind::Object,
        ElementKind::Member,
        ElementKind::Ref,
        ElementKind::Select,
        ElementKind::Extend,
    ];

    /// Base element name as used in serialized Refract.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Null => "null",
            ElementKind::Boolean => "boolean",
            ElementKind::Number => "number",
            ElementKind::String => "string",
            ElementKind::Enum => "enum",
            ElementKind::Array => "array",
            ElementKind::Object => "object",
            ElementKind::Member => "member",
            ElementKind::Ref => "ref",
            ElementKind::Select => "select",
            ElementKind::Extend => "extend",
        }
    }

    pub fn from_name(name: &str) -> Option<ElementKind> {
        ElementKind::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ──────────────────────────────────────────────
// Element
// ──────────────────────────────────────────────

/// Variant and content of an element. `None` content means "empty", which
/// is distinct from an explicit `false`, `0` or `""`.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Null,
    Boolean(Option<bool>),
    Number(Option<f64>),
    String(Option<String>),
    Enum(Option<Box<Element>>),
    Array(Option<Vec<Element>>),
    Object(Option<Vec<Element>>),
    Member(Box<Element>, Option<Box<Element>>),
    Ref(Option<Vec<Element>>),
    Select(Option<Vec<Element>>),
    Extend(Option<Vec<Element>>),
}

impl Body {
    pub fn is_empty(&self) -> bool {
        match self {
            Body::Null => true,
            Body::Boolean(v) => v.is_none(),
            Body::Number(v) => v.is_none(),
            Body::String(v) => v.is_none(),
            Body::Enum(v) => v.is_none(),
            Body::Array(v)
            | Body::Object(v)
            | Body::Ref(v)
            | Body::Select(v)
            | Body::Extend(v) => v.is_none(),
            Body::Member(..) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Semantic name specializing the base shape (`"enum"`, `"ref"`,
    /// `"option"`, a named type, ...).
    pub element: Option<String>,
    pub meta: InfoMap,
    pub attributes: InfoMap,
    /// Serialize content as a `name -> value` object instead of a list.
    pub compact: bool,
    pub body: Body,
}

impl Element {
    pub fn new(body: Body) -> Self {
        Element {
            element: None,
            meta: InfoMap::new(),
            attributes: InfoMap::new(),
            compact: false,
            body,
        }
    }

    /// An element of `kind` with no content.
    pub fn empty(kind: ElementKind) -> Self {
        let body = match kind {
            ElementKind::Null => Body::Null,
            ElementKind::Boolean => Body::Boolean(None),
            ElementKind::Number => Body::Number(None),
            ElementKind::String => Body::String(None),
            ElementKind::Enum => Body::Enum(None),
            ElementKind::Array => Body::Array(None),
            ElementKind::Object => Body::Object(None),
            ElementKind::Member => Body::Member(Box::new(Element::empty(ElementKind::String)), None),
            ElementKind::Ref => Body::Ref(None),
            ElementKind::Select => Body::Select(None),
            ElementKind::Extend => Body::Extend(None),
        };
        Element::new(body)
    }

    pub fn null() -> Self {
        Element::new(Body::Null)
    }

    pub fn boolean(value: bool) -> Self {
        Element::new(Body::Boolean(Some(value)))
    }

    pub fn number(value: f64) -> Self {
        Element::new(Body::Number(Some(value)))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Element::new(Body::String(Some(value.into())))
    }

    pub fn enumeration(value: Option<Element>) -> Self {
        Element::new(Body::Enum(value.map(Box::new)))
    }

    pub fn array(items: Vec<Element>) -> Self {
        Element::new(Body::Array(Some(items)))
    }

    pub fn object(items: Vec<Element>) -> Self {
        Element::new(Body::Object(Some(items)))
    }

    pub fn member(key: Element, value: Option<Element>) -> Self {
        Element::new(Body::Member(Box::new(key), value.map(Box::new)))
    }

    pub fn reference(children: Vec<Element>) -> Self {
        Element::new(Body::Ref(Some(children)))
    }

    pub fn select(options: Vec<Element>) -> Self {
        Element::new(Body::Select(Some(options)))
    }

    /// One alternative of a [`Body::Select`]: an object tagged `option`.
    pub fn option(items: Vec<Element>) -> Self {
        Element::object(items).with_element("option")
    }

    pub fn extend(overlays: Vec<Element>) -> Self {
        Element::new(Body::Extend(Some(overlays)))
    }

    pub fn with_element(mut self, name: impl Into<String>) -> Self {
        self.element = Some(name.into());
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: Element) -> Self {
        self.set_meta(key, value);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Element) -> Self {
        self.set_attribute(key, value);
        self
    }

    pub fn with_compact(mut self) -> Self {
        self.compact = true;
        self
    }

    pub fn kind(&self) -> ElementKind {
        match self.body {
            Body::Null => ElementKind::Null,
            Body::Boolean(_) => ElementKind::Boolean,
            Body::Number(_) => ElementKind::Number,
            Body::String(_) => ElementKind::String,
            Body::Enum(_) => ElementKind::Enum,
            Body::Array(_) => ElementKind::Array,
            Body::Object(_) => ElementKind::Object,
            Body::Member(..) => ElementKind::Member,
            Body::Ref(_) => ElementKind::Ref,
            Body::Select(_) => ElementKind::Select,
            Body::Extend(_) => ElementKind::Extend,
        }
    }

    /// Semantic name if set, otherwise the base kind name.
    pub fn element_name(&self) -> &str {
        self.element.as_deref().unwrap_or(self.kind().as_str())
    }

    pub fn is_element(&self, name: &str) -> bool {
        self.element.as_deref() == Some(name)
    }

    pub fn meta(&self, key: &str) -> Option<&Element> {
        self.meta.get(key)
    }

    /// Insert or replace a meta entry, keeping the position of an existing key.
    pub fn set_meta(&mut self, key: impl Into<String>, value: Element) {
        self.meta.insert(key.into(), value);
    }

    pub fn attribute(&self, key: &str) -> Option<&Element> {
        self.attributes.get(key)
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: Element) {
        self.attributes.insert(key.into(), value);
    }

    /// True when no content has been set.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Child sequence of a composite element.
    pub fn children(&self) -> Option<&[Element]> {
        match &self.body {
            Body::Array(v)
            | Body::Object(v)
            | Body::Ref(v)
            | Body::Select(v)
            | Body::Extend(v) => v.as_deref(),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Element>> {
        match &mut self.body {
            Body::Array(v)
            | Body::Object(v)
            | Body::Ref(v)
            | Body::Select(v)
            | Body::Extend(v) => Some(v.get_or_insert_with(Vec::new)),
            _ => None,
        }
    }

    /// String content, if this is a non-empty string element.
    pub fn as_str(&self) -> Option<&str> {
        match &self.body {
            Body::String(Some(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.body {
            Body::Boolean(v) => v,
            _ => None,
        }
    }

    /// Meta `name` as plain text.
    pub fn name(&self) -> Option<&str> {
        self.meta("name").and_then(Element::as_str)
    }

    /// Whether the `typeAttributes` attribute lists `attribute`.
    pub fn has_type_attribute(&self, attribute: &str) -> bool {
        self.attribute("typeAttributes")
            .and_then(Element::children)
            .is_some_and(|attrs| attrs.iter().any(|a| a.as_str() == Some(attribute)))
    }

    /// Whether the element is flagged with the `variable` attribute.
    pub fn is_variable(&self) -> bool {
        self.attribute("variable").and_then(Element::as_bool) == Some(true)
    }

    /// Dispatch to the handler matching this element's variant.
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match &self.body {
            Body::Null => visitor.visit_null(self),
            Body::Boolean(v) => visitor.visit_boolean(self, *v),
            Body::Number(v) => visitor.visit_number(self, *v),
            Body::String(v) => visitor.visit_string(self, v.as_deref()),
            Body::Enum(v) => visitor.visit_enum(self, v.as_deref()),
            Body::Array(v) => visitor.visit_array(self, v.as_deref()),
            Body::Object(v) => visitor.visit_object(self, v.as_deref()),
            Body::Member(k, v) => visitor.visit_member(self, k, v.as_deref()),
            Body::Ref(v) => visitor.visit_ref(self, v.as_deref()),
            Body::Select(v) => visitor.visit_select(self, v.as_deref()),
            Body::Extend(v) => visitor.visit_extend(self, v.as_deref()),
        }
    }
}

// ──────────────────────────────────────────────
// Visitor
// ──────────────────────────────────────────────

/// One handler per variant. Each handler receives the element itself plus
/// its typed content.
pub trait Visitor {
    type Output;

    fn visit_null(&mut self, e: &Element) -> Self::Output;
    fn visit_boolean(&mut self, e: &Element, value: Option<bool>) -> Self::Output;
    fn visit_number(&mut self, e: &Element, value: Option<f64>) -> Self::Output;
    fn visit_string(&mut self, e: &Element, value: Option<&str>) -> Self::Output;
    fn visit_enum(&mut self, e: &Element, value: Option<&Element>) -> Self::Output;
    fn visit_array(&mut self, e: &Element, items: Option<&[Element]>) -> Self::Output;
    fn visit_object(&mut self, e: &Element, items: Option<&[Element]>) -> Self::Output;
    fn visit_member(&mut self, e: &Element, key: &Element, value: Option<&Element>)
        -> Self::Output;
    fn visit_ref(&mut self, e: &Element, content: Option<&[Element]>) -> Self::Output;
    fn visit_select(&mut self, e: &Element, options: Option<&[Element]>) -> Self::Output;
    fn visit_extend(&mut self, e: &Element, overlays: Option<&[Element]>) -> Self::Output;
}
