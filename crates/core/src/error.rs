use crate::element::ElementKind;

/// Failures while turning MSON into Refract.
///
/// These are broken preconditions from the stage that produced the MSON AST,
/// not user errors; the whole conversion is abandoned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    /// A scalar or composite was to be extracted from no literals at all.
    #[error("cannot extract from empty value set")]
    EmptyValueSet,

    /// A scalar element was given more than one literal.
    #[error("exactly one value expected, got {count}")]
    TooManyValues { count: usize },

    /// A `memberType` section tried to fill content already set by a value.
    #[error("content already set, cannot fill it from 'memberType'")]
    ContentAlreadySet,

    /// Value members only support primitive types.
    #[error("unhandled type of value member: {base}")]
    UnhandledValueType { base: &'static str },

    /// Nested types of a composite must be primitive.
    #[error("unsupported nested type: {base}")]
    UnsupportedNestedType { base: &'static str },

    /// Extracted content does not fit the target element.
    #[error("cannot set {content} content on {target} element")]
    ContentMismatch {
        content: &'static str,
        target: ElementKind,
    },
}

/// Failures while rendering a Refract tree.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    /// References must be resolved before rendering.
    #[error("reference '{href}' is not resolved")]
    UnresolvedRef { href: String },

    /// An element that cannot appear as an object property.
    #[error("invalid property element: {element}")]
    InvalidProperty { element: String },

    /// An element that cannot be rendered as a schema of its own.
    #[error("invalid top level element: {element}")]
    InvalidSchemaElement { element: String },

    /// A member key that is neither a string nor an extend yielding a string.
    #[error("unexpected element type in member key: {element}")]
    InvalidKey { element: String },

    /// An option of a select element without content.
    #[error("unexpected empty option element")]
    EmptyOption,

    /// The `enumerations` attribute must hold an array.
    #[error("enumerations attribute must be an array, got {element}")]
    InvalidEnumerations { element: String },
}

/// Failures while reading a serialized Refract element.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("serialized element must be a JSON object")]
    NotAnObject,

    #[error("serialized element has no 'element' name")]
    MissingName,

    /// `meta` and `attributes` must be JSON objects.
    #[error("'{field}' of element '{element}' must be an object")]
    InvalidInfo {
        field: &'static str,
        element: String,
    },

    #[error("invalid content for {kind} element '{element}'")]
    InvalidContent { kind: ElementKind, element: String },
}
