//! refract-core: MSON to Refract conversion and JSON Schema rendering.
//!
//! The pipeline has two stages. [`convert`] turns an MSON AST into a
//! Refract element tree, and [`json_schema`] renders a (reference-resolved)
//! element tree as a draft-4 JSON Schema document. Both stages produce
//! `serde_json::Value` trees; turning them into text is left to the caller.
//!
//! # Public API
//!
//! Key entry points are re-exported at the crate root:
//!
//! - [`data_structure_to_refract()`] -- MSON data structure to Refract object
//! - [`convert_elements()`] -- MSON element sequence to Refract elements
//! - [`generate_json_schema()`] -- Refract element to JSON Schema document
//! - [`serialize()`] / [`deserialize()`] -- Refract element <-> JSON tree
//! - [`wrap_blueprint()`] -- legacy AST document tree
//! - [`Element`], [`ElementKind`], [`Visitor`] -- the element model
//! - [`ConvertError`], [`RenderError`], [`DecodeError`] -- error types

/// `$schema` value of every generated JSON Schema document.
pub const JSON_SCHEMA_DRAFT: &str = "http://json-schema.org/draft-04/schema#";
/// `_version` value of the legacy AST document tree.
pub const AST_SERIALIZATION_VERSION: &str = "4.0";

pub mod blueprint;
pub mod convert;
pub mod element;
pub mod error;
pub mod extract;
pub mod flags;
pub mod json_schema;
pub mod merge;
pub mod mson;
pub mod serialize;
pub mod serialize_ast;
pub mod validate;

// ── Convenience re-exports: key types ────────────────────────────────

pub use element::{Body, Element, ElementKind, InfoMap, Visitor};
pub use error::{ConvertError, DecodeError, RenderError};
pub use flags::TypeFlags;

// ── Convenience re-exports: entry points ─────────────────────────────

pub use convert::{convert_element, convert_elements, data_structure_to_refract};
pub use json_schema::generate_json_schema;
pub use merge::merge;
pub use serialize::{deserialize, serialize};
pub use serialize_ast::wrap_blueprint;
pub use validate::check_resolved;
