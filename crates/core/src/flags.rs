//! Type-attribute flags threaded through schema rendering.
//!
//! Four independent flags (fixed, fixed-type, nullable, required) travel
//! down the tree. Every step produces a new [`TypeFlags`]; nothing is
//! mutated in place. Three propagation modes exist:
//!
//! - [`TypeFlags::pass`]: unchanged, across refs, extends, select options
//!   and pattern-property values;
//! - [`TypeFlags::inherit`]: into nested content; only `fixed` survives,
//!   and only into kinds listed in [`INHERITS_FIXED`];
//! - [`TypeFlags::inherit_or_required`]: like `inherit`, plus `required`
//!   when the container is fixed or fixed-type.

use crate::element::{Element, ElementKind};

pub const FIXED: &str = "fixed";
pub const FIXED_TYPE: &str = "fixedType";
pub const NULLABLE: &str = "nullable";
pub const REQUIRED: &str = "required";
pub const OPTIONAL: &str = "optional";

/// Kinds that take over `fixed` from their container. Enum candidates are
/// alternatives, so a fixed container does not pin them.
pub const INHERITS_FIXED: [ElementKind; 10] = [
    ElementKind::Null,
    ElementKind::Boolean,
    ElementKind::Number,
    ElementKind::String,
    ElementKind::Array,
    ElementKind::Object,
    ElementKind::Member,
    ElementKind::Ref,
    ElementKind::Select,
    ElementKind::Extend,
];

pub fn inherits_fixed(kind: ElementKind) -> bool {
    INHERITS_FIXED.contains(&kind)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeFlags {
    fixed: bool,
    fixed_type: bool,
    nullable: bool,
    required: bool,
}

impl TypeFlags {
    pub const NONE: TypeFlags = TypeFlags {
        fixed: false,
        fixed_type: false,
        nullable: false,
        required: false,
    };

    pub fn fixed(self) -> bool {
        self.fixed
    }

    pub fn fixed_type(self) -> bool {
        self.fixed_type
    }

    pub fn nullable(self) -> bool {
        self.nullable
    }

    pub fn required(self) -> bool {
        self.required
    }

    /// Fixed or fixed-type: the shape is closed.
    pub fn closed(self) -> bool {
        self.fixed || self.fixed_type
    }

    pub fn with_fixed(self, fixed: bool) -> Self {
        TypeFlags { fixed, ..self }
    }

    pub fn with_fixed_type(self, fixed_type: bool) -> Self {
        TypeFlags { fixed_type, ..self }
    }

    pub fn with_nullable(self, nullable: bool) -> Self {
        TypeFlags { nullable, ..self }
    }

    pub fn with_required(self, required: bool) -> Self {
        TypeFlags { required, ..self }
    }

    pub fn pass(self) -> Self {
        self
    }

    /// Flags for a child of kind `child`.
    pub fn inherit(self, child: ElementKind) -> Self {
        TypeFlags {
            fixed: self.fixed && inherits_fixed(child),
            ..TypeFlags::NONE
        }
    }

    /// Flags for a property of a container: inherited, and required when
    /// the container is closed.
    pub fn inherit_or_required(self, child: ElementKind) -> Self {
        self.inherit(child).with_required(self.closed())
    }

    /// Add the markers the element itself carries. Markers only ever turn
    /// flags on here.
    pub fn update(self, e: &Element) -> Self {
        TypeFlags {
            fixed: self.fixed || e.has_type_attribute(FIXED),
            fixed_type: self.fixed_type || e.has_type_attribute(FIXED_TYPE),
            nullable: self.nullable || e.has_type_attribute(NULLABLE),
            required: self.required || e.has_type_attribute(REQUIRED),
        }
    }

    /// Local overrides at an object property. Fixed-type and nullable come
    /// from the property alone; an optional marker beats any inherited
    /// required.
    pub fn member_overrides(self, e: &Element) -> Self {
        let mut flags = TypeFlags {
            fixed: self.fixed || e.has_type_attribute(FIXED),
            fixed_type: e.has_type_attribute(FIXED_TYPE),
            nullable: e.has_type_attribute(NULLABLE),
            required: self.required || e.has_type_attribute(REQUIRED),
        };
        if e.has_type_attribute(OPTIONAL) {
            flags.required = false;
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all() -> TypeFlags {
        TypeFlags::NONE
            .with_fixed(true)
            .with_fixed_type(true)
            .with_nullable(true)
            .with_required(true)
    }

    fn marked(markers: &[&str]) -> Element {
        Element::string("x").with_attribute(
            "typeAttributes",
            Element::array(markers.iter().map(|m| Element::string(*m)).collect()),
        )
    }

    #[test]
    fn pass_is_identity() {
        assert_eq!(all().pass(), all());
        assert_eq!(TypeFlags::NONE.pass(), TypeFlags::NONE);
    }

    #[test]
    fn inherit_keeps_only_fixed_for_allowed_kinds() {
        assert_eq!(
            all().inherit(ElementKind::String),
            TypeFlags::NONE.with_fixed(true)
        );
        assert_eq!(all().inherit(ElementKind::Enum), TypeFlags::NONE);
        assert_eq!(
            TypeFlags::NONE.with_nullable(true).inherit(ElementKind::Object),
            TypeFlags::NONE
        );
    }

    #[test]
    fn inherit_or_required_forces_required_in_closed_containers() {
        let fixed = TypeFlags::NONE.with_fixed(true);
        assert_eq!(
            fixed.inherit_or_required(ElementKind::Member),
            TypeFlags::NONE.with_fixed(true).with_required(true)
        );

        let fixed_type = TypeFlags::NONE.with_fixed_type(true);
        assert_eq!(
            fixed_type.inherit_or_required(ElementKind::Member),
            TypeFlags::NONE.with_required(true)
        );

        let open = TypeFlags::NONE.with_required(true).with_nullable(true);
        assert_eq!(open.inherit_or_required(ElementKind::Member), TypeFlags::NONE);
    }

    #[test]
    fn update_adds_own_markers() {
        let flags = TypeFlags::NONE.update(&marked(&["nullable", "fixedType"]));
        assert!(flags.nullable());
        assert!(flags.fixed_type());
        assert!(!flags.fixed());
        assert!(!flags.required());

        let kept = TypeFlags::NONE.with_fixed(true).update(&marked(&[]));
        assert!(kept.fixed());
    }

    #[test]
    fn member_overrides_replace_fixed_type_and_nullable() {
        let inherited = all();
        let flags = inherited.member_overrides(&marked(&[]));
        assert!(flags.fixed());
        assert!(!flags.fixed_type());
        assert!(!flags.nullable());
        assert!(flags.required());
    }

    #[test]
    fn optional_beats_inherited_required() {
        let inherited = TypeFlags::NONE.with_required(true);
        assert!(!inherited.member_overrides(&marked(&["optional"])).required());
        assert!(TypeFlags::NONE
            .member_overrides(&marked(&["required"]))
            .required());
    }
}
