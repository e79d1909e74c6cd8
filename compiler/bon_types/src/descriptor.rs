//! Resolved data type descriptors.

use bon_ir::{ClassId, DataTypeId, EnumId, Required, TypeDefId, Visibility};

use crate::{EffectiveAttributes, ElementaryKind, Representation};

/// The fully resolved, immutable result for one data type node.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Descriptor {
    /// The data type node this descriptor was resolved for.
    pub origin: DataTypeId,
    /// The typedef the origin names, if it is a typedef reference.
    pub typedef: Option<TypeDefId>,
    pub target: ResolvedTarget,
}

/// What a data type finally resolves to, after following typedefs.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ResolvedTarget {
    Elementary(ElementaryInfo),
    /// A reference to a class. Carries no cascading attributes.
    Object(ClassId),
}

/// Everything the generator needs to emit an elementary type.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ElementaryInfo {
    pub kind: ElementaryKind,
    /// The declared name after canonicalization (`Int` becomes `Integer`).
    pub canonical_name: String,
    pub representation: Representation,
    /// A non-nullable primitive may be emitted.
    pub primitive_capable: bool,
    /// `uppercase` or `lowercase`, which carry a built-in validation.
    pub string_subtype_with_validation: bool,
    pub was_declared_upper_case: bool,
    pub length: u32,
    pub decimals: u32,
    pub enum_type: Option<EnumId>,
    pub attributes: EffectiveAttributes,
}

impl Descriptor {
    pub fn elementary(&self) -> Option<&ElementaryInfo> {
        match &self.target {
            ResolvedTarget::Elementary(info) => Some(info),
            ResolvedTarget::Object(_) => None,
        }
    }

    /// The referenced class of an object type.
    pub fn object_class(&self) -> Option<ClassId> {
        match self.target {
            ResolvedTarget::Object(class) => Some(class),
            ResolvedTarget::Elementary(_) => None,
        }
    }

    /// `None` for object types.
    pub fn elementary_kind(&self) -> Option<ElementaryKind> {
        self.elementary().map(|info| info.kind)
    }

    pub fn representation(&self) -> Option<&Representation> {
        self.elementary().map(|info| &info.representation)
    }

    pub fn attributes(&self) -> Option<&EffectiveAttributes> {
        self.elementary().map(|info| &info.attributes)
    }

    pub fn is_primitive_capable(&self) -> bool {
        self.elementary().is_some_and(|info| info.primitive_capable)
    }

    pub fn is_string_subtype_with_validation(&self) -> bool {
        self.elementary()
            .is_some_and(|info| info.string_subtype_with_validation)
    }

    pub fn was_declared_upper_case(&self) -> bool {
        self.elementary().is_some_and(|info| info.was_declared_upper_case)
    }

    pub fn effective_signed(&self) -> Option<bool> {
        self.attributes().map(|attrs| attrs.signed)
    }

    pub fn effective_trim(&self) -> Option<bool> {
        self.attributes().map(|attrs| attrs.trim)
    }

    pub fn effective_allow_control_chars(&self) -> Option<bool> {
        self.attributes().map(|attrs| attrs.allow_control_chars)
    }

    pub fn visibility(&self) -> Option<Visibility> {
        self.attributes().map(|attrs| attrs.visibility)
    }

    /// The cascaded required default. `None` when unset or for object types.
    pub fn default_required(&self) -> Option<Required> {
        self.attributes().and_then(|attrs| attrs.default_required)
    }
}
