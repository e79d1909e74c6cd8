//! The parsed bonScript model.
//!
//! All nodes live in flat vectors inside [`Model`] and refer to each other by
//! handle. Container links (field → class → package, data type → field or
//! typedef) are handles as well, so the resolver can walk upward from any
//! data type without the model holding reference cycles. Only typedef
//! *references* may form cycles; container links never do.

mod builder;

pub use builder::{ModelBuilder, ModelError};

use std::fmt;

use crate::{
    ControlChars, FieldDefaults, Name, Required, Signedness, Span, StringInterner, Trimming,
};

/// Defines a `u32` handle into one of the model's node tables.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create a handle from a raw index.
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            /// Get the index into the owning table.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Get the raw u32 value.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

define_id!(
    /// Handle of a [`PackageDefinition`].
    PackageId
);
define_id!(
    /// Handle of a [`ClassDefinition`].
    ClassId
);
define_id!(
    /// Handle of a [`FieldDefinition`].
    FieldId
);
define_id!(
    /// Handle of a [`TypeDefinition`].
    TypeDefId
);
define_id!(
    /// Handle of an [`EnumDefinition`].
    EnumId
);
define_id!(
    /// Handle of a [`DataType`] node. This is the resolution cache key.
    DataTypeId
);

/// A package: the outermost container, optionally carrying a defaults block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageDefinition {
    pub name: Name,
    pub defaults: Option<FieldDefaults>,
    pub span: Span,
}

/// A class declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDefinition {
    pub name: Name,
    /// Containing package. `None` only in malformed models.
    pub package: Option<PackageId>,
    /// Single-inheritance parent.
    pub extends: Option<ClassId>,
    pub is_final: bool,
    /// Fields in declaration order.
    pub fields: Vec<FieldId>,
    pub defaults: Option<FieldDefaults>,
    pub span: Span,
}

/// A field of a class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: Name,
    /// The owning class.
    pub class: ClassId,
    pub data_type: DataTypeId,
    /// Explicit `required` / `optional` marker.
    pub required: Option<Required>,
    pub span: Span,
}

/// A named alias for another data type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDefinition {
    pub name: Name,
    /// Containing package. `None` only in malformed models.
    pub package: Option<PackageId>,
    /// The aliased data type, which may itself reference another typedef.
    pub data_type: DataTypeId,
    pub span: Span,
}

/// An enumeration referenced by `enum` elementary types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumDefinition {
    pub name: Name,
    pub package: Option<PackageId>,
    pub values: Vec<Name>,
    pub span: Span,
}

/// A primitive-like scalar type declaration, e.g. `decimal(12,2) unsigned`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ElementaryDataType {
    /// The type name exactly as declared (`Int`, `decimal`, `Uppercase`, ...).
    pub name: Name,
    pub length: u32,
    pub decimals: u32,
    pub signed: Option<Signedness>,
    pub trimming: Option<Trimming>,
    pub allow_ctrls: Option<ControlChars>,
    /// The enum type for `enum` elementary types.
    pub enum_type: Option<EnumId>,
}

impl ElementaryDataType {
    /// An elementary type with no length and no overrides.
    pub fn new(name: Name) -> Self {
        ElementaryDataType {
            name,
            length: 0,
            decimals: 0,
            signed: None,
            trimming: None,
            allow_ctrls: None,
            enum_type: None,
        }
    }

    #[must_use]
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = length;
        self
    }

    #[must_use]
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    #[must_use]
    pub fn with_signed(mut self, signed: Signedness) -> Self {
        self.signed = Some(signed);
        self
    }

    #[must_use]
    pub fn with_trimming(mut self, trimming: Trimming) -> Self {
        self.trimming = Some(trimming);
        self
    }

    #[must_use]
    pub fn with_allow_ctrls(mut self, allow_ctrls: ControlChars) -> Self {
        self.allow_ctrls = Some(allow_ctrls);
        self
    }

    #[must_use]
    pub fn with_enum_type(mut self, enum_type: EnumId) -> Self {
        self.enum_type = Some(enum_type);
        self
    }
}

/// What a data type node declares. Exactly one variant is populated.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DataTypeKind {
    /// A primitive-like scalar.
    Elementary(ElementaryDataType),
    /// A reference to another declared class.
    Object(ClassId),
    /// A reference to a typedef.
    Reference(TypeDefId),
}

impl DataTypeKind {
    pub fn is_reference(&self) -> bool {
        matches!(self, DataTypeKind::Reference(_))
    }

    pub fn as_elementary(&self) -> Option<&ElementaryDataType> {
        match self {
            DataTypeKind::Elementary(elementary) => Some(elementary),
            DataTypeKind::Object(_) | DataTypeKind::Reference(_) => None,
        }
    }
}

/// The node a data type is declared in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DataTypeOwner {
    Field(FieldId),
    TypeDef(TypeDefId),
}

/// A data type occurrence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataType {
    pub kind: DataTypeKind,
    pub owner: DataTypeOwner,
    pub span: Span,
}

/// A handle to any node, used for walking containment links.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Package(PackageId),
    Class(ClassId),
    Field(FieldId),
    TypeDef(TypeDefId),
    Enum(EnumId),
    DataType(DataTypeId),
}

/// The complete, immutable model of one generation run.
///
/// Built with [`ModelBuilder`]. Handles are only meaningful for the model that
/// issued them; indexing with a foreign handle panics.
pub struct Model {
    interner: StringInterner,
    packages: Vec<PackageDefinition>,
    classes: Vec<ClassDefinition>,
    fields: Vec<FieldDefinition>,
    typedefs: Vec<TypeDefinition>,
    enums: Vec<EnumDefinition>,
    data_types: Vec<DataType>,
}

/// Enumerate a node table together with its handles.
fn enumerate<'a, T, I: 'a>(
    items: &'a [T],
    make: fn(u32) -> I,
) -> impl Iterator<Item = (I, &'a T)> + 'a {
    (0u32..).zip(items).map(move |(index, item)| (make(index), item))
}

impl Model {
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Look up an interned name.
    pub fn name(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    pub fn package(&self, id: PackageId) -> &PackageDefinition {
        &self.packages[id.index()]
    }

    pub fn class(&self, id: ClassId) -> &ClassDefinition {
        &self.classes[id.index()]
    }

    pub fn field(&self, id: FieldId) -> &FieldDefinition {
        &self.fields[id.index()]
    }

    pub fn typedef(&self, id: TypeDefId) -> &TypeDefinition {
        &self.typedefs[id.index()]
    }

    pub fn enum_def(&self, id: EnumId) -> &EnumDefinition {
        &self.enums[id.index()]
    }

    pub fn data_type(&self, id: DataTypeId) -> &DataType {
        &self.data_types[id.index()]
    }

    pub fn packages(&self) -> impl Iterator<Item = (PackageId, &PackageDefinition)> + '_ {
        enumerate(&self.packages, PackageId::new)
    }

    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &ClassDefinition)> + '_ {
        enumerate(&self.classes, ClassId::new)
    }

    pub fn fields(&self) -> impl Iterator<Item = (FieldId, &FieldDefinition)> + '_ {
        enumerate(&self.fields, FieldId::new)
    }

    pub fn typedefs(&self) -> impl Iterator<Item = (TypeDefId, &TypeDefinition)> + '_ {
        enumerate(&self.typedefs, TypeDefId::new)
    }

    pub fn enums(&self) -> impl Iterator<Item = (EnumId, &EnumDefinition)> + '_ {
        enumerate(&self.enums, EnumId::new)
    }

    pub fn data_types(&self) -> impl Iterator<Item = (DataTypeId, &DataType)> + '_ {
        enumerate(&self.data_types, DataTypeId::new)
    }

    /// The direct container of a node, or `None` for packages and detached nodes.
    pub fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        match node {
            NodeRef::Package(_) => None,
            NodeRef::Class(id) => self.class(id).package.map(NodeRef::Package),
            NodeRef::Field(id) => Some(NodeRef::Class(self.field(id).class)),
            NodeRef::TypeDef(id) => self.typedef(id).package.map(NodeRef::Package),
            NodeRef::Enum(id) => self.enum_def(id).package.map(NodeRef::Package),
            NodeRef::DataType(id) => Some(match self.data_type(id).owner {
                DataTypeOwner::Field(field) => NodeRef::Field(field),
                DataTypeOwner::TypeDef(typedef) => NodeRef::TypeDef(typedef),
            }),
        }
    }

    /// All containers of a node, innermost first (excluding the node itself).
    pub fn ancestors(&self, node: NodeRef) -> impl Iterator<Item = NodeRef> + '_ {
        std::iter::successors(self.parent(node), move |&current| self.parent(current))
    }

    /// The `extends` chain of a class, nearest parent first (excluding the class).
    ///
    /// An inheritance cycle in a malformed model is cut once every class has
    /// been visited.
    pub fn superclasses(&self, class: ClassId) -> impl Iterator<Item = ClassId> + '_ {
        std::iter::successors(self.class(class).extends, move |&current| {
            self.class(current).extends
        })
        .take(self.classes.len())
    }

    /// `package.Class`, or just `Class` for a detached class.
    pub fn qualified_class_name(&self, class: ClassId) -> String {
        let def = self.class(class);
        self.qualify(def.package, def.name)
    }

    /// `package.TypeName`, or just `TypeName` for a detached typedef.
    pub fn qualified_typedef_name(&self, typedef: TypeDefId) -> String {
        let def = self.typedef(typedef);
        self.qualify(def.package, def.name)
    }

    fn qualify(&self, package: Option<PackageId>, name: Name) -> String {
        match package {
            Some(package) => format!(
                "{}.{}",
                self.name(self.package(package).name),
                self.name(name)
            ),
            None => self.name(name).to_owned(),
        }
    }

    pub fn find_package(&self, name: &str) -> Option<PackageId> {
        let name = self.interner.get(name)?;
        self.packages()
            .find(|(_, def)| def.name == name)
            .map(|(id, _)| id)
    }

    /// Find a class by name within a package.
    pub fn find_class(&self, package: PackageId, name: &str) -> Option<ClassId> {
        let name = self.interner.get(name)?;
        self.classes()
            .find(|(_, def)| def.package == Some(package) && def.name == name)
            .map(|(id, _)| id)
    }

    /// Find a typedef by name within a package.
    pub fn find_typedef(&self, package: PackageId, name: &str) -> Option<TypeDefId> {
        let name = self.interner.get(name)?;
        self.typedefs()
            .find(|(_, def)| def.package == Some(package) && def.name == name)
            .map(|(id, _)| id)
    }

    /// Find a field by name within a class (first occurrence).
    pub fn find_field(&self, class: ClassId, name: &str) -> Option<FieldId> {
        let name = self.interner.get(name)?;
        self.class(class)
            .fields
            .iter()
            .copied()
            .find(|&field| self.field(field).name == name)
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("packages", &self.packages.len())
            .field("classes", &self.classes.len())
            .field("fields", &self.fields.len())
            .field("typedefs", &self.typedefs.len())
            .field("enums", &self.enums.len())
            .field("data_types", &self.data_types.len())
            .finish()
    }
}
