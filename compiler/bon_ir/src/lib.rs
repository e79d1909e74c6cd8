//! bonScript IR - the parsed schema model
//!
//! This crate contains the read-only model the generator front-end consumes:
//! - Spans for source locations
//! - Names for interned identifiers
//! - Packages, classes, fields, typedefs, enums and data types, stored in a
//!   flat [`Model`] arena and addressed by `u32` handles
//! - The cascading field default settings
//!
//! Nodes never own each other. Containers and contents point at each other
//! through `u32` handles, which also makes handle equality node identity: two
//! identical declarations in different places stay distinct.

/// Fails the build if `$ty` is not `$size` bytes. Handles are copied around
/// constantly, so they stay small.
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}
pub(crate) use static_assert_size;

mod interner;
pub mod model;
mod name;
mod settings;
mod span;

pub use interner::StringInterner;
pub use model::{
    ClassDefinition, ClassId, DataType, DataTypeId, DataTypeKind, DataTypeOwner,
    ElementaryDataType, EnumDefinition, EnumId, FieldDefinition, FieldId, Model, ModelBuilder,
    ModelError, NodeRef, PackageDefinition, PackageId, TypeDefId, TypeDefinition,
};
pub use name::Name;
pub use settings::{
    ControlChars, FieldDefaults, Required, Signedness, Trimming, UsePrimitives, Visibility,
};
pub use span::Span;
