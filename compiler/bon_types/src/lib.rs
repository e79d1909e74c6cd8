//! Type resolution for bonScript data types.
//!
//! Turns every data type node of a [`bon_ir::Model`] into a [`Descriptor`]:
//! - elementary names are canonicalized ([`naming`]) and looked up in the
//!   fixed table ([`elementary`])
//! - cascading attributes are merged from the element, class and package
//!   levels ([`attributes`])
//! - typedef chains are followed, with cycle detection ([`ResolutionCache`])

pub mod attributes;
mod cache;
mod descriptor;
pub mod elementary;
mod error;
pub mod naming;

pub use attributes::{merge_defaults, Cascade, EffectiveAttributes};
pub use cache::ResolutionCache;
pub use descriptor::{Descriptor, ElementaryInfo, ResolvedTarget};
pub use elementary::{ElementaryKind, LengthRule, Representation};
pub use error::ResolutionError;
