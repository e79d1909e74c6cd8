//! Memoized data type resolution.
//!
//! [`ResolutionCache`] holds one [`Descriptor`] per data type node for the
//! length of a generation run. Typedef references are marked in progress
//! before their aliased type is resolved; reaching a marked node again means
//! the typedef chain cycles.

use bon_ir::{DataTypeId, DataTypeKind, ElementaryDataType, Model, TypeDefId, UsePrimitives};
use bon_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;

use crate::elementary::is_primitive_name;
use crate::naming::canonicalize;
use crate::{
    merge_defaults, Descriptor, ElementaryInfo, ElementaryKind, Representation,
    ResolutionError, ResolvedTarget,
};

#[derive(Copy, Clone, Debug)]
enum Slot {
    /// A typedef reference whose aliased type is being resolved.
    InProgress(TypeDefId),
    /// Index into `descriptors`.
    Resolved(usize),
}

/// Memoized descriptors keyed by data type identity.
///
/// One cache serves one generation run over one model. Call
/// [`ResolutionCache::clear`] before reusing it for another run; handles of
/// different models are not distinguishable.
#[derive(Default, Debug)]
pub struct ResolutionCache {
    slots: FxHashMap<DataTypeId, Slot>,
    descriptors: Vec<Descriptor>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a data type, reusing the cached descriptor if there is one.
    ///
    /// A failed resolution leaves nothing behind for the failing nodes, so
    /// resolving them again fails the same way.
    #[tracing::instrument(level = "trace", skip(self, model))]
    pub fn resolve(
        &mut self,
        model: &Model,
        id: DataTypeId,
    ) -> Result<&Descriptor, ResolutionError> {
        let index = match self.slots.get(&id).copied() {
            Some(Slot::Resolved(index)) => index,
            Some(Slot::InProgress(typedef)) => {
                let name = model.qualified_typedef_name(typedef);
                tracing::debug!(typedef = name.as_str(), "typedef cycle detected");
                return Err(ResolutionError::RecursiveTypedef {
                    name,
                    span: model.typedef(typedef).span,
                });
            }
            None => self.materialize(model, id)?,
        };
        Ok(&self.descriptors[index])
    }

    /// A previously resolved descriptor.
    pub fn get(&self, id: DataTypeId) -> Option<&Descriptor> {
        match self.slots.get(&id) {
            Some(Slot::Resolved(index)) => self.descriptors.get(*index),
            Some(Slot::InProgress(_)) | None => None,
        }
    }

    /// Number of resolved descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Forget every descriptor. Required between generation runs.
    pub fn clear(&mut self) {
        tracing::debug!(descriptors = self.descriptors.len(), "clearing resolution cache");
        self.slots.clear();
        self.descriptors.clear();
    }

    fn materialize(&mut self, model: &Model, id: DataTypeId) -> Result<usize, ResolutionError> {
        let descriptor = match &model.data_type(id).kind {
            DataTypeKind::Elementary(elementary) => Descriptor {
                origin: id,
                typedef: None,
                target: ResolvedTarget::Elementary(resolve_elementary(model, id, elementary)?),
            },
            DataTypeKind::Object(class) => Descriptor {
                origin: id,
                typedef: None,
                target: ResolvedTarget::Object(*class),
            },
            DataTypeKind::Reference(typedef) => {
                let typedef = *typedef;
                // Must be visible before descending, or a cycle recurses forever.
                self.slots.insert(id, Slot::InProgress(typedef));
                let aliased = model.typedef(typedef).data_type;
                let target = ensure_sufficient_stack(|| {
                    self.resolve(model, aliased)
                        .map(|resolved| resolved.target.clone())
                });
                match target {
                    Ok(target) => Descriptor {
                        origin: id,
                        typedef: Some(typedef),
                        target,
                    },
                    Err(error) => {
                        self.slots.remove(&id);
                        return Err(error);
                    }
                }
            }
        };

        let index = self.descriptors.len();
        tracing::debug!(?id, index, "descriptor cached");
        self.descriptors.push(descriptor);
        self.slots.insert(id, Slot::Resolved(index));
        Ok(index)
    }
}

fn resolve_elementary(
    model: &Model,
    id: DataTypeId,
    elementary: &ElementaryDataType,
) -> Result<ElementaryInfo, ResolutionError> {
    let declared = model.name(elementary.name);
    let canonical = canonicalize(declared);
    let kind = ElementaryKind::lookup(&canonical.name);
    let attributes = merge_defaults(model, id, elementary)?;
    let span = model.data_type(id).span;

    let Some(kind) = kind else {
        return Err(ResolutionError::UnmappedType {
            name: declared.to_owned(),
            span,
        });
    };
    let representation = match (kind.representation(), elementary.enum_type) {
        (Some(representation), _) => representation,
        (None, Some(enum_type)) => {
            Representation::Enum(model.name(model.enum_def(enum_type).name).to_owned())
        }
        (None, None) => {
            return Err(ResolutionError::MissingEnumType {
                name: declared.to_owned(),
                span,
            })
        }
    };

    Ok(ElementaryInfo {
        kind,
        primitive_capable: attributes.use_primitives == UsePrimitives::Primitives
            && is_primitive_name(&canonical.name),
        string_subtype_with_validation: matches!(
            canonical.name.as_str(),
            "uppercase" | "lowercase"
        ),
        was_declared_upper_case: canonical.was_upper_case,
        canonical_name: canonical.name,
        representation,
        length: elementary.length,
        decimals: elementary.decimals,
        enum_type: elementary.enum_type,
        attributes,
    })
}

#[cfg(test)]
mod tests;
