//! Cascading default attributes.
//!
//! Each attribute is looked up in a fixed order and the first level that
//! sets it wins:
//!
//! 1. the elementary data type itself (signedness, trimming, control chars)
//! 2. the defaults block of the containing class
//! 3. the defaults block of the containing package
//! 4. a hard-coded fallback
//!
//! The rule lives in [`Cascade::first`] and every attribute goes through it.

use bon_ir::{
    ControlChars, DataTypeId, ElementaryDataType, FieldDefaults, Model, NodeRef, Required,
    Signedness, Trimming, UsePrimitives, Visibility,
};

use crate::ResolutionError;

/// The effective attribute values of one elementary data type occurrence.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct EffectiveAttributes {
    pub signed: bool,
    pub trim: bool,
    pub allow_control_chars: bool,
    pub visibility: Visibility,
    pub use_primitives: UsePrimitives,
    /// `None` when neither class nor package sets a default.
    pub default_required: Option<Required>,
}

/// The defaults blocks that apply to one data type, innermost first.
#[derive(Copy, Clone, Debug)]
pub struct Cascade<'m> {
    class: Option<&'m FieldDefaults>,
    package: Option<&'m FieldDefaults>,
}

impl<'m> Cascade<'m> {
    /// Collect the class and package defaults by walking up from a data type.
    ///
    /// The first class ancestor supplies class defaults (typedefs declared in
    /// a package have none); the first package ancestor ends the walk.
    pub fn for_data_type(model: &'m Model, id: DataTypeId) -> Option<Self> {
        let mut class = None;
        for node in model.ancestors(NodeRef::DataType(id)) {
            match node {
                NodeRef::Class(class_id) if class.is_none() => {
                    class = Some(model.class(class_id).defaults.as_ref());
                }
                NodeRef::Package(package_id) => {
                    return Some(Cascade {
                        class: class.flatten(),
                        package: model.package(package_id).defaults.as_ref(),
                    });
                }
                _ => {}
            }
        }
        None
    }

    fn levels(&self) -> impl Iterator<Item = &'m FieldDefaults> {
        self.class.into_iter().chain(self.package)
    }

    /// First present value: `own` if set, else the class, else the package.
    pub fn first<T>(&self, own: Option<T>, pick: impl Fn(&FieldDefaults) -> Option<T>) -> Option<T> {
        own.or_else(|| self.levels().find_map(pick))
    }
}

/// Compute the effective attributes of an elementary data type.
///
/// Fails with [`ResolutionError::MissingPackage`] when `id` has no enclosing
/// package.
pub fn merge_defaults(
    model: &Model,
    id: DataTypeId,
    elementary: &ElementaryDataType,
) -> Result<EffectiveAttributes, ResolutionError> {
    let cascade =
        Cascade::for_data_type(model, id).ok_or_else(|| ResolutionError::MissingPackage {
            name: model.name(elementary.name).to_owned(),
            span: model.data_type(id).span,
        })?;

    let signed = cascade
        .first(elementary.signed, |d| d.signed)
        .unwrap_or(Signedness::Signed);
    let trimming = cascade
        .first(elementary.trimming, |d| d.trimming)
        .unwrap_or(Trimming::NoTrim);
    let allow_ctrls = cascade
        .first(elementary.allow_ctrls, |d| d.allow_ctrls)
        .unwrap_or(ControlChars::Allow);

    Ok(EffectiveAttributes {
        signed: signed == Signedness::Signed,
        trim: trimming == Trimming::Trim,
        allow_control_chars: allow_ctrls == ControlChars::Allow,
        visibility: cascade
            .first(None, |d| d.visibility)
            .unwrap_or(Visibility::Default),
        use_primitives: cascade
            .first(None, |d| d.use_primitives)
            .unwrap_or(UsePrimitives::Primitives),
        default_required: cascade.first(None, |d| d.required),
    })
}
