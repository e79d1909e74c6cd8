//! Incremental construction of a [`Model`].
//!
//! Nodes are declared first and wired together afterwards, so forward
//! references, inheritance and (deliberately) cyclic typedefs can all be
//! expressed. Typedefs are declared with [`ModelBuilder::typedef`] and receive
//! their aliased type through [`ModelBuilder::define_typedef`].

use crate::{FieldDefaults, Name, Required, Span, StringInterner};

use super::{
    ClassDefinition, ClassId, DataType, DataTypeId, DataTypeKind, DataTypeOwner,
    ElementaryDataType, EnumDefinition, EnumId, FieldDefinition, FieldId, Model, NodeRef,
    PackageDefinition, PackageId, TypeDefId, TypeDefinition,
};

/// Errors detected when finishing a model.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A typedef was declared but never given an aliased type.
    #[error("typedef `{name}` has no aliased data type")]
    UndefinedTypedef { name: String },
    /// A typedef was given an aliased type twice.
    #[error("typedef `{name}` is defined more than once")]
    TypedefRedefined { name: String },
}

struct PendingTypeDef {
    name: Name,
    package: Option<PackageId>,
    data_type: Option<DataTypeId>,
    span: Span,
}

/// Builder for [`Model`].
#[derive(Default)]
pub struct ModelBuilder {
    interner: StringInterner,
    packages: Vec<PackageDefinition>,
    classes: Vec<ClassDefinition>,
    fields: Vec<FieldDefinition>,
    typedefs: Vec<PendingTypeDef>,
    enums: Vec<EnumDefinition>,
    data_types: Vec<DataType>,
    errors: Vec<ModelError>,
}

/// Next handle for a table about to grow by one element.
fn next_index<T>(items: &[T]) -> u32 {
    u32::try_from(items.len()).unwrap_or_else(|_| panic!("model exceeds u32::MAX nodes"))
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    /// An elementary type with the given declared name and no overrides.
    pub fn elementary(&self, name: &str) -> ElementaryDataType {
        ElementaryDataType::new(self.intern(name))
    }

    pub fn package(&mut self, name: &str) -> PackageId {
        let id = PackageId::new(next_index(&self.packages));
        self.packages.push(PackageDefinition {
            name: self.intern(name),
            defaults: None,
            span: Span::DUMMY,
        });
        id
    }

    pub fn package_defaults(&mut self, package: PackageId, defaults: FieldDefaults) {
        self.packages[package.index()].defaults = Some(defaults);
    }

    /// Declare a class inside a package.
    pub fn class(&mut self, package: PackageId, name: &str) -> ClassId {
        self.push_class(Some(package), name)
    }

    /// Declare a class with no containing package (a malformed model).
    pub fn detached_class(&mut self, name: &str) -> ClassId {
        self.push_class(None, name)
    }

    fn push_class(&mut self, package: Option<PackageId>, name: &str) -> ClassId {
        let id = ClassId::new(next_index(&self.classes));
        self.classes.push(ClassDefinition {
            name: self.intern(name),
            package,
            extends: None,
            is_final: false,
            fields: Vec::new(),
            defaults: None,
            span: Span::DUMMY,
        });
        id
    }

    pub fn extends(&mut self, class: ClassId, parent: ClassId) {
        self.classes[class.index()].extends = Some(parent);
    }

    pub fn set_final(&mut self, class: ClassId, is_final: bool) {
        self.classes[class.index()].is_final = is_final;
    }

    pub fn class_defaults(&mut self, class: ClassId, defaults: FieldDefaults) {
        self.classes[class.index()].defaults = Some(defaults);
    }

    /// Append a field to a class, creating its data type node.
    pub fn field(&mut self, class: ClassId, name: &str, kind: DataTypeKind) -> FieldId {
        let id = FieldId::new(next_index(&self.fields));
        let data_type = self.push_data_type(kind, DataTypeOwner::Field(id));
        self.fields.push(FieldDefinition {
            name: self.intern(name),
            class,
            data_type,
            required: None,
            span: Span::DUMMY,
        });
        self.classes[class.index()].fields.push(id);
        id
    }

    pub fn field_required(&mut self, field: FieldId, required: Required) {
        self.fields[field.index()].required = Some(required);
    }

    /// Declare a typedef inside a package. Its aliased type is set later.
    pub fn typedef(&mut self, package: PackageId, name: &str) -> TypeDefId {
        self.push_typedef(Some(package), name)
    }

    /// Declare a typedef with no containing package (a malformed model).
    pub fn detached_typedef(&mut self, name: &str) -> TypeDefId {
        self.push_typedef(None, name)
    }

    fn push_typedef(&mut self, package: Option<PackageId>, name: &str) -> TypeDefId {
        let id = TypeDefId::new(next_index(&self.typedefs));
        self.typedefs.push(PendingTypeDef {
            name: self.intern(name),
            package,
            data_type: None,
            span: Span::DUMMY,
        });
        id
    }

    /// Give a declared typedef its aliased type.
    pub fn define_typedef(&mut self, typedef: TypeDefId, kind: DataTypeKind) -> DataTypeId {
        let data_type = self.push_data_type(kind, DataTypeOwner::TypeDef(typedef));
        let pending = &mut self.typedefs[typedef.index()];
        if pending.data_type.is_some() {
            let name = self.interner.lookup(pending.name).to_owned();
            self.errors.push(ModelError::TypedefRedefined { name });
        } else {
            pending.data_type = Some(data_type);
        }
        data_type
    }

    pub fn enumeration(&mut self, package: PackageId, name: &str, values: &[&str]) -> EnumId {
        let id = EnumId::new(next_index(&self.enums));
        let values = values.iter().map(|value| self.intern(value)).collect();
        self.enums.push(EnumDefinition {
            name: self.intern(name),
            package: Some(package),
            values,
            span: Span::DUMMY,
        });
        id
    }

    /// Attach a source span to a node.
    pub fn set_span(&mut self, node: NodeRef, span: Span) {
        match node {
            NodeRef::Package(id) => self.packages[id.index()].span = span,
            NodeRef::Class(id) => self.classes[id.index()].span = span,
            NodeRef::Field(id) => self.fields[id.index()].span = span,
            NodeRef::TypeDef(id) => self.typedefs[id.index()].span = span,
            NodeRef::Enum(id) => self.enums[id.index()].span = span,
            NodeRef::DataType(id) => self.data_types[id.index()].span = span,
        }
    }

    /// The data type node of a field declared through this builder.
    pub fn field_data_type(&self, field: FieldId) -> DataTypeId {
        self.fields[field.index()].data_type
    }

    fn push_data_type(&mut self, kind: DataTypeKind, owner: DataTypeOwner) -> DataTypeId {
        let id = DataTypeId::new(next_index(&self.data_types));
        self.data_types.push(DataType {
            kind,
            owner,
            span: Span::DUMMY,
        });
        id
    }

    /// Finish the model, checking that every typedef was defined exactly once.
    pub fn finish(self) -> Result<Model, ModelError> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }

        let mut typedefs = Vec::with_capacity(self.typedefs.len());
        for pending in self.typedefs {
            let Some(data_type) = pending.data_type else {
                return Err(ModelError::UndefinedTypedef {
                    name: self.interner.lookup(pending.name).to_owned(),
                });
            };
            typedefs.push(TypeDefinition {
                name: pending.name,
                package: pending.package,
                data_type,
                span: pending.span,
            });
        }

        Ok(Model {
            interner: self.interner,
            packages: self.packages,
            classes: self.classes,
            fields: self.fields,
            typedefs,
            enums: self.enums,
            data_types: self.data_types,
        })
    }
}
