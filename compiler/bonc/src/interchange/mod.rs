//! JSON interchange form of a parsed bonScript model.
//!
//! The DSL parser is an external collaborator. It hands the model over as a
//! document like this one:
//!
//! ```json
//! {
//!   "packages": [{
//!     "name": "shop",
//!     "defaults": { "visibility": "public", "signed": "unsigned" },
//!     "enums": [{ "name": "Status", "values": ["OPEN", "CLOSED"] }],
//!     "typedefs": [{ "name": "Money", "type": { "elementary": { "name": "decimal", "length": 18, "decimals": 2 } } }],
//!     "classes": [{
//!       "name": "Order",
//!       "extends": "base.Entity",
//!       "fields": [
//!         { "name": "amount", "type": { "typedef": "Money" } },
//!         { "name": "status", "type": { "elementary": { "name": "enum", "enum": "Status" } } }
//!       ]
//!     }]
//!   }]
//! }
//! ```
//!
//! References (`extends`, `object`, `typedef`, `enum`) are either qualified
//! (`base.Entity`, split at the last dot) or name a declaration of the same
//! package. Every node may carry a `"span": [start, end]` pointing back into
//! the DSL source.

use std::str::FromStr;

use bon_ir::{
    ClassId, ControlChars, DataTypeKind, ElementaryDataType, EnumId, FieldDefaults, Model,
    ModelBuilder, ModelError, NodeRef, PackageId, Required, Signedness, Span, Trimming, TypeDefId,
    UsePrimitives, Visibility,
};
use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Why a model document could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("invalid model document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown class `{name}` referenced from package `{package}`")]
    UnknownClass { name: String, package: String },
    #[error("unknown typedef `{name}` referenced from package `{package}`")]
    UnknownTypedef { name: String, package: String },
    #[error("unknown enum `{name}` referenced from package `{package}`")]
    UnknownEnum { name: String, package: String },
    #[error("{kind} `{name}` is declared more than once")]
    Duplicate { kind: &'static str, name: String },
    #[error("invalid value `{value}` for setting `{key}`")]
    InvalidSetting { key: &'static str, value: String },
    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModelDto {
    #[serde(default)]
    packages: Vec<PackageDto>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PackageDto {
    name: String,
    #[serde(default)]
    defaults: Option<DefaultsDto>,
    #[serde(default)]
    enums: Vec<EnumDto>,
    #[serde(default)]
    typedefs: Vec<TypedefDto>,
    #[serde(default)]
    classes: Vec<ClassDto>,
    #[serde(default)]
    span: Option<[u32; 2]>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct DefaultsDto {
    visibility: Option<String>,
    use_primitives: Option<String>,
    signed: Option<String>,
    trimming: Option<String>,
    allow_ctrls: Option<String>,
    required: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EnumDto {
    name: String,
    #[serde(default)]
    values: Vec<String>,
    #[serde(default)]
    span: Option<[u32; 2]>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TypedefDto {
    name: String,
    #[serde(rename = "type")]
    data_type: DataTypeDto,
    #[serde(default)]
    span: Option<[u32; 2]>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClassDto {
    name: String,
    #[serde(default)]
    extends: Option<String>,
    #[serde(default, rename = "final")]
    is_final: bool,
    #[serde(default)]
    defaults: Option<DefaultsDto>,
    #[serde(default)]
    fields: Vec<FieldDto>,
    #[serde(default)]
    span: Option<[u32; 2]>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldDto {
    name: String,
    #[serde(rename = "type")]
    data_type: DataTypeDto,
    #[serde(default)]
    required: Option<String>,
    #[serde(default)]
    span: Option<[u32; 2]>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum DataTypeDto {
    Elementary(ElementaryDto),
    Object(String),
    Typedef(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ElementaryDto {
    name: String,
    #[serde(default)]
    length: u32,
    #[serde(default)]
    decimals: u32,
    #[serde(default)]
    signed: Option<String>,
    #[serde(default)]
    trimming: Option<String>,
    #[serde(default)]
    allow_ctrls: Option<String>,
    #[serde(default, rename = "enum")]
    enum_type: Option<String>,
    #[serde(default)]
    span: Option<[u32; 2]>,
}

/// Load a model from its JSON interchange form.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = json.len()))]
pub fn load_model(json: &str) -> Result<Model, LoadError> {
    let document: ModelDto = serde_json::from_str(json)?;
    let mut loader = Loader::default();
    for package in &document.packages {
        loader.declare_package(package)?;
    }
    for package in &document.packages {
        loader.define_package(package)?;
    }
    let model = loader.builder.finish()?;
    tracing::debug!(
        classes = model.classes().count(),
        typedefs = model.typedefs().count(),
        "model loaded"
    );
    Ok(model)
}

/// A declaration key: qualified package name and simple name.
type Key = (String, String);

#[derive(Default)]
struct Loader {
    builder: ModelBuilder,
    packages: FxHashMap<String, PackageId>,
    classes: FxHashMap<Key, ClassId>,
    typedefs: FxHashMap<Key, TypeDefId>,
    enums: FxHashMap<Key, EnumId>,
}

/// Insert a declaration, rejecting a second one under the same key.
fn declare<K: std::hash::Hash + Eq, V>(
    map: &mut FxHashMap<K, V>,
    key: K,
    value: V,
    kind: &'static str,
    name: &str,
) -> Result<(), LoadError> {
    if map.insert(key, value).is_some() {
        return Err(LoadError::Duplicate {
            kind,
            name: name.to_owned(),
        });
    }
    Ok(())
}

/// Split a reference into package and simple name.
fn split_reference<'a>(reference: &'a str, current: &'a str) -> (&'a str, &'a str) {
    reference.rsplit_once('.').unwrap_or((current, reference))
}

fn to_span(span: Option<[u32; 2]>) -> Option<Span> {
    span.map(|[start, end]| Span::new(start, end))
}

/// Parse an optional setting keyword.
fn setting<T: FromStr<Err = ()>>(
    key: &'static str,
    value: Option<&str>,
) -> Result<Option<T>, LoadError> {
    value
        .map(|value| {
            value.parse().map_err(|()| LoadError::InvalidSetting {
                key,
                value: value.to_owned(),
            })
        })
        .transpose()
}

fn field_defaults(dto: &DefaultsDto) -> Result<FieldDefaults, LoadError> {
    Ok(FieldDefaults {
        visibility: setting::<Visibility>("visibility", dto.visibility.as_deref())?,
        use_primitives: setting::<UsePrimitives>("use_primitives", dto.use_primitives.as_deref())?,
        signed: setting::<Signedness>("signed", dto.signed.as_deref())?,
        trimming: setting::<Trimming>("trimming", dto.trimming.as_deref())?,
        allow_ctrls: setting::<ControlChars>("allow_ctrls", dto.allow_ctrls.as_deref())?,
        required: setting::<Required>("required", dto.required.as_deref())?,
    })
}

impl Loader {
    fn set_span(&mut self, node: NodeRef, span_dto: Option<[u32; 2]>) {
        if let Some(span) = to_span(span_dto) {
            self.builder.set_span(node, span);
        }
    }

    /// First pass: every named declaration, so references may point forward.
    fn declare_package(&mut self, dto: &PackageDto) -> Result<(), LoadError> {
        let package = self.builder.package(&dto.name);
        declare(&mut self.packages, dto.name.clone(), package, "package", &dto.name)?;
        self.set_span(NodeRef::Package(package), dto.span);
        if let Some(defaults) = &dto.defaults {
            let defaults = field_defaults(defaults)?;
            self.builder.package_defaults(package, defaults);
        }

        for enum_dto in &dto.enums {
            let values: Vec<&str> = enum_dto.values.iter().map(String::as_str).collect();
            let id = self.builder.enumeration(package, &enum_dto.name, &values);
            let key = (dto.name.clone(), enum_dto.name.clone());
            declare(&mut self.enums, key, id, "enum", &enum_dto.name)?;
            self.set_span(NodeRef::Enum(id), enum_dto.span);
        }
        for typedef in &dto.typedefs {
            let id = self.builder.typedef(package, &typedef.name);
            let key = (dto.name.clone(), typedef.name.clone());
            declare(&mut self.typedefs, key, id, "typedef", &typedef.name)?;
            self.set_span(NodeRef::TypeDef(id), typedef.span);
        }
        for class in &dto.classes {
            let id = self.builder.class(package, &class.name);
            let key = (dto.name.clone(), class.name.clone());
            declare(&mut self.classes, key, id, "class", &class.name)?;
            self.set_span(NodeRef::Class(id), class.span);
        }
        Ok(())
    }

    /// Second pass: typedef bodies, inheritance and fields.
    fn define_package(&mut self, dto: &PackageDto) -> Result<(), LoadError> {
        let current = dto.name.as_str();

        for typedef in &dto.typedefs {
            let id = self.lookup_typedef(&typedef.name, current)?;
            let (kind, span) = self.data_type(&typedef.data_type, current)?;
            let data_type = self.builder.define_typedef(id, kind);
            self.set_span(NodeRef::DataType(data_type), span);
        }

        for class_dto in &dto.classes {
            let class = self.lookup_class(&class_dto.name, current)?;
            if let Some(parent) = &class_dto.extends {
                let parent = self.lookup_class(parent, current)?;
                self.builder.extends(class, parent);
            }
            self.builder.set_final(class, class_dto.is_final);
            if let Some(defaults) = &class_dto.defaults {
                let defaults = field_defaults(defaults)?;
                self.builder.class_defaults(class, defaults);
            }

            for field_dto in &class_dto.fields {
                let (kind, span) = self.data_type(&field_dto.data_type, current)?;
                let field = self.builder.field(class, &field_dto.name, kind);
                let data_type = self.builder.field_data_type(field);
                self.set_span(NodeRef::DataType(data_type), span);
                self.set_span(NodeRef::Field(field), field_dto.span);
                if let Some(required) =
                    setting::<Required>("required", field_dto.required.as_deref())?
                {
                    self.builder.field_required(field, required);
                }
            }
        }
        Ok(())
    }

    fn data_type(
        &self,
        dto: &DataTypeDto,
        current: &str,
    ) -> Result<(DataTypeKind, Option<[u32; 2]>), LoadError> {
        Ok(match dto {
            DataTypeDto::Elementary(elementary) => (
                DataTypeKind::Elementary(self.elementary(elementary, current)?),
                elementary.span,
            ),
            DataTypeDto::Object(reference) => (
                DataTypeKind::Object(self.lookup_class(reference, current)?),
                None,
            ),
            DataTypeDto::Typedef(reference) => (
                DataTypeKind::Reference(self.lookup_typedef(reference, current)?),
                None,
            ),
        })
    }

    fn elementary(
        &self,
        dto: &ElementaryDto,
        current: &str,
    ) -> Result<ElementaryDataType, LoadError> {
        let mut elementary = self
            .builder
            .elementary(&dto.name)
            .with_length(dto.length)
            .with_decimals(dto.decimals);
        if let Some(signed) = setting::<Signedness>("signed", dto.signed.as_deref())? {
            elementary = elementary.with_signed(signed);
        }
        if let Some(trimming) = setting::<Trimming>("trimming", dto.trimming.as_deref())? {
            elementary = elementary.with_trimming(trimming);
        }
        if let Some(allow) = setting::<ControlChars>("allow_ctrls", dto.allow_ctrls.as_deref())? {
            elementary = elementary.with_allow_ctrls(allow);
        }
        if let Some(reference) = &dto.enum_type {
            elementary = elementary.with_enum_type(self.lookup_enum(reference, current)?);
        }
        Ok(elementary)
    }

    fn lookup_class(&self, reference: &str, current: &str) -> Result<ClassId, LoadError> {
        let (package, name) = split_reference(reference, current);
        self.classes
            .get(&(package.to_owned(), name.to_owned()))
            .copied()
            .ok_or_else(|| LoadError::UnknownClass {
                name: reference.to_owned(),
                package: current.to_owned(),
            })
    }

    fn lookup_typedef(&self, reference: &str, current: &str) -> Result<TypeDefId, LoadError> {
        let (package, name) = split_reference(reference, current);
        self.typedefs
            .get(&(package.to_owned(), name.to_owned()))
            .copied()
            .ok_or_else(|| LoadError::UnknownTypedef {
                name: reference.to_owned(),
                package: current.to_owned(),
            })
    }

    fn lookup_enum(&self, reference: &str, current: &str) -> Result<EnumId, LoadError> {
        let (package, name) = split_reference(reference, current);
        self.enums
            .get(&(package.to_owned(), name.to_owned()))
            .copied()
            .ok_or_else(|| LoadError::UnknownEnum {
                name: reference.to_owned(),
                package: current.to_owned(),
            })
    }
}
