//! The per-field descriptor table printed by `bonc resolve`.

use std::fmt::Write;

use bon_ir::Model;
use bon_types::{Descriptor, ResolvedTarget};
use serde::Serialize;

use crate::ResolvedField;

/// One row of the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DescriptorRow {
    /// `package.Class.field`
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typedef: Option<String>,
    pub target: TargetRow,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TargetRow {
    Elementary {
        name: String,
        representation: String,
        length: u32,
        decimals: u32,
        primitive: bool,
        validated_subtype: bool,
        signed: bool,
        trim: bool,
        allow_control_chars: bool,
        visibility: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        required: Option<String>,
    },
    Object {
        class: String,
    },
    Unresolved,
}

impl DescriptorRow {
    pub fn new(model: &Model, resolved: &ResolvedField<'_>) -> Self {
        let field = model.field(resolved.field);
        let name = format!(
            "{}.{}",
            model.qualified_class_name(field.class),
            model.name(field.name)
        );
        let typedef = resolved
            .descriptor
            .and_then(|descriptor| descriptor.typedef)
            .map(|typedef| model.qualified_typedef_name(typedef));
        DescriptorRow {
            field: name,
            typedef,
            target: resolved
                .descriptor
                .map_or(TargetRow::Unresolved, |descriptor| target(model, descriptor)),
        }
    }
}

fn target(model: &Model, descriptor: &Descriptor) -> TargetRow {
    match &descriptor.target {
        ResolvedTarget::Object(class) => TargetRow::Object {
            class: model.qualified_class_name(*class),
        },
        ResolvedTarget::Elementary(info) => TargetRow::Elementary {
            name: info.canonical_name.clone(),
            representation: info.representation.to_string(),
            length: info.length,
            decimals: info.decimals,
            primitive: info.primitive_capable,
            validated_subtype: info.string_subtype_with_validation,
            signed: info.attributes.signed,
            trim: info.attributes.trim,
            allow_control_chars: info.attributes.allow_control_chars,
            visibility: info.attributes.visibility.to_string(),
            required: info.attributes.default_required.map(|r| r.to_string()),
        },
    }
}

pub fn rows(model: &Model, fields: &[ResolvedField<'_>]) -> Vec<DescriptorRow> {
    fields
        .iter()
        .map(|resolved| DescriptorRow::new(model, resolved))
        .collect()
}

/// Human readable rendering, one line per field.
pub fn render_text(rows: &[DescriptorRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let via = row
            .typedef
            .as_deref()
            .map(|typedef| format!(" (via {typedef})"))
            .unwrap_or_default();
        let _ = match &row.target {
            TargetRow::Elementary {
                name,
                representation,
                length,
                decimals,
                primitive,
                validated_subtype,
                signed,
                trim,
                allow_control_chars,
                visibility,
                required,
            } => {
                let mut flags = vec![format!("visibility={visibility}")];
                flags.push(if *signed { "signed" } else { "unsigned" }.to_owned());
                flags.push(if *trim { "trim" } else { "noTrim" }.to_owned());
                flags.push(
                    if *allow_control_chars {
                        "allowControlChars"
                    } else {
                        "noControlChars"
                    }
                    .to_owned(),
                );
                if *primitive {
                    flags.push("primitive".to_owned());
                }
                if *validated_subtype {
                    flags.push("validated".to_owned());
                }
                if let Some(required) = required {
                    flags.push(format!("default={required}"));
                }
                writeln!(
                    out,
                    "{}: {name}({length},{decimals}){via} -> {representation} [{}]",
                    row.field,
                    flags.join(" ")
                )
            }
            TargetRow::Object { class } => writeln!(out, "{}: object{via} -> {class}", row.field),
            TargetRow::Unresolved => writeln!(out, "{}: unresolved{via}", row.field),
        };
    }
    out
}

#[cfg(test)]
mod tests;
