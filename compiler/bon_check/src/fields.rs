//! Field rules.

use bon_diagnostic::{Diagnostic, ErrorCode};
use bon_ir::{ClassId, DataTypeKind, FieldId, Model, Name, Required};
use bon_types::naming::{cap_initial, starts_lower_case, uncap_initial};

use crate::Checker;

/// First field of `class` named `name`, other than `except`.
fn field_named(model: &Model, class: ClassId, name: Name, except: FieldId) -> Option<FieldId> {
    model
        .class(class)
        .fields
        .iter()
        .copied()
        .find(|&field| field != except && model.field(field).name == name)
}

impl Checker<'_> {
    pub(crate) fn check_field(&mut self, id: FieldId) {
        self.check_field_name(id);
        self.check_field_unique(id);
        self.check_field_shadowing(id);
        self.check_required(id);
        self.check_field_type(id);
    }

    fn check_field_name(&mut self, id: FieldId) {
        let model = self.model;
        let field = model.field(id);
        let name = model.name(field.name);
        if !starts_lower_case(name) {
            let fixed = uncap_initial(name);
            self.report(
                Diagnostic::error(ErrorCode::E1003)
                    .with_message(format!(
                        "field name `{name}` should start with a lower case letter"
                    ))
                    .with_label(field.span, "field declared here")
                    .with_rename(format!("rename the field to `{fixed}`"), fixed),
            );
        }
    }

    /// Every occurrence of a repeated name is reported.
    fn check_field_unique(&mut self, id: FieldId) {
        let model = self.model;
        let field = model.field(id);
        let Some(other) = field_named(model, field.class, field.name, id) else {
            return;
        };
        let name = model.name(field.name);
        let class = model.name(model.class(field.class).name);
        self.report(
            Diagnostic::error(ErrorCode::E1004)
                .with_message(format!("field name `{name}` is not unique within class `{class}`"))
                .with_label(field.span, "duplicate field")
                .with_secondary_label(model.field(other).span, "also declared here"),
        );
    }

    /// No ancestor along the `extends` chain may declare the same name.
    fn check_field_shadowing(&mut self, id: FieldId) {
        let model = self.model;
        let field = model.field(id);
        let name = model.name(field.name);

        for ancestor in model.superclasses(field.class) {
            let Some(inherited) = field_named(model, ancestor, field.name, id) else {
                continue;
            };
            let ancestor_name = model.qualified_class_name(ancestor);
            self.report(
                Diagnostic::error(ErrorCode::E1005)
                    .with_message(format!(
                        "field `{name}` occurs in extended class `{ancestor_name}` already"
                    ))
                    .with_label(field.span, "shadows an inherited field")
                    .with_secondary_label(
                        model.field(inherited).span,
                        format!("declared in `{ancestor_name}` here"),
                    )
                    .with_note("shadowing is not allowed in bonaparte"),
            );
        }
    }

    fn check_required(&mut self, id: FieldId) {
        let model = self.model;
        let field = model.field(id);
        let Some(required) = field.required else {
            return;
        };
        let name = model.name(field.name);

        match &model.data_type(field.data_type).kind {
            DataTypeKind::Reference(typedef) => {
                let typedef = model.qualified_typedef_name(*typedef);
                self.report(
                    Diagnostic::error(ErrorCode::E1006)
                        .with_message(format!(
                            "`{required}` is not allowed on field `{name}` of typedef `{typedef}`"
                        ))
                        .with_label(field.span, format!("`{required}` given here"))
                        .with_note("the typedef fixes whether the field is required"),
                );
            }
            DataTypeKind::Elementary(elementary)
                if required == Required::Optional
                    && starts_lower_case(model.name(elementary.name)) =>
            {
                let type_name = model.name(elementary.name);
                let boxed = cap_initial(type_name);
                self.report(
                    Diagnostic::error(ErrorCode::E1007)
                        .with_message(format!(
                            "`optional` conflicts with the implicit `required` of `{type_name}`"
                        ))
                        .with_label(field.span, format!("field `{name}` is marked optional"))
                        .with_rename(
                            format!("use the capitalized type `{boxed}` for a nullable field"),
                            boxed,
                        ),
                );
            }
            DataTypeKind::Elementary(_) | DataTypeKind::Object(_) => {}
        }
    }

    /// Resolution failures are attributed to the field that needed the type.
    fn check_field_type(&mut self, id: FieldId) {
        let model = self.model;
        let field = model.field(id);
        if let Err(error) = self.cache.resolve(model, field.data_type) {
            let name = model.name(field.name);
            let diagnostic = error
                .to_diagnostic()
                .with_secondary_label(field.span, format!("type of field `{name}`"));
            self.report(diagnostic);
        }
    }
}
