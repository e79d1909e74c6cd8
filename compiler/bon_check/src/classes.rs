//! Class rules.

use bon_diagnostic::{Diagnostic, ErrorCode};
use bon_ir::ClassId;
use bon_types::naming::{cap_initial, starts_upper_case};

use crate::Checker;

impl Checker<'_> {
    pub(crate) fn check_class(&mut self, id: ClassId) {
        let model = self.model;
        let class = model.class(id);
        let name = model.name(class.name);

        if !starts_upper_case(name) {
            let fixed = cap_initial(name);
            self.report(
                Diagnostic::error(ErrorCode::E1001)
                    .with_message(format!(
                        "class name `{name}` should start with an upper case letter"
                    ))
                    .with_label(class.span, "class declared here")
                    .with_rename(format!("rename the class to `{fixed}`"), fixed),
            );
        }

        if let Some(parent) = class.extends {
            let parent_def = model.class(parent);
            if parent_def.is_final {
                let parent_name = model.qualified_class_name(parent);
                self.report(
                    Diagnostic::error(ErrorCode::E1002)
                        .with_message(format!(
                            "class `{name}` may not extend final class `{parent_name}`"
                        ))
                        .with_label(class.span, format!("`{name}` extends `{parent_name}`"))
                        .with_secondary_label(parent_def.span, "declared final here"),
                );
            }
        }
    }
}
