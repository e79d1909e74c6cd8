//! Length and precision plausibility of elementary types.

use bon_diagnostic::{Diagnostic, ErrorCode};
use bon_ir::{DataTypeKind, Span};
use bon_types::naming::canonicalize;
use bon_types::{ElementaryKind, LengthRule};

use crate::Checker;

const GIGABYTE: u32 = 1024 * 1024 * 1024;

impl Checker<'_> {
    /// Check every elementary type, in fields and typedefs alike.
    ///
    /// Unknown type names are skipped; resolution reports them.
    pub(crate) fn check_lengths(&mut self) {
        let model = self.model;
        for (_, data_type) in model.data_types() {
            let DataTypeKind::Elementary(elementary) = &data_type.kind else {
                continue;
            };
            let declared = model.name(elementary.name);
            let Some(kind) = ElementaryKind::lookup(&canonicalize(declared).name) else {
                continue;
            };
            let (length, decimals) = (elementary.length, elementary.decimals);
            let span = data_type.span;

            match kind.length_rule() {
                LengthRule::Exempt => {}
                LengthRule::FractionalSeconds => {
                    if length > 3 {
                        self.length_error(
                            ErrorCode::E1010,
                            span,
                            "fractional seconds must be at least 0 and at most 3 digits",
                            format!("`{declared}({length})`"),
                        );
                    }
                }
                LengthRule::NumberMantissa => {
                    if length == 0 || length > 9 {
                        self.length_error(
                            ErrorCode::E1011,
                            span,
                            "mantissa must be at least 1 and at most 9",
                            format!("`{declared}({length})`"),
                        );
                    }
                }
                LengthRule::DecimalMantissa => {
                    if length == 0 || length > 18 {
                        self.length_error(
                            ErrorCode::E1012,
                            span,
                            "mantissa must be at least 1 and at most 18",
                            format!("`{declared}({length},{decimals})`"),
                        );
                    }
                    if decimals > length {
                        self.length_error(
                            ErrorCode::E1013,
                            span,
                            "decimals may not exceed the length of the mantissa",
                            format!("`{declared}({length},{decimals})`"),
                        );
                    }
                }
                LengthRule::Size => {
                    if length == 0 || length > GIGABYTE {
                        self.length_error(
                            ErrorCode::E1014,
                            span,
                            "field size must be at least 1 and at most 1 GB",
                            format!("`{declared}({length})`"),
                        );
                    }
                }
            }
        }
    }

    fn length_error(&mut self, code: ErrorCode, span: Span, message: &str, declared: String) {
        self.report(
            Diagnostic::error(code)
                .with_message(message)
                .with_label(span, format!("declared as {declared}")),
        );
    }
}
