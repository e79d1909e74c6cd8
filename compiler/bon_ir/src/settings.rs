//! Cascading field settings.
//!
//! Each setting can be given on an elementary data type (signedness, trimming,
//! control characters only), in a class `defaults` block, or in a package
//! `defaults` block. The resolver picks the innermost one that is present.

use std::fmt;
use std::str::FromStr;

/// Declares a two-or-more-valued setting keyword enum with its DSL spellings.
macro_rules! setting_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$vmeta:meta])* $variant:ident => $kw:literal ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// All values, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The DSL keyword for this value.
            pub const fn keyword(self) -> &'static str {
                match self {
                    $($name::$variant => $kw,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.keyword())
            }
        }

        impl FromStr for $name {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .find(|value| value.keyword().eq_ignore_ascii_case(s))
                    .copied()
                    .ok_or(())
            }
        }
    };
}

setting_enum! {
    /// Visibility of generated members.
    Visibility {
        /// No explicit modifier (package visibility in the Java target).
        Default => "default",
        Private => "private",
        Protected => "protected",
        Public => "public",
    }
}

setting_enum! {
    /// Whether primitive-capable types may use a non-nullable representation.
    UsePrimitives {
        Primitives => "usePrimitives",
        Boxed => "useBoxed",
    }
}

setting_enum! {
    /// Numeric signedness.
    Signedness {
        Signed => "signed",
        Unsigned => "unsigned",
    }
}

setting_enum! {
    /// Whether string values are trimmed.
    Trimming {
        Trim => "trim",
        NoTrim => "noTrim",
    }
}

setting_enum! {
    /// Control character policy for string values.
    ControlChars {
        Allow => "allowControlChars",
        Forbid => "noControlChars",
    }
}

setting_enum! {
    /// Explicit required/optional marker.
    Required {
        Required => "required",
        Optional => "optional",
    }
}

/// A `defaults` block on a class or package. Every entry is optional.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct FieldDefaults {
    pub visibility: Option<Visibility>,
    pub use_primitives: Option<UsePrimitives>,
    pub signed: Option<Signedness>,
    pub trimming: Option<Trimming>,
    pub allow_ctrls: Option<ControlChars>,
    pub required: Option<Required>,
}

impl FieldDefaults {
    /// Check if no setting is present.
    pub fn is_empty(&self) -> bool {
        *self == FieldDefaults::default()
    }
}
