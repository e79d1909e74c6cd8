#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use bon_ir::{
    ClassId, DataTypeKind, FieldDefaults, FieldId, ModelBuilder, PackageId, Required, Span,
    Trimming, UsePrimitives, Visibility,
};
use pretty_assertions::assert_eq;

use super::*;
use crate::elementary::TABLE;

/// A package `p` with one class `C` to hang fields on.
fn scaffold() -> (ModelBuilder, PackageId, ClassId) {
    let mut builder = ModelBuilder::new();
    let package = builder.package("p");
    let class = builder.class(package, "C");
    (builder, package, class)
}

fn field_type(model: &Model, field: FieldId) -> DataTypeId {
    model.field(field).data_type
}

#[test]
fn test_every_table_entry_resolves_to_a_representation() {
    let (mut builder, package, class) = scaffold();
    let status = builder.enumeration(package, "Status", &["open", "closed"]);
    let fields: Vec<FieldId> = TABLE
        .iter()
        .enumerate()
        .map(|(i, (key, _))| {
            let mut elementary = builder.elementary(key).with_length(10);
            if *key == "enum" {
                elementary = elementary.with_enum_type(status);
            }
            builder.field(class, &format!("f{i}"), DataTypeKind::Elementary(elementary))
        })
        .collect();
    let model = builder.finish().unwrap();

    let mut cache = ResolutionCache::new();
    for field in fields {
        let descriptor = cache.resolve(&model, field_type(&model, field)).unwrap();
        assert!(descriptor.representation().is_some());
        assert!(descriptor.elementary_kind().is_some());
    }
    assert_eq!(cache.len(), TABLE.len());
}

#[test]
fn test_order_amount_scenario() {
    let mut builder = ModelBuilder::new();
    let p = builder.package("P");
    builder.package_defaults(
        p,
        FieldDefaults {
            trimming: Some(Trimming::Trim),
            ..FieldDefaults::default()
        },
    );
    let order = builder.class(p, "Order");
    let decimal = builder.elementary("decimal").with_length(12).with_decimals(2);
    let amount = builder.field(order, "amount", DataTypeKind::Elementary(decimal));
    let model = builder.finish().unwrap();

    let mut cache = ResolutionCache::new();
    let descriptor = cache.resolve(&model, field_type(&model, amount)).unwrap();
    assert_eq!(descriptor.effective_trim(), Some(true));
    assert_eq!(descriptor.effective_signed(), Some(true));
    assert_eq!(descriptor.effective_allow_control_chars(), Some(true));
    assert_eq!(descriptor.visibility(), Some(Visibility::Default));
    assert_eq!(descriptor.default_required(), None);
    assert_eq!(descriptor.representation(), Some(&Representation::BigDecimal));
    assert_eq!(descriptor.elementary_kind(), Some(ElementaryKind::Decimal));
    assert!(!descriptor.is_primitive_capable());
}

#[test]
fn test_resolve_is_memoized() {
    let (mut builder, _, class) = scaffold();
    let int = builder.elementary("int");
    let count = builder.field(class, "count", DataTypeKind::Elementary(int));
    let model = builder.finish().unwrap();
    let id = field_type(&model, count);

    let mut cache = ResolutionCache::new();
    let first: *const Descriptor = cache.resolve(&model, id).unwrap();
    let second: *const Descriptor = cache.resolve(&model, id).unwrap();
    assert!(std::ptr::eq(first, second));
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(id).map(|d| d.origin), Some(id));
}

#[test]
fn test_identical_declarations_are_distinct_entries() {
    let (mut builder, _, class) = scaffold();
    let a = builder.field(class, "a", DataTypeKind::Elementary(builder.elementary("long")));
    let b = builder.field(class, "b", DataTypeKind::Elementary(builder.elementary("long")));
    let model = builder.finish().unwrap();

    let mut cache = ResolutionCache::new();
    let a = cache.resolve(&model, field_type(&model, a)).unwrap().origin;
    let b = cache.resolve(&model, field_type(&model, b)).unwrap().origin;
    assert_ne!(a, b);
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_clear_forgets_everything() {
    let (mut builder, _, class) = scaffold();
    let flag = builder.field(class, "flag", DataTypeKind::Elementary(builder.elementary("boolean")));
    let model = builder.finish().unwrap();
    let id = field_type(&model, flag);

    let mut cache = ResolutionCache::new();
    cache.resolve(&model, id).unwrap();
    cache.clear();
    assert!(cache.is_empty());
    assert!(cache.get(id).is_none());
    assert!(cache.resolve(&model, id).is_ok());
}

#[test]
fn test_naming_fixups_share_entries() {
    let (mut builder, _, class) = scaffold();
    let upper = builder.field(class, "a", DataTypeKind::Elementary(builder.elementary("Int")));
    let lower = builder.field(class, "b", DataTypeKind::Elementary(builder.elementary("integer")));
    let boxed_char = builder.field(class, "c", DataTypeKind::Elementary(builder.elementary("Char")));
    let prim_char =
        builder.field(class, "d", DataTypeKind::Elementary(builder.elementary("character")));
    let model = builder.finish().unwrap();

    let mut cache = ResolutionCache::new();
    let mut info = |field| {
        cache
            .resolve(&model, field_type(&model, field))
            .unwrap()
            .elementary()
            .cloned()
            .unwrap()
    };
    let upper = info(upper);
    let lower = info(lower);
    assert_eq!(upper.kind, lower.kind);
    assert_eq!(upper.canonical_name, "Integer");
    assert_eq!(lower.canonical_name, "int");
    assert!(upper.was_declared_upper_case);
    assert!(!upper.primitive_capable);
    assert!(lower.primitive_capable);

    let boxed_char = info(boxed_char);
    let prim_char = info(prim_char);
    assert_eq!(boxed_char.kind, prim_char.kind);
    assert_eq!(boxed_char.representation, Representation::Character);
    assert_eq!(prim_char.canonical_name, "char");
}

#[test]
fn test_use_boxed_disables_primitives() {
    let (mut builder, _, class) = scaffold();
    builder.class_defaults(
        class,
        FieldDefaults {
            use_primitives: Some(UsePrimitives::Boxed),
            ..FieldDefaults::default()
        },
    );
    let count = builder.field(class, "count", DataTypeKind::Elementary(builder.elementary("int")));
    let model = builder.finish().unwrap();

    let mut cache = ResolutionCache::new();
    let descriptor = cache.resolve(&model, field_type(&model, count)).unwrap();
    assert!(!descriptor.is_primitive_capable());
}

#[test]
fn test_string_subtypes_with_validation() {
    let (mut builder, _, class) = scaffold();
    let code = builder.elementary("uppercase").with_length(3);
    let code = builder.field(class, "code", DataTypeKind::Elementary(code));
    let mail = builder.elementary("lowercase").with_length(80);
    let mail = builder.field(class, "mail", DataTypeKind::Elementary(mail));
    let text = builder.elementary("ascii").with_length(80);
    let text = builder.field(class, "text", DataTypeKind::Elementary(text));
    let model = builder.finish().unwrap();

    let mut cache = ResolutionCache::new();
    for (field, expected) in [(code, true), (mail, true), (text, false)] {
        let descriptor = cache.resolve(&model, field_type(&model, field)).unwrap();
        assert_eq!(descriptor.is_string_subtype_with_validation(), expected);
        assert_eq!(descriptor.representation(), Some(&Representation::String));
    }
}

#[test]
fn test_enum_representation_is_enum_name() {
    let (mut builder, package, class) = scaffold();
    let status = builder.enumeration(package, "OrderStatus", &["open", "shipped"]);
    let elementary = builder.elementary("enum").with_enum_type(status);
    let field = builder.field(class, "status", DataTypeKind::Elementary(elementary));
    let model = builder.finish().unwrap();

    let mut cache = ResolutionCache::new();
    let descriptor = cache.resolve(&model, field_type(&model, field)).unwrap();
    assert_eq!(
        descriptor.representation(),
        Some(&Representation::Enum("OrderStatus".to_owned()))
    );
    assert_eq!(descriptor.elementary().and_then(|i| i.enum_type), Some(status));
}

#[test]
fn test_enum_without_reference_fails() {
    let (mut builder, _, class) = scaffold();
    let field = builder.field(class, "status", DataTypeKind::Elementary(builder.elementary("enum")));
    let model = builder.finish().unwrap();

    let mut cache = ResolutionCache::new();
    let error = cache.resolve(&model, field_type(&model, field)).unwrap_err();
    assert!(matches!(error, ResolutionError::MissingEnumType { ref name, .. } if name == "enum"));
    assert!(cache.is_empty());
}

#[test]
fn test_unmapped_type_fails() {
    let (mut builder, _, class) = scaffold();
    let field = builder.field(class, "amount", DataTypeKind::Elementary(builder.elementary("money")));
    let span = Span::new(30, 35);
    let data_type = builder.field_data_type(field);
    builder.set_span(bon_ir::NodeRef::DataType(data_type), span);
    let model = builder.finish().unwrap();

    let mut cache = ResolutionCache::new();
    assert_eq!(
        cache.resolve(&model, data_type).unwrap_err(),
        ResolutionError::UnmappedType {
            name: "money".to_owned(),
            span,
        }
    );
}

#[test]
fn test_missing_package_fails() {
    let mut builder = ModelBuilder::new();
    let orphan = builder.detached_class("Orphan");
    let field = builder.field(orphan, "id", DataTypeKind::Elementary(builder.elementary("long")));
    let model = builder.finish().unwrap();

    let mut cache = ResolutionCache::new();
    let error = cache.resolve(&model, field_type(&model, field)).unwrap_err();
    assert!(matches!(error, ResolutionError::MissingPackage { .. }));
}

#[test]
fn test_object_reference_has_no_attributes() {
    let (mut builder, package, class) = scaffold();
    let address = builder.class(package, "Address");
    let field = builder.field(class, "address", DataTypeKind::Object(address));
    let model = builder.finish().unwrap();

    let mut cache = ResolutionCache::new();
    let descriptor = cache.resolve(&model, field_type(&model, field)).unwrap();
    assert_eq!(descriptor.object_class(), Some(address));
    assert_eq!(descriptor.elementary_kind(), None);
    assert_eq!(descriptor.representation(), None);
    assert_eq!(descriptor.effective_signed(), None);
    assert!(!descriptor.is_primitive_capable());
}

#[test]
fn test_typedef_copies_resolved_fields() {
    let (mut builder, package, class) = scaffold();
    builder.package_defaults(
        package,
        FieldDefaults {
            required: Some(Required::Required),
            ..FieldDefaults::default()
        },
    );
    let money = builder.typedef(package, "Money");
    let decimal = builder.elementary("decimal").with_length(18).with_decimals(6);
    let money_type = builder.define_typedef(money, DataTypeKind::Elementary(decimal));
    let price = builder.field(class, "price", DataTypeKind::Reference(money));
    let model = builder.finish().unwrap();

    let mut cache = ResolutionCache::new();
    let direct = cache.resolve(&model, money_type).unwrap().clone();
    let via_typedef = cache.resolve(&model, field_type(&model, price)).unwrap().clone();

    assert_eq!(via_typedef.typedef, Some(money));
    assert_eq!(via_typedef.origin, field_type(&model, price));
    assert_eq!(direct.typedef, None);
    assert_eq!(via_typedef.target, direct.target);
    assert_eq!(via_typedef.default_required(), Some(Required::Required));
}

#[test]
fn test_self_referencing_typedef_is_a_cycle() {
    let (mut builder, package, class) = scaffold();
    let a = builder.typedef(package, "A");
    builder.define_typedef(a, DataTypeKind::Reference(a));
    let field = builder.field(class, "x", DataTypeKind::Reference(a));
    let model = builder.finish().unwrap();

    let mut cache = ResolutionCache::new();
    let error = cache.resolve(&model, field_type(&model, field)).unwrap_err();
    assert_eq!(
        error,
        ResolutionError::RecursiveTypedef {
            name: "p.A".to_owned(),
            span: model.typedef(a).span,
        }
    );
}

#[test]
fn test_mutual_typedef_cycle_names_revisited_typedef() {
    let (mut builder, package, class) = scaffold();
    let a = builder.typedef(package, "A");
    let b = builder.typedef(package, "B");
    builder.define_typedef(a, DataTypeKind::Reference(b));
    builder.define_typedef(b, DataTypeKind::Reference(a));
    let field = builder.field(class, "x", DataTypeKind::Reference(a));
    let model = builder.finish().unwrap();

    let mut cache = ResolutionCache::new();
    let error = cache.resolve(&model, field_type(&model, field)).unwrap_err();
    assert!(matches!(
        error,
        ResolutionError::RecursiveTypedef { ref name, .. } if name == "p.B"
    ));
}

#[test]
fn test_failed_resolution_leaves_no_markers() {
    let (mut builder, package, class) = scaffold();
    let a = builder.typedef(package, "A");
    let b = builder.typedef(package, "B");
    builder.define_typedef(a, DataTypeKind::Reference(b));
    builder.define_typedef(b, DataTypeKind::Reference(a));
    let x = builder.field(class, "x", DataTypeKind::Reference(a));
    let y = builder.field(class, "y", DataTypeKind::Reference(a));
    let model = builder.finish().unwrap();

    let mut cache = ResolutionCache::new();
    let first = cache.resolve(&model, field_type(&model, x)).unwrap_err();
    let again = cache.resolve(&model, field_type(&model, x)).unwrap_err();
    let other = cache.resolve(&model, field_type(&model, y)).unwrap_err();
    assert_eq!(first, again);
    assert_eq!(first, other);
    assert!(cache.is_empty());
}

#[test]
fn test_cycle_behind_valid_prefix() {
    // x -> A -> B -> C -> B
    let (mut builder, package, class) = scaffold();
    let a = builder.typedef(package, "A");
    let b = builder.typedef(package, "B");
    let c = builder.typedef(package, "C");
    builder.define_typedef(a, DataTypeKind::Reference(b));
    builder.define_typedef(b, DataTypeKind::Reference(c));
    builder.define_typedef(c, DataTypeKind::Reference(b));
    let x = builder.field(class, "x", DataTypeKind::Reference(a));
    let model = builder.finish().unwrap();

    let mut cache = ResolutionCache::new();
    let error = cache.resolve(&model, field_type(&model, x)).unwrap_err();
    assert!(matches!(error, ResolutionError::RecursiveTypedef { .. }));
}

#[test]
fn test_deep_typedef_chain_terminates() {
    let (mut builder, package, class) = scaffold();
    let depth = 5_000;
    let typedefs: Vec<_> = (0..depth)
        .map(|i| builder.typedef(package, &format!("T{i}")))
        .collect();
    for pair in typedefs.windows(2) {
        builder.define_typedef(pair[0], DataTypeKind::Reference(pair[1]));
    }
    let last = typedefs[depth - 1];
    builder.define_typedef(last, DataTypeKind::Elementary(builder.elementary("short")));
    let field = builder.field(class, "s", DataTypeKind::Reference(typedefs[0]));
    let model = builder.finish().unwrap();

    let mut cache = ResolutionCache::new();
    let descriptor = cache.resolve(&model, field_type(&model, field)).unwrap();
    assert_eq!(descriptor.representation(), Some(&Representation::Short));
    assert_eq!(cache.len(), depth + 1);
}

// === Property tests ===

mod proptest_chains {
    use bon_ir::{
        ControlChars, DataTypeKind, FieldDefaults, ModelBuilder, Signedness, Trimming,
        UsePrimitives, Visibility,
    };
    use proptest::prelude::*;

    use super::super::ResolutionCache;
    use crate::elementary::TABLE;

    fn defaults() -> impl Strategy<Value = FieldDefaults> {
        (
            proptest::option::of(proptest::sample::select(Visibility::ALL)),
            proptest::option::of(proptest::sample::select(UsePrimitives::ALL)),
            proptest::option::of(proptest::sample::select(Signedness::ALL)),
            proptest::option::of(proptest::sample::select(Trimming::ALL)),
            proptest::option::of(proptest::sample::select(ControlChars::ALL)),
        )
            .prop_map(
                |(visibility, use_primitives, signed, trimming, allow_ctrls)| FieldDefaults {
                    visibility,
                    use_primitives,
                    signed,
                    trimming,
                    allow_ctrls,
                    required: None,
                },
            )
    }

    proptest! {
        #[test]
        fn finite_chain_matches_direct_resolution(
            length in 1usize..24,
            key in proptest::sample::select(
                TABLE.iter().map(|(key, _)| *key).filter(|key| *key != "enum").collect::<Vec<_>>()
            ),
            package_defaults in defaults(),
            class_defaults in defaults(),
        ) {
            let mut builder = ModelBuilder::new();
            let package = builder.package("p");
            builder.package_defaults(package, package_defaults);
            let class = builder.class(package, "C");
            builder.class_defaults(class, class_defaults);

            let typedefs: Vec<_> = (0..length)
                .map(|i| builder.typedef(package, &format!("T{i}")))
                .collect();
            for pair in typedefs.windows(2) {
                builder.define_typedef(pair[0], DataTypeKind::Reference(pair[1]));
            }
            let terminal = builder.define_typedef(
                typedefs[length - 1],
                DataTypeKind::Elementary(builder.elementary(key).with_length(4)),
            );
            let field = builder.field(class, "f", DataTypeKind::Reference(typedefs[0]));
            let model = builder.finish().unwrap();

            let mut chained = ResolutionCache::new();
            let via_chain = chained
                .resolve(&model, model.field(field).data_type)
                .unwrap()
                .clone();
            let mut fresh = ResolutionCache::new();
            let direct = fresh.resolve(&model, terminal).unwrap().clone();

            prop_assert_eq!(via_chain.target, direct.target);
            prop_assert_eq!(via_chain.typedef, Some(typedefs[0]));
        }

        #[test]
        fn cyclic_chain_is_rejected(length in 1usize..16, entry in 0usize..16) {
            let mut builder = ModelBuilder::new();
            let package = builder.package("p");
            let class = builder.class(package, "C");
            let typedefs: Vec<_> = (0..length)
                .map(|i| builder.typedef(package, &format!("T{i}")))
                .collect();
            for (i, &typedef) in typedefs.iter().enumerate() {
                let next = typedefs[(i + 1) % length];
                builder.define_typedef(typedef, DataTypeKind::Reference(next));
            }
            let field = builder.field(class, "f", DataTypeKind::Reference(typedefs[entry % length]));
            let model = builder.finish().unwrap();

            let mut cache = ResolutionCache::new();
            let result = cache.resolve(&model, model.field(field).data_type);
            prop_assert!(
                matches!(result, Err(crate::ResolutionError::RecursiveTypedef { .. })),
                "cycle of length {} was not detected",
                length
            );
            prop_assert!(cache.is_empty());
        }
    }
}
