#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use super::*;
use crate::{load_model, GenerationRun};
use bon_check::CheckConfig;
use pretty_assertions::assert_eq;

const MODEL: &str = r#"{
    "packages": [{
        "name": "shop",
        "defaults": { "visibility": "public" },
        "typedefs": [
            { "name": "Money", "type": { "elementary": { "name": "decimal", "length": 12, "decimals": 2 } } }
        ],
        "classes": [
            { "name": "Customer" },
            { "name": "Order", "fields": [
                { "name": "amount", "type": { "typedef": "Money" } },
                { "name": "count", "type": { "elementary": { "name": "int" } } },
                { "name": "buyer", "type": { "object": "Customer" } },
                { "name": "mystery", "type": { "elementary": { "name": "complex" } } }
            ] }
        ]
    }]
}"#;

#[test]
fn test_render_text() {
    let model = load_model(MODEL).unwrap();
    let mut run = GenerationRun::new(&model, CheckConfig::default());
    let fields = run.resolved_fields();
    let text = render_text(&rows(&model, &fields));

    assert_eq!(
        text,
        "shop.Order.amount: decimal(12,2) (via shop.Money) -> BigDecimal \
         [visibility=public signed noTrim allowControlChars]\n\
         shop.Order.count: int(0,0) -> Integer \
         [visibility=public signed noTrim allowControlChars primitive]\n\
         shop.Order.buyer: object -> shop.Customer\n\
         shop.Order.mystery: unresolved\n"
    );
}

#[test]
fn test_rows_serialize_with_kind_tag() {
    let model = load_model(MODEL).unwrap();
    let mut run = GenerationRun::new(&model, CheckConfig::default());
    let fields = run.resolved_fields();
    let rows = rows(&model, &fields);

    let buyer = serde_json::to_value(&rows[2]).unwrap();
    assert_eq!(
        buyer,
        serde_json::json!({
            "field": "shop.Order.buyer",
            "target": { "kind": "object", "class": "shop.Customer" }
        })
    );
    let mystery = serde_json::to_value(&rows[3]).unwrap();
    assert_eq!(mystery["target"]["kind"], "unresolved");
}
