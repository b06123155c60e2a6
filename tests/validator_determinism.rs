//! Validator determinism
//!
//! Validation is deterministic: repeated runs over identical inputs produce
//! byte-identical reports, attribute order follows schema declaration order,
//! and the fan-out across attributes never reorders anything.

use serde_json::json;

use conform::validator::Validator;

fn validator(attrs: serde_json::Value) -> Validator {
    let mut validator = Validator::new();
    validator.initialize(&attrs, Vec::new()).unwrap();
    validator
}

#[tokio::test]
async fn repeated_validation_is_byte_identical() {
    let validator = validator(json!({
        "name": {"type": "string", "required": true},
        "age": {"type": "integer", "min": 0},
        "tags": {"type": ["string"]}
    }));
    let values = json!({"name": 7, "age": "old", "tags": ["ok", 3]});

    let first = validator
        .validate(&values, false)
        .await
        .map(|r| serde_json::to_string(&r.to_value()).unwrap());
    for _ in 0..10 {
        let next = validator
            .validate(&values, false)
            .await
            .map(|r| serde_json::to_string(&r.to_value()).unwrap());
        assert_eq!(next, first);
    }
}

#[tokio::test]
async fn report_attributes_follow_declaration_order() {
    let validator = validator(json!({
        "zeta": {"type": "integer", "required": true},
        "alpha": {"type": "integer", "required": true},
        "mid": {"type": "integer", "required": true}
    }));
    let report = validator.validate(&json!({}), false).await.unwrap();
    assert_eq!(
        report.attributes().collect::<Vec<_>>(),
        vec!["zeta", "alpha", "mid"]
    );
}

#[tokio::test]
async fn within_attribute_order_is_rule_declaration_order() {
    let validator = validator(json!({
        "code": {"type": "string", "length": 4, "pattern": "^[A-Z]+$", "in": ["ABCD"]}
    }));
    let report = validator
        .validate(&json!({"code": "abc"}), false)
        .await
        .unwrap();
    let rules: Vec<_> = report
        .violations("code")
        .unwrap()
        .iter()
        .map(|v| v.rule.as_str())
        .collect();
    assert_eq!(rules, vec!["length", "pattern", "in"]);
}

#[tokio::test]
async fn success_is_a_sentinel_not_an_empty_report() {
    let validator = validator(json!({"name": {"type": "string"}}));
    let outcome = validator.validate(&json!({"name": "Ann"}), false).await;
    // No report at all; an empty report cannot exist.
    assert!(outcome.is_none());
}

#[tokio::test]
async fn only_failing_attributes_appear_in_the_report() {
    let validator = validator(json!({
        "good": {"type": "string"},
        "bad": {"type": "integer"}
    }));
    let report = validator
        .validate(&json!({"good": "x", "bad": "y"}), false)
        .await
        .unwrap();
    assert_eq!(report.attributes().collect::<Vec<_>>(), vec!["bad"]);
    assert!(report.violations("good").is_none());
}
