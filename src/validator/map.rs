//! Attribute validation map construction
//!
//! Turns an external attribute-definition map into per-attribute rule sets:
//! schema-only keys are stripped (they instruct the model layer, not the
//! engine) and the convenience `enum` key is rewritten to the `in` rule.

use serde_json::{Map, Value};

use crate::schema::{RuleSet, SchemaResult, TypeDescriptor, TYPE_KEY};

/// Keys consumed by the attribute-definition source, never by validation.
const SCHEMA_ONLY_KEYS: [&str; 6] = [
    "defaultsTo",
    "primaryKey",
    "autoIncrement",
    "unique",
    "index",
    "columnName",
];

/// Builds the per-attribute rule-set map, in declaration order.
pub(super) fn build_attribute_map(
    attrs: &Map<String, Value>,
) -> SchemaResult<Vec<(String, RuleSet)>> {
    let mut attributes = Vec::with_capacity(attrs.len());
    for (name, definition) in attrs {
        attributes.push((name.clone(), sanitized_ruleset(name, definition)?));
    }
    Ok(attributes)
}

fn sanitized_ruleset(attribute: &str, definition: &Value) -> SchemaResult<RuleSet> {
    let Value::Object(entries) = definition else {
        // Shorthand definitions ("string", ["integer"]) carry nothing to strip.
        return RuleSet::from_value(definition, attribute);
    };
    let mut ruleset = RuleSet::default();
    for (key, arg) in entries {
        if SCHEMA_ONLY_KEYS.contains(&key.as_str()) {
            continue;
        }
        if key == TYPE_KEY {
            ruleset.type_desc = Some(TypeDescriptor::from_value(arg, attribute)?);
        } else if key == "enum" {
            ruleset.rules.push(("in".to_string(), arg.clone()));
        } else {
            ruleset.rules.push((key.clone(), arg.clone()));
        }
    }
    Ok(ruleset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(literal: Value) -> Map<String, Value> {
        literal.as_object().cloned().unwrap()
    }

    #[test]
    fn test_schema_only_keys_are_stripped() {
        let map = build_attribute_map(&attrs(json!({
            "id": {
                "type": "integer",
                "primaryKey": true,
                "autoIncrement": true,
                "unique": true,
                "index": true,
                "columnName": "user_id",
                "defaultsTo": 0,
                "min": 1
            }
        })))
        .unwrap();
        let (_, ruleset) = &map[0];
        assert_eq!(ruleset.rules, vec![("min".to_string(), json!(1))]);
    }

    #[test]
    fn test_enum_rewrites_to_in() {
        let map = build_attribute_map(&attrs(json!({
            "state": {"type": "string", "enum": ["on", "off"]}
        })))
        .unwrap();
        let (_, ruleset) = &map[0];
        assert_eq!(
            ruleset.rules,
            vec![("in".to_string(), json!(["on", "off"]))]
        );
    }

    #[test]
    fn test_declaration_order_is_preserved() {
        let map = build_attribute_map(&attrs(json!({
            "zeta": "string",
            "alpha": "string",
            "mid": "string"
        })))
        .unwrap();
        let names: Vec<_> = map.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_shorthand_definitions() {
        let map = build_attribute_map(&attrs(json!({"tags": ["string"]}))).unwrap();
        let (_, ruleset) = &map[0];
        assert!(matches!(
            ruleset.type_desc,
            Some(TypeDescriptor::ArrayOf(_))
        ));
    }

    #[test]
    fn test_bad_descriptor_surfaces_parse_error() {
        let err = build_attribute_map(&attrs(json!({"age": {"type": 42}}))).unwrap_err();
        assert!(format!("{}", err).contains("age"));
    }
}
