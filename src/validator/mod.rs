//! Validation orchestration
//!
//! Applies a per-attribute schema map to a bag of values:
//! - `initialize` builds the attribute validation map once per external
//!   schema and merges custom types into this validator's registry
//! - `validate` fans out one independent check per attribute, joins them all
//!   (no short-circuit on first failure), and resolves through a single
//!   completion path
//!
//! Data-shape problems never surface as errors here; they are collected into
//! the report. Only registration and schema parsing can fail, synchronously,
//! at `initialize` time.

mod map;
mod report;

use futures_util::future::join_all;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::matcher::Matcher;
use crate::registry::{DefinitionError, Predicate, TypeRegistry};
use crate::rules::RuleEvaluator;
use crate::schema::{RuleSet, SchemaError, Violation};

pub use report::ValidationReport;

/// Errors raised while building a validator. Never raised by `validate`.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// Custom type registration failed
    #[error(transparent)]
    Definition(#[from] DefinitionError),
    /// The attribute-definition map could not be parsed
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Validates value bags against a per-attribute schema map.
pub struct Validator {
    registry: TypeRegistry,
    evaluator: RuleEvaluator,
    attributes: Vec<(String, RuleSet)>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Creates a validator with the built-in types and rules and no
    /// attributes declared.
    pub fn new() -> Self {
        Self {
            registry: TypeRegistry::with_builtins(),
            evaluator: RuleEvaluator::new(),
            attributes: Vec::new(),
        }
    }

    /// Builds the attribute validation map from an external
    /// attribute-definition map, merging `custom_types` into the registry
    /// first so descriptors can reference them.
    pub fn initialize(
        &mut self,
        attrs: &Value,
        custom_types: Vec<(String, Predicate)>,
    ) -> Result<(), ValidatorError> {
        self.registry.define_all(custom_types)?;
        let Some(definitions) = attrs.as_object() else {
            return Err(SchemaError::DefinitionsNotAnObject {
                found: crate::schema::json_type_name(attrs),
            }
            .into());
        };
        self.attributes = map::build_attribute_map(definitions)?;
        Ok(())
    }

    /// The registry this validator resolves types against.
    pub fn registry_mut(&mut self) -> &mut TypeRegistry {
        &mut self.registry
    }

    /// The evaluator this validator resolves rules against.
    pub fn evaluator_mut(&mut self) -> &mut RuleEvaluator {
        &mut self.evaluator
    }

    /// Declared attribute names, in declaration order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|(name, _)| name.as_str())
    }

    /// Validates a values bag against the declared attributes.
    ///
    /// With `present_only`, only attributes present in `values` are checked.
    /// Returns `None` when every checked attribute conforms.
    pub async fn validate(&self, values: &Value, present_only: bool) -> Option<ValidationReport> {
        let empty = Map::new();
        let bag = values.as_object().unwrap_or(&empty);

        let checks = self
            .attributes
            .iter()
            .filter(|(name, _)| !present_only || bag.contains_key(name))
            .map(|(name, ruleset)| {
                let value = bag.get(name).cloned().unwrap_or(Value::Null);
                async move {
                    let violations =
                        check_attribute(&value, ruleset, &self.registry, &self.evaluator);
                    (name.clone(), violations)
                }
            });

        let results = join_all(checks).await;
        let entries = results
            .into_iter()
            .filter(|(_, violations)| !violations.is_empty())
            .collect();
        ValidationReport::from_entries(entries)
    }

    /// Validates and delivers the outcome to `callback`, invoked exactly
    /// once: with `None` on success, with the report otherwise.
    pub async fn validate_with<F>(&self, values: &Value, present_only: bool, callback: F)
    where
        F: FnOnce(Option<ValidationReport>),
    {
        callback(self.validate(values, present_only).await);
    }
}

/// One attribute's check: the skip ladder first, then the deep match.
fn check_attribute(
    value: &Value,
    ruleset: &RuleSet,
    registry: &TypeRegistry,
    evaluator: &RuleEvaluator,
) -> Vec<Violation> {
    let required = ruleset.is_required();

    // Optional and absent is valid; nothing else to check.
    if !required && is_blank(value) {
        return Vec::new();
    }

    match ruleset.declared_primitive() {
        // Opaque free text is never structurally validated.
        Some("text") => return Vec::new(),
        // Required booleans also arrive string-encoded from external input.
        Some("boolean") if required && has_boolean_string_form(value) => return Vec::new(),
        _ => {}
    }

    Matcher::new(registry, evaluator).match_ruleset(value, ruleset, 0)
}

fn is_blank(value: &Value) -> bool {
    value.is_null() || value.as_str() == Some("")
}

/// Whether the string form of the value is exactly `true` or `false`.
fn has_boolean_string_form(value: &Value) -> bool {
    match value {
        Value::Bool(_) => true,
        Value::String(s) => s == "true" || s == "false",
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validator(attrs: Value) -> Validator {
        let mut validator = Validator::new();
        validator.initialize(&attrs, Vec::new()).unwrap();
        validator
    }

    #[tokio::test]
    async fn test_valid_bag_resolves_to_none() {
        let validator = validator(json!({
            "name": {"type": "string", "required": true},
            "age": {"type": "integer", "min": 0}
        }));
        let report = validator
            .validate(&json!({"name": "Ann", "age": 5}), false)
            .await;
        assert!(report.is_none());
    }

    #[tokio::test]
    async fn test_violations_are_keyed_by_attribute() {
        let validator = validator(json!({
            "name": {"type": "string", "required": true},
            "age": {"type": "integer", "min": 0}
        }));
        let report = validator
            .validate(&json!({"name": "Ann", "age": -1}), false)
            .await
            .unwrap();
        assert_eq!(
            report.to_value(),
            json!({"ValidationError": {"age": [{"rule": "min", "value": -1}]}})
        );
    }

    #[tokio::test]
    async fn test_optional_absent_attribute_is_valid() {
        let validator = validator(json!({"age": {"type": "integer"}}));
        assert!(validator.validate(&json!({}), false).await.is_none());
    }

    #[tokio::test]
    async fn test_required_absent_attribute_fails() {
        let validator = validator(json!({"name": {"type": "string", "required": true}}));
        let report = validator.validate(&json!({}), false).await.unwrap();
        let violations = report.violations("name").unwrap();
        assert!(violations.iter().any(|v| v.rule == "required"));
    }

    #[tokio::test]
    async fn test_present_only_skips_missing_attributes() {
        let validator = validator(json!({
            "name": {"type": "string", "required": true},
            "email": {"type": "email", "required": true}
        }));
        let report = validator.validate(&json!({"name": "x"}), true).await;
        assert!(report.is_none());
    }

    #[tokio::test]
    async fn test_required_boolean_accepts_string_forms() {
        let validator = validator(json!({"active": {"type": "boolean", "required": true}}));
        assert!(validator
            .validate(&json!({"active": "false"}), false)
            .await
            .is_none());
        assert!(validator
            .validate(&json!({"active": true}), false)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_required_boolean_rejects_other_strings() {
        let validator = validator(json!({"active": {"type": "boolean", "required": true}}));
        let report = validator
            .validate(&json!({"active": "maybe"}), false)
            .await
            .unwrap();
        let violations = report.violations("active").unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "type");
    }

    #[tokio::test]
    async fn test_optional_boolean_string_form_not_special_cased() {
        // The string-form acceptance applies to required booleans only.
        let validator = validator(json!({"active": {"type": "boolean"}}));
        let report = validator
            .validate(&json!({"active": "false"}), false)
            .await
            .unwrap();
        assert_eq!(report.violations("active").unwrap()[0].rule, "type");
    }

    #[tokio::test]
    async fn test_text_attributes_are_never_validated() {
        let validator = validator(json!({"bio": {"type": "text", "length": {"max": 3}}}));
        assert!(validator
            .validate(&json!({"bio": [1, 2, 3, 4]}), false)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_enum_definition_enforces_membership() {
        let validator = validator(json!({"state": {"type": "string", "enum": ["on", "off"]}}));
        assert!(validator
            .validate(&json!({"state": "on"}), false)
            .await
            .is_none());
        let report = validator
            .validate(&json!({"state": "broken"}), false)
            .await
            .unwrap();
        assert_eq!(report.violations("state").unwrap()[0].rule, "in");
    }

    #[tokio::test]
    async fn test_no_short_circuit_across_attributes() {
        let validator = validator(json!({
            "a": {"type": "integer", "required": true},
            "b": {"type": "integer", "required": true},
            "c": {"type": "integer", "required": true}
        }));
        let report = validator
            .validate(&json!({"a": "x", "b": "y", "c": "z"}), false)
            .await
            .unwrap();
        assert_eq!(report.attributes().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_callback_is_invoked_exactly_once() {
        let validator = validator(json!({"age": {"type": "integer", "min": 0}}));
        let mut calls = 0;
        validator
            .validate_with(&json!({"age": -1}), false, |report| {
                calls += 1;
                assert!(report.is_some());
            })
            .await;
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_custom_type_via_initialize() {
        let mut validator = Validator::new();
        let custom: Vec<(String, Predicate)> = vec![(
            "evenNumber".to_string(),
            std::sync::Arc::new(|v: &Value| v.as_i64().is_some_and(|n| n % 2 == 0)),
        )];
        validator
            .initialize(&json!({"count": {"type": "evenNumber"}}), custom)
            .unwrap();
        assert!(validator.validate(&json!({"count": 4}), false).await.is_none());
        let report = validator.validate(&json!({"count": 3}), false).await.unwrap();
        assert_eq!(report.violations("count").unwrap()[0].rule, "type");
    }

    #[tokio::test]
    async fn test_non_object_bag_is_treated_as_empty() {
        let validator = validator(json!({"name": {"type": "string", "required": true}}));
        let report = validator.validate(&json!(42), false).await.unwrap();
        assert!(report.violations("name").is_some());
    }

    #[test]
    fn test_initialize_rejects_non_object_definitions() {
        let mut validator = Validator::new();
        let err = validator.initialize(&json!(["not", "a", "map"]), Vec::new());
        assert!(err.is_err());
    }
}
