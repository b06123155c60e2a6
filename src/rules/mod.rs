//! Rule evaluation
//!
//! Evaluates one named constraint against one value. Rules are leaf checks;
//! they never recurse. Evaluation never throws for data problems: every
//! failure, including an unknown rule name or a malformed rule argument,
//! becomes a reported violation so one bad schema key cannot abort a
//! validation pass.
//!
//! Comparison policy: numeric rules (`min`, `max`, numeric `length` bounds)
//! require an actual JSON number and fail on anything else. There is no
//! string-to-number coercion anywhere in the evaluator.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::registry::{parse_temporal, DefinitionError, DefinitionResult};
use crate::schema::{truthy, Violation, TYPE_KEY};

/// A custom constraint check: value and rule argument in, pass/fail out.
pub type RulePredicate = Arc<dyn Fn(&Value, &Value) -> bool + Send + Sync>;

/// Evaluates non-type constraints. Stateless with respect to any single
/// evaluation; holds only the table of user-supplied custom rules.
#[derive(Clone, Default)]
pub struct RuleEvaluator {
    custom: HashMap<String, RulePredicate>,
}

impl std::fmt::Debug for RuleEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEvaluator")
            .field("custom", &self.custom.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl RuleEvaluator {
    /// Creates an evaluator with only the built-in rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a custom predicate rule under `name`. Chainable.
    ///
    /// Custom rules shadow built-ins of the same name; the reserved `type`
    /// key is rejected.
    pub fn define<F>(&mut self, name: &str, predicate: F) -> DefinitionResult<&mut Self>
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        if name.is_empty() {
            return Err(DefinitionError::EmptyName);
        }
        if name == TYPE_KEY {
            return Err(DefinitionError::reserved(name));
        }
        self.custom.insert(name.to_string(), Arc::new(predicate));
        Ok(self)
    }

    /// Evaluates one rule; `None` means the rule passed.
    ///
    /// An argument of `null` or `false` disables the rule entirely.
    pub fn evaluate(&self, value: &Value, rule: &str, arg: &Value) -> Option<Violation> {
        if !truthy(arg) {
            return None;
        }
        let passed = if let Some(predicate) = self.custom.get(rule) {
            predicate(value, arg)
        } else {
            match rule {
                "required" => !is_missing(value),
                "in" => arg
                    .as_array()
                    .is_some_and(|options| options.iter().any(|option| option == value)),
                "min" => bound(value, arg, |v, limit| v >= limit),
                "max" => bound(value, arg, |v, limit| v <= limit),
                "length" => length_in_bounds(value, arg),
                "regex" | "pattern" => matches_pattern(value, arg),
                "equals" => value == arg,
                "contains" => contains(value, arg),
                "after" => temporal(value, arg, |v, pivot| v > pivot),
                "before" => temporal(value, arg, |v, pivot| v < pivot),
                // Unknown rule: reported, not thrown, under its own name.
                _ => false,
            }
        };
        if passed {
            None
        } else {
            Some(Violation::new(rule, value.clone()))
        }
    }
}

/// Null and the empty string are "missing" for the `required` rule.
fn is_missing(value: &Value) -> bool {
    value.is_null() || value.as_str() == Some("")
}

fn bound(value: &Value, limit: &Value, cmp: fn(f64, f64) -> bool) -> bool {
    match (value.as_f64(), limit.as_f64()) {
        (Some(v), Some(limit)) => cmp(v, limit),
        _ => false,
    }
}

/// String length counts characters; array length counts elements. The
/// argument is either an exact integer or an object with `min`/`max`.
fn length_in_bounds(value: &Value, arg: &Value) -> bool {
    let len = match value {
        Value::String(s) => s.chars().count() as u64,
        Value::Array(items) => items.len() as u64,
        _ => return false,
    };
    match arg {
        Value::Number(_) => arg.as_u64() == Some(len),
        Value::Object(bounds) => {
            let above_min = match bounds.get("min") {
                Some(min) => min.as_u64().is_some_and(|min| len >= min),
                None => true,
            };
            let below_max = match bounds.get("max") {
                Some(max) => max.as_u64().is_some_and(|max| len <= max),
                None => true,
            };
            above_min && below_max
        }
        _ => false,
    }
}

/// A pattern that fails to compile counts as a failed rule, never a panic.
fn matches_pattern(value: &Value, arg: &Value) -> bool {
    let (Some(s), Some(pattern)) = (value.as_str(), arg.as_str()) else {
        return false;
    };
    match regex::Regex::new(pattern) {
        Ok(re) => re.is_match(s),
        Err(_) => false,
    }
}

/// Substring for strings, element membership for arrays.
fn contains(value: &Value, arg: &Value) -> bool {
    match (value, arg) {
        (Value::String(s), Value::String(needle)) => s.contains(needle.as_str()),
        (Value::Array(items), needle) => items.iter().any(|item| item == needle),
        _ => false,
    }
}

fn temporal(
    value: &Value,
    pivot: &Value,
    cmp: fn(chrono::NaiveDateTime, chrono::NaiveDateTime) -> bool,
) -> bool {
    match (
        value.as_str().and_then(parse_temporal),
        pivot.as_str().and_then(parse_temporal),
    ) {
        (Some(v), Some(pivot)) => cmp(v, pivot),
        _ => false,
    }
}
