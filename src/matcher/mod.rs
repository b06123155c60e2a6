//! Recursive deep match
//!
//! Matches a value against a type descriptor or a full rule set and collects
//! every violation into one ordered sequence:
//! - type violations first, then rule violations in declaration order
//! - array elements in index order, object attributes in declaration order
//! - nested violations tagged with their path segment on the way out
//!
//! Depth is counted per descent into array-of and object-schema descriptors
//! and per alias expansion. Beyond the cap, nesting is treated as satisfied,
//! so self-referential alias schemas terminate instead of recursing forever.

use serde_json::Value;

use crate::registry::{RegistryEntry, TypeRegistry};
use crate::rules::RuleEvaluator;
use crate::schema::{PathSegment, RuleSet, TypeDescriptor, Violation};

/// Default recursion cap.
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// The recursive deep-match algorithm. Borrows its registry and evaluator;
/// construction is free and per-call.
pub struct Matcher<'a> {
    registry: &'a TypeRegistry,
    evaluator: &'a RuleEvaluator,
    max_depth: usize,
}

impl<'a> Matcher<'a> {
    /// Creates a matcher with the default depth cap.
    pub fn new(registry: &'a TypeRegistry, evaluator: &'a RuleEvaluator) -> Self {
        Self {
            registry,
            evaluator,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Overrides the depth cap.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Matches a value against a full rule set: the `type` key first, then
    /// every other rule in declaration order. Strict concatenation, no
    /// deduplication.
    pub fn match_ruleset(&self, value: &Value, ruleset: &RuleSet, depth: usize) -> Vec<Violation> {
        if depth > self.max_depth {
            return Vec::new();
        }
        let mut violations = Vec::new();
        if let Some(descriptor) = &ruleset.type_desc {
            violations.extend(self.match_descriptor(value, descriptor, depth));
        }
        for (rule, arg) in &ruleset.rules {
            violations.extend(self.evaluator.evaluate(value, rule, arg));
        }
        violations
    }

    /// Matches a value against a bare descriptor.
    pub fn match_descriptor(
        &self,
        value: &Value,
        descriptor: &TypeDescriptor,
        depth: usize,
    ) -> Vec<Violation> {
        if depth > self.max_depth {
            return Vec::new();
        }
        match descriptor {
            TypeDescriptor::Any => Vec::new(),
            TypeDescriptor::Primitive(name) => self.match_primitive(value, name, depth),
            TypeDescriptor::ArrayOf(inner) => self.match_array(value, inner, depth),
            TypeDescriptor::ObjectSchema(attributes) => {
                self.match_object(value, attributes, depth)
            }
        }
    }

    fn match_primitive(&self, value: &Value, name: &str, depth: usize) -> Vec<Violation> {
        match self.registry.resolve(name) {
            Some(RegistryEntry::Predicate(predicate)) => {
                if predicate(value) {
                    Vec::new()
                } else {
                    vec![Violation::type_mismatch(value.clone())]
                }
            }
            // Alias expansion consumes depth so direct alias cycles
            // terminate at the cap like structural descent does.
            Some(RegistryEntry::Alias(descriptor)) => {
                self.match_descriptor(value, descriptor, depth + 1)
            }
            // Unknown type names are data failures, not panics.
            None => vec![Violation::type_mismatch(value.clone())],
        }
    }

    fn match_array(&self, value: &Value, inner: &TypeDescriptor, depth: usize) -> Vec<Violation> {
        let Some(items) = value.as_array() else {
            return vec![Violation::type_mismatch(value.clone())];
        };
        let mut violations = Vec::new();
        for (index, element) in items.iter().enumerate() {
            violations.extend(
                self.match_descriptor(element, inner, depth + 1)
                    .into_iter()
                    .map(|v| v.prefixed(PathSegment::Index(index))),
            );
        }
        violations
    }

    fn match_object(
        &self,
        value: &Value,
        attributes: &[(String, RuleSet)],
        depth: usize,
    ) -> Vec<Violation> {
        let Some(record) = value.as_object() else {
            return vec![Violation::type_mismatch(value.clone())];
        };
        let mut violations = Vec::new();
        for (name, ruleset) in attributes {
            // Absent attributes are checked as null; undeclared extras on
            // the record pass through uninspected.
            let attribute_value = record.get(name).cloned().unwrap_or(Value::Null);
            violations.extend(
                self.match_ruleset(&attribute_value, ruleset, depth + 1)
                    .into_iter()
                    .map(|v| v.prefixed(PathSegment::Key(name.clone()))),
            );
        }
        violations
    }
}
