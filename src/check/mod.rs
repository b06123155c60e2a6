//! Check facade
//!
//! Wraps one value and offers "check against this rule set". Success is the
//! `None` sentinel, never an empty list, so callers cannot misread an empty
//! collection as a failure or vice versa.
//!
//! A `Check` is created fresh per call and holds only references; it has no
//! retained state once the call returns.

use serde_json::Value;

use crate::matcher::Matcher;
use crate::registry::TypeRegistry;
use crate::rules::RuleEvaluator;
use crate::schema::{RuleSet, TypeDescriptor, Violation};

/// One value wrapped for checking against rule sets.
pub struct Check<'a> {
    value: &'a Value,
    matcher: Matcher<'a>,
}

impl<'a> Check<'a> {
    /// Wraps a value with the registry and evaluator to resolve against.
    pub fn new(value: &'a Value, registry: &'a TypeRegistry, evaluator: &'a RuleEvaluator) -> Self {
        Self {
            value,
            matcher: Matcher::new(registry, evaluator),
        }
    }

    /// Overrides the matcher's depth cap.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.matcher = self.matcher.with_max_depth(max_depth);
        self
    }

    /// Checks the wrapped value against a rule set.
    ///
    /// Returns `None` when the value conforms, otherwise the ordered
    /// violation list.
    pub fn against(&self, ruleset: &RuleSet) -> Option<Vec<Violation>> {
        let violations = self.matcher.match_ruleset(self.value, ruleset, 0);
        if violations.is_empty() {
            None
        } else {
            Some(violations)
        }
    }

    /// Checks the wrapped value against a bare descriptor.
    pub fn against_descriptor(&self, descriptor: &TypeDescriptor) -> Option<Vec<Violation>> {
        let violations = self.matcher.match_descriptor(self.value, descriptor, 0);
        if violations.is_empty() {
            None
        } else {
            Some(violations)
        }
    }
}
