//! Descriptor, rule-set, and violation type definitions
//!
//! Descriptor shapes:
//! - any: matches every value
//! - primitive: named leaf type, resolved through the TypeRegistry
//! - array-of: sequence with a single element descriptor
//! - object-schema: structured record, one rule set per declared attribute
//!
//! Violations are ordered data, not exceptions: a failed match produces a
//! sequence that reflects declaration order at every level and is never
//! deduplicated or reordered.

use serde::Serialize;
use serde_json::Value;

/// Expected shape of a value.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    /// Matches every value
    Any,
    /// Named leaf type resolved through the TypeRegistry
    Primitive(String),
    /// Sequence whose every element matches the inner descriptor
    /// (boxed to allow recursive descriptors)
    ArrayOf(Box<TypeDescriptor>),
    /// Structured record; each declared attribute carries its own rule set,
    /// in declaration order
    ObjectSchema(Vec<(String, RuleSet)>),
}

impl TypeDescriptor {
    /// Returns the type name for violation messages.
    pub fn type_name(&self) -> &str {
        match self {
            TypeDescriptor::Any => "any",
            TypeDescriptor::Primitive(name) => name,
            TypeDescriptor::ArrayOf(_) => "array",
            TypeDescriptor::ObjectSchema(_) => "object",
        }
    }
}

/// Declarative constraints for one value: an optional type descriptor plus
/// named rules with arguments, kept in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleSet {
    /// Descriptor held under the reserved `type` key, if declared
    pub type_desc: Option<TypeDescriptor>,
    /// Every non-type rule, in declaration order
    pub rules: Vec<(String, Value)>,
}

impl RuleSet {
    /// Creates a rule set with only a type descriptor.
    pub fn of_type(descriptor: TypeDescriptor) -> Self {
        Self {
            type_desc: Some(descriptor),
            rules: Vec::new(),
        }
    }

    /// Appends a rule, preserving declaration order.
    pub fn with_rule(mut self, name: impl Into<String>, arg: Value) -> Self {
        self.rules.push((name.into(), arg));
        self
    }

    /// Whether this rule set carries a truthy `required` rule.
    pub fn is_required(&self) -> bool {
        self.rules
            .iter()
            .any(|(name, arg)| name == "required" && truthy(arg))
    }

    /// The declared primitive type name, if the descriptor is a primitive.
    pub fn declared_primitive(&self) -> Option<&str> {
        match &self.type_desc {
            Some(TypeDescriptor::Primitive(name)) => Some(name),
            _ => None,
        }
    }
}

/// A rule argument of `null` or `false` disables the rule.
pub(crate) fn truthy(arg: &Value) -> bool {
    !matches!(arg, Value::Null | Value::Bool(false))
}

/// One step of the location at which a violation was recorded: an attribute
/// name or an array index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// One reported violation: the rule that failed, the value at the failure
/// point, and the path from the checked root down to that value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Name of the failed rule (`type` for descriptor mismatches)
    pub rule: String,
    /// Value at the failure point
    pub value: Value,
    /// Path from the root, empty at the root itself
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,
}

impl Violation {
    /// Creates a violation at the root (empty path).
    pub fn new(rule: impl Into<String>, value: Value) -> Self {
        Self {
            rule: rule.into(),
            value,
            path: Vec::new(),
        }
    }

    /// Creates a `type` violation for a descriptor mismatch.
    pub fn type_mismatch(value: Value) -> Self {
        Self::new("type", value)
    }

    /// Prepends a path segment, used when bubbling out of a nested match.
    pub fn prefixed(mut self, segment: PathSegment) -> Self {
        self.path.insert(0, segment);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_names() {
        assert_eq!(TypeDescriptor::Any.type_name(), "any");
        assert_eq!(
            TypeDescriptor::Primitive("string".into()).type_name(),
            "string"
        );
        assert_eq!(
            TypeDescriptor::ArrayOf(Box::new(TypeDescriptor::Any)).type_name(),
            "array"
        );
        assert_eq!(TypeDescriptor::ObjectSchema(Vec::new()).type_name(), "object");
    }

    #[test]
    fn test_required_detection() {
        let ruleset = RuleSet::of_type(TypeDescriptor::Primitive("string".into()))
            .with_rule("required", json!(true));
        assert!(ruleset.is_required());

        let optional = RuleSet::of_type(TypeDescriptor::Primitive("string".into()))
            .with_rule("required", json!(false));
        assert!(!optional.is_required());

        let absent = RuleSet::of_type(TypeDescriptor::Primitive("string".into()));
        assert!(!absent.is_required());
    }

    #[test]
    fn test_violation_serializes_to_wire_shape() {
        let violation = Violation::new("min", json!(-1));
        let wire = serde_json::to_value(&violation).unwrap();
        assert_eq!(wire, json!({"rule": "min", "value": -1}));
    }

    #[test]
    fn test_violation_path_segments_serialize_untagged() {
        let violation = Violation::new("type", json!("x"))
            .prefixed(PathSegment::Index(2))
            .prefixed(PathSegment::Key("tags".into()));
        let wire = serde_json::to_value(&violation).unwrap();
        assert_eq!(
            wire,
            json!({"rule": "type", "value": "x", "path": ["tags", 2]})
        );
    }

    #[test]
    fn test_prefixed_prepends() {
        let violation = Violation::new("type", json!(1))
            .prefixed(PathSegment::Index(0))
            .prefixed(PathSegment::Key("outer".into()));
        assert_eq!(
            violation.path,
            vec![PathSegment::Key("outer".into()), PathSegment::Index(0)]
        );
    }
}
