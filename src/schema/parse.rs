//! Parsing of JSON schema literals into descriptors and rule sets
//!
//! Accepted descriptor expressions under the reserved `type` key:
//! - a type name string (`"string"`, `"integer"`, `"any"`, ...)
//! - a single-element array for array-of (`["integer"]`); an empty array
//!   means array of anything
//! - a nested object for object-schema, whose values are rule-set literals
//!
//! A rule-set literal is either a full object (`{"type": ..., "min": 0}`), a
//! bare type name string, or a bare array descriptor.
//!
//! Key order in object literals is preserved end to end; it becomes the
//! declaration order that fixes violation ordering.

use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};
use super::types::{RuleSet, TypeDescriptor};

/// Reserved key holding the type descriptor inside a rule-set literal.
pub const TYPE_KEY: &str = "type";

impl TypeDescriptor {
    /// Parses a descriptor expression.
    pub fn from_value(literal: &Value, context: &str) -> SchemaResult<Self> {
        match literal {
            Value::String(name) if name == "any" => Ok(TypeDescriptor::Any),
            Value::String(name) => Ok(TypeDescriptor::Primitive(name.clone())),
            Value::Array(items) => match items.len() {
                0 => Ok(TypeDescriptor::ArrayOf(Box::new(TypeDescriptor::Any))),
                1 => {
                    let inner = TypeDescriptor::from_value(&items[0], &child(context, "[]"))?;
                    Ok(TypeDescriptor::ArrayOf(Box::new(inner)))
                }
                n => Err(SchemaError::invalid_descriptor(
                    context,
                    format!("array descriptor takes one element descriptor, got {}", n),
                )),
            },
            Value::Object(attrs) => {
                let mut schema = Vec::with_capacity(attrs.len());
                for (name, attr_literal) in attrs {
                    let ruleset = RuleSet::from_value(attr_literal, &child(context, name))?;
                    schema.push((name.clone(), ruleset));
                }
                Ok(TypeDescriptor::ObjectSchema(schema))
            }
            other => Err(SchemaError::invalid_descriptor(
                context,
                format!(
                    "expected a type name, array, or object, got {}",
                    json_type_name(other)
                ),
            )),
        }
    }
}

impl RuleSet {
    /// Parses a rule-set literal.
    pub fn from_value(literal: &Value, context: &str) -> SchemaResult<Self> {
        match literal {
            // Bare type names and array descriptors are shorthand for
            // a rule set with only a `type` key.
            Value::String(_) | Value::Array(_) => Ok(RuleSet::of_type(
                TypeDescriptor::from_value(literal, context)?,
            )),
            Value::Object(entries) => {
                let mut ruleset = RuleSet::default();
                for (key, arg) in entries {
                    if key == TYPE_KEY {
                        ruleset.type_desc = Some(TypeDescriptor::from_value(arg, context)?);
                    } else {
                        ruleset.rules.push((key.clone(), arg.clone()));
                    }
                }
                Ok(ruleset)
            }
            other => Err(SchemaError::invalid_ruleset(
                context,
                format!(
                    "expected an object, type name, or array descriptor, got {}",
                    json_type_name(other)
                ),
            )),
        }
    }
}

/// Extends a context path for error reporting.
fn child(context: &str, key: &str) -> String {
    if context.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", context, key)
    }
}

/// Returns the JSON type name for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
