//! Schema parsing error types
//!
//! These errors cover malformed schema literals only. A value failing its
//! schema is never an error here; it is a collected violation.

use thiserror::Error;

/// Result type for schema parsing
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while turning a JSON schema literal into descriptors and
/// rule sets
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchemaError {
    /// The attribute-definition map was not a JSON object
    #[error("attribute definitions must be a JSON object, got {found}")]
    DefinitionsNotAnObject {
        /// JSON type name of the value that was supplied instead
        found: &'static str,
    },

    /// A `type` key held something that is not a descriptor expression
    #[error("invalid type descriptor at '{context}': {reason}")]
    InvalidDescriptor { context: String, reason: String },

    /// A rule-set literal was not an object, type name, or array descriptor
    #[error("invalid rule set at '{context}': {reason}")]
    InvalidRuleSet { context: String, reason: String },
}

impl SchemaError {
    /// Creates an invalid-descriptor error.
    pub fn invalid_descriptor(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid-rule-set error.
    pub fn invalid_ruleset(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRuleSet {
            context: context.into(),
            reason: reason.into(),
        }
    }
}
