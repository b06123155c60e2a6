//! Registration error types
//!
//! Registration failures are thrown synchronously at definition time and are
//! never collected into violation lists.

use thiserror::Error;

/// Result type for type and rule registration
pub type DefinitionResult<T> = Result<T, DefinitionError>;

/// Errors raised while registering custom types or rules
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DefinitionError {
    /// Registration under an empty name
    #[error("definition name cannot be empty")]
    EmptyName,

    /// An existing binding of a different kind already holds the name
    /// (predicate vs. composite alias)
    #[error("'{name}' is already bound to an incompatible entry")]
    IncompatibleRebind { name: String },

    /// The rule name is reserved for the engine itself
    #[error("rule name '{name}' is reserved")]
    ReservedRule { name: String },
}

impl DefinitionError {
    /// Creates an incompatible-rebind error.
    pub fn incompatible(name: impl Into<String>) -> Self {
        Self::IncompatibleRebind { name: name.into() }
    }

    /// Creates a reserved-rule error.
    pub fn reserved(name: impl Into<String>) -> Self {
        Self::ReservedRule { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_offending_entry() {
        let err = DefinitionError::incompatible("uuid");
        assert!(format!("{}", err).contains("uuid"));

        let err = DefinitionError::reserved("type");
        assert!(format!("{}", err).contains("type"));
    }
}
