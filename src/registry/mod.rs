//! Extensible type registry
//!
//! Maps type names to leaf predicates or composite descriptor aliases.
//! Registration is additive; every validation constructed from a registry
//! sees all entries registered before the validation began. Writes must
//! complete before concurrent reads begin; the registry itself carries no
//! synchronization.

mod builtins;
mod errors;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::schema::TypeDescriptor;

pub use errors::{DefinitionError, DefinitionResult};
pub(crate) use builtins::parse_temporal;

/// A leaf type check: one value in, pass/fail out.
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// One registry binding: a leaf predicate or a composite convenience alias.
#[derive(Clone)]
pub enum RegistryEntry {
    /// Leaf predicate; never recurses
    Predicate(Predicate),
    /// Composite descriptor expanded by the Matcher
    Alias(TypeDescriptor),
}

/// Name → predicate/alias table used to resolve primitive type checks.
#[derive(Clone, Default)]
pub struct TypeRegistry {
    entries: HashMap<String, RegistryEntry>,
}

impl TypeRegistry {
    /// Creates an empty registry with no built-ins. Mostly useful in tests
    /// that want full control over resolution.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry populated with the built-in leaf types.
    pub fn with_builtins() -> Self {
        let mut registry = Self::default();
        builtins::install(&mut registry);
        registry
    }

    /// Registers a leaf predicate under `name`. Chainable.
    ///
    /// Re-binding a predicate name to another predicate is an override;
    /// re-binding an alias name to a predicate is rejected.
    pub fn define<F>(&mut self, name: &str, predicate: F) -> DefinitionResult<&mut Self>
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.check_binding(name, true)?;
        self.entries
            .insert(name.to_string(), RegistryEntry::Predicate(Arc::new(predicate)));
        Ok(self)
    }

    /// Registers every predicate in `entries`, or nothing at all.
    ///
    /// All names are checked before any entry is merged, so a bad key (the
    /// error names it) leaves the registry untouched.
    pub fn define_all(&mut self, entries: Vec<(String, Predicate)>) -> DefinitionResult<()> {
        for (name, _) in &entries {
            self.check_binding(name, true)?;
        }
        for (name, predicate) in entries {
            self.entries.insert(name, RegistryEntry::Predicate(predicate));
        }
        Ok(())
    }

    /// Registers a composite descriptor alias under `name`. Chainable.
    ///
    /// Names inside the descriptor are not resolved here; forward and
    /// self references are legal and resolve at match time.
    pub fn define_alias(
        &mut self,
        name: &str,
        descriptor: TypeDescriptor,
    ) -> DefinitionResult<&mut Self> {
        self.check_binding(name, false)?;
        self.entries
            .insert(name.to_string(), RegistryEntry::Alias(descriptor));
        Ok(self)
    }

    /// Looks up the entry bound to `name`.
    pub fn resolve(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.get(name)
    }

    /// Whether `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check_binding(&self, name: &str, as_predicate: bool) -> DefinitionResult<()> {
        if name.is_empty() {
            return Err(DefinitionError::EmptyName);
        }
        match self.entries.get(name) {
            Some(RegistryEntry::Alias(_)) if as_predicate => {
                Err(DefinitionError::incompatible(name))
            }
            Some(RegistryEntry::Predicate(_)) if !as_predicate => {
                Err(DefinitionError::incompatible(name))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.entries.keys().collect();
        names.sort();
        f.debug_struct("TypeRegistry").field("types", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtins_resolve() {
        let registry = TypeRegistry::with_builtins();
        assert!(registry.contains("string"));
        assert!(registry.contains("uuid"));
        assert!(!registry.contains("nope"));
    }

    #[test]
    fn test_define_is_chainable() {
        let mut registry = TypeRegistry::empty();
        registry
            .define("positive", |v: &Value| v.as_f64().is_some_and(|n| n > 0.0))
            .unwrap()
            .define("negative", |v: &Value| v.as_f64().is_some_and(|n| n < 0.0))
            .unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_define_rejects_empty_name() {
        let mut registry = TypeRegistry::empty();
        let err = registry.define("", |_| true).unwrap_err();
        assert_eq!(err, DefinitionError::EmptyName);
    }

    #[test]
    fn test_predicate_override_is_compatible() {
        let mut registry = TypeRegistry::with_builtins();
        // Tightening a built-in is a legal override.
        registry
            .define("string", |v: &Value| v.as_str().is_some_and(|s| !s.is_empty()))
            .unwrap();
    }

    #[test]
    fn test_alias_over_predicate_is_incompatible() {
        let mut registry = TypeRegistry::with_builtins();
        let err = registry
            .define_alias("string", TypeDescriptor::Any)
            .unwrap_err();
        assert_eq!(err, DefinitionError::incompatible("string"));
    }

    #[test]
    fn test_predicate_over_alias_is_incompatible() {
        let mut registry = TypeRegistry::empty();
        registry.define_alias("point", TypeDescriptor::Any).unwrap();
        let err = registry.define("point", |_| true).unwrap_err();
        assert_eq!(err, DefinitionError::incompatible("point"));
    }

    #[test]
    fn test_define_all_is_atomic() {
        let mut registry = TypeRegistry::empty();
        registry.define_alias("point", TypeDescriptor::Any).unwrap();

        let batch: Vec<(String, Predicate)> = vec![
            ("even".to_string(), Arc::new(|v: &Value| {
                v.as_i64().is_some_and(|n| n % 2 == 0)
            })),
            // Conflicts with the alias above; the whole batch must fail.
            ("point".to_string(), Arc::new(|_: &Value| true)),
        ];
        let err = registry.define_all(batch).unwrap_err();
        assert_eq!(err, DefinitionError::incompatible("point"));
        assert!(!registry.contains("even"));
    }

    #[test]
    fn test_custom_predicate_runs() {
        let mut registry = TypeRegistry::empty();
        registry
            .define("answer", |v: &Value| v == &json!(42))
            .unwrap();
        match registry.resolve("answer") {
            Some(RegistryEntry::Predicate(p)) => {
                assert!(p(&json!(42)));
                assert!(!p(&json!(41)));
            }
            _ => panic!("expected predicate"),
        }
    }
}
