//! conform - A strict, deterministic value-validation engine
//!
//! Given a runtime value and a schema describing an expected shape plus
//! constraints, conform recursively decides whether the value conforms and,
//! when it does not, produces an ordered list of violations.

pub mod check;
pub mod cli;
pub mod matcher;
pub mod observability;
pub mod registry;
pub mod rules;
pub mod schema;
pub mod validator;
