//! Observability: structured diagnostic logging
//!
//! Diagnostics are one-line JSON events on stderr so that validation results
//! on stdout stay machine-readable.

mod logger;

pub use logger::{Logger, Severity};
