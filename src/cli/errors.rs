//! CLI-specific error types

use std::fmt;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Input file could not be read or parsed
    IoError,
    /// Schema or rule-set file is malformed
    SchemaError,
    /// The checked input did not conform
    ValidationFailed,
    /// Async runtime could not be created
    RuntimeError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::IoError => "CONFORM_CLI_IO_ERROR",
            Self::SchemaError => "CONFORM_CLI_SCHEMA_ERROR",
            Self::ValidationFailed => "CONFORM_CLI_VALIDATION_FAILED",
            Self::RuntimeError => "CONFORM_CLI_RUNTIME_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, message)
    }

    /// Create a schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::new(CliErrorCode::SchemaError, message)
    }

    /// Create a validation-failed error
    pub fn validation_failed(violations: usize) -> Self {
        Self::new(
            CliErrorCode::ValidationFailed,
            format!("input did not conform ({} violations)", violations),
        )
    }

    /// Create a runtime error
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new(CliErrorCode::RuntimeError, message)
    }

    /// Returns the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
