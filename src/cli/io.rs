//! CLI I/O helpers
//!
//! JSON files in, one JSON result document on stdout out.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Reads and parses a JSON file.
pub fn read_json_file(path: &Path) -> CliResult<Value> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("failed to read '{}': {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| CliError::io(format!("invalid JSON in '{}': {}", path.display(), e)))
}

/// Writes one pretty-printed JSON document to stdout.
pub fn write_json(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value)
        .map_err(|e| CliError::io(format!("failed to write result: {}", e)))?;
    stdout
        .write_all(b"\n")
        .map_err(|e| CliError::io(format!("failed to write result: {}", e)))?;
    Ok(())
}
