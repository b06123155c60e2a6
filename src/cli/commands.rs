//! CLI command implementations
//!
//! Both commands are one-shot: load JSON inputs, run the engine, print one
//! JSON result document to stdout, exit non-zero when the input did not
//! conform. `null` on stdout is the success sentinel, mirroring the library
//! API.

use std::path::Path;

use serde_json::Value;

use crate::check::Check;
use crate::observability::Logger;
use crate::registry::TypeRegistry;
use crate::rules::RuleEvaluator;
use crate::schema::RuleSet;
use crate::validator::Validator;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{read_json_file, write_json};

/// Parses arguments and dispatches to the selected command.
pub fn run() -> CliResult<()> {
    match Cli::parse_args().command {
        Command::Check {
            ruleset,
            value,
            max_depth,
        } => check(&ruleset, &value, max_depth),
        Command::Validate {
            schema,
            values,
            present_only,
        } => validate(&schema, &values, present_only),
    }
}

/// Checks one value against one rule-set literal.
pub fn check(ruleset_path: &Path, value_path: &Path, max_depth: usize) -> CliResult<()> {
    let ruleset_literal = read_json_file(ruleset_path)?;
    let ruleset = RuleSet::from_value(&ruleset_literal, "")
        .map_err(|e| CliError::schema(e.to_string()))?;
    let value = read_json_file(value_path)?;

    let registry = TypeRegistry::with_builtins();
    let evaluator = RuleEvaluator::new();
    let outcome = Check::new(&value, &registry, &evaluator)
        .with_max_depth(max_depth)
        .against(&ruleset);

    match outcome {
        None => {
            Logger::info("CHECK_PASSED", &[]);
            write_json(&Value::Null)
        }
        Some(violations) => {
            Logger::info(
                "CHECK_FAILED",
                &[("violations", &violations.len().to_string())],
            );
            // The violation list holds only JSON-native data.
            let wire = serde_json::to_value(&violations)
                .map_err(|e| CliError::io(e.to_string()))?;
            write_json(&wire)?;
            Err(CliError::validation_failed(violations.len()))
        }
    }
}

/// Validates a values bag against an attribute-definition file.
pub fn validate(schema_path: &Path, values_path: &Path, present_only: bool) -> CliResult<()> {
    let attrs = read_json_file(schema_path)?;
    let values = read_json_file(values_path)?;

    let mut validator = Validator::new();
    validator
        .initialize(&attrs, Vec::new())
        .map_err(|e| CliError::schema(e.to_string()))?;
    Logger::info(
        "SCHEMA_LOADED",
        &[("attributes", &validator.attribute_names().count().to_string())],
    );

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(e.to_string()))?;
    let report = runtime.block_on(validator.validate(&values, present_only));

    match report {
        None => {
            Logger::info("VALIDATION_PASSED", &[]);
            write_json(&Value::Null)
        }
        Some(report) => {
            let count = report.violation_count();
            Logger::info("VALIDATION_FAILED", &[("violations", &count.to_string())]);
            write_json(&report.to_value())?;
            Err(CliError::validation_failed(count))
        }
    }
}
