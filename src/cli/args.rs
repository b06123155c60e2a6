//! CLI argument definitions using clap
//!
//! Commands:
//! - conform check --ruleset <path> --value <path>
//! - conform validate --schema <path> --values <path> [--present-only]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// conform - A strict, deterministic value-validation engine
#[derive(Parser, Debug)]
#[command(name = "conform")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a single JSON value against a rule-set literal
    Check {
        /// Path to the rule-set JSON file
        #[arg(long)]
        ruleset: PathBuf,
        /// Path to the value JSON file
        #[arg(long)]
        value: PathBuf,
        /// Recursion cap for nested descriptors
        #[arg(long, default_value_t = 50)]
        max_depth: usize,
    },

    /// Validate a values bag against an attribute-definition file
    Validate {
        /// Path to the attribute-definition JSON file
        #[arg(long)]
        schema: PathBuf,
        /// Path to the values JSON file
        #[arg(long)]
        values: PathBuf,
        /// Check only attributes present in the values bag
        #[arg(long)]
        present_only: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
