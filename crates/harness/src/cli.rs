//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;
use harness_core::{HarnessConfig, DEFAULT_CYCLE_BUDGET};

/// Runs compiled test vectors against a circuit read from stdin.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "conformance-run", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the test vectors
    #[arg(long, default_value = "testcases")]
    pub testcases: PathBuf,

    /// Additional vector file name to skip (repeatable); `fence_i.hex` is
    /// always skipped
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Read the circuit description from this file instead of stdin
    #[arg(long)]
    pub circuit: Option<PathBuf>,

    /// Evaluate the ALU with generic cells instead of the native rule
    #[arg(long)]
    pub generic: bool,

    /// Cycle budget per vector
    #[arg(long, default_value_t = DEFAULT_CYCLE_BUDGET)]
    pub max_cycles: u32,

    /// Write a JSON report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Harness configuration selected by the flags.
    #[must_use]
    pub fn config(&self) -> HarnessConfig {
        HarnessConfig {
            max_cycles: self.max_cycles,
            ..HarnessConfig::default()
        }
    }
}
