//! Suite-level glue for the conformance harness: discovery, the run loop,
//! reporting and the command-line surface of `conformance-run`.

use std::io::Write;

use anyhow as _;
use harness_core::{Alu, CircuitEngine, ALU_RULE_NAME};
use netlist::SignalGraph;
use tracing::info;

/// Command-line interface.
pub mod cli;
pub use cli::Cli;

/// Fatal suite errors.
pub mod error;
pub use error::SuiteError;

/// Log subscriber setup.
pub mod logging;

/// Per-vector and aggregate reports.
pub mod report;
pub use report::{SuiteReport, VectorReport, VerdictLabel};

/// Sequential suite runner.
pub mod runner;
pub use runner::run_suite;

/// Test-vector discovery.
pub mod suite;
pub use suite::{discover, TestVector, DATA_EXTENSION};

/// Builds the engine from `circuit`, discovers vectors and runs them all.
///
/// Unless `--generic` is set, the native ALU replaces the `alu` group of the
/// circuit before any vector runs.
///
/// # Errors
///
/// Returns the first fatal [`SuiteError`].
pub fn run(
    cli: &Cli,
    circuit: &str,
    out: &mut dyn Write,
    color: bool,
) -> Result<SuiteReport, SuiteError> {
    let mut engine = SignalGraph::from_json(circuit.trim())?;
    if cli.generic {
        info!("native rules disabled");
    } else {
        engine.register_native_rule(ALU_RULE_NAME, Box::new(Alu))?;
    }

    let vectors = discover(&cli.testcases, &cli.exclude)?;
    run_suite(&mut engine, &cli.config(), &vectors, out, color)
}

#[cfg(test)]
use tempfile as _;
