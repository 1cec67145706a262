//! CLI entry point for the conformance-run binary.

use std::fs;
use std::io::{self, BufRead, IsTerminal};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use harness::{logging, Cli};
use harness_core as _;
use netlist as _;
use serde as _;
use serde_json as _;
#[cfg(test)]
use tempfile as _;
use thiserror as _;
use tracing as _;
use tracing_subscriber as _;

fn read_circuit(cli: &Cli) -> Result<String> {
    if let Some(path) = &cli.circuit {
        return fs::read_to_string(path)
            .with_context(|| format!("cannot read circuit description {}", path.display()));
    }

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("cannot read circuit description from stdin")?;
    Ok(line)
}

fn run(cli: &Cli) -> Result<bool> {
    let circuit = read_circuit(cli)?;
    let stdout = io::stdout();
    let color = stdout.is_terminal();
    let report = harness::run(cli, &circuit, &mut stdout.lock(), color)?;

    if let Some(path) = &cli.report {
        report
            .write_json(path)
            .with_context(|| format!("cannot write report {}", path.display()))?;
    }
    println!("{report}");
    Ok(report.all_passed())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
