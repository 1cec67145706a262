//! Runs discovered vectors one after another on a single engine.

use std::io::Write;
use std::time::Instant;

use harness_core::{run_vector, CircuitEngine, HarnessConfig};
use tracing::{info, info_span};

use crate::error::SuiteError;
use crate::report::{SuiteReport, VectorReport, VerdictLabel};
use crate::suite::TestVector;

/// Runs every vector in order and writes one progress line per vector.
///
/// The engine is reused; the reset sequence at the start of each vector
/// reinitialises it.
///
/// # Errors
///
/// Stops at the first fatal error: an unloadable image, an engine failure,
/// an illegal bus access width, or a failed write to `out`. Failing vectors
/// are not errors.
pub fn run_suite<E: CircuitEngine + ?Sized>(
    engine: &mut E,
    config: &HarnessConfig,
    vectors: &[TestVector],
    out: &mut dyn Write,
    color: bool,
) -> Result<SuiteReport, SuiteError> {
    let start = Instant::now();
    let mut reports = Vec::with_capacity(vectors.len());

    for vector in vectors {
        let _span = info_span!("vector", name = %vector.name).entered();
        write!(out, "Running test case: {:?}", vector.name).map_err(SuiteError::Output)?;
        out.flush().map_err(SuiteError::Output)?;

        let images = vector.load()?;
        let run = run_vector(engine, config, images).map_err(|source| SuiteError::Vector {
            name: vector.name.clone(),
            source,
        })?;
        info!(verdict = ?run.verdict, cycles = run.cycles, "vector finished");

        let label = VerdictLabel {
            verdict: run.verdict,
            color,
        };
        writeln!(out, "\t-> {label}").map_err(SuiteError::Output)?;
        reports.push(VectorReport {
            name: vector.name.clone(),
            verdict: run.verdict,
            cycles: run.cycles,
        });
    }

    Ok(SuiteReport::new(reports, start.elapsed()))
}
