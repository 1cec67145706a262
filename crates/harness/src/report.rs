//! Per-vector and aggregate result reporting.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use harness_core::Verdict;
use serde::Serialize;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Outcome of one vector as reported to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VectorReport {
    /// Vector file name.
    pub name: String,
    /// Terminal verdict.
    pub verdict: Verdict,
    /// Cycles the vector ran.
    pub cycles: u32,
}

impl VectorReport {
    /// Returns `true` when the vector passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.verdict.is_pass()
    }
}

/// Aggregate outcome of a suite run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuiteReport {
    /// Per-vector outcomes in run order.
    pub vectors: Vec<VectorReport>,
    /// Wall-clock time of the whole run, in seconds.
    pub elapsed_secs: f64,
}

impl SuiteReport {
    /// Wraps finished vector reports.
    #[must_use]
    pub fn new(vectors: Vec<VectorReport>, elapsed: Duration) -> Self {
        Self {
            vectors,
            elapsed_secs: elapsed.as_secs_f64(),
        }
    }

    /// Number of passed vectors.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.vectors.iter().filter(|v| v.passed()).count()
    }

    /// Number of vectors run.
    #[must_use]
    pub fn total(&self) -> usize {
        self.vectors.len()
    }

    /// Returns `true` when every vector passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.vectors.iter().all(VectorReport::passed)
    }

    /// Writes the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns any serialization or file-system error.
    pub fn write_json(&self, path: &Path) -> io::Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text + "\n")
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Passed {}/{} test cases", self.passed(), self.total())?;
        write!(f, "Elapsed time: {}s", self.elapsed_secs)
    }
}

/// Verdict label for a progress line, optionally ANSI-coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerdictLabel {
    /// Verdict to render.
    pub verdict: Verdict,
    /// Wrap the label in ANSI colour codes.
    pub color: bool,
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (color, text) = match self.verdict {
            Verdict::Passed => (GREEN, "Passed!"),
            Verdict::Failed { .. } => (RED, "Failed!"),
            Verdict::Incomplete => (YELLOW, "Incomplete!"),
        };
        if self.color {
            write!(f, "{color}{text}{RESET}")
        } else {
            f.write_str(text)
        }
    }
}
