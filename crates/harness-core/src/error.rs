use thiserror::Error;

use crate::engine::EngineError;
use crate::memory::{ImageError, MemoryError};
use crate::rule::RuleError;

/// Fatal harness errors.
///
/// Every variant means a broken fixture or circuit description; none of them
/// is recovered from. Failing test vectors are reported as
/// [`crate::Verdict`] values instead.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A memory image could not be loaded.
    #[error(transparent)]
    Image(#[from] ImageError),
    /// The data bus carried an illegal access width.
    #[error(transparent)]
    Memory(#[from] MemoryError),
    /// A native rule rejected its inputs.
    #[error(transparent)]
    Rule(#[from] RuleError),
    /// The circuit engine failed.
    #[error(transparent)]
    Engine(#[from] EngineError),
}
