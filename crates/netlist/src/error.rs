use harness_core::{EngineError, WidthError};
use thiserror::Error;

use crate::cell::CellError;

/// Errors raised while turning a circuit description into a signal graph.
#[derive(Debug, Error)]
pub enum DescriptionError {
    /// The description is not valid JSON for [`crate::CircuitDescription`].
    #[error("malformed circuit description: {0}")]
    Json(#[from] serde_json::Error),
    /// A signal was declared with an unsupported width.
    #[error("signal `{signal}`: {source}")]
    SignalWidth {
        /// Signal name.
        signal: String,
        /// Underlying width violation.
        #[source]
        source: WidthError,
    },
    /// Two signals share a name.
    #[error("signal `{0}` is declared twice")]
    DuplicateSignal(String),
    /// Two groups share a name.
    #[error("group `{0}` is declared twice")]
    DuplicateGroup(String),
    /// A cell, register or group port references an undeclared signal.
    #[error("reference to undeclared signal `{0}`")]
    UnknownSignal(String),
    /// A cell names a group that was never declared.
    #[error("cell {cell} belongs to undeclared group `{group}`")]
    UnknownGroup {
        /// Cell index in the description.
        cell: usize,
        /// Group name.
        group: String,
    },
    /// A cell is wired with the wrong shape.
    #[error("cell {cell}: {source}")]
    Cell {
        /// Cell index in the description.
        cell: usize,
        /// Shape violation.
        #[source]
        source: CellError,
    },
    /// A register's data input and output differ in width.
    #[error("register `{q}` is {expected} bits wide but its input is {found}")]
    RegisterWidth {
        /// Register output signal.
        q: String,
        /// Output width.
        expected: u32,
        /// Data input width.
        found: u32,
    },
    /// A register clock or reset is wider than one bit.
    #[error("register control `{0}` must be a single bit")]
    ControlWidth(String),
    /// More than one cell or register drives the same signal.
    #[error("signal `{0}` has more than one driver")]
    MultipleDrivers(String),
    /// The initial settle failed.
    #[error(transparent)]
    Engine(#[from] EngineError),
}
