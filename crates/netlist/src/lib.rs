//! Minimal word-level circuit engine for the conformance harness.
//!
//! A [`SignalGraph`] is built from a JSON [`CircuitDescription`] and exposes
//! the [`harness_core::CircuitEngine`] capability, including native-rule
//! substitution of named cell groups.

/// Word-level combinational cells.
pub mod cell;
pub use cell::{CellError, CellOp};

/// Serializable circuit description.
pub mod description;
pub use description::{
    CellDescription, CircuitDescription, GroupDescription, RegisterDescription, SignalDescription,
};

/// Description and build errors.
pub mod error;
pub use error::DescriptionError;

/// Event-driven signal graph implementing the engine capability.
pub mod graph;
pub use graph::{SignalGraph, EVALUATIONS_PER_NODE};

/// Reusable circuit fragments.
pub mod library;
pub use library::{generic_alu, AluPorts};

#[cfg(test)]
use proptest as _;
