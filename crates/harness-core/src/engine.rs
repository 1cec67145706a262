//! Capability interface of the circuit engine driven by the harness.
//!
//! The harness never sees the engine's signal graph or scheduler; it only
//! reads and writes named signals, toggles the clock and asks the engine to
//! settle. Engines may propagate eagerly on every input change, but callers
//! must call [`CircuitEngine::settle`] before reading combinational outputs.

use thiserror::Error;

use crate::rule::{NativeRule, RuleError};
use crate::BitVector;

/// Errors raised by a circuit engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No signal with this name exists.
    #[error("unknown signal `{0}`")]
    UnknownSignal(String),
    /// A value or port width does not match the signal it is bound to.
    #[error("signal `{signal}` is {expected} bits wide, got {found}")]
    WidthMismatch {
        /// Signal name.
        signal: String,
        /// Declared signal width.
        expected: u32,
        /// Width supplied by the caller or rule port.
        found: u32,
    },
    /// `flip` was applied to a multi-bit signal.
    #[error("signal `{0}` is not a single bit and cannot be flipped")]
    NotSingleBit(String),
    /// Native-rule registration named a subgraph that does not exist.
    #[error("no subgraph named `{0}`")]
    UnknownGroup(String),
    /// A native-rule port has no binding in the target subgraph.
    #[error("subgraph `{group}` does not bind port `{port}`")]
    UnboundPort {
        /// Subgraph name.
        group: String,
        /// Unbound rule port.
        port: String,
    },
    /// Propagation did not reach a fixed point within the evaluation budget.
    #[error("no fixed point after {evaluations} evaluations")]
    NoFixedPoint {
        /// Evaluations performed before giving up.
        evaluations: usize,
    },
    /// A native rule failed during propagation.
    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// Narrow engine interface consumed by the cycle driver.
pub trait CircuitEngine {
    /// Reads the current value of signal `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownSignal`] for undeclared names.
    fn value(&self, name: &str) -> Result<BitVector, EngineError>;

    /// Drives signal `name` to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownSignal`] or
    /// [`EngineError::WidthMismatch`], or any propagation error.
    fn set_value(&mut self, name: &str, value: BitVector) -> Result<(), EngineError>;

    /// Toggles the single-bit signal `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotSingleBit`] for multi-bit signals, or any
    /// error of [`CircuitEngine::set_value`].
    fn flip(&mut self, name: &str) -> Result<(), EngineError> {
        let current = self.value(name)?;
        if current.width() != 1 {
            return Err(EngineError::NotSingleBit(name.to_string()));
        }
        self.set_value(name, BitVector::from(current.is_zero()))
    }

    /// Propagates pending changes until no signal changes further.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoFixedPoint`] when propagation does not
    /// converge, or a rule error raised during evaluation.
    fn settle(&mut self) -> Result<(), EngineError>;

    /// Installs `rule` in place of the subgraph called `name`.
    ///
    /// # Errors
    ///
    /// Returns an error when the subgraph is unknown or cannot bind the
    /// rule's ports.
    fn register_native_rule(
        &mut self,
        name: &str,
        rule: Box<dyn NativeRule>,
    ) -> Result<(), EngineError>;
}
