//! Bit-exact primitives and the cycle driver for running compiled test
//! vectors against a signal-level processor core.

/// Fixed-width bit vectors with two's-complement arithmetic.
pub mod bits;
pub use bits::{BitVector, WidthError, MAX_WIDTH, SHIFT_AMOUNT_BITS, WORD_BITS};

/// Sparse hex memory images and bus access widths.
pub mod memory;
pub use memory::{
    AccessKind, AccessWidth, ImageError, MemoryError, MemoryImage, ADDRESS_DIRECTIVE,
    DEFAULT_MEMORY_CAPACITY,
};

/// Native evaluation rules for named circuit groups.
pub mod rule;
pub use rule::{
    evaluate_rule, Alu, AluOp, AluOutput, NativeRule, OutcomeWriter, PortSpec, RuleError,
    ALU_DEPENDENCIES, ALU_OUTCOMES, ALU_RULE_NAME,
};

/// Capability contract the driver needs from a circuit engine.
pub mod engine;
pub use engine::{CircuitEngine, EngineError};

/// Signal names and pass/fail constants.
pub mod config;
pub use config::{
    HarnessConfig, SignalNames, DEFAULT_CYCLE_BUDGET, DEFAULT_EXCLUDED_VECTOR, PASS_VALUE,
    SENTINEL_INSTRUCTION,
};

/// Fatal error umbrella.
pub mod error;
pub use error::HarnessError;

/// Reset sequence and per-vector cycle loop.
pub mod driver;
pub use driver::{
    reset, run_vector, run_vector_traced, DriverPhase, NullTrace, TraceEvent, TraceSink,
    VectorImages, VectorRun, Verdict,
};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
