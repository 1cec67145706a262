//! Per-vector cycle driver.
//!
//! Each vector runs through a fixed sequence:
//! 1. Reset: one clock toggle, raise reset, two more toggles, lower reset.
//!    Every toggle is a separate edge seen by the circuit.
//! 2. Up to `max_cycles` cycles, each one:
//!    a. fetch the instruction word at the engine's program counter,
//!    b. toggle the clock, drive the instruction, settle,
//!    c. apply a pending bus write to data memory,
//!    d. stop on the sentinel instruction and classify the result slot,
//!    e. toggle the clock, drive the bus load value, settle.
//! 3. A vector that never fetches the sentinel is incomplete.
//!
//! Writes land before the second toggle of a cycle and loads are driven
//! after it, using the bus op and address sampled before that toggle.

use tracing::{debug, trace};

use crate::engine::{CircuitEngine, EngineError};
use crate::memory::{AccessKind, AccessWidth, MemoryImage};
use crate::{BitVector, HarnessConfig, HarnessError, SignalNames};

/// Terminal classification of one test vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Verdict {
    /// Sentinel reached with the pass value in the result slot.
    Passed,
    /// Sentinel reached with any other result-slot value.
    Failed {
        /// Result-slot value observed at the sentinel.
        actual: BitVector,
    },
    /// Cycle budget exhausted without fetching the sentinel.
    Incomplete,
}

impl Verdict {
    /// Returns `true` only for [`Verdict::Passed`].
    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Outcome of running one vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct VectorRun {
    /// Terminal verdict.
    pub verdict: Verdict,
    /// Cycles started, including the one that fetched the sentinel.
    pub cycles: u32,
}

/// Driver state-machine phases reported to trace sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverPhase {
    /// Clock edges with reset raised.
    ResetAssert,
    /// Reset lowered, circuit settling.
    ResetDeassert,
    /// Fetch/execute cycles.
    Running,
    /// Verdict reached.
    Finished,
}

/// Deterministic driver events, emitted in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceEvent {
    /// Driver entered a new phase.
    Phase(DriverPhase),
    /// Instruction fetched from instruction memory.
    Fetch {
        /// Cycle index.
        cycle: u32,
        /// Fetch address.
        pc: u32,
        /// Fetched word.
        instruction: u32,
    },
    /// Bus store applied to data memory.
    BusWrite {
        /// Cycle index.
        cycle: u32,
        /// Store width.
        op: AccessWidth,
        /// Store address.
        addr: u32,
        /// Value on the write-data bus.
        value: BitVector,
    },
    /// Bus load value driven into the circuit.
    BusRead {
        /// Cycle index.
        cycle: u32,
        /// Load width.
        op: AccessWidth,
        /// Load address.
        addr: u32,
        /// Loaded, extended value.
        value: BitVector,
    },
    /// Sentinel fetched; result slot sampled.
    Sentinel {
        /// Cycle index.
        cycle: u32,
        /// Result-slot value.
        result: BitVector,
    },
}

/// Sink for driver trace events.
pub trait TraceSink {
    /// Records an event in execution order.
    fn on_event(&mut self, event: TraceEvent);
}

/// Trace sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn on_event(&mut self, _event: TraceEvent) {}
}

impl TraceSink for Vec<TraceEvent> {
    fn on_event(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

/// Instruction and data images owned by one vector run.
#[derive(Debug, Clone, Default)]
pub struct VectorImages {
    /// Instruction memory, read-only during the run.
    pub instructions: MemoryImage,
    /// Data memory, updated by bus writes.
    pub data: MemoryImage,
}

/// Applies the reset sequence.
///
/// # Errors
///
/// Propagates any engine failure.
pub fn reset<E: CircuitEngine + ?Sized>(
    engine: &mut E,
    signals: &SignalNames,
    trace: &mut dyn TraceSink,
) -> Result<(), EngineError> {
    trace.on_event(TraceEvent::Phase(DriverPhase::ResetAssert));
    engine.flip(&signals.clock)?;
    engine.set_value(&signals.reset, BitVector::from(true))?;
    engine.flip(&signals.clock)?;
    engine.flip(&signals.clock)?;

    trace.on_event(TraceEvent::Phase(DriverPhase::ResetDeassert));
    engine.set_value(&signals.reset, BitVector::from(false))?;
    engine.settle()
}

/// Runs one vector to a verdict without tracing.
///
/// # Errors
///
/// See [`run_vector_traced`].
pub fn run_vector<E: CircuitEngine + ?Sized>(
    engine: &mut E,
    config: &HarnessConfig,
    images: VectorImages,
) -> Result<VectorRun, HarnessError> {
    run_vector_traced(engine, config, images, &mut NullTrace)
}

/// Runs one vector to a verdict, reporting every bus transaction to `trace`.
///
/// The images are consumed and dropped when the vector ends, whichever way
/// it ends.
///
/// # Errors
///
/// Returns [`HarnessError::Engine`] when the engine fails and
/// [`HarnessError::Memory`] when the bus carries an illegal access width.
pub fn run_vector_traced<E: CircuitEngine + ?Sized>(
    engine: &mut E,
    config: &HarnessConfig,
    images: VectorImages,
    trace: &mut dyn TraceSink,
) -> Result<VectorRun, HarnessError> {
    let VectorImages {
        instructions,
        mut data,
    } = images;
    let signals = &config.signals;
    let sentinel = BitVector::word(config.sentinel);
    let write_enabled = BitVector::from(true);

    reset(engine, signals, trace)?;
    trace.on_event(TraceEvent::Phase(DriverPhase::Running));

    for cycle in 0..config.max_cycles {
        let pc = engine.value(&signals.pc)?.as_u32();
        let instruction = instructions.read_word(pc);
        trace!(cycle, pc, instruction = %instruction, "fetch");
        trace.on_event(TraceEvent::Fetch {
            cycle,
            pc,
            instruction: instruction.as_u32(),
        });

        engine.flip(&signals.clock)?;
        engine.set_value(&signals.instruction, instruction)?;
        engine.settle()?;

        let op = engine.value(&signals.bus_op)?;
        let addr = engine.value(&signals.bus_addr)?.as_u32();
        if engine.value(&signals.bus_write_enable)? == write_enabled {
            let width = AccessWidth::decode(op, AccessKind::Write)?;
            let value = engine.value(&signals.bus_write_data)?;
            data.write_with_op(width, addr, value);
            trace!(cycle, addr, value = %value, ?width, "bus write");
            trace.on_event(TraceEvent::BusWrite {
                cycle,
                op: width,
                addr,
                value,
            });
        }

        if instruction == sentinel {
            let result = engine.value(&signals.result_slot)?;
            trace.on_event(TraceEvent::Sentinel { cycle, result });
            trace.on_event(TraceEvent::Phase(DriverPhase::Finished));

            let verdict = if result.as_u32() == config.pass_value {
                Verdict::Passed
            } else {
                Verdict::Failed { actual: result }
            };
            debug!(cycle, ?verdict, "sentinel reached");
            return Ok(VectorRun {
                verdict,
                cycles: cycle + 1,
            });
        }

        engine.flip(&signals.clock)?;
        let width = AccessWidth::decode(op, AccessKind::Read)?;
        let loaded = data.read_with_op(width, addr);
        trace.on_event(TraceEvent::BusRead {
            cycle,
            op: width,
            addr,
            value: loaded,
        });
        engine.set_value(&signals.bus_read_data, loaded)?;
        engine.settle()?;
    }

    trace.on_event(TraceEvent::Phase(DriverPhase::Finished));
    debug!(cycles = config.max_cycles, "cycle budget exhausted");
    Ok(VectorRun {
        verdict: Verdict::Incomplete,
        cycles: config.max_cycles,
    })
}
