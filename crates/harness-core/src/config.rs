//! Harness configuration: bus signal names and pass/fail constants.

/// Reserved instruction word that ends a test vector.
pub const SENTINEL_INSTRUCTION: u32 = 0xdead_10cc;
/// Result-slot value that marks a vector as passed.
pub const PASS_VALUE: u32 = 0x00c0_ffee;
/// Default number of cycles a vector may run before it is incomplete.
pub const DEFAULT_CYCLE_BUDGET: u32 = 1000;
/// Default test vector that is never run.
pub const DEFAULT_EXCLUDED_VECTOR: &str = "fence_i.hex";

/// Names of the circuit signals the cycle driver reads and drives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct SignalNames {
    /// Clock input toggled by the driver.
    pub clock: String,
    /// Reset input.
    pub reset: String,
    /// Program counter output used as the instruction-fetch address.
    pub pc: String,
    /// Instruction input.
    pub instruction: String,
    /// Data-bus access-width code.
    pub bus_op: String,
    /// Data-bus address.
    pub bus_addr: String,
    /// Data-bus write enable.
    pub bus_write_enable: String,
    /// Data-bus store value.
    pub bus_write_data: String,
    /// Data-bus load value driven back into the core.
    pub bus_read_data: String,
    /// Signal inspected when the sentinel instruction is fetched.
    pub result_slot: String,
}

impl Default for SignalNames {
    fn default() -> Self {
        Self {
            clock: "clk".to_string(),
            reset: "rst".to_string(),
            pc: "pc".to_string(),
            instruction: "instr".to_string(),
            bus_op: "dmem_op".to_string(),
            bus_addr: "dmem_addr".to_string(),
            bus_write_enable: "dmem_wr".to_string(),
            bus_write_data: "dmem_in".to_string(),
            bus_read_data: "dmem_out".to_string(),
            result_slot: "data[10]".to_string(),
        }
    }
}

/// Top-level configuration of one harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct HarnessConfig {
    /// Circuit signal names.
    pub signals: SignalNames,
    /// Instruction word that ends a vector.
    pub sentinel: u32,
    /// Result-slot value required to pass.
    pub pass_value: u32,
    /// Cycle budget per vector.
    pub max_cycles: u32,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            signals: SignalNames::default(),
            sentinel: SENTINEL_INSTRUCTION,
            pass_value: PASS_VALUE,
            max_cycles: DEFAULT_CYCLE_BUDGET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HarnessConfig, DEFAULT_CYCLE_BUDGET, PASS_VALUE, SENTINEL_INSTRUCTION};

    #[test]
    fn default_config_matches_conformance_contract() {
        let config = HarnessConfig::default();
        assert_eq!(config.sentinel, SENTINEL_INSTRUCTION);
        assert_eq!(config.sentinel, 0xdead_10cc);
        assert_eq!(config.pass_value, PASS_VALUE);
        assert_eq!(config.max_cycles, DEFAULT_CYCLE_BUDGET);
        assert_eq!(config.signals.result_slot, "data[10]");
        assert_eq!(config.signals.clock, "clk");
    }
}
