//! Full vector runs against a small datapath built from netlist cells.
//!
//! The datapath advances `pc` by four through the `alu` group on every rising
//! clock edge, latches the data-bus load into the result slot, and issues a
//! word store of `0x00c0ffee` to address `0x40` whenever the instruction is
//! `0xabad1dea`. Loads always read the word at `0x40`.

use harness_core::{
    run_vector, run_vector_traced, BitVector, CircuitEngine, HarnessConfig, MemoryImage,
    TraceEvent, VectorImages, Verdict, ALU_RULE_NAME, SENTINEL_INSTRUCTION,
};
use netlist::{generic_alu, AluPorts, CircuitDescription, SignalGraph};
use proptest as _;
use rstest::rstest;
use serde as _;
use serde_json as _;
use thiserror as _;
use tracing as _;

const NOP: u32 = 0x0000_0013;
const STORE: u32 = 0xabad_1dea;

fn datapath(native: bool) -> SignalGraph {
    let mut desc = CircuitDescription::default();
    for (name, width) in [
        ("clk", 1),
        ("rst", 1),
        ("pc", 32),
        ("instr", 32),
        ("dmem_op", 3),
        ("dmem_addr", 32),
        ("dmem_wr", 1),
        ("dmem_in", 32),
        ("dmem_out", 32),
        ("data[10]", 32),
        ("four", 32),
        ("alu_ctrl", 4),
        ("pc_next", 32),
        ("alu_zero", 1),
        ("alu_less", 1),
        ("store_marker", 32),
    ] {
        desc.signal(name, width);
    }
    desc.constant("four", 4)
        .constant("alu_ctrl", 0)
        .constant("dmem_op", 2)
        .constant("dmem_addr", 0x40)
        .constant("dmem_in", 0x00c0_ffee)
        .constant("store_marker", u64::from(STORE))
        .cell(netlist::CellOp::Eq, &["instr", "store_marker"], "dmem_wr")
        .register("pc_next", "pc", "clk", Some("rst"), 0)
        .register("dmem_out", "data[10]", "clk", Some("rst"), 0);

    let ports = AluPorts {
        a: "pc".to_string(),
        b: "four".to_string(),
        ctrl: "alu_ctrl".to_string(),
        result: "pc_next".to_string(),
        zero: "alu_zero".to_string(),
        less: "alu_less".to_string(),
    };
    desc.merge(generic_alu(ALU_RULE_NAME, &ports));

    // The harness reads the description as a single JSON line.
    let text = desc.to_json().expect("serializes");
    let mut graph = SignalGraph::from_json(&text).expect("valid circuit");
    if native {
        graph
            .register_native_rule(ALU_RULE_NAME, Box::new(harness_core::Alu))
            .expect("native ALU binds");
    }
    graph
}

fn images(program: &[u32], data: &str) -> VectorImages {
    let listing: String = program.iter().map(|word| format!("{word:08x}\n")).collect();
    VectorImages {
        instructions: MemoryImage::from_hex_text(&listing).expect("valid program"),
        data: MemoryImage::from_hex_text(data).expect("valid data"),
    }
}

#[rstest]
fn preloaded_pass_value_passes(#[values(true, false)] native: bool) {
    let mut graph = datapath(native);
    let run = run_vector(
        &mut graph,
        &HarnessConfig::default(),
        images(&[NOP, NOP, SENTINEL_INSTRUCTION], "@10\n00c0ffee\n"),
    )
    .expect("vector runs");

    assert_eq!(run.verdict, Verdict::Passed);
    assert_eq!(run.cycles, 3);
}

#[rstest]
fn other_result_value_fails(#[values(true, false)] native: bool) {
    let mut graph = datapath(native);
    let run = run_vector(
        &mut graph,
        &HarnessConfig::default(),
        images(&[NOP, NOP, SENTINEL_INSTRUCTION], "@10\n12345678\n"),
    )
    .expect("vector runs");

    assert_eq!(
        run.verdict,
        Verdict::Failed {
            actual: BitVector::word(0x1234_5678),
        }
    );
}

#[rstest]
fn missing_sentinel_is_incomplete(#[values(true, false)] native: bool) {
    let mut graph = datapath(native);
    let config = HarnessConfig {
        max_cycles: 50,
        ..HarnessConfig::default()
    };
    let run = run_vector(&mut graph, &config, images(&[NOP], "")).expect("vector runs");

    assert_eq!(run.verdict, Verdict::Incomplete);
    assert_eq!(run.cycles, 50);
    assert_eq!(graph.value("pc"), Ok(BitVector::word(200)));
}

#[rstest]
fn store_reaches_data_memory_then_result_slot(#[values(true, false)] native: bool) {
    let mut graph = datapath(native);
    let mut events: Vec<TraceEvent> = Vec::new();
    let run = run_vector_traced(
        &mut graph,
        &HarnessConfig::default(),
        images(&[STORE, NOP, SENTINEL_INSTRUCTION], ""),
        &mut events,
    )
    .expect("vector runs");

    assert_eq!(run.verdict, Verdict::Passed);
    let writes: Vec<_> = events
        .iter()
        .filter(|event| matches!(event, TraceEvent::BusWrite { .. }))
        .collect();
    assert_eq!(writes.len(), 1);
}

#[test]
fn engine_is_reused_across_vectors() {
    let mut graph = datapath(true);
    let config = HarnessConfig::default();

    let first = run_vector(
        &mut graph,
        &config,
        images(&[NOP, NOP, SENTINEL_INSTRUCTION], "@10\n00c0ffee\n"),
    )
    .expect("first vector runs");
    let second = run_vector(
        &mut graph,
        &config,
        images(&[NOP, NOP, SENTINEL_INSTRUCTION], ""),
    )
    .expect("second vector runs");

    assert_eq!(first.verdict, Verdict::Passed);
    assert_eq!(
        second.verdict,
        Verdict::Failed {
            actual: BitVector::word(0),
        }
    );
}
