//! The native ALU and the generic cell-level ALU are indistinguishable from
//! outside the engine.

use harness_core::{Alu, BitVector, CircuitEngine};
use netlist::{generic_alu, AluPorts, CircuitDescription, SignalGraph};
use proptest::prelude::*;
use rstest as _;
use serde as _;
use serde_json as _;
use thiserror as _;
use tracing as _;

fn alu_graph(native: bool) -> SignalGraph {
    let ports = AluPorts {
        a: "a".to_string(),
        b: "b".to_string(),
        ctrl: "ctrl".to_string(),
        result: "result".to_string(),
        zero: "zero".to_string(),
        less: "less".to_string(),
    };
    let mut desc = CircuitDescription::default();
    desc.signal("a", 32)
        .signal("b", 32)
        .signal("ctrl", 4)
        .signal("result", 32)
        .signal("zero", 1)
        .signal("less", 1)
        .merge(generic_alu("alu", &ports));

    let mut graph = SignalGraph::from_description(&desc).expect("valid circuit");
    if native {
        graph
            .register_native_rule("alu", Box::new(Alu))
            .expect("native ALU binds");
    }
    graph
}

fn observe(graph: &mut SignalGraph, a: u32, b: u32, ctrl: u64) -> [BitVector; 3] {
    graph.set_value("a", BitVector::word(a)).expect("drive a");
    graph.set_value("b", BitVector::word(b)).expect("drive b");
    graph
        .set_value("ctrl", BitVector::new(4, ctrl))
        .expect("drive ctrl");
    graph.settle().expect("settles");
    ["result", "zero", "less"].map(|name| graph.value(name).expect("declared output"))
}

proptest! {
    #[test]
    fn native_and_generic_outputs_agree(
        steps in prop::collection::vec((any::<u32>(), any::<u32>(), 0_u64..16), 1..24)
    ) {
        let mut native = alu_graph(true);
        let mut generic = alu_graph(false);

        for (a, b, ctrl) in steps {
            let expected = observe(&mut generic, a, b, ctrl);
            let actual = observe(&mut native, a, b, ctrl);
            prop_assert_eq!(actual, expected, "a={:#x} b={:#x} ctrl={:#06b}", a, b, ctrl);
        }
    }
}

#[test]
fn native_rule_does_fewer_evaluations() {
    let mut native = alu_graph(true);
    let mut generic = alu_graph(false);
    let (native_start, generic_start) = (native.evaluation_count(), generic.evaluation_count());

    observe(&mut native, 0x1234, 0x10, 0b0000);
    observe(&mut generic, 0x1234, 0x10, 0b0000);

    assert!(
        native.evaluation_count() - native_start < generic.evaluation_count() - generic_start
    );
}
