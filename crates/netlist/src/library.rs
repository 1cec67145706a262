//! Reusable circuit fragments.

use std::collections::BTreeMap;

use harness_core::{AluOp, ALU_DEPENDENCIES, ALU_OUTCOMES};

use crate::cell::CellOp;
use crate::description::{CellDescription, CircuitDescription, GroupDescription};

/// Outer signals an ALU fragment is wired to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AluPorts {
    /// First operand, 32 bits.
    pub a: String,
    /// Second operand, 32 bits.
    pub b: String,
    /// Control code, 4 bits.
    pub ctrl: String,
    /// Result, 32 bits.
    pub result: String,
    /// Zero flag, 1 bit.
    pub zero: String,
    /// Less flag, 1 bit.
    pub less: String,
}

impl AluPorts {
    const fn bindings(&self) -> [&str; 6] {
        [
            self.a.as_str(),
            self.b.as_str(),
            self.ctrl.as_str(),
            self.result.as_str(),
            self.zero.as_str(),
            self.less.as_str(),
        ]
    }
}

/// Builds the cell-level ALU as group `group`.
///
/// Every operation is computed in parallel and a 16-way mux indexed by the
/// control code picks the result, so the fragment covers the same control
/// table as [`harness_core::Alu`], duplicate codes included. The outer port
/// signals must already be declared by the caller; the fragment only declares
/// its internal signals, prefixed with `group.`.
#[must_use]
pub fn generic_alu(group: &str, ports: &AluPorts) -> CircuitDescription {
    let internal = |name: &str| format!("{group}.{name}");
    let (a, b) = (ports.a.as_str(), ports.b.as_str());
    let mut fragment = CircuitDescription::default();
    let cells = &mut fragment.cells;

    let ops = [
        ("add", CellOp::Add),
        ("sub", CellOp::Sub),
        ("shl", CellOp::Shl),
        ("srl", CellOp::Shr),
        ("sra", CellOp::Sra),
        ("xor", CellOp::Xor),
        ("or", CellOp::Or),
        ("and", CellOp::And),
        ("lt", CellOp::Lt),
        ("ltu", CellOp::Ltu),
        ("equal", CellOp::Eq),
    ];
    for (name, op) in ops {
        cells.push(grouped(group, op, &[a, b], &internal(name)));
    }
    for name in ["lt", "ltu"] {
        let bit = internal(name);
        let word = internal(&format!("{name}.word"));
        cells.push(grouped(group, CellOp::Resize, &[bit.as_str()], &word));
    }
    let zero_word = internal("zero.word");
    cells.push(grouped(group, CellOp::Const { value: 0 }, &[], &zero_word));

    let selected: Vec<String> = (0..16)
        .map(|code| match AluOp::decode(code) {
            Some(AluOp::Add) => internal("add"),
            Some(AluOp::Sub) => internal("sub"),
            Some(AluOp::Shl) => internal("shl"),
            Some(AluOp::Slt) => internal("lt.word"),
            Some(AluOp::Sltu) => internal("ltu.word"),
            Some(AluOp::Xor) => internal("xor"),
            Some(AluOp::Srl) => internal("srl"),
            Some(AluOp::Sra) => internal("sra"),
            Some(AluOp::Or) => internal("or"),
            Some(AluOp::And) => internal("and"),
            Some(AluOp::PassB) | None => b.to_string(),
        })
        .collect();
    let mut mux_inputs = vec![ports.ctrl.as_str()];
    mux_inputs.extend(selected.iter().map(String::as_str));
    cells.push(grouped(group, CellOp::Mux, &mux_inputs, &ports.result));

    let result_zero = internal("result_zero");
    let equal = internal("equal");
    cells.push(grouped(
        group,
        CellOp::Eq,
        &[ports.result.as_str(), zero_word.as_str()],
        &result_zero,
    ));
    let mut flag_inputs = vec![ports.ctrl.as_str()];
    flag_inputs.extend((0..16).map(|code| match AluOp::decode(code) {
        Some(op) if op.is_compare() => equal.as_str(),
        _ => result_zero.as_str(),
    }));
    cells.push(grouped(group, CellOp::Mux, &flag_inputs, &ports.zero));
    cells.push(grouped(
        group,
        CellOp::Slice { offset: 0 },
        &[ports.result.as_str()],
        &ports.less,
    ));

    for (name, width) in [
        ("add", 32),
        ("sub", 32),
        ("shl", 32),
        ("srl", 32),
        ("sra", 32),
        ("xor", 32),
        ("or", 32),
        ("and", 32),
        ("lt", 1),
        ("ltu", 1),
        ("equal", 1),
        ("lt.word", 32),
        ("ltu.word", 32),
        ("zero.word", 32),
        ("result_zero", 1),
    ] {
        fragment.signal(internal(name), width);
    }

    let names = ALU_DEPENDENCIES.iter().chain(&ALU_OUTCOMES).map(|port| port.name);
    let bound: BTreeMap<String, String> = names
        .zip(ports.bindings())
        .map(|(port, signal)| (port.to_string(), signal.to_string()))
        .collect();
    fragment.groups.push(GroupDescription {
        name: group.to_string(),
        ports: bound,
    });
    fragment
}

fn grouped(group: &str, op: CellOp, inputs: &[&str], output: &str) -> CellDescription {
    CellDescription {
        op,
        inputs: inputs.iter().map(ToString::to_string).collect(),
        output: output.to_string(),
        group: Some(group.to_string()),
    }
}
