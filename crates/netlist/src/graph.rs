//! Event-driven signal graph.
//!
//! Every cell or native rule is a node. A node is scheduled only when one of
//! its input signals changes value, and a node only touches the signals it
//! actually changed, so the graph quiesces as soon as the values stop moving.
//! Registers are not nodes: they sample on rising edges of their clock, which
//! must be driven from outside through [`CircuitEngine::set_value`] or
//! [`CircuitEngine::flip`].

use std::collections::{BTreeMap, HashMap, VecDeque};

use harness_core::{evaluate_rule, BitVector, CircuitEngine, EngineError, NativeRule, PortSpec};
use tracing::{debug, trace};

use crate::cell::CellOp;
use crate::description::CircuitDescription;
use crate::error::DescriptionError;

/// Evaluations allowed per node in one propagation pass before the graph is
/// declared divergent.
pub const EVALUATIONS_PER_NODE: usize = 64;

type SignalId = usize;
type NodeId = usize;

#[derive(Debug)]
struct Signal {
    name: String,
    value: BitVector,
}

#[derive(Debug)]
struct Register {
    d: SignalId,
    q: SignalId,
    reset: Option<SignalId>,
    init: BitVector,
}

#[derive(Debug)]
enum Node {
    Cell {
        op: CellOp,
        inputs: Vec<SignalId>,
        output: SignalId,
    },
    Rule {
        rule: Box<dyn NativeRule>,
        inputs: Vec<SignalId>,
        outputs: Vec<SignalId>,
        stored: Vec<BitVector>,
    },
    Retired,
}

#[derive(Debug, Default)]
struct Group {
    ports: BTreeMap<String, SignalId>,
    nodes: Vec<NodeId>,
}

/// Reference [`CircuitEngine`] built from a [`CircuitDescription`].
#[derive(Debug)]
pub struct SignalGraph {
    signals: Vec<Signal>,
    index: HashMap<String, SignalId>,
    nodes: Vec<Node>,
    fanout: Vec<Vec<NodeId>>,
    registers: Vec<Register>,
    clocked: HashMap<SignalId, Vec<usize>>,
    groups: HashMap<String, Group>,
    pending: VecDeque<NodeId>,
    queued: Vec<bool>,
    evaluation_limit: Option<usize>,
    evaluations: u64,
}

impl SignalGraph {
    /// Builds the graph and settles it from the declared initial values.
    ///
    /// # Errors
    ///
    /// Returns a [`DescriptionError`] for any dangling reference, width or
    /// arity violation, doubly driven signal, or when the initial settle does
    /// not converge.
    pub fn from_description(description: &CircuitDescription) -> Result<Self, DescriptionError> {
        let mut graph = Self {
            signals: Vec::with_capacity(description.signals.len()),
            index: HashMap::with_capacity(description.signals.len()),
            nodes: Vec::with_capacity(description.cells.len()),
            fanout: Vec::new(),
            registers: Vec::with_capacity(description.registers.len()),
            clocked: HashMap::new(),
            groups: HashMap::new(),
            pending: VecDeque::new(),
            queued: Vec::new(),
            evaluation_limit: None,
            evaluations: 0,
        };

        graph.declare_signals(description)?;
        graph.declare_groups(description)?;
        let mut driven = vec![false; graph.signals.len()];
        graph.build_cells(description, &mut driven)?;
        graph.build_registers(description, &mut driven)?;

        for node in 0..graph.nodes.len() {
            graph.enqueue(node);
        }
        graph.propagate()?;

        debug!(
            signals = graph.signals.len(),
            nodes = graph.nodes.len(),
            registers = graph.registers.len(),
            groups = graph.groups.len(),
            "signal graph built"
        );
        Ok(graph)
    }

    fn declare_signals(
        &mut self,
        description: &CircuitDescription,
    ) -> Result<(), DescriptionError> {
        for signal in &description.signals {
            let value = BitVector::try_new(signal.width, signal.init).map_err(|source| {
                DescriptionError::SignalWidth {
                    signal: signal.name.clone(),
                    source,
                }
            })?;
            if self
                .index
                .insert(signal.name.clone(), self.signals.len())
                .is_some()
            {
                return Err(DescriptionError::DuplicateSignal(signal.name.clone()));
            }
            self.signals.push(Signal {
                name: signal.name.clone(),
                value,
            });
        }
        self.fanout = vec![Vec::new(); self.signals.len()];
        Ok(())
    }

    fn declare_groups(
        &mut self,
        description: &CircuitDescription,
    ) -> Result<(), DescriptionError> {
        for group in &description.groups {
            let ports = group
                .ports
                .iter()
                .map(|(port, signal)| Ok((port.clone(), self.resolve(signal)?)))
                .collect::<Result<_, DescriptionError>>()?;
            let previous = self.groups.insert(
                group.name.clone(),
                Group {
                    ports,
                    nodes: Vec::new(),
                },
            );
            if previous.is_some() {
                return Err(DescriptionError::DuplicateGroup(group.name.clone()));
            }
        }
        Ok(())
    }

    fn build_cells(
        &mut self,
        description: &CircuitDescription,
        driven: &mut [bool],
    ) -> Result<(), DescriptionError> {
        for (cell, desc) in description.cells.iter().enumerate() {
            let inputs = desc
                .inputs
                .iter()
                .map(|name| self.resolve(name))
                .collect::<Result<Vec<_>, _>>()?;
            let output = self.resolve(&desc.output)?;
            let widths: Vec<u32> = inputs.iter().map(|&id| self.width(id)).collect();
            desc.op
                .check(&widths, self.width(output))
                .map_err(|source| DescriptionError::Cell { cell, source })?;
            self.claim_driver(driven, output)?;

            let node = self.push_node(Node::Cell {
                op: desc.op,
                inputs,
                output,
            });
            if let Some(name) = &desc.group {
                self.groups
                    .get_mut(name)
                    .ok_or_else(|| DescriptionError::UnknownGroup {
                        cell,
                        group: name.clone(),
                    })?
                    .nodes
                    .push(node);
            }
        }
        Ok(())
    }

    fn build_registers(
        &mut self,
        description: &CircuitDescription,
        driven: &mut [bool],
    ) -> Result<(), DescriptionError> {
        for desc in &description.registers {
            let d = self.resolve(&desc.d)?;
            let q = self.resolve(&desc.q)?;
            let clock = self.resolve(&desc.clock)?;
            let reset = desc.reset.as_deref().map(|name| self.resolve(name)).transpose()?;

            let (expected, found) = (self.width(q), self.width(d));
            if expected != found {
                return Err(DescriptionError::RegisterWidth {
                    q: desc.q.clone(),
                    expected,
                    found,
                });
            }
            for control in std::iter::once(clock).chain(reset) {
                if self.width(control) != 1 {
                    return Err(DescriptionError::ControlWidth(
                        self.signals[control].name.clone(),
                    ));
                }
            }
            self.claim_driver(driven, q)?;

            self.clocked.entry(clock).or_default().push(self.registers.len());
            self.registers.push(Register {
                d,
                q,
                reset,
                init: BitVector::new(expected, desc.init),
            });
        }
        Ok(())
    }

    /// Parses a JSON description and builds the graph.
    ///
    /// # Errors
    ///
    /// See [`CircuitDescription::from_json`] and
    /// [`SignalGraph::from_description`].
    pub fn from_json(text: &str) -> Result<Self, DescriptionError> {
        Self::from_description(&CircuitDescription::from_json(text)?)
    }

    /// Replaces the per-pass evaluation budget.
    ///
    /// Without an explicit limit each pass allows [`EVALUATIONS_PER_NODE`]
    /// evaluations per node, counting nodes added by
    /// [`CircuitEngine::register_native_rule`].
    #[must_use]
    pub const fn with_evaluation_limit(mut self, limit: usize) -> Self {
        self.evaluation_limit = Some(limit);
        self
    }

    /// Total node evaluations since construction.
    #[must_use]
    pub const fn evaluation_count(&self) -> u64 {
        self.evaluations
    }

    /// Number of declared signals.
    #[must_use]
    pub const fn signal_count(&self) -> usize {
        self.signals.len()
    }

    /// Returns `true` when `name` is a declared group.
    #[must_use]
    pub fn has_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    fn resolve(&self, name: &str) -> Result<SignalId, DescriptionError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| DescriptionError::UnknownSignal(name.to_string()))
    }

    fn lookup(&self, name: &str) -> Result<SignalId, EngineError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| EngineError::UnknownSignal(name.to_string()))
    }

    fn width(&self, id: SignalId) -> u32 {
        self.signals[id].value.width()
    }

    fn claim_driver(&self, driven: &mut [bool], id: SignalId) -> Result<(), DescriptionError> {
        if std::mem::replace(&mut driven[id], true) {
            return Err(DescriptionError::MultipleDrivers(
                self.signals[id].name.clone(),
            ));
        }
        Ok(())
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        let id = self.nodes.len();
        let inputs = match &node {
            Node::Cell { inputs, .. } | Node::Rule { inputs, .. } => inputs.as_slice(),
            Node::Retired => &[],
        };
        for &input in inputs {
            if !self.fanout[input].contains(&id) {
                self.fanout[input].push(id);
            }
        }
        self.nodes.push(node);
        self.queued.push(false);
        id
    }

    fn enqueue(&mut self, node: NodeId) {
        if !std::mem::replace(&mut self.queued[node], true) {
            self.pending.push_back(node);
        }
    }

    /// Stores `value` and schedules fanout; returns `false` when unchanged.
    fn write(&mut self, id: SignalId, value: BitVector) -> bool {
        if self.signals[id].value == value {
            return false;
        }
        self.signals[id].value = value;
        for index in 0..self.fanout[id].len() {
            let node = self.fanout[id][index];
            self.enqueue(node);
        }
        true
    }

    fn clock_edge(&mut self, clock: SignalId) {
        let Some(registers) = self.clocked.get(&clock) else {
            return;
        };
        let sampled: Vec<(SignalId, BitVector)> = registers
            .iter()
            .map(|&index| {
                let register = &self.registers[index];
                let in_reset = register
                    .reset
                    .is_some_and(|reset| self.signals[reset].value.bit(0));
                let next = if in_reset {
                    register.init
                } else {
                    self.signals[register.d].value
                };
                (register.q, next)
            })
            .collect();

        for (q, value) in sampled {
            self.write(q, value);
        }
    }

    fn evaluate(&mut self, node: NodeId) -> Result<Vec<(SignalId, BitVector)>, EngineError> {
        let Self { nodes, signals, .. } = self;
        match &mut nodes[node] {
            Node::Cell { op, inputs, output } => {
                let values: Vec<BitVector> = inputs.iter().map(|&id| signals[id].value).collect();
                let value = op.evaluate(&values, signals[*output].value.width());
                Ok(vec![(*output, value)])
            }
            Node::Rule {
                rule,
                inputs,
                outputs,
                stored,
            } => {
                let values: Vec<BitVector> = inputs.iter().map(|&id| signals[id].value).collect();
                let dirty = evaluate_rule(rule.as_ref(), &values, stored)?;
                Ok(dirty
                    .into_iter()
                    .map(|slot| (outputs[slot], stored[slot]))
                    .collect())
            }
            Node::Retired => Ok(Vec::new()),
        }
    }

    fn pass_limit(&self) -> usize {
        self.evaluation_limit
            .unwrap_or((self.nodes.len() + 1) * EVALUATIONS_PER_NODE)
    }

    fn propagate(&mut self) -> Result<(), EngineError> {
        let limit = self.pass_limit();
        let mut evaluations = 0;
        while let Some(node) = self.pending.pop_front() {
            self.queued[node] = false;
            if evaluations == limit {
                self.pending.clear();
                self.queued.fill(false);
                return Err(EngineError::NoFixedPoint { evaluations });
            }
            evaluations += 1;
            self.evaluations += 1;

            for (signal, value) in self.evaluate(node)? {
                self.write(signal, value);
            }
        }
        trace!(evaluations, "settled");
        Ok(())
    }

    fn bind_port(&self, group: &str, port: &PortSpec) -> Result<SignalId, EngineError> {
        let id = self
            .groups
            .get(group)
            .and_then(|g| g.ports.get(port.name))
            .copied()
            .ok_or_else(|| EngineError::UnboundPort {
                group: group.to_string(),
                port: port.name.to_string(),
            })?;
        let width = self.width(id);
        if width != port.width {
            return Err(EngineError::WidthMismatch {
                signal: self.signals[id].name.clone(),
                expected: width,
                found: port.width,
            });
        }
        Ok(id)
    }
}

impl CircuitEngine for SignalGraph {
    fn value(&self, name: &str) -> Result<BitVector, EngineError> {
        Ok(self.signals[self.lookup(name)?].value)
    }

    fn set_value(&mut self, name: &str, value: BitVector) -> Result<(), EngineError> {
        let id = self.lookup(name)?;
        let previous = self.signals[id].value;
        if value.width() != previous.width() {
            return Err(EngineError::WidthMismatch {
                signal: name.to_string(),
                expected: previous.width(),
                found: value.width(),
            });
        }
        if !self.write(id, value) {
            return Ok(());
        }
        if previous.is_zero() && value.bit(0) {
            self.clock_edge(id);
        }
        self.propagate()
    }

    fn settle(&mut self) -> Result<(), EngineError> {
        self.propagate()
    }

    fn register_native_rule(
        &mut self,
        name: &str,
        rule: Box<dyn NativeRule>,
    ) -> Result<(), EngineError> {
        if !self.groups.contains_key(name) {
            return Err(EngineError::UnknownGroup(name.to_string()));
        }
        let inputs = rule
            .dependencies()
            .iter()
            .map(|port| self.bind_port(name, port))
            .collect::<Result<Vec<_>, _>>()?;
        let outputs = rule
            .outcomes()
            .iter()
            .map(|port| self.bind_port(name, port))
            .collect::<Result<Vec<_>, _>>()?;
        let stored = outputs.iter().map(|&id| self.signals[id].value).collect();

        let retired = self
            .groups
            .get_mut(name)
            .map(|group| std::mem::take(&mut group.nodes))
            .unwrap_or_default();
        for &node in &retired {
            self.nodes[node] = Node::Retired;
        }
        for targets in &mut self.fanout {
            targets.retain(|node| !retired.contains(node));
        }

        let rule_name = rule.name();
        let node = self.push_node(Node::Rule {
            rule,
            inputs,
            outputs,
            stored,
        });
        if let Some(group) = self.groups.get_mut(name) {
            group.nodes.push(node);
        }
        debug!(
            group = name,
            rule = rule_name,
            retired = retired.len(),
            "native rule registered"
        );

        self.enqueue(node);
        self.propagate()
    }
}

#[cfg(test)]
mod tests {
    use harness_core::{
        Alu, BitVector, CircuitEngine, EngineError, NativeRule, OutcomeWriter, PortSpec,
        RuleError,
    };

    use super::{SignalGraph, EVALUATIONS_PER_NODE};
    use crate::cell::CellOp;
    use crate::description::CircuitDescription;
    use crate::error::DescriptionError;

    fn counter() -> CircuitDescription {
        let mut desc = CircuitDescription::default();
        desc.signal("clk", 1)
            .signal("rst", 1)
            .signal("count", 8)
            .signal("one", 8)
            .signal("next", 8)
            .constant("one", 1)
            .cell(CellOp::Add, &["count", "one"], "next")
            .register("next", "count", "clk", Some("rst"), 0);
        desc
    }

    #[test]
    fn initial_settle_propagates_constants() {
        let graph = SignalGraph::from_description(&counter()).expect("valid circuit");
        assert_eq!(graph.value("next"), Ok(BitVector::new(8, 1)));
        assert_eq!(graph.signal_count(), 5);
    }

    #[test]
    fn registers_sample_on_rising_edge_only() {
        let mut graph = SignalGraph::from_description(&counter()).expect("valid circuit");

        graph.flip("clk").expect("rise");
        assert_eq!(graph.value("count"), Ok(BitVector::new(8, 1)));
        graph.flip("clk").expect("fall");
        assert_eq!(graph.value("count"), Ok(BitVector::new(8, 1)));
        graph.flip("clk").expect("rise");
        assert_eq!(graph.value("count"), Ok(BitVector::new(8, 2)));
        assert_eq!(graph.value("next"), Ok(BitVector::new(8, 3)));
    }

    #[test]
    fn synchronous_reset_loads_init_on_edge() {
        let mut graph = SignalGraph::from_description(&counter()).expect("valid circuit");
        graph.flip("clk").expect("rise");
        graph.flip("clk").expect("fall");

        graph.set_value("rst", BitVector::bit_of(true)).expect("assert reset");
        assert_eq!(graph.value("count"), Ok(BitVector::new(8, 1)));
        graph.flip("clk").expect("rise");
        assert_eq!(graph.value("count"), Ok(BitVector::new(8, 0)));
    }

    #[test]
    fn register_chain_samples_simultaneously() {
        let mut desc = CircuitDescription::default();
        desc.signal("clk", 1)
            .signal("in", 4)
            .signal("s1", 4)
            .signal("s2", 4)
            .register("in", "s1", "clk", None, 0)
            .register("s1", "s2", "clk", None, 0);
        let mut graph = SignalGraph::from_description(&desc).expect("valid circuit");

        graph.set_value("in", BitVector::new(4, 9)).expect("drive input");
        graph.flip("clk").expect("rise");
        assert_eq!(graph.value("s1"), Ok(BitVector::new(4, 9)));
        assert_eq!(graph.value("s2"), Ok(BitVector::new(4, 0)));
    }

    #[test]
    fn engine_rejects_bad_accesses() {
        let mut graph = SignalGraph::from_description(&counter()).expect("valid circuit");

        assert_eq!(
            graph.value("nope"),
            Err(EngineError::UnknownSignal("nope".to_string()))
        );
        assert_eq!(
            graph.set_value("count", BitVector::word(1)),
            Err(EngineError::WidthMismatch {
                signal: "count".to_string(),
                expected: 8,
                found: 32,
            })
        );
        assert_eq!(
            graph.flip("count"),
            Err(EngineError::NotSingleBit("count".to_string()))
        );
    }

    #[test]
    fn description_errors_are_reported() {
        let mut doubled = counter();
        doubled.constant("next", 0);
        assert!(matches!(
            SignalGraph::from_description(&doubled),
            Err(DescriptionError::MultipleDrivers(name)) if name == "next"
        ));

        let mut dangling = counter();
        dangling.cell(CellOp::Resize, &["ghost"], "next");
        assert!(matches!(
            SignalGraph::from_description(&dangling),
            Err(DescriptionError::UnknownSignal(name)) if name == "ghost"
        ));

        let mut wide_clock = CircuitDescription::default();
        wide_clock
            .signal("clk", 2)
            .signal("q", 1)
            .signal("d", 1)
            .register("d", "q", "clk", None, 0);
        assert!(matches!(
            SignalGraph::from_description(&wide_clock),
            Err(DescriptionError::ControlWidth(name)) if name == "clk"
        ));
    }

    #[test]
    fn combinational_loop_without_fixed_point_is_detected() {
        let mut desc = CircuitDescription::default();
        desc.signal("x", 1)
            .signal("y", 1)
            .signal("one", 1)
            .constant("one", 1)
            .cell(CellOp::Xor, &["x", "one"], "y")
            .cell(CellOp::Resize, &["y"], "x");

        assert!(matches!(
            SignalGraph::from_description(&desc),
            Err(DescriptionError::Engine(EngineError::NoFixedPoint { .. }))
        ));
    }

    fn grouped_incrementer() -> CircuitDescription {
        let text = r#"{"signals":[{"name":"a","width":32},{"name":"b","width":32},{"name":"ctrl","width":4},{"name":"result","width":32},{"name":"zero","width":1},{"name":"less","width":1},{"name":"copy","width":32}],"cells":[{"op":"add","inputs":["a","b"],"output":"result","group":"alu"},{"op":"resize","inputs":["result"],"output":"copy"}],"groups":[{"name":"alu","ports":{"a":"a","b":"b","ctrl":"ctrl","result":"result","zero":"zero","less":"less"}}]}"#;
        CircuitDescription::from_json(text).expect("valid description")
    }

    #[test]
    fn native_rule_replaces_group_cells() {
        let mut graph =
            SignalGraph::from_description(&grouped_incrementer()).expect("valid circuit");
        graph.set_value("a", BitVector::word(6)).expect("drive a");
        graph.set_value("b", BitVector::word(2)).expect("drive b");
        assert_eq!(graph.value("copy"), Ok(BitVector::word(8)));

        graph
            .register_native_rule("alu", Box::new(Alu))
            .expect("ports bind");
        graph
            .set_value("ctrl", BitVector::new(4, 0b1000))
            .expect("select sub");
        assert_eq!(graph.value("result"), Ok(BitVector::word(4)));
        assert_eq!(graph.value("copy"), Ok(BitVector::word(4)));
        assert_eq!(graph.value("zero"), Ok(BitVector::bit_of(false)));
    }

    #[test]
    fn unchanged_rule_outputs_do_not_wake_fanout() {
        let mut graph =
            SignalGraph::from_description(&grouped_incrementer()).expect("valid circuit");
        graph
            .register_native_rule("alu", Box::new(Alu))
            .expect("ports bind");
        graph
            .set_value("ctrl", BitVector::new(4, 0b0011))
            .expect("select pass-b");

        let before = graph.evaluation_count();
        graph.set_value("a", BitVector::word(99)).expect("drive a");
        assert_eq!(graph.evaluation_count() - before, 1);

        let before = graph.evaluation_count();
        graph.set_value("a", BitVector::word(99)).expect("same value");
        assert_eq!(graph.evaluation_count(), before);
    }

    #[test]
    fn registration_checks_group_and_ports() {
        let mut graph =
            SignalGraph::from_description(&grouped_incrementer()).expect("valid circuit");
        assert_eq!(
            graph.register_native_rule("fpu", Box::new(Alu)),
            Err(EngineError::UnknownGroup("fpu".to_string()))
        );

        let mut narrow = grouped_incrementer();
        narrow.groups[0].ports.remove("less");
        let mut graph = SignalGraph::from_description(&narrow).expect("valid circuit");
        assert_eq!(
            graph.register_native_rule("alu", Box::new(Alu)),
            Err(EngineError::UnboundPort {
                group: "alu".to_string(),
                port: "less".to_string(),
            })
        );

        let mut wrong = grouped_incrementer();
        wrong.groups[0]
            .ports
            .insert("ctrl".to_string(), "zero".to_string());
        let mut graph = SignalGraph::from_description(&wrong).expect("valid circuit");
        assert_eq!(
            graph.register_native_rule("alu", Box::new(Alu)),
            Err(EngineError::WidthMismatch {
                signal: "zero".to_string(),
                expected: 1,
                found: 4,
            })
        );
    }

    /// Drives its output to the inverse of its input.
    #[derive(Debug)]
    struct Inverter;

    const INVERTER_PORTS: [PortSpec; 1] = [PortSpec::new("x", 1)];
    const INVERTER_OUT: [PortSpec; 1] = [PortSpec::new("y", 1)];

    impl NativeRule for Inverter {
        fn name(&self) -> &'static str {
            "inverter"
        }

        fn dependencies(&self) -> &[PortSpec] {
            &INVERTER_PORTS
        }

        fn outcomes(&self) -> &[PortSpec] {
            &INVERTER_OUT
        }

        fn evaluate(
            &self,
            inputs: &[BitVector],
            outcomes: &mut OutcomeWriter<'_>,
        ) -> Result<(), RuleError> {
            outcomes.commit(0, BitVector::from(inputs[0].is_zero()));
            Ok(())
        }
    }

    #[test]
    fn oscillating_rule_hits_evaluation_limit() {
        let mut desc = CircuitDescription::from_json(
            r#"{"signals":[{"name":"x","width":1},{"name":"y","width":1}],"groups":[{"name":"loop","ports":{"x":"x","y":"y"}}]}"#,
        )
        .expect("valid description");
        desc.cell(CellOp::Resize, &["y"], "x");
        let mut graph = SignalGraph::from_description(&desc)
            .expect("valid circuit")
            .with_evaluation_limit(100);

        assert_eq!(
            graph.register_native_rule("loop", Box::new(Inverter)),
            Err(EngineError::NoFixedPoint { evaluations: 100 })
        );
    }

    #[test]
    fn default_limit_counts_registered_rules() {
        let mut desc = CircuitDescription::from_json(
            r#"{"signals":[{"name":"x","width":1},{"name":"y","width":1}],"groups":[{"name":"loop","ports":{"x":"x","y":"y"}}]}"#,
        )
        .expect("valid description");
        desc.cell(CellOp::Resize, &["y"], "x");
        let mut graph = SignalGraph::from_description(&desc).expect("valid circuit");

        // One cell plus the registered rule.
        assert_eq!(
            graph.register_native_rule("loop", Box::new(Inverter)),
            Err(EngineError::NoFixedPoint {
                evaluations: 3 * EVALUATIONS_PER_NODE
            })
        );
    }
}
