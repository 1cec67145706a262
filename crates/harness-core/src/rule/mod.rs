//! Native-rule extension contract.
//!
//! A native rule is a hand-written combinational block that an engine runs in
//! place of a named subgraph. The engine owns the stored outcome values; the
//! rule recomputes every outcome from its declared dependencies and commits
//! each one through an [`OutcomeWriter`], which suppresses writes that would
//! not change the stored value. Only the slots reported dirty may be
//! propagated further, otherwise the engine's fixed-point settle never
//! terminates.

use std::fmt;

use thiserror::Error;

use crate::BitVector;

/// Arithmetic/logic unit exemplar rule.
pub mod alu;

pub use alu::{Alu, AluOp, AluOutput, ALU_DEPENDENCIES, ALU_OUTCOMES, ALU_RULE_NAME};

/// Named, fixed-width port of a native rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortSpec {
    /// Port name used to bind the rule to circuit signals.
    pub name: &'static str,
    /// Port width in bits.
    pub width: u32,
}

impl PortSpec {
    /// Creates a port declaration.
    #[must_use]
    pub const fn new(name: &'static str, width: u32) -> Self {
        Self { name, width }
    }
}

/// Errors raised by native-rule evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum RuleError {
    /// The control input selected no operation.
    #[error("{rule}: unreachable control code {code:#b}")]
    UnknownControl {
        /// Name of the failing rule.
        rule: &'static str,
        /// Raw control value.
        code: u64,
    },
    /// The engine supplied the wrong number of dependency values.
    #[error("{rule}: expected {expected} inputs, found {found}")]
    Arity {
        /// Name of the failing rule.
        rule: &'static str,
        /// Declared dependency count.
        expected: usize,
        /// Supplied value count.
        found: usize,
    },
}

/// Hand-written combinational block substituted for generic evaluation.
///
/// `evaluate` must be a pure function of `inputs`, which arrive in
/// [`NativeRule::dependencies`] order, and must commit every outcome slot
/// (indexed in [`NativeRule::outcomes`] order) on each call.
pub trait NativeRule: fmt::Debug {
    /// Stable rule name for diagnostics.
    fn name(&self) -> &'static str;

    /// Input ports read by the rule.
    fn dependencies(&self) -> &[PortSpec];

    /// Output ports written by the rule.
    fn outcomes(&self) -> &[PortSpec];

    /// Recomputes all outcomes from `inputs`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError`] when the inputs select no defined behaviour.
    fn evaluate(
        &self,
        inputs: &[BitVector],
        outcomes: &mut OutcomeWriter<'_>,
    ) -> Result<(), RuleError>;
}

/// Change-suppressing view over a rule's stored outcome values.
#[derive(Debug)]
pub struct OutcomeWriter<'a> {
    stored: &'a mut [BitVector],
    dirty: Vec<usize>,
}

impl<'a> OutcomeWriter<'a> {
    /// Wraps the currently stored outcome values.
    #[must_use]
    pub const fn new(stored: &'a mut [BitVector]) -> Self {
        Self {
            stored,
            dirty: Vec::new(),
        }
    }

    /// Stores `value`, truncated to the slot width, when it differs from the
    /// current value of `slot`.
    ///
    /// Returns `true` when the slot changed.
    ///
    /// # Panics
    ///
    /// Panics when `slot` is not a declared outcome index.
    pub fn commit(&mut self, slot: usize, value: BitVector) -> bool {
        let current = &mut self.stored[slot];
        let value = value.resize_unsigned(current.width());
        if *current == value {
            return false;
        }
        *current = value;
        if !self.dirty.contains(&slot) {
            self.dirty.push(slot);
        }
        true
    }

    /// Slots changed so far, in commit order.
    #[must_use]
    pub fn dirty(&self) -> &[usize] {
        &self.dirty
    }

    /// Returns `true` when no slot changed.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.dirty.is_empty()
    }

    /// Consumes the writer, returning the changed slots.
    #[must_use]
    pub fn into_dirty(self) -> Vec<usize> {
        self.dirty
    }
}

/// Runs `rule` against `stored`, returning the outcome slots that changed.
///
/// # Errors
///
/// Returns [`RuleError::Arity`] when `inputs` does not match the declared
/// dependencies, and any error raised by the rule itself.
pub fn evaluate_rule(
    rule: &dyn NativeRule,
    inputs: &[BitVector],
    stored: &mut [BitVector],
) -> Result<Vec<usize>, RuleError> {
    let expected = rule.dependencies().len();
    if inputs.len() != expected {
        return Err(RuleError::Arity {
            rule: rule.name(),
            expected,
            found: inputs.len(),
        });
    }

    let mut writer = OutcomeWriter::new(stored);
    rule.evaluate(inputs, &mut writer)?;
    Ok(writer.into_dirty())
}

#[cfg(test)]
mod tests {
    use super::{evaluate_rule, OutcomeWriter, RuleError};
    use crate::rule::Alu;
    use crate::BitVector;

    #[test]
    fn writer_reports_only_changed_slots() {
        let mut stored = [BitVector::word(7), BitVector::bit_of(false)];
        let mut writer = OutcomeWriter::new(&mut stored);

        assert!(!writer.commit(0, BitVector::word(7)));
        assert!(writer.is_clean());
        assert!(writer.commit(1, BitVector::bit_of(true)));
        assert!(!writer.commit(1, BitVector::bit_of(true)));
        assert_eq!(writer.dirty(), &[1]);
        assert_eq!(stored[1], BitVector::bit_of(true));
    }

    #[test]
    fn committed_value_keeps_slot_width() {
        let mut stored = [BitVector::zero(1)];
        let mut writer = OutcomeWriter::new(&mut stored);
        assert!(writer.commit(0, BitVector::word(1)));
        assert_eq!(stored[0].width(), 1);
    }

    #[test]
    fn evaluate_rule_rejects_wrong_arity() {
        let mut stored = [BitVector::zero(32), BitVector::zero(1), BitVector::zero(1)];
        let err = evaluate_rule(&Alu, &[BitVector::word(1)], &mut stored)
            .expect_err("alu needs three inputs");
        assert_eq!(
            err,
            RuleError::Arity {
                rule: "alu",
                expected: 3,
                found: 1,
            }
        );
    }
}
