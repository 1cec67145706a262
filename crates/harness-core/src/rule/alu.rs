//! 32-bit ALU native rule.
//!
//! Control codes are decoded as a full 4-bit table. Several operations are
//! reachable from two codes because bit 3 is only meaningful for the
//! add/sub, slt/sltu and srl/sra pairs; both encodings are decoded
//! explicitly so the table stays bit-compatible with the instruction decoder
//! that drives it.

use crate::rule::{NativeRule, OutcomeWriter, PortSpec, RuleError};
use crate::{BitVector, WORD_BITS};

/// Rule name, also the default subgraph name the ALU replaces.
pub const ALU_RULE_NAME: &str = "alu";

/// ALU inputs: operands `a`, `b` and the 4-bit control code.
pub const ALU_DEPENDENCIES: [PortSpec; 3] = [
    PortSpec::new("a", WORD_BITS),
    PortSpec::new("b", WORD_BITS),
    PortSpec::new("ctrl", 4),
];

/// ALU outputs: `result`, `zero` and `less`.
pub const ALU_OUTCOMES: [PortSpec; 3] = [
    PortSpec::new("result", WORD_BITS),
    PortSpec::new("zero", 1),
    PortSpec::new("less", 1),
];

const RESULT_SLOT: usize = 0;
const ZERO_SLOT: usize = 1;
const LESS_SLOT: usize = 2;

/// Operation selected by an ALU control code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// `a + b`.
    Add,
    /// `a - b`.
    Sub,
    /// `a << b[4:0]`.
    Shl,
    /// `1` when `a < b` signed.
    Slt,
    /// `1` when `a < b` unsigned.
    Sltu,
    /// `b`.
    PassB,
    /// `a ^ b`.
    Xor,
    /// `a >> b[4:0]`, zero fill.
    Srl,
    /// `a >> b[4:0]`, sign fill.
    Sra,
    /// `a | b`.
    Or,
    /// `a & b`.
    And,
}

impl AluOp {
    /// Decodes a raw control code.
    #[must_use]
    pub const fn decode(code: u64) -> Option<Self> {
        match code {
            0b0000 => Some(Self::Add),
            0b1000 => Some(Self::Sub),
            0b0001 | 0b1001 => Some(Self::Shl),
            0b0010 => Some(Self::Slt),
            0b1010 => Some(Self::Sltu),
            0b0011 | 0b1011 => Some(Self::PassB),
            0b0100 | 0b1100 => Some(Self::Xor),
            0b0101 => Some(Self::Srl),
            0b1101 => Some(Self::Sra),
            0b0110 | 0b1110 => Some(Self::Or),
            0b0111 | 0b1111 => Some(Self::And),
            _ => None,
        }
    }

    /// Returns `true` for the set-less-than operations, whose `zero` flag
    /// reports operand equality instead of a zero result.
    #[must_use]
    pub const fn is_compare(self) -> bool {
        matches!(self, Self::Slt | Self::Sltu)
    }

    /// Applies the operation to two same-width operands.
    #[must_use]
    pub fn apply(self, a: BitVector, b: BitVector) -> BitVector {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Shl => a.shl(b),
            Self::Slt => BitVector::new(a.width(), u64::from(a.signed_lt(b))),
            Self::Sltu => BitVector::new(a.width(), u64::from(a.unsigned_lt(b))),
            Self::PassB => b,
            Self::Xor => a ^ b,
            Self::Srl => a.shr_logical(b),
            Self::Sra => a.shr_arithmetic(b),
            Self::Or => a | b,
            Self::And => a & b,
        }
    }
}

/// Values produced by one ALU evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AluOutput {
    /// Operation result.
    pub result: BitVector,
    /// Equality for compares, zero result otherwise.
    pub zero: bool,
    /// Low bit of `result`.
    pub less: bool,
}

/// Stateless ALU rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Alu;

impl Alu {
    /// Computes all ALU outputs.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::UnknownControl`] when `control` is outside the
    /// 4-bit table, which only a wider control signal can produce.
    ///
    /// # Panics
    ///
    /// Panics when `a` and `b` differ in width.
    pub fn compute(a: BitVector, b: BitVector, control: BitVector) -> Result<AluOutput, RuleError> {
        let op = AluOp::decode(control.as_u64()).ok_or(RuleError::UnknownControl {
            rule: ALU_RULE_NAME,
            code: control.as_u64(),
        })?;

        let result = op.apply(a, b);
        let zero = if op.is_compare() {
            a == b
        } else {
            result.is_zero()
        };

        Ok(AluOutput {
            result,
            zero,
            less: result.bit(0),
        })
    }
}

impl NativeRule for Alu {
    fn name(&self) -> &'static str {
        ALU_RULE_NAME
    }

    fn dependencies(&self) -> &[PortSpec] {
        &ALU_DEPENDENCIES
    }

    fn outcomes(&self) -> &[PortSpec] {
        &ALU_OUTCOMES
    }

    fn evaluate(
        &self,
        inputs: &[BitVector],
        outcomes: &mut OutcomeWriter<'_>,
    ) -> Result<(), RuleError> {
        let &[a, b, control] = inputs else {
            return Err(RuleError::Arity {
                rule: ALU_RULE_NAME,
                expected: ALU_DEPENDENCIES.len(),
                found: inputs.len(),
            });
        };

        let output = Self::compute(a, b, control)?;
        tracing::trace!(
            a = %a,
            b = %b,
            ctrl = control.as_u64(),
            result = %output.result,
            "alu evaluated"
        );

        outcomes.commit(RESULT_SLOT, output.result);
        outcomes.commit(ZERO_SLOT, BitVector::from(output.zero));
        outcomes.commit(LESS_SLOT, BitVector::from(output.less));
        Ok(())
    }
}
