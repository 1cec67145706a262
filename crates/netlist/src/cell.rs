//! Word-level combinational cells.
//!
//! The cell set mirrors the [`BitVector`] operations one to one; there are no
//! gate-level primitives.

use harness_core::BitVector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Operation computed by a cell.
///
/// Serialized with an `op` tag, so a cell reads as
/// `{"op": "slice", "offset": 3, ...}` in a circuit description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CellOp {
    /// Constant driver; takes no inputs.
    Const {
        /// Value, masked to the output width.
        value: u64,
    },
    /// Modular `a + b`.
    Add,
    /// Modular `a - b`.
    Sub,
    /// `a << (b & 31)`.
    Shl,
    /// Logical `a >> (b & 31)`.
    Shr,
    /// Arithmetic `a >> (b & 31)`.
    Sra,
    /// `a ^ b`.
    Xor,
    /// `a | b`.
    Or,
    /// `a & b`.
    And,
    /// Signed `a < b`, one bit.
    Lt,
    /// Unsigned `a < b`, one bit.
    Ltu,
    /// `a == b`, one bit.
    Eq,
    /// Selects data input `select` (the first input) out of the rest; an
    /// out-of-range select yields zero.
    Mux,
    /// Extracts `output width` bits starting at `offset`.
    Slice {
        /// Lowest extracted bit.
        offset: u32,
    },
    /// Zero-extends or truncates to the output width.
    Resize,
}

/// Shape violations detected when a cell is wired up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum CellError {
    /// Wrong number of inputs.
    #[error("`{op}` takes {expected} inputs, got {found}")]
    Arity {
        /// Cell operation name.
        op: &'static str,
        /// Required input count (a minimum for `mux`).
        expected: usize,
        /// Connected input count.
        found: usize,
    },
    /// An input or the output has the wrong width.
    #[error("`{op}` port {port} must be {expected} bits wide, got {found}")]
    Width {
        /// Cell operation name.
        op: &'static str,
        /// Input index, or the input count for the output port.
        port: usize,
        /// Required width.
        expected: u32,
        /// Connected width.
        found: u32,
    },
    /// A slice reaches past the top of its input.
    #[error("slice of {width} bits at offset {offset} exceeds a {input}-bit input")]
    SliceRange {
        /// Lowest extracted bit.
        offset: u32,
        /// Output width.
        width: u32,
        /// Input width.
        input: u32,
    },
}

impl CellOp {
    /// Lowercase operation name as used in circuit descriptions.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Const { .. } => "const",
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Shl => "shl",
            Self::Shr => "shr",
            Self::Sra => "sra",
            Self::Xor => "xor",
            Self::Or => "or",
            Self::And => "and",
            Self::Lt => "lt",
            Self::Ltu => "ltu",
            Self::Eq => "eq",
            Self::Mux => "mux",
            Self::Slice { .. } => "slice",
            Self::Resize => "resize",
        }
    }

    /// Validates input and output widths for this operation.
    ///
    /// # Errors
    ///
    /// Returns a [`CellError`] describing the first violated constraint.
    pub fn check(self, inputs: &[u32], output: u32) -> Result<(), CellError> {
        let op = self.name();
        let arity = |expected: usize| {
            if inputs.len() == expected {
                Ok(())
            } else {
                Err(CellError::Arity {
                    op,
                    expected,
                    found: inputs.len(),
                })
            }
        };
        let width = |port: usize, expected: u32, found: u32| {
            if expected == found {
                Ok(())
            } else {
                Err(CellError::Width {
                    op,
                    port,
                    expected,
                    found,
                })
            }
        };

        match self {
            Self::Const { .. } => arity(0),
            Self::Add | Self::Sub | Self::Xor | Self::Or | Self::And => {
                arity(2)?;
                width(0, output, inputs[0])?;
                width(1, output, inputs[1])
            }
            Self::Shl | Self::Shr | Self::Sra => {
                arity(2)?;
                width(0, output, inputs[0])
            }
            Self::Lt | Self::Ltu | Self::Eq => {
                arity(2)?;
                width(1, inputs[0], inputs[1])?;
                width(2, 1, output)
            }
            Self::Mux => {
                if inputs.len() < 2 {
                    return Err(CellError::Arity {
                        op,
                        expected: 2,
                        found: inputs.len(),
                    });
                }
                inputs
                    .iter()
                    .enumerate()
                    .skip(1)
                    .try_for_each(|(port, &found)| width(port, output, found))
            }
            Self::Slice { offset } => {
                arity(1)?;
                if offset.checked_add(output).is_some_and(|end| end <= inputs[0]) {
                    Ok(())
                } else {
                    Err(CellError::SliceRange {
                        offset,
                        width: output,
                        input: inputs[0],
                    })
                }
            }
            Self::Resize => arity(1),
        }
    }

    /// Computes the output value.
    ///
    /// `inputs` must already satisfy [`CellOp::check`] for `width`.
    #[must_use]
    pub fn evaluate(self, inputs: &[BitVector], width: u32) -> BitVector {
        let bit = |value: bool| BitVector::new(width, u64::from(value));
        match self {
            Self::Const { value } => BitVector::new(width, value),
            Self::Add => inputs[0] + inputs[1],
            Self::Sub => inputs[0] - inputs[1],
            Self::Shl => inputs[0].shl(inputs[1]),
            Self::Shr => inputs[0].shr_logical(inputs[1]),
            Self::Sra => inputs[0].shr_arithmetic(inputs[1]),
            Self::Xor => inputs[0] ^ inputs[1],
            Self::Or => inputs[0] | inputs[1],
            Self::And => inputs[0] & inputs[1],
            Self::Lt => bit(inputs[0].signed_lt(inputs[1])),
            Self::Ltu => bit(inputs[0].unsigned_lt(inputs[1])),
            Self::Eq => bit(inputs[0] == inputs[1]),
            Self::Mux => usize::try_from(inputs[0].as_u64())
                .ok()
                .and_then(|index| inputs[1..].get(index))
                .copied()
                .unwrap_or_else(|| BitVector::zero(width)),
            Self::Slice { offset } => BitVector::new(width, inputs[0].as_u64() >> offset),
            Self::Resize => inputs[0].resize_unsigned(width),
        }
    }
}
