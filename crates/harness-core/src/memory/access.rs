//! Load/store access-width codes carried on the data-memory bus.

use std::fmt;

use thiserror::Error;

use crate::BitVector;

/// Direction of a data-memory bus transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum AccessKind {
    /// Load from memory onto the bus.
    Read,
    /// Store from the bus into memory.
    Write,
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("read"),
            Self::Write => f.write_str("write"),
        }
    }
}

/// Errors raised while decoding a bus access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum MemoryError {
    /// The bus carried a code outside the five legal access widths.
    #[error("invalid {kind} memory operation: {code:#05b}")]
    InvalidAccessWidth {
        /// Direction of the rejected transfer.
        kind: AccessKind,
        /// Raw code read from the bus.
        code: u64,
    },
}

/// Transfer width and load extension selected by a 3-bit bus code.
///
/// Stores reuse the same code space: the unsigned codes truncate exactly like
/// their signed counterparts because stores never extend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum AccessWidth {
    /// `0b000`: one byte, sign-extended on load.
    Byte = 0b000,
    /// `0b001`: two bytes, sign-extended on load.
    Half = 0b001,
    /// `0b010`: four bytes.
    Word = 0b010,
    /// `0b100`: one byte, zero-extended on load.
    ByteUnsigned = 0b100,
    /// `0b101`: two bytes, zero-extended on load.
    HalfUnsigned = 0b101,
}

impl AccessWidth {
    /// Every legal access width in code order.
    pub const ALL: [Self; 5] = [
        Self::Byte,
        Self::Half,
        Self::Word,
        Self::ByteUnsigned,
        Self::HalfUnsigned,
    ];

    /// Decodes a raw bus code.
    #[must_use]
    pub const fn from_code(code: u64) -> Option<Self> {
        match code {
            0b000 => Some(Self::Byte),
            0b001 => Some(Self::Half),
            0b010 => Some(Self::Word),
            0b100 => Some(Self::ByteUnsigned),
            0b101 => Some(Self::HalfUnsigned),
            _ => None,
        }
    }

    /// Decodes the bus code held in `value` for a transfer of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::InvalidAccessWidth`] for any code outside the
    /// five legal encodings.
    pub const fn decode(value: BitVector, kind: AccessKind) -> Result<Self, MemoryError> {
        match Self::from_code(value.as_u64()) {
            Some(width) => Ok(width),
            None => Err(MemoryError::InvalidAccessWidth {
                kind,
                code: value.as_u64(),
            }),
        }
    }

    /// Raw 3-bit code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Number of bytes transferred.
    #[must_use]
    pub const fn bytes(self) -> u32 {
        match self {
            Self::Byte | Self::ByteUnsigned => 1,
            Self::Half | Self::HalfUnsigned => 2,
            Self::Word => 4,
        }
    }

    /// Number of bits transferred.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.bytes() * 8
    }

    /// Returns `true` when loads replicate the top transferred bit.
    #[must_use]
    pub const fn sign_extends(self) -> bool {
        matches!(self, Self::Byte | Self::Half)
    }
}
