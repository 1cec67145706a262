//! Fixed-width bit-vector values with hardware arithmetic semantics.
//!
//! A [`BitVector`] stores its value in a `u64` but never exposes bits above
//! its declared width: every constructor and every operation masks the result
//! back to `width` bits. Arithmetic is two's-complement modular, shifts take
//! their distance from the low five bits of a second vector, and the signed
//! and unsigned orders are both available because the same bit pattern must
//! be compared both ways by `SLT`/`SLTU`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, BitAnd, BitOr, BitXor, Sub};

use thiserror::Error;

/// Widest supported bit-vector.
pub const MAX_WIDTH: u32 = 64;
/// Width of an architectural data/instruction word.
pub const WORD_BITS: u32 = 32;
/// Number of low bits of a shift operand that select the shift distance.
pub const SHIFT_AMOUNT_BITS: u32 = 5;

/// Rejected bit-vector width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("bit width {width} is outside 1..={MAX_WIDTH}")]
pub struct WidthError {
    /// The rejected width.
    pub width: u32,
}

/// Fixed-width unsigned-storage integer.
///
/// Equality and hashing consider only the logical value, so a 32-bit and a
/// 64-bit vector holding the same number compare equal.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "RawBitVector", into = "RawBitVector")
)]
pub struct BitVector {
    width: u32,
    bits: u64,
}

const fn mask(width: u32) -> u64 {
    if width >= MAX_WIDTH {
        u64::MAX
    } else {
        (1_u64 << width) - 1
    }
}

impl BitVector {
    /// Creates a vector of `width` bits holding `value` truncated to that width.
    ///
    /// # Panics
    ///
    /// Panics when `width` is zero or wider than [`MAX_WIDTH`].
    #[must_use]
    pub const fn new(width: u32, value: u64) -> Self {
        assert!(
            width >= 1 && width <= MAX_WIDTH,
            "bit-vector width must be within 1..=64"
        );
        Self {
            width,
            bits: value & mask(width),
        }
    }

    /// Fallible form of [`BitVector::new`].
    ///
    /// # Errors
    ///
    /// Returns [`WidthError`] when `width` is zero or wider than [`MAX_WIDTH`].
    pub const fn try_new(width: u32, value: u64) -> Result<Self, WidthError> {
        if width >= 1 && width <= MAX_WIDTH {
            Ok(Self::new(width, value))
        } else {
            Err(WidthError { width })
        }
    }

    /// All-zero vector of `width` bits.
    #[must_use]
    pub const fn zero(width: u32) -> Self {
        Self::new(width, 0)
    }

    /// All-ones vector of `width` bits.
    #[must_use]
    pub const fn ones(width: u32) -> Self {
        Self::new(width, u64::MAX)
    }

    /// 32-bit word.
    #[must_use]
    pub const fn word(value: u32) -> Self {
        Self::new(WORD_BITS, value as u64)
    }

    /// Single-bit vector.
    #[must_use]
    pub const fn bit_of(value: bool) -> Self {
        Self::new(1, value as u64)
    }

    /// Declared width in bits.
    #[must_use]
    pub const fn width(self) -> u32 {
        self.width
    }

    /// Logical value, zero-extended to 64 bits.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.bits
    }

    /// Low 32 bits of the logical value.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn as_u32(self) -> u32 {
        self.bits as u32
    }

    /// Logical value interpreted as two's complement at the declared width.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn as_signed(self) -> i64 {
        let shift = MAX_WIDTH - self.width;
        ((self.bits << shift) as i64) >> shift
    }

    /// Returns `true` when every bit is clear.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.bits == 0
    }

    /// Reads bit `index`; bits at or above the width read as zero.
    #[must_use]
    pub const fn bit(self, index: u32) -> bool {
        index < self.width && (self.bits >> index) & 1 == 1
    }

    /// Most significant bit at the declared width.
    #[must_use]
    pub const fn sign_bit(self) -> bool {
        self.bit(self.width - 1)
    }

    fn assert_same_width(self, rhs: Self, op: &str) {
        assert!(
            self.width == rhs.width,
            "{op}: operand widths differ ({} vs {})",
            self.width,
            rhs.width
        );
    }

    /// Modular addition.
    ///
    /// # Panics
    ///
    /// Panics when the operand widths differ.
    #[must_use]
    pub fn wrapping_add(self, rhs: Self) -> Self {
        self.assert_same_width(rhs, "add");
        Self::new(self.width, self.bits.wrapping_add(rhs.bits))
    }

    /// Modular subtraction.
    ///
    /// # Panics
    ///
    /// Panics when the operand widths differ.
    #[must_use]
    pub fn wrapping_sub(self, rhs: Self) -> Self {
        self.assert_same_width(rhs, "sub");
        Self::new(self.width, self.bits.wrapping_sub(rhs.bits))
    }

    /// Shift distance selected by the low five bits of `amount` (0..=31).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn shift_distance(amount: Self) -> u32 {
        amount.resize_unsigned(SHIFT_AMOUNT_BITS).bits as u32
    }

    /// Logical left shift; bits shifted past the width are discarded.
    #[must_use]
    pub const fn shl(self, amount: Self) -> Self {
        Self::new(self.width, self.bits << Self::shift_distance(amount))
    }

    /// Logical right shift; vacated high bits are zero.
    #[must_use]
    pub const fn shr_logical(self, amount: Self) -> Self {
        Self::new(self.width, self.bits >> Self::shift_distance(amount))
    }

    /// Arithmetic right shift; vacated high bits replicate the sign bit.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn shr_arithmetic(self, amount: Self) -> Self {
        let shifted = self.as_signed() >> Self::shift_distance(amount);
        Self::new(self.width, shifted as u64)
    }

    /// Signed less-than at the shared width.
    ///
    /// # Panics
    ///
    /// Panics when the operand widths differ.
    #[must_use]
    pub fn signed_lt(self, rhs: Self) -> bool {
        self.assert_same_width(rhs, "signed compare");
        self.as_signed() < rhs.as_signed()
    }

    /// Unsigned less-than at the shared width.
    ///
    /// # Panics
    ///
    /// Panics when the operand widths differ.
    #[must_use]
    pub fn unsigned_lt(self, rhs: Self) -> bool {
        self.assert_same_width(rhs, "unsigned compare");
        self.bits < rhs.bits
    }

    /// Replicates bit `from_width - 1` into every higher bit of a 32-bit word.
    ///
    /// Only the low `from_width` bits of `self` participate.
    ///
    /// # Panics
    ///
    /// Panics when `from_width` is zero or wider than [`WORD_BITS`].
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub const fn sign_extend(self, from_width: u32) -> Self {
        assert!(
            from_width >= 1 && from_width <= WORD_BITS,
            "sign extension source width must be within 1..=32"
        );
        let shift = MAX_WIDTH - from_width;
        let extended = ((self.bits << shift) as i64) >> shift;
        Self::new(WORD_BITS, extended as u64)
    }

    /// Truncates or zero-extends to `to_width` without sign replication.
    #[must_use]
    pub const fn resize_unsigned(self, to_width: u32) -> Self {
        Self::new(to_width, self.bits)
    }

    fn bitwise(self, rhs: Self, op: &str, f: impl FnOnce(u64, u64) -> u64) -> Self {
        self.assert_same_width(rhs, op);
        Self::new(self.width, f(self.bits, rhs.bits))
    }
}

impl PartialEq for BitVector {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl Eq for BitVector {}

impl Hash for BitVector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
    }
}

impl From<bool> for BitVector {
    fn from(value: bool) -> Self {
        Self::bit_of(value)
    }
}

impl From<u32> for BitVector {
    fn from(value: u32) -> Self {
        Self::word(value)
    }
}

impl Add for BitVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }
}

impl Sub for BitVector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.wrapping_sub(rhs)
    }
}

impl BitXor for BitVector {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        self.bitwise(rhs, "xor", |a, b| a ^ b)
    }
}

impl BitOr for BitVector {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.bitwise(rhs, "or", |a, b| a | b)
    }
}

impl BitAnd for BitVector {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.bitwise(rhs, "and", |a, b| a & b)
    }
}

impl fmt::LowerHex for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.bits, f)
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.width.div_ceil(4) as usize;
        write!(f, "{:0digits$x}", self.bits)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize, serde::Serialize)]
struct RawBitVector {
    width: u32,
    bits: u64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBitVector> for BitVector {
    type Error = WidthError;

    fn try_from(raw: RawBitVector) -> Result<Self, Self::Error> {
        Self::try_new(raw.width, raw.bits)
    }
}

#[cfg(feature = "serde")]
impl From<BitVector> for RawBitVector {
    fn from(value: BitVector) -> Self {
        Self {
            width: value.width,
            bits: value.bits,
        }
    }
}
