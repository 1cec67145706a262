//! Byte-addressable memory image loaded from a textual hex listing.

#![allow(clippy::cast_possible_truncation)]

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::memory::AccessWidth;
use crate::{BitVector, WORD_BITS};

/// Default image size in bytes (32 KiB).
pub const DEFAULT_MEMORY_CAPACITY: usize = 32 * 1024;
/// Line prefix introducing a word-address directive.
pub const ADDRESS_DIRECTIVE: char = '@';

/// Errors raised while loading a memory image.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The image file could not be opened.
    #[error("failed to open memory image {}", .path.display())]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Reading the image stream failed.
    #[error("failed to read memory image")]
    Read(#[source] io::Error),
    /// A data or directive line is not a valid 32-bit hexadecimal value.
    #[error("line {line}: invalid hexadecimal word `{text}`")]
    InvalidHex {
        /// 1-indexed line number.
        line: usize,
        /// Offending line content, trimmed.
        text: String,
    },
}

/// Fixed-capacity byte store with wraparound addressing.
///
/// Every byte address is reduced modulo the capacity, so a multi-byte access
/// starting near the top of the image continues at address zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryImage {
    bytes: Box<[u8]>,
}

impl Default for MemoryImage {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MEMORY_CAPACITY)
    }
}

impl MemoryImage {
    /// Allocates a zeroed image of `capacity` bytes.
    ///
    /// # Panics
    ///
    /// Panics when `capacity` is not a power of two.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(
            capacity.is_power_of_two(),
            "memory capacity {capacity} is not a power of two"
        );
        Self {
            bytes: vec![0; capacity].into_boxed_slice(),
        }
    }

    /// Parses a hex listing into a default-capacity image.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidHex`] for any malformed line.
    pub fn from_hex_text(text: &str) -> Result<Self, ImageError> {
        Self::load(text.as_bytes())
    }

    /// Opens and parses the hex listing at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::Open`] when the file cannot be opened, and the
    /// errors of [`MemoryImage::load`] otherwise.
    pub fn from_path(path: &Path) -> Result<Self, ImageError> {
        let file = File::open(path).map_err(|source| ImageError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load(BufReader::new(file))
    }

    /// Parses a hex listing into a default-capacity image.
    ///
    /// # Errors
    ///
    /// See [`MemoryImage::load_with_capacity`].
    pub fn load(reader: impl BufRead) -> Result<Self, ImageError> {
        Self::load_with_capacity(reader, DEFAULT_MEMORY_CAPACITY)
    }

    /// Parses a hex listing into an image of `capacity` bytes.
    ///
    /// A line starting with [`ADDRESS_DIRECTIVE`] moves the write cursor to
    /// the given word address (`value << 2`). Any other non-blank line is a
    /// 32-bit word stored little-endian at the cursor, which then advances by
    /// four bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::Read`] on stream failure and
    /// [`ImageError::InvalidHex`] for any malformed line.
    ///
    /// # Panics
    ///
    /// Panics when `capacity` is not a power of two.
    pub fn load_with_capacity(reader: impl BufRead, capacity: usize) -> Result<Self, ImageError> {
        let mut image = Self::with_capacity(capacity);
        let mut cursor: u32 = 0;

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(ImageError::Read)?;
            let text = line.trim();
            if text.is_empty() {
                continue;
            }

            let invalid = || ImageError::InvalidHex {
                line: index + 1,
                text: text.to_string(),
            };

            if let Some(address) = text.strip_prefix(ADDRESS_DIRECTIVE) {
                cursor = parse_hex_word(address).ok_or_else(invalid)? << 2;
            } else {
                let word = parse_hex_word(text).ok_or_else(invalid)?;
                image.write_bytes(cursor, word, 4);
                cursor = cursor.wrapping_add(4);
            }
        }

        Ok(image)
    }

    /// Image size in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Raw backing bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn index_of(&self, addr: u32) -> usize {
        addr as usize & (self.bytes.len() - 1)
    }

    /// Reads a single byte.
    #[must_use]
    pub fn read_byte(&self, addr: u32) -> u8 {
        self.bytes[self.index_of(addr)]
    }

    fn read_bytes(&self, addr: u32, count: u32) -> u32 {
        (0..count).rev().fold(0, |acc, offset| {
            (acc << 8) | u32::from(self.read_byte(addr.wrapping_add(offset)))
        })
    }

    fn write_bytes(&mut self, addr: u32, value: u32, count: u32) {
        for (offset, byte) in (0..count).zip(value.to_le_bytes()) {
            let index = self.index_of(addr.wrapping_add(offset));
            self.bytes[index] = byte;
        }
    }

    /// Reads a little-endian 32-bit word.
    #[must_use]
    pub fn read_word(&self, addr: u32) -> BitVector {
        self.read_with_op(AccessWidth::Word, addr)
    }

    /// Loads `op.bytes()` little-endian bytes and extends them to 32 bits.
    #[must_use]
    pub fn read_with_op(&self, op: AccessWidth, addr: u32) -> BitVector {
        let raw = BitVector::new(op.bits(), u64::from(self.read_bytes(addr, op.bytes())));
        if op.sign_extends() {
            raw.sign_extend(op.bits())
        } else {
            raw.resize_unsigned(WORD_BITS)
        }
    }

    /// Stores the low `op.bytes()` bytes of `value` little-endian.
    pub fn write_with_op(&mut self, op: AccessWidth, addr: u32, value: BitVector) {
        let truncated = value.resize_unsigned(op.bits());
        self.write_bytes(addr, truncated.as_u32(), op.bytes());
    }
}

fn parse_hex_word(text: &str) -> Option<u32> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::{ImageError, MemoryImage, DEFAULT_MEMORY_CAPACITY};
    use crate::memory::AccessWidth;
    use crate::BitVector;

    #[test]
    fn default_image_is_zeroed_32kib() {
        let image = MemoryImage::default();
        assert_eq!(image.capacity(), DEFAULT_MEMORY_CAPACITY);
        assert!(image.as_bytes().iter().all(|byte| *byte == 0));
    }

    #[test]
    #[should_panic(expected = "not a power of two")]
    fn capacity_must_be_power_of_two() {
        let _ = MemoryImage::with_capacity(3000);
    }

    #[test]
    fn data_only_listing_fills_consecutive_words() {
        let image = MemoryImage::from_hex_text("00000013\n\ndeadbeef\n0x00c0ffee\n").unwrap();
        assert_eq!(image.read_word(0), BitVector::word(0x0000_0013));
        assert_eq!(image.read_word(4), BitVector::word(0xdead_beef));
        assert_eq!(image.read_word(8), BitVector::word(0x00c0_ffee));
        assert_eq!(&image.as_bytes()[4..8], &[0xef, 0xbe, 0xad, 0xde]);
    }

    #[test]
    fn address_directive_moves_cursor_to_word_address() {
        let image = MemoryImage::from_hex_text("@10\r\n11223344\r\n55667788\r\n@0\r\naabbccdd\r\n")
            .unwrap();
        assert_eq!(image.read_word(0x40), BitVector::word(0x1122_3344));
        assert_eq!(image.read_word(0x44), BitVector::word(0x5566_7788));
        assert_eq!(image.read_word(0x00), BitVector::word(0xaabb_ccdd));
    }

    #[rstest]
    #[case("zz00ff00", 1)]
    #[case("1_0000_0000", 1)]
    #[case("100000000", 1)]
    #[case("@xyz", 1)]
    fn malformed_lines_are_reported_with_position(#[case] line: &str, #[case] expected_line: usize) {
        let err = MemoryImage::from_hex_text(line).expect_err("line must be rejected");
        match err {
            ImageError::InvalidHex { line: at, text } => {
                assert_eq!(at, expected_line);
                assert_eq!(text, line);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn error_line_counts_blank_lines() {
        let err = MemoryImage::from_hex_text("00000000\n\n+1\n").expect_err("bad sign");
        assert!(matches!(err, ImageError::InvalidHex { line: 3, .. }));
    }

    #[test]
    fn byte_loads_extend_by_signedness() {
        let mut image = MemoryImage::default();
        image.write_with_op(AccessWidth::Byte, 0x20, BitVector::word(0x1234_56FF));
        assert_eq!(image.read_with_op(AccessWidth::Byte, 0x20), BitVector::word(0xFFFF_FFFF));
        assert_eq!(
            image.read_with_op(AccessWidth::ByteUnsigned, 0x20),
            BitVector::word(0x0000_00FF)
        );
        assert_eq!(image.read_byte(0x21), 0);
    }

    #[test]
    fn half_loads_extend_by_signedness() {
        let mut image = MemoryImage::default();
        image.write_with_op(AccessWidth::HalfUnsigned, 0x30, BitVector::word(0xABCD_8001));
        assert_eq!(image.read_with_op(AccessWidth::Half, 0x30), BitVector::word(0xFFFF_8001));
        assert_eq!(
            image.read_with_op(AccessWidth::HalfUnsigned, 0x30),
            BitVector::word(0x0000_8001)
        );
        assert_eq!(image.read_word(0x30), BitVector::word(0x0000_8001));
    }

    #[test]
    fn stores_truncate_to_access_width() {
        let mut image = MemoryImage::from_hex_text("ffffffff").unwrap();
        image.write_with_op(AccessWidth::Half, 0, BitVector::word(0x1234_5678));
        assert_eq!(image.read_word(0), BitVector::word(0xFFFF_5678));
        image.write_with_op(AccessWidth::ByteUnsigned, 3, BitVector::word(0x0000_0100));
        assert_eq!(image.read_word(0), BitVector::word(0x00FF_5678));
    }

    #[test]
    fn multi_byte_layout_is_little_endian() {
        let mut image = MemoryImage::default();
        image.write_with_op(AccessWidth::Word, 0x100, BitVector::word(0x0102_0304));
        assert_eq!(&image.as_bytes()[0x100..0x104], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(image.read_with_op(AccessWidth::HalfUnsigned, 0x102), BitVector::word(0x0102));
    }

    #[test]
    fn word_access_wraps_byte_by_byte_across_capacity() {
        let mut image = MemoryImage::default();
        let top = u32::try_from(DEFAULT_MEMORY_CAPACITY - 1).unwrap();
        image.write_with_op(AccessWidth::Word, top, BitVector::word(0xAABB_CCDD));
        assert_eq!(image.read_byte(top), 0xDD);
        assert_eq!(image.read_byte(0), 0xCC);
        assert_eq!(image.read_byte(1), 0xBB);
        assert_eq!(image.read_byte(2), 0xAA);
        assert_eq!(image.read_word(top), BitVector::word(0xAABB_CCDD));
    }

    #[test]
    fn addresses_alias_modulo_capacity() {
        let mut image = MemoryImage::with_capacity(256);
        image.write_with_op(AccessWidth::Word, 0x1_0010, BitVector::word(0xCAFE_F00D));
        assert_eq!(image.read_word(0x10), BitVector::word(0xCAFE_F00D));
        assert_eq!(image.read_word(0xFFFF_FF10), BitVector::word(0xCAFE_F00D));
    }

    proptest! {
        #[test]
        fn word_write_then_read_is_identity(addr: u32, value: u32) {
            let mut image = MemoryImage::with_capacity(1024);
            image.write_with_op(AccessWidth::Word, addr, BitVector::word(value));
            prop_assert_eq!(image.read_word(addr), BitVector::word(value));
        }
    }
}
