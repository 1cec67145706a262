#![no_main]

use harness_core::{AccessKind, AccessWidth, Alu, BitVector, MemoryImage};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 9 {
        return;
    }

    let code = BitVector::new(3, u64::from(data[0]));
    let addr = u32::from_le_bytes([data[1], data[2], data[3], data[4]]);
    let value = u32::from_le_bytes([data[5], data[6], data[7], data[8]]);

    if let Ok(text) = std::str::from_utf8(&data[9..]) {
        let _ = MemoryImage::from_hex_text(text);
    }

    let mut image = MemoryImage::with_capacity(64);
    if let Ok(op) = AccessWidth::decode(code, AccessKind::Write) {
        image.write_with_op(op, addr, BitVector::word(value));
        let loaded = image.read_with_op(op, addr);
        assert_eq!(
            loaded.resize_unsigned(op.bits()),
            BitVector::word(value).resize_unsigned(op.bits())
        );
    }

    let control = BitVector::new(4, u64::from(data[0] >> 4));
    let _ = Alu::compute(BitVector::word(addr), BitVector::word(value), control);
});
