//! MSB-first bit streams over byte buffers.
//!
//! Frames are built one bit at a time (length prefix, stuffed scaling bits,
//! zero padding, delimiter) and scaling strings are consumed one bit at a
//! time by the interval decoder. Bit 0 of a stream is the most significant
//! bit of its first byte.
//!
//! A `BitWriter` zero-fills the last partial byte. A `BitReader` may be
//! limited to an exact bit length, after which `read_bit` fails and
//! `read_bit_or_zero` keeps yielding zeros.
//!
//! # Example
//! ```
//! use arith_codec_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_byte(0x7F);   // length prefix 127
//! writer.write_bit(true);
//! assert_eq!(writer.bit_len(), 9);
//!
//! let frame = writer.finish();
//! assert_eq!(frame, vec![0x7F, 0x80]);
//!
//! let mut reader = BitReader::with_bit_len(&frame, 9);
//! assert_eq!(reader.read_bits(8).unwrap(), 127);
//! assert!(reader.read_bit().unwrap());
//! assert!(!reader.read_bit_or_zero());
//! ```

use crate::error::{BitIoError, Result};

/// Appends bits to a growing byte buffer, most significant bit first.
///
/// # Invariants
/// - `pending` holds `filled` bits, left-aligned; the rest are zero
/// - `filled` is always < 8
#[derive(Debug, Clone)]
pub struct BitWriter {
    out: Vec<u8>,
    pending: u8,
    filled: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Writer whose buffer starts with room for `bytes` bytes.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            out: Vec::with_capacity(bytes),
            pending: 0,
            filled: 0,
        }
    }

    /// Append one bit.
    pub fn write_bit(&mut self, bit: bool) {
        self.pending |= u8::from(bit) << (7 - self.filled);
        self.filled += 1;
        if self.filled == 8 {
            self.flush_pending();
        }
    }

    /// Append all eight bits of `byte`, highest first.
    pub fn write_byte(&mut self, byte: u8) {
        (0..8)
            .rev()
            .for_each(|shift| self.write_bit((byte >> shift) & 1 == 1));
    }

    /// Zero-fill up to the next byte boundary and report how many bits that took.
    pub fn pad_to_byte(&mut self) -> usize {
        if self.filled == 0 {
            return 0;
        }
        let padding = usize::from(8 - self.filled);
        self.flush_pending();
        padding
    }

    fn flush_pending(&mut self) {
        self.out.push(self.pending);
        self.pending = 0;
        self.filled = 0;
    }

    /// Pad the final byte and hand back the buffer.
    pub fn finish(mut self) -> Vec<u8> {
        self.pad_to_byte();
        self.out
    }

    /// Bits appended so far.
    pub fn bit_len(&self) -> usize {
        self.out.len() * 8 + usize::from(self.filled)
    }

    pub fn is_byte_aligned(&self) -> bool {
        self.filled == 0
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Walks the bits of a byte slice, most significant bit first.
///
/// # Invariants
/// - `pos <= limit <= data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Bits past this index are treated as absent
    limit: usize,
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// Reader over every bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_bit_len(data, usize::MAX)
    }

    /// Reader over the first `bit_len` bits of `data` (clamped to its size).
    pub fn with_bit_len(data: &'a [u8], bit_len: usize) -> Self {
        Self {
            data,
            limit: bit_len.min(data.len() * 8),
            pos: 0,
        }
    }

    /// Read `count` bits as an unsigned integer, first bit most significant.
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` when `count` exceeds 64
    /// - `BitIoError::UnexpectedEof` when fewer than `count` bits remain; the
    ///   position is left untouched
    pub fn read_bits(&mut self, count: usize) -> Result<u64> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        if count > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }
        Ok((0..count).fold(0u64, |acc, _| (acc << 1) | u64::from(self.next_bit())))
    }

    /// # Errors
    /// `BitIoError::UnexpectedEof` at the end of the readable bits.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.is_empty() {
            return Err(BitIoError::UnexpectedEof.into());
        }
        Ok(self.next_bit())
    }

    /// Like `read_bit`, but an exhausted reader yields `false` forever.
    pub fn read_bit_or_zero(&mut self) -> bool {
        !self.is_empty() && self.next_bit()
    }

    fn next_bit(&mut self) -> bool {
        let bit = self.data[self.pos / 8] & (0x80 >> (self.pos % 8)) != 0;
        self.pos += 1;
        bit
    }

    pub fn bits_remaining(&self) -> usize {
        self.limit - self.pos
    }

    /// Bits consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_byte_layout() {
        let mut writer = BitWriter::new();
        for bit in [false, true, true, true, true, true, true, false] {
            writer.write_bit(bit);
        }
        assert!(writer.is_byte_aligned());
        assert_eq!(writer.finish(), vec![0x7E]);
    }

    #[test]
    fn test_prefix_then_scaling_bits() {
        let mut writer = BitWriter::with_capacity(2);
        writer.write_byte(3);
        writer.write_bit(false);
        writer.write_bit(true);
        assert_eq!(writer.bit_len(), 10);

        let bytes = writer.finish();
        assert_eq!(bytes, vec![0x03, 0b0100_0000]);

        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bits(8).unwrap(), 3);
        assert_eq!(reader.read_bits(2).unwrap(), 0b01);
        assert_eq!(reader.bits_remaining(), 6);
    }

    #[test]
    fn test_pad_reports_fill() {
        let mut writer = BitWriter::default();
        assert_eq!(writer.pad_to_byte(), 0);

        writer.write_bit(true);
        writer.write_bit(true);
        writer.write_bit(false);
        assert_eq!(writer.pad_to_byte(), 5);
        assert_eq!(writer.pad_to_byte(), 0);

        writer.write_byte(0x7E);
        assert_eq!(writer.finish(), vec![0b1100_0000, 0x7E]);
    }

    #[test]
    fn test_wide_values() {
        let value = 0xDEAD_BEEF_0123_4567u64;
        let mut writer = BitWriter::new();
        writer.write_bit(true);
        for byte in value.to_be_bytes() {
            writer.write_byte(byte);
        }
        let bytes = writer.finish();
        assert_eq!(bytes.len(), 9);

        let mut reader = BitReader::new(&bytes);
        assert!(reader.read_bit().unwrap());
        assert_eq!(reader.read_bits(64).unwrap(), value);
    }

    #[test]
    fn test_eof_leaves_position() {
        let data = [0x5A];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(5).unwrap(), 0b01011);
        assert!(reader.read_bits(4).is_err());
        assert_eq!(reader.position(), 5);
        assert_eq!(reader.read_bits(3).unwrap(), 0b010);
        assert!(reader.read_bit().is_err());
    }

    #[test]
    fn test_limited_reader_pads_with_zeros() {
        let data = [0xFF, 0xFF];
        let mut reader = BitReader::with_bit_len(&data, 3);

        assert_eq!(reader.read_bits(3).unwrap(), 0b111);
        assert!(reader.is_empty());
        for _ in 0..4 {
            assert!(!reader.read_bit_or_zero());
        }
        assert_eq!(reader.position(), 3);
    }

    #[test]
    fn test_limit_clamped_to_data() {
        let data = [0u8; 2];
        assert_eq!(BitReader::with_bit_len(&data, 1000).bits_remaining(), 16);
        assert_eq!(BitReader::new(&[]).bits_remaining(), 0);
    }

    #[test]
    fn test_bit_count_over_64_rejected() {
        let mut reader = BitReader::new(&[0xAB; 9]);
        assert!(reader.read_bits(65).is_err());
    }

    #[test]
    fn test_zero_count_is_noop() {
        let mut reader = BitReader::new(&[0xFF]);
        assert_eq!(reader.read_bits(0).unwrap(), 0);
        assert_eq!(reader.position(), 0);
    }
}
