//! Block frame serialization and parsing.
//!
//! Every coded block travels in a self-delimiting frame:
//!
//! # Frame Format
//!
//! ```text
//! +----------------------+
//! | block length (8)     |  big-endian, 0..=127        \
//! +----------------------+                               > bit-stuffed
//! | scaling bits (var)   |  interval coder output      /
//! +----------------------+
//! | zero padding (0-7)   |  up to the next byte boundary
//! +----------------------+
//! | delimiter (8)        |  01111110 (0x7E), never stuffed
//! +----------------------+
//! ```
//!
//! # Bit Stuffing
//!
//! After every run of five consecutive `1` bits in the stuffed region a `0`
//! is inserted. The stuffed region therefore never holds six `1`s in a row,
//! padding is all zeros, and the length prefix starts with a `0`, so the
//! pattern `01111110` can only occur where a delimiter was written, always
//! on a byte boundary.
//!
//! Parsing splits the bit stream on the delimiter pattern (leftmost match,
//! non-overlapping), drops empty segments, and removes the inserted zeros.

use crate::bitio::{BitReader, BitWriter};
use crate::error::{FormatError, Result};

/// Delimiter byte closing every frame.
pub const DELIMITER: u8 = 0b0111_1110;

/// Largest block length the 8-bit prefix may declare.
pub const MAX_BLOCK_LEN: usize = 127;

/// Number of consecutive one bits after which a zero is inserted.
const STUFF_RUN: u8 = 5;

/// Bits in the block length prefix.
const PREFIX_BITS: usize = 8;

/// Writes a sequence of frames into one byte-aligned buffer.
#[derive(Debug, Default)]
pub struct FrameWriter {
    writer: BitWriter,
    ones: u8,
}

impl FrameWriter {
    /// Create a writer with room for `bytes` output bytes.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            writer: BitWriter::with_capacity(bytes),
            ones: 0,
        }
    }

    /// Append one frame and return its size in bytes, delimiter included.
    ///
    /// `block_len` must not exceed [`MAX_BLOCK_LEN`].
    pub fn write_frame(&mut self, block_len: u8, scaling: &[bool]) -> usize {
        debug_assert!(usize::from(block_len) <= MAX_BLOCK_LEN);
        debug_assert!(self.writer.is_byte_aligned());

        let start = self.writer.bit_len();
        self.ones = 0;

        for shift in (0..PREFIX_BITS).rev() {
            self.write_stuffed((block_len >> shift) & 1 == 1);
        }
        for &bit in scaling {
            self.write_stuffed(bit);
        }

        self.writer.pad_to_byte();
        self.writer.write_byte(DELIMITER);

        (self.writer.bit_len() - start) / 8
    }

    fn write_stuffed(&mut self, bit: bool) {
        self.writer.write_bit(bit);
        if !bit {
            self.ones = 0;
            return;
        }

        self.ones += 1;
        if self.ones == STUFF_RUN {
            self.writer.write_bit(false);
            self.ones = 0;
        }
    }

    /// Finish writing and return the framed bytes.
    pub fn finish(self) -> Vec<u8> {
        self.writer.finish()
    }
}

/// A parsed frame: declared block length plus its unstuffed scaling bits.
///
/// The scaling bits still include the zero padding that preceded the
/// delimiter; the frame format gives no way to tell the two apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Position among the non-empty frames of the stream
    pub index: usize,

    /// Declared number of symbols (0..=127)
    pub len: u8,

    scaling: Vec<u8>,
    scaling_bits: usize,
}

impl Frame {
    /// Reader over the scaling bits.
    pub fn scaling_reader(&self) -> BitReader<'_> {
        BitReader::with_bit_len(&self.scaling, self.scaling_bits)
    }

    /// Number of scaling bits available.
    pub fn scaling_bits(&self) -> usize {
        self.scaling_bits
    }
}

/// Split a framed buffer into frames, validating delimiters and stuffing.
///
/// # Errors
/// - `FormatError::MisalignedDelimiter` if a delimiter is not byte-aligned
/// - `FormatError::MissingDelimiter` if bits follow the last delimiter
/// - `FormatError::InvalidStuffing` if a frame holds six `1`s in a row
/// - `FormatError::FrameTooShort` if a frame lacks a full length prefix
/// - `FormatError::BlockLengthOutOfRange` if a prefix exceeds 127
pub fn split_frames(data: &[u8]) -> Result<Vec<Frame>> {
    let mut reader = BitReader::new(data);
    let mut frames = Vec::new();
    let mut segment: Vec<bool> = Vec::new();
    let mut window = 0u8;

    while !reader.is_empty() {
        let bit = reader.read_bit()?;
        segment.push(bit);
        window = (window << 1) | u8::from(bit);

        if segment.len() >= 8 && window == DELIMITER {
            let offset = reader.position() - 8;
            if offset % 8 != 0 {
                return Err(FormatError::MisalignedDelimiter { offset }.into());
            }

            segment.truncate(segment.len() - 8);
            if !segment.is_empty() {
                let start = offset - segment.len();
                frames.push(parse_frame(frames.len(), &segment, start)?);
            }

            segment.clear();
            window = 0;
        }
    }

    if !segment.is_empty() {
        return Err(FormatError::MissingDelimiter {
            trailing_bits: segment.len(),
        }
        .into());
    }

    Ok(frames)
}

/// Unstuff one raw segment and parse its length prefix.
///
/// `start` is the bit offset of the segment in the whole stream.
fn parse_frame(index: usize, raw: &[bool], start: usize) -> Result<Frame> {
    let mut prefix = 0u8;
    let mut prefix_bits = 0;
    let mut scaling = BitWriter::with_capacity(raw.len() / 8 + 1);
    let mut ones = 0u8;

    for (i, &bit) in raw.iter().enumerate() {
        if ones == STUFF_RUN {
            if bit {
                return Err(FormatError::InvalidStuffing {
                    frame: index,
                    bit: start + i,
                }
                .into());
            }
            ones = 0;
            continue;
        }
        ones = if bit { ones + 1 } else { 0 };

        if prefix_bits < PREFIX_BITS {
            prefix = (prefix << 1) | u8::from(bit);
            prefix_bits += 1;
        } else {
            scaling.write_bit(bit);
        }
    }

    if ones == STUFF_RUN {
        return Err(FormatError::InvalidStuffing {
            frame: index,
            bit: start + raw.len(),
        }
        .into());
    }

    if prefix_bits < PREFIX_BITS {
        return Err(FormatError::FrameTooShort {
            frame: index,
            bits: prefix_bits,
        }
        .into());
    }

    if usize::from(prefix) > MAX_BLOCK_LEN {
        return Err(FormatError::BlockLengthOutOfRange {
            frame: index,
            len: prefix,
        }
        .into());
    }

    let scaling_bits = scaling.bit_len();
    Ok(Frame {
        index,
        len: prefix,
        scaling: scaling.finish(),
        scaling_bits,
    })
}
