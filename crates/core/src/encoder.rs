//! Block encoder: input bytes to framed, bit-stuffed coded blocks.
//!
//! The input is cut into blocks of at most `block_size` symbols. Each block
//! is coded under one snapshot of the adaptive model taken before its first
//! symbol; the counts it updates along the way only shape later blocks.

use crate::framing::{FrameWriter, MAX_BLOCK_LEN};
use crate::interval::IntervalEncoder;
use crate::model::ProbabilityModel;

/// Per-block facts gathered while encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSummary {
    /// Number of symbols in the block
    pub len: u8,

    /// `ceil(-log2(P(block))) + 1` under the block's snapshot
    pub information_bits: u64,

    /// Scaling bits produced by the interval coder, termination included
    pub scaling_bits: usize,

    /// Frame size in bytes, delimiter included
    pub frame_bytes: usize,
}

/// Output of [`encode_blocks`].
#[derive(Debug, Clone, Default)]
pub struct EncodedBlocks {
    /// Framed bit stream
    pub content: Vec<u8>,

    /// One entry per frame, in stream order
    pub blocks: Vec<BlockSummary>,
}

/// Encode `data` into frames of at most `block_size` symbols.
///
/// `block_size` is clamped to `1..=127`. Empty input yields an empty stream.
pub fn encode_blocks(data: &[u8], block_size: usize) -> EncodedBlocks {
    let block_size = block_size.clamp(1, MAX_BLOCK_LEN);
    let mut model = ProbabilityModel::new();
    let mut frames = FrameWriter::with_capacity(data.len() + data.len() / block_size + 1);
    let mut blocks = Vec::with_capacity(data.len().div_ceil(block_size));

    for block in data.chunks(block_size) {
        let snapshot = model.snapshot();
        let information_bits = snapshot.information_bits(block);

        let mut coder = IntervalEncoder::new();
        for &symbol in block {
            model.observe(symbol);
            coder.encode(&snapshot, symbol);
        }
        let scaling = coder.finish();

        // chunks() never yields more than block_size <= 127 symbols
        let len = block.len() as u8;
        let frame_bytes = frames.write_frame(len, &scaling);

        log::trace!(
            "block {}: {} symbols, {} scaling bits (information {}, min step {}), {} frame bytes",
            blocks.len(),
            len,
            scaling.len(),
            information_bits,
            snapshot.min_step(),
            frame_bytes
        );

        blocks.push(BlockSummary {
            len,
            information_bits,
            scaling_bits: scaling.len(),
            frame_bytes,
        });
    }

    EncodedBlocks {
        content: frames.finish(),
        blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framing::{split_frames, DELIMITER};

    #[test]
    fn test_empty_input() {
        let encoded = encode_blocks(&[], MAX_BLOCK_LEN);
        assert!(encoded.content.is_empty());
        assert!(encoded.blocks.is_empty());
    }

    #[test]
    fn test_block_split() {
        let data = vec![0x41; 200];
        let encoded = encode_blocks(&data, MAX_BLOCK_LEN);

        let lens: Vec<u8> = encoded.blocks.iter().map(|b| b.len).collect();
        assert_eq!(lens, vec![127, 73]);

        let total: usize = encoded.blocks.iter().map(|b| b.frame_bytes).sum();
        assert_eq!(total, encoded.content.len());
        assert_eq!(*encoded.content.last().unwrap(), DELIMITER);
    }

    #[test]
    fn test_custom_block_size() {
        let data: Vec<u8> = (0..50).collect();
        let encoded = encode_blocks(&data, 16);
        let lens: Vec<u8> = encoded.blocks.iter().map(|b| b.len).collect();
        assert_eq!(lens, vec![16, 16, 16, 2]);

        // Oversized requests fall back to the format maximum
        let encoded = encode_blocks(&vec![7u8; 300], 1000);
        assert_eq!(encoded.blocks[0].len, 127);
    }

    #[test]
    fn test_first_block_is_coded_under_uniform_model() {
        // With every count at 1, each symbol costs exactly eight bits and the
        // scaling bits reproduce the input bytes.
        let encoded = encode_blocks(b"Hi", MAX_BLOCK_LEN);
        assert_eq!(encoded.blocks[0].scaling_bits, 16 + 2);
        assert_eq!(encoded.blocks[0].information_bits, 17);

        let frames = split_frames(&encoded.content).unwrap();
        let mut reader = frames[0].scaling_reader();
        assert_eq!(reader.read_bits(8).unwrap(), u64::from(b'H'));
        assert_eq!(reader.read_bits(8).unwrap(), u64::from(b'i'));
    }

    #[test]
    fn test_model_updates_lag_by_one_block() {
        // The second block sees counts from the first; the first block does not
        // see its own updates, so repeating a byte costs 8 bits per symbol.
        let data = vec![b'z'; 10];
        let encoded = encode_blocks(&data, 5);

        assert_eq!(encoded.blocks[0].scaling_bits, 5 * 8 + 2);
        assert!(encoded.blocks[1].scaling_bits < encoded.blocks[0].scaling_bits);
    }

    #[test]
    fn test_scaling_bits_stay_near_information_bound() {
        let data: Vec<u8> = b"the quick brown fox jumps over the lazy dog "
            .iter()
            .cycle()
            .take(1000)
            .copied()
            .collect();
        let encoded = encode_blocks(&data, MAX_BLOCK_LEN);

        for block in &encoded.blocks {
            assert!(block.scaling_bits as u64 <= block.information_bits + 2);
        }
    }
}
