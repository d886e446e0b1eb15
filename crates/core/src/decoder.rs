//! Block decoder: framed bit stream back to bytes.
//!
//! Decoding happens in two passes. The first splits and validates every
//! frame and sums the declared block lengths, so malformed input is rejected
//! before the output buffer is allocated. The second replays the adaptive
//! model exactly as the encoder did: one snapshot per block, taken before
//! the block's first symbol.

use crate::error::{FormatError, Result};
use crate::framing::{split_frames, Frame};
use crate::interval::{IntervalDecoder, TERMINATION_BITS};
use crate::model::ProbabilityModel;

/// Padding bits a frame may carry after its scaling string.
const MAX_PADDING_BITS: usize = 7;

/// Decode a framed buffer produced by [`crate::encoder::encode_blocks`].
///
/// # Errors
/// - Every structural error of [`split_frames`]
/// - `FormatError::OutputTooLarge` if the declared lengths sum past `max_len`
/// - `FormatError::TruncatedBlock` if a frame runs out of scaling bits
/// - `FormatError::TrailingBits` if a frame has more bits than it can use
pub fn decode_blocks(data: &[u8], max_len: usize) -> Result<Vec<u8>> {
    let frames = split_frames(data)?;

    let declared: usize = frames.iter().map(|f| usize::from(f.len)).sum();
    if declared > max_len {
        return Err(FormatError::OutputTooLarge {
            declared,
            limit: max_len,
        }
        .into());
    }

    let mut model = ProbabilityModel::new();
    let mut output = Vec::with_capacity(declared);

    for frame in &frames {
        decode_frame(frame, &mut model, &mut output)?;
    }

    debug_assert_eq!(output.len(), declared);
    Ok(output)
}

/// Decode one frame, appending its symbols to `output`.
fn decode_frame(frame: &Frame, model: &mut ProbabilityModel, output: &mut Vec<u8>) -> Result<()> {
    let expected = usize::from(frame.len);
    if expected == 0 {
        // Nothing was coded, so only padding may follow the prefix
        let unused = frame.scaling_bits();
        if unused > MAX_PADDING_BITS {
            return Err(FormatError::TrailingBits {
                frame: frame.index,
                unused,
            }
            .into());
        }
        return Ok(());
    }

    let snapshot = model.snapshot();
    let available = frame.scaling_bits();
    let mut coder = IntervalDecoder::new(frame.scaling_reader());

    log::trace!(
        "frame {}: {} symbols from {} scaling bits, min_step {}",
        frame.index,
        expected,
        available,
        snapshot.min_step()
    );

    for decoded in 0..expected {
        let symbol = coder.decode(&snapshot);

        // The encoder wrote one bit per renormalization plus the termination
        if coder.shifts() + TERMINATION_BITS > available {
            return Err(FormatError::TruncatedBlock {
                frame: frame.index,
                expected,
                decoded,
                available,
            }
            .into());
        }

        output.push(symbol);
        model.observe(symbol);
    }

    let unused = available - (coder.shifts() + TERMINATION_BITS);
    if unused > MAX_PADDING_BITS {
        return Err(FormatError::TrailingBits {
            frame: frame.index,
            unused,
        }
        .into());
    }

    Ok(())
}
