//! Error types for the arithmetic codec.
//!
//! All operations return structured errors rather than panicking.
//! Encoding cannot fail on any byte buffer; decoding validates the whole
//! frame structure and reports the first inconsistency it finds.

use thiserror::Error;

/// Top-level error type for all operations in the codec.
///
/// Each variant corresponds to a specific failure domain:
/// - Mode: the caller asked for something other than encode/decode
/// - Format: a decode input failed structural validation
/// - Bit I/O: reading/writing bits from/to byte buffers
/// - Config: codec configuration out of range
#[derive(Debug, Error)]
pub enum Error {
    /// Mode string was neither `encode` nor `decode`
    #[error("invalid mode {0:?}: must be either encode or decode")]
    InvalidMode(String),

    /// Decode input is not a valid sequence of frames
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Invalid bit count (e.g., more than 64 bits at once)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// Structural errors found while decoding a framed bit stream.
///
/// Bit offsets are counted from the most significant bit of the first
/// input byte; frame indices count non-empty frames from zero.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// Bits remain after the last delimiter (or no delimiter exists)
    #[error("{trailing_bits} bits after the last delimiter: stream is not terminated")]
    MissingDelimiter { trailing_bits: usize },

    /// A delimiter pattern starts off a byte boundary
    #[error("delimiter at bit offset {offset} is not byte-aligned")]
    MisalignedDelimiter { offset: usize },

    /// Six consecutive one bits inside a frame, or a frame ending mid-escape
    #[error("invalid bit stuffing in frame {frame} at bit {bit}")]
    InvalidStuffing { frame: usize, bit: usize },

    /// Frame holds fewer than the 8 bits of its length prefix
    #[error("frame {frame} too short: need at least 8 bits, got {bits}")]
    FrameTooShort { frame: usize, bits: usize },

    /// Length prefix outside 0..=127
    #[error("frame {frame} declares {len} symbols, maximum is 127")]
    BlockLengthOutOfRange { frame: usize, len: u8 },

    /// Sum of declared block lengths exceeds the configured bound
    #[error("declared output of {declared} bytes exceeds limit {limit}")]
    OutputTooLarge { declared: usize, limit: usize },

    /// Scaling bits ran out before the declared symbols were recovered
    #[error("frame {frame} exhausted its {available} scaling bits after {decoded} of {expected} symbols")]
    TruncatedBlock {
        frame: usize,
        expected: usize,
        decoded: usize,
        available: usize,
    },

    /// More scaling bits than the declared symbols and padding account for
    #[error("frame {frame} has {unused} unused scaling bits")]
    TrailingBits { frame: usize, unused: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    /// Every variant a codec call can produce, by name.
    fn domain(err: &Error) -> &'static str {
        match err {
            Error::InvalidMode(_) => "mode",
            Error::Format(_) => "format",
            Error::BitIo(_) => "bit io",
            Error::Config(_) => "config",
        }
    }

    #[test]
    fn test_error_domains() {
        let format: Error = FormatError::MissingDelimiter { trailing_bits: 3 }.into();
        assert_eq!(domain(&format), "format");
        assert_eq!(
            format.to_string(),
            "format error: 3 bits after the last delimiter: stream is not terminated"
        );

        let bits: Error = BitIoError::UnexpectedEof.into();
        assert_eq!(domain(&bits), "bit io");
        assert_eq!(bits.to_string(), "bit I/O error: unexpected end of bit stream");

        let mode = Error::InvalidMode("zip".to_string());
        assert_eq!(domain(&mode), "mode");
        assert!(mode.to_string().contains("must be either encode or decode"));

        assert_eq!(domain(&Error::Config("x".into())), "config");
    }
}
