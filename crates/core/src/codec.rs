//! Public codec surface: configuration, encode/decode, and mode dispatch.
//!
//! [`encode`] and [`decode`] use the default configuration. [`Codec`]
//! carries an explicit [`CodecConfig`]; it holds no coding state, so one
//! value can serve any number of calls.

use crate::decoder::decode_blocks;
use crate::encoder::encode_blocks;
use crate::error::{Error, Result};
use crate::framing::MAX_BLOCK_LEN;
use crate::metrics::{average_frame_len, compression_ratio, shannon_entropy};
use std::fmt;
use std::str::FromStr;

/// Default bound on decoded output: 1 GiB.
pub const DEFAULT_MAX_DECODED_LEN: usize = 1 << 30;

/// Codec configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Symbols per block when encoding (1..=127)
    pub block_size: usize,

    /// Largest total output `decode` accepts, checked before allocation
    pub max_decoded_len: usize,
}

impl CodecConfig {
    /// Check that every field is in range.
    ///
    /// # Errors
    /// Returns `Error::Config` describing the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 || self.block_size > MAX_BLOCK_LEN {
            return Err(Error::Config(format!(
                "block size {} outside 1..={}",
                self.block_size, MAX_BLOCK_LEN
            )));
        }
        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            block_size: MAX_BLOCK_LEN,
            max_decoded_len: DEFAULT_MAX_DECODED_LEN,
        }
    }
}

/// Result of encoding, with diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    /// Framed bit stream
    pub content: Vec<u8>,

    /// Shannon entropy of the input in bits per symbol
    pub entropy: f64,

    /// Average frame length in bytes per block
    pub average: f64,

    /// Input length divided by output length
    pub compression: f64,
}

/// Result of decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Reconstructed bytes
    pub content: Vec<u8>,
}

/// Direction of a codec run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Raw bytes to framed stream
    Encode,
    /// Framed stream to raw bytes
    Decode,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "encode" => Ok(Mode::Encode),
            "decode" => Ok(Mode::Decode),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Encode => f.write_str("encode"),
            Mode::Decode => f.write_str("decode"),
        }
    }
}

/// Output of [`execute`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Encoded stream and its diagnostics
    Encoded(Encoded),
    /// Decoded bytes
    Decoded(Decoded),
}

impl Outcome {
    /// The processed bytes, whichever direction produced them.
    pub fn content(&self) -> &[u8] {
        match self {
            Outcome::Encoded(encoded) => &encoded.content,
            Outcome::Decoded(decoded) => &decoded.content,
        }
    }

    /// Take ownership of the processed bytes.
    pub fn into_content(self) -> Vec<u8> {
        match self {
            Outcome::Encoded(encoded) => encoded.content,
            Outcome::Decoded(decoded) => decoded.content,
        }
    }
}

/// Arithmetic codec with a fixed configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    /// Create a codec after validating `config`.
    ///
    /// # Errors
    /// Returns `Error::Config` if the configuration is out of range.
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode `data`. Never fails.
    pub fn encode(&self, data: &[u8]) -> Encoded {
        let encoded = encode_blocks(data, self.config.block_size);

        let frame_bytes: usize = encoded.blocks.iter().map(|b| b.frame_bytes).sum();
        let result = Encoded {
            entropy: shannon_entropy(data),
            average: average_frame_len(frame_bytes, encoded.blocks.len()),
            compression: compression_ratio(data.len(), encoded.content.len()),
            content: encoded.content,
        };

        log::debug!(
            "encoded {} bytes into {} frames, {} bytes",
            data.len(),
            encoded.blocks.len(),
            result.content.len()
        );

        result
    }

    /// Decode a framed stream.
    ///
    /// # Errors
    /// Returns `Error::Format` if `data` is not a valid sequence of frames.
    pub fn decode(&self, data: &[u8]) -> Result<Decoded> {
        let content = decode_blocks(data, self.config.max_decoded_len)?;
        log::debug!("decoded {} bytes into {} bytes", data.len(), content.len());
        Ok(Decoded { content })
    }

    /// Run `mode` over `data`.
    ///
    /// # Errors
    /// Propagates decode errors.
    pub fn execute(&self, data: &[u8], mode: Mode) -> Result<Outcome> {
        match mode {
            Mode::Encode => Ok(Outcome::Encoded(self.encode(data))),
            Mode::Decode => self.decode(data).map(Outcome::Decoded),
        }
    }
}

/// Encode `data` with the default configuration.
pub fn encode(data: &[u8]) -> Encoded {
    Codec::default().encode(data)
}

/// Decode `data` with the default configuration.
///
/// # Errors
/// Returns `Error::Format` if `data` is not a valid sequence of frames.
pub fn decode(data: &[u8]) -> Result<Decoded> {
    Codec::default().decode(data)
}

/// Parse `mode` and run it over `data`.
///
/// # Errors
/// - `Error::InvalidMode` before any coding work if `mode` is unknown
/// - decode errors otherwise
pub fn execute(codec: &Codec, data: &[u8], mode: &str) -> Result<Outcome> {
    let mode: Mode = mode.parse()?;
    codec.execute(data, mode)
}
