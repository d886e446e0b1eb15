//! arith-codec-core: lossless byte codec built on adaptive order-0 arithmetic coding
//!
//! This library turns an arbitrary byte buffer into a compact, self-delimiting
//! bit stream and back:
//! - Models byte probabilities with an adaptive frequency table
//! - Codes blocks of up to 127 bytes with a fixed-point interval coder
//! - Frames every block with a length prefix, bit stuffing and a delimiter
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `model`: Adaptive frequency table and per-block snapshots
//! - `interval`: Interval narrowing and renormalization
//! - `bitio`: Low-level bit reading/writing
//! - `framing`: Frame writing, bit stuffing, delimiter splitting
//! - `encoder` / `decoder`: Block loops tying the above together
//! - `codec`: Public API, configuration and mode dispatch
//! - `metrics`: Entropy, frame length, compression and timing
//!
//! # Design Principles
//!
//! - **No panics**: Malformed input yields a structured `FormatError`
//! - **Validate before allocating**: Declared lengths are checked up front
//! - **Deterministic**: Every call owns fresh model state
//!
//! # Example
//! ```
//! let encoded = arith_codec_core::encode(b"hello hello hello");
//! let decoded = arith_codec_core::decode(&encoded.content).unwrap();
//! assert_eq!(decoded.content, b"hello hello hello");
//! ```

pub mod bitio;
pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod framing;
pub mod interval;
pub mod metrics;
pub mod model;

// Re-export commonly used types
pub use codec::{decode, encode, execute, Codec, CodecConfig, Decoded, Encoded, Mode, Outcome};
pub use error::{Error, FormatError, Result};
