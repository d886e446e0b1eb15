//! File and console glue around the codec.
//!
//! Reading the input, writing results under the output directory, and
//! printing what a run produced.

use anyhow::Context;
use arith_codec_core::Outcome;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Bytes shown before a buffer dump is abbreviated.
const DUMP_BYTES: usize = 50;

/// Read a whole file into memory.
pub fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("cannot read input file {}", path.display()))
}

/// Write `data` to `out_dir/name`, creating `out_dir` if needed.
///
/// Returns the path written.
pub fn write_output(out_dir: &Path, name: &str, data: &[u8]) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("cannot create output directory {}", out_dir.display()))?;

    let path = out_dir.join(name);
    std::fs::write(&path, data)
        .with_context(|| format!("cannot write output file {}", path.display()))?;

    log::info!("wrote {} bytes to {}", data.len(), path.display());
    Ok(path)
}

/// Render a buffer as space-separated hex, abbreviated past [`DUMP_BYTES`].
pub fn format_buffer(data: &[u8]) -> String {
    let mut out = String::from("<Buffer");
    for byte in data.iter().take(DUMP_BYTES) {
        out.push_str(&format!(" {byte:02x}"));
    }
    if data.len() > DUMP_BYTES {
        out.push_str(&format!(" ... {} more bytes", data.len() - DUMP_BYTES));
    }
    out.push('>');
    out
}

/// Print the processed content (optionally) and any encode diagnostics.
pub fn report<W: Write>(
    out: &mut W,
    outcome: &Outcome,
    print_content: bool,
) -> std::io::Result<()> {
    match outcome {
        Outcome::Encoded(encoded) => {
            if print_content {
                writeln!(out, "CODED: {}", format_buffer(&encoded.content))?;
            }
            writeln!(out, "> Entropy: {}", encoded.entropy)?;
            writeln!(out, "> Avg. coding length: {}", encoded.average)?;
            writeln!(out, "> Compression: {}", encoded.compression)?;
        }
        Outcome::Decoded(decoded) => {
            if print_content {
                writeln!(out, "DECODED: {}", format_buffer(&decoded.content))?;
            }
        }
    }
    Ok(())
}
