//! Interactive prompt loop.
//!
//! Repeats input file -> mode -> output file until an empty input name (or
//! end of input) is given. Errors in one round are reported and the loop
//! goes back to asking for an input file.

use crate::config::Config;
use crate::output::{format_buffer, read_input, report, write_output};
use arith_codec_core::{Codec, Mode};
use std::io::{BufRead, Write};
use std::path::Path;

/// Print `question` and read one trimmed line. `None` at end of input.
fn ask<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
) -> std::io::Result<Option<String>> {
    write!(out, "{question}: ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Run the prompt loop until the user leaves.
pub fn run_interactive<R: BufRead, W: Write>(
    config: &Config,
    codec: &Codec,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    loop {
        let Some(input_name) = ask(input, out, "Enter input file name (empty to exit)")? else {
            return Ok(());
        };
        if input_name.is_empty() {
            return Ok(());
        }

        let data = match read_input(Path::new(&input_name)) {
            Ok(data) => data,
            Err(err) => {
                writeln!(out, "File not found: {err:#}")?;
                continue;
            }
        };
        if config.print_content {
            writeln!(out, "FILE: {}", format_buffer(&data))?;
        }

        let mode = loop {
            let Some(answer) = ask(input, out, "Enter mode")? else {
                return Ok(());
            };
            match answer.parse::<Mode>() {
                Ok(mode) => break mode,
                Err(_) => writeln!(out, "Must be either encode or decode")?,
            }
        };

        let outcome = match codec.execute(&data, mode) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::warn!("{mode} of {input_name} failed: {err}");
                writeln!(out, "Cannot {mode} {input_name}: {err}")?;
                continue;
            }
        };
        report(out, &outcome, config.print_content)?;

        let Some(output_name) = ask(input, out, "Enter output file name (empty to skip)")? else {
            return Ok(());
        };
        if !output_name.is_empty() {
            if let Err(err) = write_output(&config.out_dir, &output_name, outcome.content()) {
                writeln!(out, "Output file corrupted: {err:#}")?;
            }
        }
    }
}
