//! arith-codec: encode or decode files with the adaptive arithmetic coder.
//!
//! Runs once when given `<INPUT> <MODE> [OUTPUT]`, otherwise drops into an
//! interactive prompt. See `config.rs` for all flags.

mod config;
mod output;
mod prompt;

use anyhow::Context;
use arith_codec_core::metrics::Metrics;
use arith_codec_core::Codec;
use clap::Parser;
use config::{Args, Config, SingleRun};
use std::io::{self, Write};

fn main() -> anyhow::Result<()> {
    let config = Config::from_args(Args::parse())?;

    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .init();

    if config.print_config {
        config.print();
    }

    let codec = Codec::new(config.codec)?;
    log::debug!("codec configured: {:?}", codec.config());

    match &config.run {
        Some(run) => run_once(&config, &codec, run),
        None => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            prompt::run_interactive(&config, &codec, &mut stdin.lock(), &mut stdout.lock())
        }
    }
}

/// Process one file from the command line and exit.
fn run_once(config: &Config, codec: &Codec, run: &SingleRun) -> anyhow::Result<()> {
    let data = output::read_input(&run.input)?;
    log::info!("read {} bytes from {}", data.len(), run.input.display());

    let mut metrics = Metrics::new(run.mode);
    let outcome = codec
        .execute(&data, run.mode)
        .with_context(|| format!("cannot {} {}", run.mode, run.input.display()))?;
    metrics.record(data.len(), &outcome);
    metrics.complete();

    let mut stdout = io::stdout().lock();
    output::report(&mut stdout, &outcome, config.print_content)?;
    stdout.flush()?;
    drop(stdout);

    if let Some(name) = &run.output {
        output::write_output(&config.out_dir, name, outcome.content())?;
    }

    if config.print_metrics {
        metrics.print_summary();
    }
    Ok(())
}
