//! Configuration for the arith-codec application.
//!
//! Handles parsing command-line arguments into a resolved `Config`.
//!
//! # Modes of Operation
//!
//! - `arith-codec <INPUT> <MODE> [OUTPUT]` runs once and exits
//! - `arith-codec` with no positional arguments starts the interactive prompt

use arith_codec_core::codec::DEFAULT_MAX_DECODED_LEN;
use arith_codec_core::{CodecConfig, Mode};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "arith-codec",
    version,
    about = "Adaptive arithmetic coder for arbitrary files",
    after_help = "EXAMPLES:\n    \
        arith-codec                                  # Interactive prompt\n    \
        arith-codec notes.txt encode notes.ac        # Writes ./out/notes.ac\n    \
        arith-codec out/notes.ac decode notes.txt    # Writes ./out/notes.txt"
)]
pub struct Args {
    /// Input file (omit to start the interactive prompt)
    #[arg(requires = "mode")]
    pub input: Option<PathBuf>,

    /// Either `encode` or `decode`
    pub mode: Option<String>,

    /// Output file name, written inside the output directory
    pub output: Option<String>,

    /// Directory receiving output files
    #[arg(long, default_value = "out")]
    pub out_dir: PathBuf,

    /// Symbols per block when encoding (1-127)
    #[arg(long, default_value_t = 127)]
    pub block_size: usize,

    /// Largest decoded output accepted, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_DECODED_LEN)]
    pub max_decoded: usize,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Don't print the processed content
    #[arg(short, long)]
    pub quiet: bool,

    /// Print resolved configuration
    #[arg(long)]
    pub print_config: bool,

    /// Don't print the metrics summary after a single run
    #[arg(long)]
    pub no_metrics: bool,
}

/// A single non-interactive run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleRun {
    /// File to read
    pub input: PathBuf,

    /// Direction to run the codec in
    pub mode: Mode,

    /// Output file name inside `out_dir`, if any
    pub output: Option<String>,
}

/// Complete configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// Single run from positional arguments (None = interactive)
    pub run: Option<SingleRun>,

    /// Directory receiving output files
    pub out_dir: PathBuf,

    /// Codec settings
    pub codec: CodecConfig,

    /// Log verbosity level (0 = warnings only)
    pub verbose: u8,

    /// Whether to print the processed content
    pub print_content: bool,

    /// Whether to print detailed config
    pub print_config: bool,

    /// Whether to print the metrics summary
    pub print_metrics: bool,
}

impl Config {
    /// Resolve parsed arguments into a configuration.
    ///
    /// # Errors
    /// - `Error::InvalidMode` if a mode was given and is not encode/decode
    /// - `Error::Config` if the codec settings are out of range
    pub fn from_args(args: Args) -> arith_codec_core::Result<Self> {
        let run = match (args.input, args.mode) {
            (Some(input), Some(mode)) => Some(SingleRun {
                input,
                mode: mode.parse()?,
                output: args.output.filter(|name| !name.is_empty()),
            }),
            _ => None,
        };

        let codec = CodecConfig {
            block_size: args.block_size,
            max_decoded_len: args.max_decoded,
        };
        codec.validate()?;

        Ok(Config {
            run,
            out_dir: args.out_dir,
            codec,
            verbose: args.verbose,
            print_content: !args.quiet,
            print_config: args.print_config,
            print_metrics: !args.no_metrics,
        })
    }

    /// Log level implied by the verbosity count.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.run {
            Some(run) => {
                println!("Input file:  {}", run.input.display());
                println!("Mode:        {}", run.mode);
                println!("Output file: {}", run.output.as_deref().unwrap_or("(none)"));
            }
            None => println!("Interactive prompt"),
        }
        println!("Output dir:  {}", self.out_dir.display());
        println!();
        println!("Block size: {} symbols", self.codec.block_size);
        println!("Max decoded: {} bytes", self.codec.max_decoded_len);
        println!("Log level: {}", self.log_level());
        println!();
    }
}
