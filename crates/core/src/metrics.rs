//! Diagnostics collection and reporting for codec runs.
//!
//! This module provides observable insights into a single encode or decode:
//! - Input/output sizes and compression ratio
//! - Shannon entropy of the input and average frame length
//! - Timing and throughput
//!
//! The entropy, average and ratio figures are reporting aids only; nothing
//! in the bit stream depends on them.
//!
//! # Thread Safety
//!
//! The `Metrics` struct is NOT thread-safe. Each run owns its own instance.

use crate::codec::{Mode, Outcome};
use std::time::{Duration, Instant};

/// Shannon entropy of the byte histogram of `data`, in bits per symbol.
///
/// Returns 0.0 for empty input.
pub fn shannon_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let mut histogram = [0u64; 256];
    for &byte in data {
        histogram[byte as usize] += 1;
    }

    let len = data.len() as f64;
    histogram
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let freq = count as f64 / len;
            freq * (1.0 / freq).log2()
        })
        .sum()
}

/// Average frame size in bytes. Returns 0.0 when there are no frames.
pub fn average_frame_len(frame_bytes: usize, frames: usize) -> f64 {
    if frames == 0 {
        0.0
    } else {
        frame_bytes as f64 / frames as f64
    }
}

/// Compression ratio `input / output`.
///
/// An empty input that produces an empty output is reported as 1.0.
pub fn compression_ratio(input_len: usize, output_len: usize) -> f64 {
    if output_len == 0 {
        1.0
    } else {
        input_len as f64 / output_len as f64
    }
}

/// Metrics for one codec run.
#[derive(Debug, Clone)]
pub struct Metrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Input/Output ===
    /// Which direction the run went
    pub mode: Mode,

    /// Bytes handed to the codec
    pub input_bytes: u64,

    /// Bytes produced by the codec
    pub output_bytes: u64,

    // === Encoding ===
    /// Shannon entropy of the raw data in bits per symbol
    pub entropy: f64,

    /// Average frame length in bytes
    pub average: f64,

    /// Raw bytes per coded byte
    pub compression: f64,
}

impl Metrics {
    /// Start timing a run now.
    pub fn new(mode: Mode) -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            mode,
            input_bytes: 0,
            output_bytes: 0,
            entropy: 0.0,
            average: 0.0,
            compression: 0.0,
        }
    }

    /// Take sizes and encode diagnostics from a finished run.
    pub fn record(&mut self, input_len: usize, outcome: &Outcome) {
        self.input_bytes = input_len as u64;
        self.output_bytes = outcome.content().len() as u64;
        if let Outcome::Encoded(encoded) = outcome {
            self.entropy = encoded.entropy;
            self.average = encoded.average;
            self.compression = encoded.compression;
        }
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Wall time of the run, or time so far if it is still going.
    pub fn duration(&self) -> Duration {
        self.end_time
            .unwrap_or_else(Instant::now)
            .duration_since(self.start_time)
    }

    /// Compute throughput in input bytes/second.
    pub fn throughput_bps(&self) -> f64 {
        match self.duration().as_secs_f64() {
            secs if secs > 0.0 => self.input_bytes as f64 / secs,
            _ => 0.0,
        }
    }

    /// Print the run summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Summary ({}) ===", self.mode);
        println!("Duration: {} ms", self.duration().as_millis());
        println!("Input:  {} bytes", self.input_bytes);
        println!("Output: {} bytes", self.output_bytes);

        if self.mode == Mode::Encode {
            println!("> Entropy: {:.4} bits/symbol", self.entropy);
            println!("> Avg. coding length: {:.2} bytes/block", self.average);
            println!("> Compression: {:.4}", self.compression);
        }

        println!("Throughput: {:.2} MB/s", self.throughput_bps() / 1_000_000.0);
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new(Mode::Encode);
        assert!(metrics.end_time.is_none());
        assert!(metrics.duration().as_millis() < 100);
    }

    #[test]
    fn test_entropy() {
        assert_eq!(shannon_entropy(&[]), 0.0);
        assert_eq!(shannon_entropy(&[7; 50]), 0.0);
        assert!(shannon_entropy(&[7; 50]).is_sign_positive());
        assert!((shannon_entropy(&[0, 1, 2, 3]) - 2.0).abs() < 1e-12);
        assert!((shannon_entropy(b"aabb") - 1.0).abs() < 1e-12);

        let all: Vec<u8> = (0..=255).collect();
        assert!((shannon_entropy(&all) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_average_frame_len() {
        assert_eq!(average_frame_len(0, 0), 0.0);
        assert_eq!(average_frame_len(30, 4), 7.5);
    }

    #[test]
    fn test_compression_ratio() {
        assert_eq!(compression_ratio(0, 0), 1.0);
        assert_eq!(compression_ratio(1000, 250), 4.0);
        assert_eq!(compression_ratio(1, 4), 0.25);
    }

    #[test]
    fn test_throughput() {
        let mut metrics = Metrics::new(Mode::Decode);
        metrics.input_bytes = 1_000_000;

        std::thread::sleep(Duration::from_millis(10));
        metrics.complete();

        assert!(metrics.throughput_bps() > 0.0);
    }

    #[test]
    fn test_record_outcome() {
        let data = b"abababababab";
        let outcome = crate::codec::Codec::default().execute(data, Mode::Encode).unwrap();

        let mut metrics = Metrics::new(Mode::Encode);
        metrics.record(data.len(), &outcome);
        assert_eq!(metrics.input_bytes, 12);
        assert_eq!(metrics.output_bytes, outcome.content().len() as u64);
        assert!((metrics.entropy - 1.0).abs() < 1e-12);
        assert!(metrics.average > 0.0);
    }
}
