//! Seeded test corpora with mixed compressibility.
//!
//! Generated data mixes:
//! - Highly compressible sections (runs of one byte)
//! - Moderately compressible sections (text-like, small alphabet)
//! - Structured sections (short repeating patterns)
//! - Incompressible sections (random bytes)
//!
//! Sections are short relative to a block so that the adaptive model keeps
//! shifting between very different distributions.

#![allow(dead_code)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate `size_bytes` bytes of mixed data, reproducible from `seed`.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let section = rng.gen_range(1..=300);

        match rng.gen_range(0..10u8) {
            // 30% runs of one byte
            0..=2 => {
                let byte_value: u8 = rng.gen();
                data.extend(std::iter::repeat(byte_value).take(section));
            }

            // 30% limited alphabet
            3..=5 => {
                let alphabet = b"abcdefghijklmnopqrstuvwxyz .!,\n";
                for _ in 0..section {
                    data.push(alphabet[rng.gen_range(0..alphabet.len())]);
                }
            }

            // 20% repeating patterns
            6..=7 => {
                let pattern = generate_pattern(&mut rng);
                data.extend(pattern.iter().cycle().take(section));
            }

            // 20% random bytes
            _ => {
                for _ in 0..section {
                    data.push(rng.gen());
                }
            }
        }
    }

    data.truncate(size_bytes);
    data
}

/// Generate data where one byte dominates and the rest are rare outliers.
///
/// `outlier_rate` is the probability of any position being a random byte.
pub fn generate_skewed_data(seed: u64, size_bytes: usize, outlier_rate: f64) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dominant: u8 = rng.gen();

    (0..size_bytes)
        .map(|_| {
            if rng.gen_bool(outlier_rate) {
                rng.gen()
            } else {
                dominant
            }
        })
        .collect()
}

/// Generate a small repeating pattern.
fn generate_pattern(rng: &mut ChaCha8Rng) -> Vec<u8> {
    let pattern_len = rng.gen_range(4..=32);
    (0..pattern_len).map(|_| rng.gen()).collect()
}
