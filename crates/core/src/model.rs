//! Adaptive order-0 probability model over the 256 byte values.
//!
//! Every count starts at 1 so that each symbol keeps a nonzero probability.
//! Coding never reads the live counts directly: a [`Snapshot`] is frozen at
//! the start of each block and used for every symbol in it, while
//! [`ProbabilityModel::observe`] keeps updating the counts. Those updates
//! become visible to the next block's snapshot only. Encoder and decoder
//! must follow exactly this timing or their intervals diverge.

/// Number of distinct symbols.
pub const ALPHABET_SIZE: usize = 256;

/// Upper bound for the sum of all counts.
///
/// The interval coder needs `total <= 2^30` so that every symbol keeps a
/// nonempty sub-interval of a renormalized 32-bit range.
pub const MAX_TOTAL: u64 = 1 << 30;

/// Frequency table owned by a single encode or decode call.
#[derive(Debug, Clone)]
pub struct ProbabilityModel {
    counts: [u32; ALPHABET_SIZE],
    total: u64,
}

impl ProbabilityModel {
    /// Create a table with every count set to 1.
    pub fn new() -> Self {
        Self {
            counts: [1; ALPHABET_SIZE],
            total: ALPHABET_SIZE as u64,
        }
    }

    /// Record one occurrence of `symbol`.
    ///
    /// When the total reaches [`MAX_TOTAL`] every count is halved, rounding
    /// up so none drops to zero.
    pub fn observe(&mut self, symbol: u8) {
        self.counts[symbol as usize] += 1;
        self.total += 1;

        if self.total > MAX_TOTAL {
            self.total = 0;
            for count in self.counts.iter_mut() {
                *count = (*count + 1) / 2;
                self.total += u64::from(*count);
            }
        }
    }

    /// Freeze the current counts into a cumulative table.
    pub fn snapshot(&self) -> Snapshot {
        let mut cumulative = [0u64; ALPHABET_SIZE + 1];
        for (i, &count) in self.counts.iter().enumerate() {
            cumulative[i + 1] = cumulative[i] + u64::from(count);
        }
        Snapshot { cumulative }
    }

    /// Current count for `symbol`.
    pub fn count(&self, symbol: u8) -> u32 {
        self.counts[symbol as usize]
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }
}

impl Default for ProbabilityModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Probability distribution frozen at the start of a block.
///
/// Stored as a cumulative count table: symbol `i` owns the half-open range
/// `[cumulative[i], cumulative[i + 1])` out of `total()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    cumulative: [u64; ALPHABET_SIZE + 1],
}

impl Snapshot {
    /// Sum of all counts in the snapshot.
    pub fn total(&self) -> u64 {
        self.cumulative[ALPHABET_SIZE]
    }

    /// Half-open cumulative range `[low, high)` of `symbol`.
    pub fn cumulative_range(&self, symbol: u8) -> (u64, u64) {
        let i = symbol as usize;
        (self.cumulative[i], self.cumulative[i + 1])
    }

    /// Find the symbol whose cumulative range contains `target`.
    ///
    /// Returns the smallest `j` with `low(j) <= target < high(j)`. A target
    /// past the end of the table maps to the last symbol.
    pub fn inverse_lookup(&self, target: u64) -> u8 {
        // First boundary strictly above target, minus one, is the owning symbol.
        let upper = self.cumulative[1..].partition_point(|&high| high <= target);
        upper.min(ALPHABET_SIZE - 1) as u8
    }

    /// Probability of `symbol` as a real number.
    pub fn probability(&self, symbol: u8) -> f64 {
        let (low, high) = self.cumulative_range(symbol);
        (high - low) as f64 / self.total() as f64
    }

    /// Smallest probability of any symbol.
    pub fn min_probability(&self) -> f64 {
        let min_count = self
            .cumulative
            .windows(2)
            .map(|w| w[1] - w[0])
            .min()
            .unwrap_or(1);
        min_count as f64 / self.total() as f64
    }

    /// Bits of lookahead that always isolate the least likely symbol.
    ///
    /// `floor(-log2(min probability))`.
    pub fn min_step(&self) -> u32 {
        (-self.min_probability().log2()).floor() as u32
    }

    /// Information content of `symbols` under this snapshot, in bits.
    ///
    /// `ceil(-log2(product of probabilities)) + 1`, summed in the log domain
    /// so long blocks of unlikely symbols do not underflow.
    pub fn information_bits(&self, symbols: &[u8]) -> u64 {
        let bits: f64 = symbols.iter().map(|&s| -self.probability(s).log2()).sum();
        bits.ceil() as u64 + 1
    }
}
