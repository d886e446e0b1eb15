//! Fixed-point interval narrowing and renormalization.
//!
//! The coding interval is a subrange of `[0, 1)` held as the inclusive
//! 32-bit integer range `[low, high]`, where `high` implicitly continues
//! with an infinite tail of one bits. All products are computed in `u64`:
//! a range is at most 2^32 and a snapshot total at most 2^30.
//!
//! Renormalization doubles the interval whenever it sits inside one half of
//! `[0, 1)` and emits (encoder) or consumes (decoder) one bit per doubling:
//!
//! ```text
//! high < 1/2             -> bit 0, [l, h) -> [2l, 2h)
//! low >= 1/2             -> bit 1, [l, h) -> [2l - 1, 2h - 1)
//! 1/4 <= low, high < 3/4 -> pending, [l, h) -> [2l - 1/2, 2h - 1/2)
//! ```
//!
//! The third case keeps a narrow interval that straddles 1/2 from losing
//! precision; its bit is only known once a later doubling picks a half, and
//! is then emitted as the opposite of that half.
//!
//! A block's scaling string is every emitted bit followed by two terminating
//! bits, so its length is always `shifts + 2`. The decoder relies on that
//! count to detect truncated or oversized blocks.

use crate::bitio::BitReader;
use crate::model::Snapshot;

/// Number of bits in the code window.
pub const CODE_BITS: u32 = 32;

const TOP: u64 = (1 << CODE_BITS) - 1;
const HALF: u64 = 1 << (CODE_BITS - 1);
const QUARTER: u64 = 1 << (CODE_BITS - 2);
const THREE_QUARTERS: u64 = 3 * QUARTER;

/// Bits appended by [`IntervalEncoder::finish`].
pub const TERMINATION_BITS: usize = 2;

/// Narrow `[low, high]` to the part owned by `symbol`.
fn narrow(low: &mut u64, high: &mut u64, snapshot: &Snapshot, symbol: u8) {
    let (sym_low, sym_high) = snapshot.cumulative_range(symbol);
    let total = snapshot.total();
    let range = *high - *low + 1;

    *high = *low + range * sym_high / total - 1;
    *low += range * sym_low / total;
    debug_assert!(*low <= *high);
}

/// Encoder half of the interval coder. One instance codes one block.
#[derive(Debug, Clone)]
pub struct IntervalEncoder {
    low: u64,
    high: u64,
    pending: usize,
    shifts: usize,
    bits: Vec<bool>,
}

impl IntervalEncoder {
    /// Start with the full interval `[0, 1)`.
    pub fn new() -> Self {
        Self {
            low: 0,
            high: TOP,
            pending: 0,
            shifts: 0,
            bits: Vec::new(),
        }
    }

    /// Narrow the interval to `symbol` and emit every bit it settles.
    pub fn encode(&mut self, snapshot: &Snapshot, symbol: u8) {
        narrow(&mut self.low, &mut self.high, snapshot, symbol);

        loop {
            if self.high < HALF {
                self.emit(false);
            } else if self.low >= HALF {
                self.emit(true);
                self.low -= HALF;
                self.high -= HALF;
            } else if self.low >= QUARTER && self.high < THREE_QUARTERS {
                self.pending += 1;
                self.low -= QUARTER;
                self.high -= QUARTER;
            } else {
                break;
            }
            self.low <<= 1;
            self.high = (self.high << 1) | 1;
            self.shifts += 1;
        }
    }

    fn emit(&mut self, bit: bool) {
        self.bits.push(bit);
        self.bits.extend(std::iter::repeat(!bit).take(self.pending));
        self.pending = 0;
    }

    /// Number of renormalization steps taken so far.
    pub fn shifts(&self) -> usize {
        self.shifts
    }

    /// Terminate the block and return its scaling string.
    ///
    /// The final interval straddles 1/2 and is not inside `[1/4, 3/4)`, so it
    /// fully contains either `[1/4, 1/2)` or `[1/2, 3/4)`. Two bits select
    /// that quarter; any continuation of them stays inside the interval,
    /// which lets the decoder read zero padding past the end.
    pub fn finish(mut self) -> Vec<bool> {
        self.pending += 1;
        let upper = self.low >= QUARTER;
        self.emit(upper);
        self.bits
    }
}

impl Default for IntervalEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decoder half of the interval coder. One instance decodes one block.
///
/// Tracks the same `[low, high]` as the encoder plus a 32-bit window
/// `value` onto the scaling string.
#[derive(Debug, Clone)]
pub struct IntervalDecoder<'a> {
    low: u64,
    high: u64,
    value: u64,
    shifts: usize,
    reader: BitReader<'a>,
}

impl<'a> IntervalDecoder<'a> {
    /// Start with the full interval and fill the code window.
    ///
    /// Bits past the end of `reader` read as zero.
    pub fn new(mut reader: BitReader<'a>) -> Self {
        let mut value = 0;
        for _ in 0..CODE_BITS {
            value = (value << 1) | u64::from(reader.read_bit_or_zero());
        }

        Self {
            low: 0,
            high: TOP,
            value,
            shifts: 0,
            reader,
        }
    }

    /// Decode the next symbol under `snapshot` and consume its bits.
    pub fn decode(&mut self, snapshot: &Snapshot) -> u8 {
        let range = self.high - self.low + 1;
        let target = ((self.value - self.low + 1) * snapshot.total() - 1) / range;
        let symbol = snapshot.inverse_lookup(target);

        narrow(&mut self.low, &mut self.high, snapshot, symbol);

        loop {
            if self.high < HALF {
                // lower half, nothing to subtract
            } else if self.low >= HALF {
                self.value -= HALF;
                self.low -= HALF;
                self.high -= HALF;
            } else if self.low >= QUARTER && self.high < THREE_QUARTERS {
                self.value -= QUARTER;
                self.low -= QUARTER;
                self.high -= QUARTER;
            } else {
                break;
            }
            self.low <<= 1;
            self.high = (self.high << 1) | 1;
            self.value = (self.value << 1) | u64::from(self.reader.read_bit_or_zero());
            self.shifts += 1;
        }

        symbol
    }

    /// Number of renormalization steps taken so far.
    ///
    /// Matches [`IntervalEncoder::shifts`] after the same symbols.
    pub fn shifts(&self) -> usize {
        self.shifts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitio::BitWriter;
    use crate::model::ProbabilityModel;

    fn pack(bits: &[bool]) -> Vec<u8> {
        let mut writer = BitWriter::new();
        for &bit in bits {
            writer.write_bit(bit);
        }
        writer.finish()
    }

    fn round_trip(snapshot: &Snapshot, symbols: &[u8]) -> Vec<u8> {
        let mut encoder = IntervalEncoder::new();
        for &symbol in symbols {
            encoder.encode(snapshot, symbol);
        }
        let shifts = encoder.shifts();
        let bits = encoder.finish();
        assert_eq!(bits.len(), shifts + TERMINATION_BITS);

        let bytes = pack(&bits);
        let mut decoder = IntervalDecoder::new(BitReader::with_bit_len(&bytes, bits.len()));
        let decoded: Vec<u8> = symbols.iter().map(|_| decoder.decode(snapshot)).collect();
        assert_eq!(decoder.shifts(), shifts);
        decoded
    }

    #[test]
    fn test_uniform_symbols_cost_eight_bits() {
        let snapshot = ProbabilityModel::new().snapshot();
        let mut encoder = IntervalEncoder::new();
        for symbol in [0x12u8, 0x34, 0x56] {
            encoder.encode(&snapshot, symbol);
        }
        assert_eq!(encoder.shifts(), 24);

        let bits = encoder.finish();
        let bytes = pack(&bits[..24]);
        assert_eq!(bytes, vec![0x12, 0x34, 0x56]);
    }

    #[test]
    fn test_round_trip_uniform() {
        let snapshot = ProbabilityModel::new().snapshot();
        let symbols: Vec<u8> = (0..=255).collect();
        assert_eq!(round_trip(&snapshot, &symbols), symbols);
    }

    #[test]
    fn test_round_trip_skewed() {
        let mut model = ProbabilityModel::new();
        for _ in 0..5000 {
            model.observe(b'x');
        }
        let snapshot = model.snapshot();

        let mut symbols = vec![b'x'; 100];
        symbols[17] = 0;
        symbols[50] = 255;
        symbols[99] = b'y';
        assert_eq!(round_trip(&snapshot, &symbols), symbols);
    }

    #[test]
    fn test_single_symbol() {
        let snapshot = ProbabilityModel::new().snapshot();
        for symbol in 0..=255u8 {
            assert_eq!(round_trip(&snapshot, &[symbol]), vec![symbol]);
        }
    }

    #[test]
    fn test_zero_padding_is_harmless() {
        let mut model = ProbabilityModel::new();
        for symbol in b"abracadabra" {
            model.observe(*symbol);
        }
        let snapshot = model.snapshot();

        let mut encoder = IntervalEncoder::new();
        for &symbol in b"abracadabra" {
            encoder.encode(&snapshot, symbol);
        }
        let mut bits = encoder.finish();
        bits.extend([false; 7]);

        let bytes = pack(&bits);
        let mut decoder = IntervalDecoder::new(BitReader::new(&bytes));
        let decoded: Vec<u8> = (0..11).map(|_| decoder.decode(&snapshot)).collect();
        assert_eq!(decoded, b"abracadabra");
    }
}
