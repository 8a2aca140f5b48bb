//! Per-record statistics computed in one pass over a record's payload.

use std::hash::Hasher;

use fxhash::FxHasher32;

/// Seed mixed into every fingerprint so the hash is a stable function of
/// the payload alone.
pub const FINGERPRINT_SEED: u32 = 314_159_265;

/// Occurrences of each canonical nucleotide symbol in one record.
///
/// Counting is case-insensitive and any symbol outside {A, C, G, T, N} is
/// ignored by all five counters, so the counts only sum to the record
/// length for strict ACGTN input. That is a documented policy, not an
/// error: protein or IUPAC-ambiguity input simply under-counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NucCounts {
    pub a: u64,
    pub c: u64,
    pub g: u64,
    pub t: u64,
    pub n: u64,
}

impl NucCounts {
    pub fn from_seq(seq: &[u8]) -> Self {
        let mut counts = NucCounts::default();
        for byte in seq {
            match byte.to_ascii_uppercase() {
                b'A' => counts.a += 1,
                b'C' => counts.c += 1,
                b'G' => counts.g += 1,
                b'T' => counts.t += 1,
                b'N' => counts.n += 1,
                _ => {}
            }
        }
        counts
    }

    /// Sum of the five counters. Equals the record length only for strict
    /// ACGTN input.
    pub fn total(&self) -> u64 {
        self.a + self.c + self.g + self.t + self.n
    }
}

/// 32-bit content fingerprint of the raw payload bytes.
///
/// A cheap content signature, not cryptographically secure; collisions are
/// possible and unhandled. The payload is hashed exactly as passed, with no
/// case normalization.
pub fn fingerprint(seq: &[u8]) -> u32 {
    let mut hasher = FxHasher32::default();
    hasher.write_u32(FINGERPRINT_SEED);
    hasher.write(seq);
    hasher.finish() as u32
}
