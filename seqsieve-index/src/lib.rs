//! Persisted FASTA indexing and record selection.
//!
//! This crate builds a compact per-record summary index over a FASTA file
//! (length, nucleotide counts, a 32-bit content fingerprint, and the byte
//! offset the record starts at), persists it as a gzip-compressed versioned
//! binary container, and selects records two ways: by coverage target
//! through the index, or by bounded top-K straight from the source with
//! O(k) memory.

pub mod digest;
pub mod errors;
pub mod format;
pub mod index;
pub mod select;

pub use errors::IndexError;
pub use index::{FastaIndex, IndexRecord, IndexState};
pub use select::{CoverageSelection, select_for_coverage, top_k};

pub mod consts {
    pub const INDEX_CMD: &str = "index";
    pub const INDEX_BUILD: &str = "build";
    pub const INDEX_PRINT: &str = "print";
    pub const INDEX_SORT: &str = "sort";
    pub const COVERAGE_CMD: &str = "coverage";
    pub const LONGEST_CMD: &str = "longest";
}
