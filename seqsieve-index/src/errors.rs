use std::path::PathBuf;

use seqsieve_core::FastaError;
use thiserror::Error;

/// Errors for building, persisting, loading, and querying a FASTA index.
///
/// The three double-operation variants are contract violations: an index
/// instance is built once and saved once, or loaded once (the re-sort tool
/// additionally saves a loaded index once). Callers are expected to treat
/// them as fatal rather than retry.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("can't read file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Fasta(#[from] FastaError),

    #[error("double build of index {}", .0.display())]
    DoubleBuild(PathBuf),

    #[error("double read of index archive {}", .0.display())]
    DoubleRead(PathBuf),

    #[error("double write of index archive {}", .0.display())]
    DoubleWrite(PathBuf),

    #[error("nothing to save: index {} was never built or loaded", .0.display())]
    SaveBeforeBuild(PathBuf),

    #[error("corrupt index file: {0}")]
    Corrupt(String),

    #[error("coverage target overflows: genome size {genome_size} x coverage {coverage}")]
    CoverageOverflow { genome_size: u64, coverage: u64 },

    #[error("source file {} does not match the index: no record at offset {offset}", .path.display())]
    SourceMismatch { path: PathBuf, offset: i64 },
}
