use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FastaError {
    #[error("can't open FASTA file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("expected '>' at byte offset {0}")]
    MissingHeader(i64),

    #[error("record header at byte offset {0} has no identifier")]
    EmptyHeader(i64),

    #[error("can't seek to negative offset {0}")]
    NegativeOffset(i64),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
