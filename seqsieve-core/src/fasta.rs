use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom, Write};
use std::path::Path;

use crate::errors::FastaError;

/// One FASTA record: the first whitespace-delimited token of the header
/// line and the concatenated sequence payload with line breaks removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FastaRecord {
    pub id: String,
    pub seq: Vec<u8>,
}

impl FastaRecord {
    /// Sequence length in symbols.
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Writes the record as single-line FASTA: `>id`, then the whole
    /// payload on one line.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, ">{}", self.id)?;
        out.write_all(&self.seq)?;
        writeln!(out)
    }
}

/// Forward and random access reader over an uncompressed FASTA file.
///
/// Offsets reported by [`tell`](FastaReader::tell) point at the `>` of the
/// next header and can be fed back to [`seek`](FastaReader::seek) to
/// re-read the same record later. Compressed input is not supported here:
/// byte offsets into a compressed stream would not be stable handles.
pub struct FastaReader {
    reader: BufReader<File>,
}

impl FastaReader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FastaError> {
        let file = File::open(path.as_ref()).map_err(|source| FastaError::Open {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Ok(FastaReader {
            reader: BufReader::new(file),
        })
    }

    /// Returns the next unread byte without consuming it, or `None` at end
    /// of input.
    pub fn peek(&mut self) -> Result<Option<u8>, FastaError> {
        let buf = self.reader.fill_buf()?;
        Ok(buf.first().copied())
    }

    /// Byte offset of the next unread byte.
    pub fn tell(&mut self) -> Result<i64, FastaError> {
        Ok(self.reader.stream_position()? as i64)
    }

    /// Repositions the reader to an offset previously returned by
    /// [`tell`](FastaReader::tell).
    pub fn seek(&mut self, offset: i64) -> Result<(), FastaError> {
        if offset < 0 {
            return Err(FastaError::NegativeOffset(offset));
        }
        self.reader.seek(SeekFrom::Start(offset as u64))?;
        Ok(())
    }

    /// Reads the next record, or `None` at end of input.
    pub fn next_record(&mut self) -> Result<Option<FastaRecord>, FastaError> {
        let offset = self.tell()?;
        let mut header = String::new();
        if self.reader.read_line(&mut header)? == 0 {
            return Ok(None);
        }
        let Some(rest) = header.trim_end().strip_prefix('>') else {
            return Err(FastaError::MissingHeader(offset));
        };
        let id = match rest.split_whitespace().next() {
            Some(token) => token.to_string(),
            None => return Err(FastaError::EmptyHeader(offset)),
        };

        let mut seq = Vec::new();
        let mut line = String::new();
        loop {
            match self.peek()? {
                None | Some(b'>') => break,
                Some(_) => {
                    line.clear();
                    self.reader.read_line(&mut line)?;
                    seq.extend_from_slice(line.trim_end().as_bytes());
                }
            }
        }
        Ok(Some(FastaRecord { id, seq }))
    }
}
