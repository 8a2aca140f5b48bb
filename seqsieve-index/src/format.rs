//! Versioned binary container for the persisted index.
//!
//! The codec is a pure encode/decode pair kept out of the data types.
//! Layout, little-endian, fixed field order and widths:
//!
//! ```text
//! magic b"SSIX" | version u16 | src_len u32 | src bytes | n u64
//!   | n x ( id_len u32 | id bytes | length u64 | na u64 | nc u64
//!         | ng u64 | nt u64 | nn u64 | hash u32 | offset i64 )
//! ```
//!
//! Compression is applied outside this module; encode and decode operate on
//! the raw container stream. Truncation, a foreign magic, an unsupported
//! version, and invalid UTF-8 in string fields all decode to
//! [`IndexError::Corrupt`] instead of misparsing.

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::errors::IndexError;
use crate::index::IndexRecord;

pub const MAGIC: [u8; 4] = *b"SSIX";
pub const FORMAT_VERSION: u16 = 1;

/// Identifiers and source paths are short; a length prefix beyond this is
/// a corrupt stream, not a huge allocation waiting to happen.
const MAX_STRING_LEN: usize = 1 << 20;

pub fn encode_into<W: Write>(
    out: &mut W,
    source_path: &str,
    records: &[IndexRecord],
) -> Result<(), IndexError> {
    out.write_all(&MAGIC)?;
    out.write_u16::<LittleEndian>(FORMAT_VERSION)?;
    write_string(out, source_path)?;
    out.write_u64::<LittleEndian>(records.len() as u64)?;
    for record in records {
        write_string(out, &record.id)?;
        out.write_u64::<LittleEndian>(record.length)?;
        out.write_u64::<LittleEndian>(record.na)?;
        out.write_u64::<LittleEndian>(record.nc)?;
        out.write_u64::<LittleEndian>(record.ng)?;
        out.write_u64::<LittleEndian>(record.nt)?;
        out.write_u64::<LittleEndian>(record.nn)?;
        out.write_u32::<LittleEndian>(record.hash)?;
        out.write_i64::<LittleEndian>(record.offset)?;
    }
    Ok(())
}

pub fn decode_from<R: Read>(mut reader: R) -> Result<(String, Vec<IndexRecord>), IndexError> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic).map_err(stream_error)?;
    if magic != MAGIC {
        return Err(IndexError::Corrupt(
            "bad magic, not a seqsieve index".to_string(),
        ));
    }

    let version = reader.read_u16::<LittleEndian>().map_err(stream_error)?;
    if version != FORMAT_VERSION {
        return Err(IndexError::Corrupt(format!(
            "unsupported index version {version} (expected {FORMAT_VERSION})"
        )));
    }

    let source_path = read_string(&mut reader)?;
    let count = reader.read_u64::<LittleEndian>().map_err(stream_error)?;

    // The count comes from an untrusted stream; let the vec grow instead
    // of pre-allocating whatever it claims.
    let mut records = Vec::new();
    for _ in 0..count {
        let id = read_string(&mut reader)?;
        let length = reader.read_u64::<LittleEndian>().map_err(stream_error)?;
        let na = reader.read_u64::<LittleEndian>().map_err(stream_error)?;
        let nc = reader.read_u64::<LittleEndian>().map_err(stream_error)?;
        let ng = reader.read_u64::<LittleEndian>().map_err(stream_error)?;
        let nt = reader.read_u64::<LittleEndian>().map_err(stream_error)?;
        let nn = reader.read_u64::<LittleEndian>().map_err(stream_error)?;
        let hash = reader.read_u32::<LittleEndian>().map_err(stream_error)?;
        let offset = reader.read_i64::<LittleEndian>().map_err(stream_error)?;
        records.push(IndexRecord {
            id,
            length,
            na,
            nc,
            ng,
            nt,
            nn,
            hash,
            offset,
        });
    }
    Ok((source_path, records))
}

fn write_string<W: Write>(out: &mut W, value: &str) -> Result<(), IndexError> {
    // Same cap as read_string, so nothing we encode decodes as corrupt.
    if value.len() > MAX_STRING_LEN {
        return Err(IndexError::Corrupt(format!(
            "string field of {} bytes exceeds the format limit",
            value.len()
        )));
    }
    out.write_u32::<LittleEndian>(value.len() as u32)?;
    out.write_all(value.as_bytes())?;
    Ok(())
}

fn read_string<R: Read>(reader: &mut R) -> Result<String, IndexError> {
    let len = reader.read_u32::<LittleEndian>().map_err(stream_error)? as usize;
    if len > MAX_STRING_LEN {
        return Err(IndexError::Corrupt(format!(
            "string field claims {len} bytes"
        )));
    }
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf).map_err(stream_error)?;
    String::from_utf8(buf)
        .map_err(|_| IndexError::Corrupt("string field is not valid UTF-8".to_string()))
}

/// Mid-stream I/O failures that indicate a malformed archive rather than a
/// bad file descriptor decode to `Corrupt`.
pub(crate) fn stream_error(err: io::Error) -> IndexError {
    match err.kind() {
        io::ErrorKind::UnexpectedEof | io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData => {
            IndexError::Corrupt(err.to_string())
        }
        _ => IndexError::Io(err),
    }
}
