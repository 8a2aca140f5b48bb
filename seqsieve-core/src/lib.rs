//! # seqsieve-core
//!
//! Shared building blocks for seqsieve: the [`FastaRecord`] type and a
//! seekable FASTA reader.
//!
//! The reader exposes the small capability set the rest of the workspace
//! consumes: `peek` (is more input available), `tell` (byte offset of the
//! next record), `seek` (random access by a previously recorded offset),
//! and `next_record`.

pub mod errors;
pub mod fasta;

pub use errors::FastaError;
pub use fasta::{FastaReader, FastaRecord};
