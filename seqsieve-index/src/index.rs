//! The persisted FASTA index and its build/sort/save/load lifecycle.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use seqsieve_core::FastaReader;

use crate::digest::{NucCounts, fingerprint};
use crate::errors::IndexError;
use crate::format;

/// Fixed-size statistics persisted for one FASTA record.
///
/// `offset` is the byte position of the record's `>` in the source file,
/// the sole handle used to re-fetch the record later. The five counters
/// sum to `length` only for strict ACGTN input (see [`crate::digest`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexRecord {
    pub id: String,
    pub length: u64,
    pub na: u64,
    pub nc: u64,
    pub ng: u64,
    pub nt: u64,
    pub nn: u64,
    pub hash: u32,
    pub offset: i64,
}

/// Lifecycle of a [`FastaIndex`].
///
/// An instance is built once and saved once, or loaded once and treated as
/// read-only; the re-sort tool additionally saves a loaded index once.
/// Every other transition is rejected with a lifecycle error instead of
/// silently overwriting or re-reading state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexState {
    Fresh,
    Built,
    Loaded,
    Saved,
}

pub struct FastaIndex {
    index_path: PathBuf,
    source_path: PathBuf,
    records: Vec<IndexRecord>,
    state: IndexState,
}

impl FastaIndex {
    /// New, empty index bound to an index file and the FASTA it will
    /// summarize.
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(index_path: P, source_path: Q) -> Self {
        FastaIndex {
            index_path: index_path.into(),
            source_path: source_path.into(),
            records: Vec::new(),
            state: IndexState::Fresh,
        }
    }

    /// New, empty index bound to an existing index file; the source path
    /// comes out of the archive on [`load`](FastaIndex::load).
    pub fn open<P: Into<PathBuf>>(index_path: P) -> Self {
        FastaIndex::new(index_path, PathBuf::new())
    }

    pub fn from_fasta(&mut self) -> Result<(), IndexError> {
        self.from_fasta_with_capacity(1)
    }

    /// Streams the source once, forward-only, appending one summary per
    /// FASTA record in source order. The offset is recorded *before* the
    /// record is consumed so it points at the record's header.
    ///
    /// `capacity` pre-allocates record storage for known-large inputs and
    /// never changes the result.
    pub fn from_fasta_with_capacity(&mut self, capacity: usize) -> Result<(), IndexError> {
        if self.state != IndexState::Fresh {
            return Err(IndexError::DoubleBuild(self.index_path.clone()));
        }
        self.records.reserve(capacity);

        let mut reader = FastaReader::from_path(&self.source_path)?;
        while reader.peek()?.is_some() {
            let offset = reader.tell()?;
            let Some(record) = reader.next_record()? else {
                break;
            };
            let counts = NucCounts::from_seq(&record.seq);
            let hash = fingerprint(&record.seq);
            let length = record.seq.len() as u64;
            self.records.push(IndexRecord {
                id: record.id,
                length,
                na: counts.a,
                nc: counts.c,
                ng: counts.g,
                nt: counts.t,
                nn: counts.n,
                hash,
                offset,
            });
        }
        self.state = IndexState::Built;
        Ok(())
    }

    /// Stable sort by ascending record length; equal-length records keep
    /// their previous relative order. Idempotent.
    pub fn sort(&mut self) {
        self.records.sort_by_key(|record| record.length);
    }

    /// Persists the records, in current order, as a gzip-compressed binary
    /// container. The archive is written to a temporary sibling and renamed
    /// over the index path, so a failed save leaves no partial file behind.
    pub fn save(&mut self) -> Result<(), IndexError> {
        match self.state {
            IndexState::Saved => return Err(IndexError::DoubleWrite(self.index_path.clone())),
            IndexState::Fresh => return Err(IndexError::SaveBeforeBuild(self.index_path.clone())),
            IndexState::Built | IndexState::Loaded => {}
        }

        let tmp_path = tmp_sibling(&self.index_path);
        if let Err(err) = self.write_archive(&tmp_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err);
        }
        fs::rename(&tmp_path, &self.index_path)?;
        self.state = IndexState::Saved;
        Ok(())
    }

    /// Reads the archive back, fully replacing the records and source path.
    /// A decode failure leaves the instance untouched; no partially
    /// populated record list is ever exposed.
    pub fn load(&mut self) -> Result<(), IndexError> {
        if self.state != IndexState::Fresh {
            return Err(IndexError::DoubleRead(self.index_path.clone()));
        }

        let file = File::open(&self.index_path)?;
        let mut decoder = GzDecoder::new(BufReader::new(file));
        let (source_path, records) = format::decode_from(&mut decoder)?;

        // Drive the decompressor to end of stream: the gzip trailer (CRC
        // and length) is only checked once the whole member is consumed,
        // and the container's record count must account for every byte.
        let mut excess = [0u8; 1];
        match decoder.read(&mut excess).map_err(format::stream_error)? {
            0 => {}
            _ => {
                return Err(IndexError::Corrupt(
                    "trailing bytes after the index records".to_string(),
                ));
            }
        }

        self.source_path = PathBuf::from(source_path);
        self.records = records;
        self.state = IndexState::Loaded;
        Ok(())
    }

    fn write_archive(&self, path: &Path) -> Result<(), IndexError> {
        let file = File::create(path)?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        format::encode_into(
            &mut encoder,
            &self.source_path.to_string_lossy(),
            &self.records,
        )?;
        let mut inner = encoder.finish()?;
        inner.flush()?;
        Ok(())
    }

    pub fn records(&self) -> &[IndexRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn state(&self) -> IndexState {
        self.state
    }
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest;
    use pretty_assertions::assert_eq;
    use std::io::Write as _;
    use tempfile::{NamedTempFile, tempdir};

    fn create_test_fasta() -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, ">chr1").expect("Failed to write");
        writeln!(file, "ACGTACGTNN").expect("Failed to write");
        writeln!(file, ">chr2").expect("Failed to write");
        writeln!(file, "acgt").expect("Failed to write");
        writeln!(file, ">chr3").expect("Failed to write");
        writeln!(file, "GGGG").expect("Failed to write");
        file
    }

    #[test]
    fn build_summarizes_records_in_source_order() {
        let fasta = create_test_fasta();
        let mut index = FastaIndex::new("unused.ssx", fasta.path());
        index.from_fasta().unwrap();

        assert_eq!(index.state(), IndexState::Built);
        let ids: Vec<&str> = index.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["chr1", "chr2", "chr3"]);

        let chr1 = &index.records()[0];
        assert_eq!(chr1.length, 10);
        assert_eq!(
            (chr1.na, chr1.nc, chr1.ng, chr1.nt, chr1.nn),
            (2, 2, 2, 2, 2)
        );
        assert_eq!(chr1.offset, 0);

        let chr2 = &index.records()[1];
        assert_eq!(chr2.length, 4);
        assert_eq!(
            (chr2.na, chr2.nc, chr2.ng, chr2.nt, chr2.nn),
            (1, 1, 1, 1, 0)
        );
    }

    #[test]
    fn build_offsets_point_back_at_their_records() {
        let fasta = create_test_fasta();
        let mut index = FastaIndex::new("unused.ssx", fasta.path());
        index.from_fasta().unwrap();

        let mut reader = FastaReader::from_path(fasta.path()).unwrap();
        for summary in index.records() {
            reader.seek(summary.offset).unwrap();
            let record = reader.next_record().unwrap().unwrap();
            assert_eq!(record.id, summary.id);
            assert_eq!(record.seq.len() as u64, summary.length);
            assert_eq!(digest::fingerprint(&record.seq), summary.hash);
        }
    }

    #[test]
    fn capacity_hint_does_not_change_the_result() {
        let fasta = create_test_fasta();
        let mut plain = FastaIndex::new("a.ssx", fasta.path());
        plain.from_fasta().unwrap();
        let mut hinted = FastaIndex::new("b.ssx", fasta.path());
        hinted.from_fasta_with_capacity(1024).unwrap();
        assert_eq!(plain.records(), hinted.records());
    }

    #[test]
    fn double_build_is_rejected() {
        let fasta = create_test_fasta();
        let mut index = FastaIndex::new("unused.ssx", fasta.path());
        index.from_fasta().unwrap();
        assert!(matches!(
            index.from_fasta(),
            Err(IndexError::DoubleBuild(_))
        ));
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn sort_is_stable_and_idempotent() {
        let fasta = create_test_fasta();
        let mut index = FastaIndex::new("unused.ssx", fasta.path());
        index.from_fasta().unwrap();

        index.sort();
        let lengths: Vec<u64> = index.records().iter().map(|r| r.length).collect();
        assert_eq!(lengths, vec![4, 4, 10]);
        // chr2 and chr3 tie on length; build order decides.
        assert_eq!(index.records()[0].id, "chr2");
        assert_eq!(index.records()[1].id, "chr3");

        let once = index.records().to_vec();
        index.sort();
        assert_eq!(index.records(), once.as_slice());
    }

    #[test]
    fn save_then_load_round_trips_field_for_field() {
        let dir = tempdir().unwrap();
        let index_path = dir.path().join("test.ssx");
        let fasta = create_test_fasta();

        let mut built = FastaIndex::new(&index_path, fasta.path());
        built.from_fasta().unwrap();
        built.sort();
        built.save().unwrap();
        assert_eq!(built.state(), IndexState::Saved);

        let mut loaded = FastaIndex::open(&index_path);
        loaded.load().unwrap();
        assert_eq!(loaded.state(), IndexState::Loaded);
        assert_eq!(loaded.records(), built.records());
        assert_eq!(loaded.source_path(), fasta.path());
    }

    #[test]
    fn double_save_is_rejected_and_leaves_the_file_unchanged() {
        let dir = tempdir().unwrap();
        let index_path = dir.path().join("test.ssx");
        let fasta = create_test_fasta();

        let mut index = FastaIndex::new(&index_path, fasta.path());
        index.from_fasta().unwrap();
        index.save().unwrap();

        let before = fs::read(&index_path).unwrap();
        assert!(matches!(index.save(), Err(IndexError::DoubleWrite(_))));
        assert_eq!(fs::read(&index_path).unwrap(), before);
    }

    #[test]
    fn double_load_is_rejected() {
        let dir = tempdir().unwrap();
        let index_path = dir.path().join("test.ssx");
        let fasta = create_test_fasta();

        let mut built = FastaIndex::new(&index_path, fasta.path());
        built.from_fasta().unwrap();
        built.save().unwrap();

        let mut loaded = FastaIndex::open(&index_path);
        loaded.load().unwrap();
        assert!(matches!(loaded.load(), Err(IndexError::DoubleRead(_))));
    }

    #[test]
    fn save_before_build_is_rejected() {
        let dir = tempdir().unwrap();
        let index_path = dir.path().join("test.ssx");
        let mut index = FastaIndex::new(&index_path, "nowhere.fa");
        assert!(matches!(
            index.save(),
            Err(IndexError::SaveBeforeBuild(_))
        ));
        assert!(!index_path.exists());
    }

    #[test]
    fn load_then_save_supports_the_resort_workflow() {
        let dir = tempdir().unwrap();
        let index_path = dir.path().join("test.ssx");
        let fasta = create_test_fasta();

        let mut built = FastaIndex::new(&index_path, fasta.path());
        built.from_fasta().unwrap();
        built.save().unwrap();

        let mut resorted = FastaIndex::open(&index_path);
        resorted.load().unwrap();
        resorted.sort();
        resorted.save().unwrap();
        assert_eq!(resorted.state(), IndexState::Saved);

        let mut reloaded = FastaIndex::open(&index_path);
        reloaded.load().unwrap();
        let lengths: Vec<u64> = reloaded.records().iter().map(|r| r.length).collect();
        assert_eq!(lengths, vec![4, 4, 10]);
    }

    #[test]
    fn loading_garbage_is_corrupt_and_exposes_no_records() {
        let dir = tempdir().unwrap();
        let index_path = dir.path().join("junk.ssx");
        fs::write(&index_path, b"this is not a gzip stream at all").unwrap();

        let mut index = FastaIndex::open(&index_path);
        assert!(matches!(index.load(), Err(IndexError::Corrupt(_))));
        assert!(index.is_empty());
        assert_eq!(index.state(), IndexState::Fresh);
    }

    #[test]
    fn loading_a_truncated_archive_is_corrupt() {
        let dir = tempdir().unwrap();
        let index_path = dir.path().join("test.ssx");
        let fasta = create_test_fasta();

        let mut built = FastaIndex::new(&index_path, fasta.path());
        built.from_fasta().unwrap();
        built.save().unwrap();

        let bytes = fs::read(&index_path).unwrap();
        fs::write(&index_path, &bytes[..bytes.len() / 2]).unwrap();

        let mut index = FastaIndex::open(&index_path);
        assert!(matches!(index.load(), Err(IndexError::Corrupt(_))));
        assert!(index.is_empty());
    }

    #[test]
    fn loading_an_archive_missing_its_trailer_is_corrupt() {
        let dir = tempdir().unwrap();
        let index_path = dir.path().join("test.ssx");
        let fasta = create_test_fasta();

        let mut built = FastaIndex::new(&index_path, fasta.path());
        built.from_fasta().unwrap();
        built.save().unwrap();

        // Cut only the gzip trailer; the container payload itself still
        // decodes, so the corruption is only visible at end of stream.
        let bytes = fs::read(&index_path).unwrap();
        fs::write(&index_path, &bytes[..bytes.len() - 4]).unwrap();

        let mut index = FastaIndex::open(&index_path);
        assert!(matches!(index.load(), Err(IndexError::Corrupt(_))));
        assert!(index.is_empty());
        assert_eq!(index.state(), IndexState::Fresh);
    }

    #[test]
    fn building_from_a_missing_source_is_an_io_style_error() {
        let mut index = FastaIndex::new("unused.ssx", "does/not/exist.fa");
        assert!(matches!(index.from_fasta(), Err(IndexError::Fasta(_))));
        assert_eq!(index.state(), IndexState::Fresh);
    }
}
