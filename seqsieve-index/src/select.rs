//! Record selection: coverage-target greedy selection over a sorted index,
//! and bounded top-K selection straight from the source.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::io::Write;

use seqsieve_core::{FastaReader, FastaRecord};

use crate::errors::IndexError;
use crate::index::FastaIndex;

/// What a coverage selection emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoverageSelection {
    pub records: u64,
    pub bases: u64,
    pub target_size: u64,
}

/// Greedily selects the longest records until their cumulative length
/// reaches `genome_size * target_coverage`, re-reading each selected record
/// from `reader` and writing it to `out` as FASTA.
///
/// Expects `index` sorted ascending by length and consumes it in reverse,
/// longest first; ties come out in whatever order the sort left them. This
/// is greedy by length, not an optimal covering set. Selection stops as
/// soon as the running total reaches the target, so a zero target selects
/// nothing, and exhausting the index below target is a silently accepted
/// partial result.
///
/// The target is computed in checked 64-bit arithmetic; an overflowing
/// `genome_size * target_coverage` is a typed error, never a silent wrap.
pub fn select_for_coverage<W: Write>(
    index: &FastaIndex,
    reader: &mut FastaReader,
    genome_size: u64,
    target_coverage: u64,
    out: &mut W,
) -> Result<CoverageSelection, IndexError> {
    let target_size =
        genome_size
            .checked_mul(target_coverage)
            .ok_or(IndexError::CoverageOverflow {
                genome_size,
                coverage: target_coverage,
            })?;

    let mut selection = CoverageSelection {
        records: 0,
        bases: 0,
        target_size,
    };
    for summary in index.records().iter().rev() {
        if selection.bases >= target_size {
            break;
        }
        reader.seek(summary.offset)?;
        let Some(record) = reader.next_record()? else {
            return Err(IndexError::SourceMismatch {
                path: index.source_path().to_path_buf(),
                offset: summary.offset,
            });
        };
        record.write_to(out)?;
        selection.bases += summary.length;
        selection.records += 1;
    }
    Ok(selection)
}

/// Min-heap wrapper: orders records shortest-first so `BinaryHeap::peek`
/// exposes the shortest retained record.
struct ShortestFirst(FastaRecord);

impl PartialEq for ShortestFirst {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
    }
}

impl Eq for ShortestFirst {}

impl PartialOrd for ShortestFirst {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ShortestFirst {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.len().cmp(&self.0.len())
    }
}

/// Retains the `k` longest records from a single forward scan of the
/// source, holding at most `k` records in memory at any point.
///
/// A record is admitted while the heap is below capacity, evicts the
/// current shortest when strictly longer than it, and is dropped otherwise,
/// so on a boundary tie the record seen earlier wins. Returned records are
/// ordered longest first. `k = 0` yields an empty selection without
/// scanning.
pub fn top_k(reader: &mut FastaReader, k: usize) -> Result<Vec<FastaRecord>, IndexError> {
    if k == 0 {
        return Ok(Vec::new());
    }

    let mut heap: BinaryHeap<ShortestFirst> = BinaryHeap::new();
    while let Some(record) = reader.next_record()? {
        if heap.len() < k {
            heap.push(ShortestFirst(record));
        } else if heap
            .peek()
            .is_some_and(|shortest| record.len() > shortest.0.len())
        {
            heap.pop();
            heap.push(ShortestFirst(record));
        }
    }

    Ok(heap
        .into_sorted_vec()
        .into_iter()
        .map(|wrapped| wrapped.0)
        .collect())
}
