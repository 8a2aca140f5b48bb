use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::ArgMatches;

use seqsieve_core::FastaReader;
use seqsieve_index::{FastaIndex, select_for_coverage};

pub fn run_coverage(matches: &ArgMatches) -> Result<()> {
    let index_path = matches
        .get_one::<String>("index")
        .expect("Index path is required");

    let genome_size = *matches
        .get_one::<u64>("genome_size")
        .expect("Genome size is required");

    let coverage = *matches
        .get_one::<u64>("coverage")
        .expect("Coverage is required");

    let mut index = FastaIndex::open(index_path);
    index.load()?;

    let fasta_path = match matches.get_one::<String>("fasta") {
        Some(path) => PathBuf::from(path),
        None => index.source_path().to_path_buf(),
    };
    let mut reader = FastaReader::from_path(&fasta_path)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let selection = select_for_coverage(&index, &mut reader, genome_size, coverage, &mut out)?;
    out.flush()?;

    eprintln!(
        "Selected {} records ({} bases, target {})",
        selection.records, selection.bases, selection.target_size
    );
    Ok(())
}
