use std::io::{self, BufWriter, Write};

use anyhow::Result;
use clap::ArgMatches;

use seqsieve_core::FastaReader;
use seqsieve_index::top_k;

pub fn run_longest(matches: &ArgMatches) -> Result<()> {
    let k = *matches.get_one::<usize>("k").expect("k is required");

    let fasta_path = matches
        .get_one::<String>("fasta")
        .expect("FASTA path is required");

    let mut reader = FastaReader::from_path(fasta_path)?;
    let records = top_k(&mut reader, k)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for record in &records {
        record.write_to(&mut out)?;
    }
    out.flush()?;
    Ok(())
}
