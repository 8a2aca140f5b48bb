use std::time::Duration;

use anyhow::Result;
use clap::ArgMatches;
use indicatif::ProgressBar;

use seqsieve_index::FastaIndex;

pub fn run_build(matches: &ArgMatches) -> Result<()> {
    let index_path = matches
        .get_one::<String>("index")
        .expect("Index path is required");

    let fasta_path = matches
        .get_one::<String>("fasta")
        .expect("FASTA path is required");

    let capacity = *matches
        .get_one::<u64>("capacity")
        .expect("Capacity has a default");

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(format!("Indexing {fasta_path}"));

    let mut index = FastaIndex::new(index_path, fasta_path);
    index.from_fasta_with_capacity(capacity as usize)?;
    index.sort();
    index.save()?;

    spinner.finish_with_message(format!("Indexed {} records into {index_path}", index.len()));
    Ok(())
}

pub fn run_print(matches: &ArgMatches) -> Result<()> {
    let index_path = matches
        .get_one::<String>("index")
        .expect("Index path is required");

    let mut index = FastaIndex::open(index_path);
    index.load()?;

    println!("ID\tLength\tA\tC\tG\tT\tN\tOffset\tHash");
    for record in index.records() {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            record.id,
            record.length,
            record.na,
            record.nc,
            record.ng,
            record.nt,
            record.nn,
            record.offset,
            record.hash
        );
    }
    Ok(())
}

pub fn run_sort(matches: &ArgMatches) -> Result<()> {
    let index_path = matches
        .get_one::<String>("index")
        .expect("Index path is required");

    let mut index = FastaIndex::open(index_path);
    eprintln!("Loading index...");
    index.load()?;
    eprintln!("Sorting index...");
    index.sort();
    eprintln!("Saving index...");
    index.save()?;
    Ok(())
}
