use clap::{Arg, Command, value_parser};

pub use seqsieve_index::consts::LONGEST_CMD;

pub fn create_longest_cli() -> Command {
    Command::new(LONGEST_CMD)
        .about("Stream a FASTA file and keep only the k longest records, with no index involved.")
        .arg(
            Arg::new("k")
                .required(true)
                .value_parser(value_parser!(usize))
                .help("How many records to retain"),
        )
        .arg(
            Arg::new("fasta")
                .required(true)
                .help("FASTA file to scan"),
        )
}
