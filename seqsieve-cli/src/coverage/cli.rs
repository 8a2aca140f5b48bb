use clap::{Arg, Command, arg, value_parser};

pub use seqsieve_index::consts::COVERAGE_CMD;

pub fn create_coverage_cli() -> Command {
    Command::new(COVERAGE_CMD)
        .about("Stream the longest records until a genome coverage target is met.")
        .arg(
            Arg::new("index")
                .required(true)
                .help("Index archive built by 'index build'"),
        )
        .arg(
            Arg::new("genome_size")
                .required(true)
                .value_parser(value_parser!(u64))
                .help("Reference genome size in bases"),
        )
        .arg(
            Arg::new("coverage")
                .required(true)
                .value_parser(value_parser!(u64))
                .help("Target coverage multiple of the genome size"),
        )
        .arg(arg!(--fasta <fasta> "Read records from this FASTA instead of the path recorded in the index"))
}
