use clap::{Arg, Command, arg, value_parser};

pub use seqsieve_index::consts::{INDEX_BUILD, INDEX_CMD, INDEX_PRINT, INDEX_SORT};

pub fn create_index_cli() -> Command {
    Command::new(INDEX_CMD)
        .about("Build, inspect, and re-sort persisted FASTA indexes.")
        .subcommand_required(true)
        .subcommand(
            Command::new(INDEX_BUILD)
                .about("Index a FASTA file and write the archive, sorted ascending by record length.")
                .arg(
                    Arg::new("index")
                        .required(true)
                        .help("Path of the index archive to write"),
                )
                .arg(
                    Arg::new("fasta")
                        .required(true)
                        .help("FASTA file to index"),
                )
                .arg(
                    arg!(--capacity <capacity> "Pre-allocate room for this many records")
                        .value_parser(value_parser!(u64))
                        .default_value("1"),
                ),
        )
        .subcommand(
            Command::new(INDEX_PRINT)
                .about("Print one summary line per indexed record.")
                .arg(Arg::new("index").required(true)),
        )
        .subcommand(
            Command::new(INDEX_SORT)
                .about("Re-sort an index ascending by record length and overwrite it.")
                .arg(Arg::new("index").required(true)),
        )
}
