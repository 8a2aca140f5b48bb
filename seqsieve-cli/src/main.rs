mod coverage;
mod index;
mod longest;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "seqsieve";
    pub const BIN_NAME: &str = "seqsieve";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Compact persisted indexing and record selection for large FASTA files.")
        .subcommand_required(true)
        .subcommand(index::cli::create_index_cli())
        .subcommand(coverage::cli::create_coverage_cli())
        .subcommand(longest::cli::create_longest_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // INDEX
        //
        Some((index::cli::INDEX_CMD, matches)) => match matches.subcommand() {
            Some((index::cli::INDEX_BUILD, matches)) => {
                index::handlers::run_build(matches)?;
            }
            Some((index::cli::INDEX_PRINT, matches)) => {
                index::handlers::run_print(matches)?;
            }
            Some((index::cli::INDEX_SORT, matches)) => {
                index::handlers::run_sort(matches)?;
            }
            _ => unreachable!("Index subcommand not found"),
        },

        //
        // COVERAGE
        //
        Some((coverage::cli::COVERAGE_CMD, matches)) => {
            coverage::handlers::run_coverage(matches)?;
        }

        //
        // LONGEST
        //
        Some((longest::cli::LONGEST_CMD, matches)) => {
            longest::handlers::run_longest(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
