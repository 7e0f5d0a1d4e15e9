mod key;
mod markers;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "annomark";
    pub const BIN_NAME: &str = "annomark";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Support utilities for marker-gene annotation pipelines: marker-table parsing and storage-safe cluster keys.")
        .subcommand_required(true)
        .subcommand(markers::cli::create_markers_cli())
        .subcommand(key::cli::create_key_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // MARKER TABLE PARSING
        //
        Some((markers::cli::MARKERS_CMD, matches)) => {
            markers::handlers::run_markers(matches)?;
        }

        //
        // SAFE KEY CODEC
        //
        Some((key::cli::KEY_CMD, matches)) => match matches.subcommand() {
            Some((key::cli::KEY_ENCODE_CMD, matches)) => {
                key::handlers::run_encode(matches)?;
            }
            Some((key::cli::KEY_DECODE_CMD, matches)) => {
                key::handlers::run_decode(matches)?;
            }
            _ => unreachable!("Key subcommand not found"),
        },

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
