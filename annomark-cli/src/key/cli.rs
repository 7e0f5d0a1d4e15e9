use clap::{Arg, Command, arg};

pub use annomark_core::consts::*;

pub fn create_key_cli() -> Command {
    Command::new(KEY_CMD)
        .about("Encode cluster labels as storage-safe keys and decode them back.")
        .subcommand_required(true)
        .subcommand(
            Command::new(KEY_ENCODE_CMD)
                .about("Print the storage-safe key for a cluster label.")
                .arg(Arg::new("label").required(true).help("The original cluster label"))
                .arg(arg!(--prefix <PREFIX> "Build a prefixed varm-style key"))
                .arg(arg!(--mappings <JSON> "Record the pair into this mappings file")),
        )
        .subcommand(
            Command::new(KEY_DECODE_CMD)
                .about("Recover the original cluster label from a safe key.")
                .arg(Arg::new("key").required(true).help("The storage-safe key"))
                .arg(arg!(--mappings <JSON> "Look the key up in this mappings file")),
        )
}
