use clap::{Arg, Command, arg};

pub use annomark_core::consts::*;

pub fn create_markers_cli() -> Command {
    Command::new(MARKERS_CMD)
        .about("Convert a cluster/marker table into a per-cluster marker map.")
        .arg(Arg::new("table").required(true).help("Path to the marker table CSV"))
        .arg(arg!(--"cluster-col" <NAME> "Column holding the cluster labels").required(true))
        .arg(arg!(--"marker-col" <NAME> "Column holding the marker genes").required(true))
        .arg(arg!(-c --cluster <LABEL> "Emit only this cluster's markers, one cluster at a time"))
}
