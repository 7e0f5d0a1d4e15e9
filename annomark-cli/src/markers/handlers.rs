use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use annomark_core::markers::{MarkerTable, prepare_markers};

pub fn run_markers(matches: &ArgMatches) -> Result<()> {
    let table = matches
        .get_one::<String>("table")
        .expect("A path to a marker table is required.");

    let cluster_col = matches
        .get_one::<String>("cluster-col")
        .expect("A cluster column name is required.");

    let marker_col = matches
        .get_one::<String>("marker-col")
        .expect("A marker column name is required.");

    let table = MarkerTable::from_csv(Path::new(table))
        .with_context(|| format!("Couldn't load marker table: {table}"))?;
    let map = prepare_markers(&table, cluster_col, marker_col)?;

    match matches.get_one::<String>("cluster") {
        Some(cluster) => {
            let markers = map
                .get(cluster)
                .with_context(|| format!("Cluster not found in marker table: {cluster}"))?;
            println!("{}", serde_json::to_string_pretty(markers)?);
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
    }

    Ok(())
}
