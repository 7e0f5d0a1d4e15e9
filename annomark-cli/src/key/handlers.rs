use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use annomark_core::mapping::{Annotations, lookup_original, record};
use annomark_core::safekey::{build_safe_varm_key, make_safe_key, recover_original_key};

fn load_annotations(path: &Path) -> Result<Annotations> {
    if !path.exists() {
        return Ok(Annotations::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Couldn't read mappings file: {:?}", path))?;
    let annotations = serde_json::from_str(&raw)
        .with_context(|| format!("Couldn't parse mappings file: {:?}", path))?;
    Ok(annotations)
}

fn save_annotations(path: &Path, annotations: &Annotations) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(annotations)?)
        .with_context(|| format!("Couldn't write mappings file: {:?}", path))
}

pub fn run_encode(matches: &ArgMatches) -> Result<()> {
    let label = matches
        .get_one::<String>("label")
        .expect("A cluster label is required.");

    let safe = match matches.get_one::<String>("prefix") {
        Some(prefix) => build_safe_varm_key(prefix, label),
        None => make_safe_key(label),
    };

    if let Some(mappings) = matches.get_one::<String>("mappings") {
        let path = Path::new(mappings);
        let mut annotations = load_annotations(path)?;
        record(&mut annotations, label, &safe);
        save_annotations(path, &annotations)?;
    }

    println!("{safe}");
    Ok(())
}

pub fn run_decode(matches: &ArgMatches) -> Result<()> {
    let key = matches
        .get_one::<String>("key")
        .expect("A safe key is required.");

    let original = match matches.get_one::<String>("mappings") {
        Some(mappings) => {
            let annotations = load_annotations(Path::new(mappings))?;
            lookup_original(&annotations, key)
        }
        None => recover_original_key(key),
    };

    println!("{original}");
    Ok(())
}
