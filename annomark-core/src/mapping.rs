//! Registry of original ↔ safe key pairs.
//!
//! Safe keys written into a hierarchical store are one-way unless the
//! original label is kept somewhere; [`KeyMappings`] is that side table. It
//! lives on the dataset container it describes (see [`HasKeyMappings`]) and
//! is created on first write, never implicitly shared.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Mapping from original cluster label to its storage-safe key. One table
/// per container; repeated records for the same original overwrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyMappings {
    map: HashMap<String, String>,
}

impl KeyMappings {
    pub fn new() -> Self {
        KeyMappings::default()
    }

    pub fn insert(&mut self, original: &str, safe: &str) {
        self.map.insert(original.to_string(), safe.to_string());
    }

    pub fn safe_for(&self, original: &str) -> Option<&str> {
        self.map.get(original).map(String::as_str)
    }

    /// Reverse lookup via an inverse view built per call. If two originals
    /// ever mapped to the same safe key (the codec being deterministic, they
    /// should not), whichever the inverse sees last wins.
    pub fn original_for(&self, safe: &str) -> Option<&str> {
        let inverse: HashMap<&str, &str> = self
            .map
            .iter()
            .map(|(original, safe)| (safe.as_str(), original.as_str()))
            .collect();
        inverse.get(safe).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map
            .iter()
            .map(|(original, safe)| (original.as_str(), safe.as_str()))
    }
}

/// A container that carries a key-mapping table, e.g. a dataset's
/// unstructured-metadata slot. Reads see the table only if one exists;
/// writes create it.
pub trait HasKeyMappings {
    fn key_mappings(&self) -> Option<&KeyMappings>;

    /// Returns the table, creating an empty one on first call.
    fn key_mappings_mut(&mut self) -> &mut KeyMappings;
}

/// Minimal unstructured-metadata container, enough to hang a
/// [`KeyMappings`] table off a dataset and serialize it alongside.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Annotations {
    #[serde(skip_serializing_if = "Option::is_none")]
    key_mappings: Option<KeyMappings>,
}

impl HasKeyMappings for Annotations {
    fn key_mappings(&self) -> Option<&KeyMappings> {
        self.key_mappings.as_ref()
    }

    fn key_mappings_mut(&mut self) -> &mut KeyMappings {
        self.key_mappings.get_or_insert_with(KeyMappings::new)
    }
}

/// Records an original ↔ safe pair on the container, creating the table if
/// this is the first write. Overwrites on repeated calls with the same
/// original.
pub fn record<C: HasKeyMappings>(container: &mut C, original: &str, safe: &str) {
    container.key_mappings_mut().insert(original, safe);
}

/// Looks up the original label for a safe key. A container without a table
/// behaves like one with an empty table, and an unknown safe key falls back
/// to itself, so this never fails.
pub fn lookup_original<C: HasKeyMappings>(container: &C, safe: &str) -> String {
    container
        .key_mappings()
        .and_then(|mappings| mappings.original_for(safe))
        .unwrap_or(safe)
        .to_string()
}

/// Element-wise [`lookup_original`], preserving input order.
pub fn lookup_originals<C, I, S>(container: &C, safe_keys: I) -> Vec<String>
where
    C: HasKeyMappings,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    safe_keys
        .into_iter()
        .map(|key| lookup_original(container, key.as_ref()))
        .collect()
}
