//! Parsing of per-cluster marker tables.
//!
//! Marker tables come in two encodings. Some pipelines write one row per
//! cluster with the marker column holding a stringified list
//! (`"['NTNG1', 'EYA4']"`); others write long form, one cluster/marker pair
//! per row. The format is sniffed once from the first marker value and
//! applied to the whole column.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::errors::MarkerError;

/// A small in-memory table of named string columns, the shape a marker CSV
/// loads into. Rows are kept in file order.
#[derive(Debug, Clone)]
pub struct MarkerTable {
    headers: Vec<String>,
    columns: HashMap<String, Vec<String>>,
}

impl MarkerTable {
    /// Builds a table from a header row and data rows. Every row must have
    /// one field per header.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, MarkerError> {
        let mut columns: HashMap<String, Vec<String>> = headers
            .iter()
            .map(|h| (h.clone(), Vec::with_capacity(rows.len())))
            .collect();

        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != headers.len() {
                return Err(MarkerError::RaggedRow {
                    row: index + 1,
                    found: row.len(),
                    expected: headers.len(),
                });
            }
            for (header, value) in headers.iter().zip(row) {
                columns.get_mut(header).unwrap().push(value);
            }
        }

        Ok(MarkerTable { headers, columns })
    }

    /// Loads a table from a CSV file with a header row.
    pub fn from_csv(path: &Path) -> Result<Self, MarkerError> {
        let mut reader = csv::Reader::from_path(path)?;

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Self::from_rows(headers, rows)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Returns the values of a named column, in row order.
    pub fn column(&self, name: &str) -> Result<&[String], MarkerError> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| MarkerError::MissingColumn(name.to_string()))
    }

    pub fn n_rows(&self) -> usize {
        self.headers
            .first()
            .map(|h| self.columns[h].len())
            .unwrap_or(0)
    }
}

/// How the marker column encodes multiple markers per cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerFormat {
    /// One row per cluster, marker value is a stringified list.
    BracketedList,
    /// One cluster/marker pair per row.
    LongForm,
}

impl MarkerFormat {
    /// Decides the format from the first value of the marker column. The
    /// decision is made once and applied to every row; tables mixing both
    /// encodings in one column are not detected.
    pub fn detect(first_value: &str) -> MarkerFormat {
        if first_value.contains('[') {
            MarkerFormat::BracketedList
        } else {
            MarkerFormat::LongForm
        }
    }
}

/// Splits a stringified list (`"['NTNG1', 'EYA4']"`) into its elements.
///
/// Brackets and quotes are stripped and `", "` is normalized to `","` first,
/// so multi-word tokens survive the split. A value with no list structure at
/// all comes back as a single-element list holding the unsplit literal.
pub fn parse_list_literal(value: &str) -> Vec<String> {
    value
        .replace('[', "")
        .replace(']', "")
        .replace(", ", ",")
        .replace('\'', "")
        .replace('"', "")
        .split(',')
        .map(str::to_string)
        .collect()
}

/// Insertion-ordered mapping from cluster name to its deduplicated marker
/// list. Clusters appear in first-occurrence order, as do markers within a
/// cluster; inserting a marker a cluster already holds is a no-op.
#[derive(Debug, Clone, Default)]
pub struct MarkerMap {
    index: HashMap<String, usize>,
    entries: Vec<(String, Vec<String>)>,
}

impl MarkerMap {
    pub fn new() -> Self {
        MarkerMap::default()
    }

    pub fn insert(&mut self, cluster: &str, marker: &str) {
        let idx = match self.index.get(cluster) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.entries.push((cluster.to_string(), Vec::new()));
                self.index.insert(cluster.to_string(), idx);
                idx
            }
        };

        let markers = &mut self.entries[idx].1;
        if !markers.iter().any(|m| m == marker) {
            markers.push(marker.to_string());
        }
    }

    pub fn get(&self, cluster: &str) -> Option<&[String]> {
        self.index
            .get(cluster)
            .map(|&idx| self.entries[idx].1.as_slice())
    }

    pub fn clusters(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(cluster, _)| cluster.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(cluster, markers)| (cluster.as_str(), markers.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Serialized as a JSON object in cluster insertion order, which a derived
// impl over the backing HashMap would not preserve.
impl Serialize for MarkerMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (cluster, markers) in &self.entries {
            map.serialize_entry(cluster, markers)?;
        }
        map.end()
    }
}

/// Converts a marker table into a cluster → markers map.
///
/// The marker column's encoding is sniffed from its first value (see
/// [`MarkerFormat::detect`]). No rows are dropped; a marker listed twice
/// under one cluster collapses to a single entry, first occurrence wins.
/// An empty table yields an empty map.
pub fn prepare_markers(
    table: &MarkerTable,
    cluster_col: &str,
    marker_col: &str,
) -> Result<MarkerMap, MarkerError> {
    let clusters = table.column(cluster_col)?;
    let markers = table.column(marker_col)?;

    let mut map = MarkerMap::new();
    let format = match markers.first() {
        Some(first) => MarkerFormat::detect(first),
        None => return Ok(map),
    };

    match format {
        MarkerFormat::BracketedList => {
            for (cluster, value) in clusters.iter().zip(markers) {
                for marker in parse_list_literal(value) {
                    map.insert(cluster, &marker);
                }
            }
        }
        MarkerFormat::LongForm => {
            for (cluster, marker) in clusters.iter().zip(markers) {
                map.insert(cluster, marker);
            }
        }
    }

    Ok(map)
}

/// Collects markers that are absent from a reference name set (e.g. the var
/// names of a downstream dataset), in map order.
pub fn markers_not_found(map: &MarkerMap, reference: &HashSet<String>) -> Vec<String> {
    let mut not_found = Vec::new();
    for (_, markers) in map.iter() {
        for marker in markers {
            if !reference.contains(marker) && !not_found.contains(marker) {
                not_found.push(marker.clone());
            }
        }
    }
    not_found
}

/// Advisory only: reports missing markers on stderr and keeps going. No
/// artifact is written.
pub fn warn_not_found(not_found: &[String]) {
    if !not_found.is_empty() {
        eprintln!(
            "WARNING: input markers not found in dataset\nMarkers: {:?}",
            not_found
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn table_from(headers: &[&str], rows: &[&[&str]]) -> MarkerTable {
        MarkerTable::from_rows(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|v| v.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    #[rstest]
    #[case("['NTNG1', 'EYA4']", vec!["NTNG1", "EYA4"])]
    #[case("[\"P2RY12\"]", vec!["P2RY12"])]
    #[case("['CD14+ Mono', 'B naive']", vec!["CD14+ Mono", "B naive"])]
    #[case("NTNG1", vec!["NTNG1"])]
    fn test_parse_list_literal(#[case] value: &str, #[case] expected: Vec<&str>) {
        assert_eq!(parse_list_literal(value), expected);
    }

    #[rstest]
    #[case("['NTNG1', 'EYA4']", MarkerFormat::BracketedList)]
    #[case("NTNG1", MarkerFormat::LongForm)]
    fn test_detect_format(#[case] value: &str, #[case] expected: MarkerFormat) {
        assert_eq!(MarkerFormat::detect(value), expected);
    }

    #[rstest]
    fn test_prepare_markers_bracketed() {
        let table = table_from(
            &["cluster", "markers"],
            &[&["A", "['g1', 'g2']"], &["B", "['g3']"]],
        );
        let map = prepare_markers(&table, "cluster", "markers").unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("A").unwrap(), &["g1", "g2"]);
        assert_eq!(map.get("B").unwrap(), &["g3"]);
    }

    #[rstest]
    fn test_prepare_markers_long_form() {
        let table = table_from(
            &["cluster", "marker"],
            &[&["A", "g1"], &["A", "g2"], &["B", "g1"]],
        );
        let map = prepare_markers(&table, "cluster", "marker").unwrap();

        assert_eq!(map.get("A").unwrap(), &["g1", "g2"]);
        assert_eq!(map.get("B").unwrap(), &["g1"]);
    }

    #[rstest]
    fn test_prepare_markers_dedups_preserving_order() {
        let table = table_from(
            &["cluster", "marker"],
            &[
                &["A", "g2"],
                &["A", "g1"],
                &["A", "g2"],
                &["A", "g3"],
                &["A", "g1"],
            ],
        );
        let map = prepare_markers(&table, "cluster", "marker").unwrap();

        assert_eq!(map.get("A").unwrap(), &["g2", "g1", "g3"]);
    }

    // Format is sniffed once from the first value: bracketed values in later
    // rows of a long-form table stay unsplit.
    #[rstest]
    fn test_mixed_format_rows_parse_as_long_form() {
        let table = table_from(
            &["cluster", "marker"],
            &[&["A", "g1"], &["B", "['g2', 'g3']"]],
        );
        let map = prepare_markers(&table, "cluster", "marker").unwrap();

        assert_eq!(map.get("A").unwrap(), &["g1"]);
        assert_eq!(map.get("B").unwrap(), &["['g2', 'g3']"]);
    }

    #[rstest]
    fn test_prepare_markers_empty_table() {
        let table = table_from(&["cluster", "marker"], &[]);
        let map = prepare_markers(&table, "cluster", "marker").unwrap();

        assert!(map.is_empty());
    }

    #[rstest]
    fn test_missing_column() {
        let table = table_from(&["cluster", "marker"], &[&["A", "g1"]]);
        let result = prepare_markers(&table, "cluster", "genes");

        assert!(matches!(result, Err(MarkerError::MissingColumn(_))));
    }

    #[rstest]
    fn test_ragged_row_rejected() {
        let result = MarkerTable::from_rows(
            vec!["cluster".to_string(), "marker".to_string()],
            vec![vec!["A".to_string()]],
        );

        assert!(matches!(result, Err(MarkerError::RaggedRow { row: 1, .. })));
    }

    #[rstest]
    fn test_cluster_order_is_first_occurrence() {
        let table = table_from(
            &["cluster", "marker"],
            &[&["B", "g1"], &["A", "g2"], &["B", "g3"]],
        );
        let map = prepare_markers(&table, "cluster", "marker").unwrap();

        let clusters: Vec<&str> = map.clusters().collect();
        assert_eq!(clusters, vec!["B", "A"]);
        assert_eq!(map.get("B").unwrap(), &["g1", "g3"]);
    }

    #[rstest]
    fn test_marker_map_serializes_in_order() {
        let mut map = MarkerMap::new();
        map.insert("B", "g1");
        map.insert("A", "g2");

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"B":["g1"],"A":["g2"]}"#);
    }

    #[rstest]
    fn test_markers_not_found() {
        let mut map = MarkerMap::new();
        map.insert("A", "g1");
        map.insert("A", "g2");
        map.insert("B", "g2");

        let reference: HashSet<String> = ["g1".to_string()].into_iter().collect();
        assert_eq!(markers_not_found(&map, &reference), vec!["g2"]);
    }
}
