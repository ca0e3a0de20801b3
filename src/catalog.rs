//! Read-only queries over the merged journal dataset.
//!
//! This is what the browsing front end needs: list areas and catalogs,
//! filter journals by them, browse alphabetically, search by title and
//! look up one journal together with its ranking data.

use crate::config::DataPaths;
use crate::error::Result;
use crate::record::{JournalMapping, JournalRecord};
use crate::store::{load_mapping, load_rankings, RankingMapping};
use std::collections::{BTreeMap, BTreeSet};

/// Subset of the dataset returned by a query, keyed by title
pub type Selection<'a> = BTreeMap<&'a str, &'a JournalRecord>;

/// Journal dataset plus ranking data, loaded once and only read afterwards
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    journals: JournalMapping,
    rankings: RankingMapping,
}

impl Catalog {
    pub fn new(journals: JournalMapping, rankings: RankingMapping) -> Self {
        Self { journals, rankings }
    }

    /// Load both datasets from their configured locations
    pub fn load(paths: &DataPaths) -> Result<Self> {
        let journals = load_mapping(&paths.journals)?;
        let rankings = load_rankings(&paths.rankings)?;
        Ok(Self::new(journals, rankings))
    }

    pub fn len(&self) -> usize {
        self.journals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.journals.is_empty()
    }

    /// Distinct subject areas, sorted
    pub fn areas(&self) -> Vec<&str> {
        distinct(self.journals.values().flat_map(|r| r.areas.iter()))
    }

    /// Journals tagged with `area`
    pub fn by_area(&self, area: &str) -> Selection<'_> {
        self.select(|_, record| record.areas.contains(area))
    }

    /// Distinct indexing catalogs, sorted
    pub fn catalogs(&self) -> Vec<&str> {
        distinct(self.journals.values().flat_map(|r| r.catalogos.iter()))
    }

    /// Journals indexed in `catalog`
    pub fn by_catalog(&self, catalog: &str) -> Selection<'_> {
        self.select(|_, record| record.catalogos.contains(catalog))
    }

    /// Journals whose title starts with `prefix`, ignoring case
    pub fn by_prefix(&self, prefix: &str) -> Selection<'_> {
        let prefix = prefix.to_lowercase();
        self.select(|title, _| title.to_lowercase().starts_with(&prefix))
    }

    /// Journals whose title contains `query`, ignoring case.
    ///
    /// An empty query matches nothing. Surrounding spaces are part of the
    /// query, so `" de "` only matches the whole word.
    pub fn search(&self, query: &str) -> Selection<'_> {
        let query = query.to_lowercase();
        if query.is_empty() {
            return Selection::new();
        }
        self.select(|title, _| title.to_lowercase().contains(&query))
    }

    /// Record for an exact title, or an empty record when unknown
    pub fn get(&self, title: &str) -> JournalRecord {
        self.journals.get(title).cloned().unwrap_or_default()
    }

    /// Ranking data for an exact title, or an empty object when unknown
    pub fn ranking(&self, title: &str) -> serde_json::Value {
        self.rankings
            .get(title)
            .cloned()
            .unwrap_or_else(|| serde_json::Value::Object(Default::default()))
    }

    fn select<F>(&self, keep: F) -> Selection<'_>
    where
        F: Fn(&str, &JournalRecord) -> bool,
    {
        self.journals
            .iter()
            .filter(|(title, record)| keep(title.as_str(), record))
            .map(|(title, record)| (title.as_str(), record))
            .collect()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    values
        .map(String::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn journal(areas: &[&str], catalogos: &[&str]) -> JournalRecord {
        JournalRecord {
            areas: areas.iter().map(|s| s.to_string()).collect(),
            catalogos: catalogos.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn sample() -> Catalog {
        let journals: JournalMapping = [
            ("acta biologica", journal(&["Biología"], &["Scopus", "Latindex"])),
            ("Anales de Historia", journal(&["Historia"], &["Latindex"])),
            ("revista de biologia marina", journal(&["Biología", "Oceanografía"], &[])),
            ("Zoología Hoy", journal(&[], &["DOAJ"])),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let mut rankings = RankingMapping::new();
        rankings.insert("acta biologica".to_string(), json!({"sjr": 0.4, "quartile": "Q3"}));

        Catalog::new(journals, rankings)
    }

    #[test]
    fn test_distinct_areas_and_catalogs() {
        let catalog = sample();
        assert_eq!(catalog.areas(), vec!["Biología", "Historia", "Oceanografía"]);
        assert_eq!(catalog.catalogs(), vec!["DOAJ", "Latindex", "Scopus"]);
    }

    #[test]
    fn test_filter_by_area_and_catalog() {
        let catalog = sample();

        let biology: Vec<&str> = catalog.by_area("Biología").into_keys().collect();
        assert_eq!(biology, vec!["acta biologica", "revista de biologia marina"]);
        assert!(catalog
            .by_area("Biología")
            .values()
            .all(|r| r.areas.contains("Biología")));

        let latindex: Vec<&str> = catalog.by_catalog("Latindex").into_keys().collect();
        assert_eq!(latindex, vec!["Anales de Historia", "acta biologica"]);

        assert!(catalog.by_area("Química").is_empty());
        assert_eq!(catalog.by_catalog("Latindex"), catalog.by_catalog("Latindex"));
    }

    #[test]
    fn test_prefix_is_case_insensitive() {
        let catalog = sample();
        let a: Vec<&str> = catalog.by_prefix("A").into_keys().collect();
        assert_eq!(a, vec!["Anales de Historia", "acta biologica"]);
        assert_eq!(catalog.by_prefix("z").len(), 1);
    }

    #[test]
    fn test_search() {
        let catalog = sample();
        let hits: Vec<&str> = catalog.search("BIOLOGI").into_keys().collect();
        assert_eq!(hits, vec!["acta biologica", "revista de biologia marina"]);
        assert!(catalog.search("").is_empty());

        let ia: Vec<&str> = catalog.search("ia").into_keys().collect();
        assert_eq!(ia, vec!["Anales de Historia", "revista de biologia marina"]);
        let ia_space: Vec<&str> = catalog.search("IA ").into_keys().collect();
        assert_eq!(ia_space, vec!["revista de biologia marina"]);
    }

    #[test]
    fn test_get_and_ranking_defaults() {
        let catalog = sample();
        assert_eq!(catalog.get("Zoología Hoy").catalogos.len(), 1);
        assert_eq!(catalog.get("Unknown Journal"), JournalRecord::default());
        assert_eq!(catalog.ranking("acta biologica")["quartile"], "Q3");
        assert_eq!(catalog.ranking("Unknown Journal"), json!({}));
    }
}
