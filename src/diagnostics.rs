//! Operator-facing analysis of a single scraped dataset.
//!
//! Reports how many journals were actually found by the scraper (have a
//! derivable id) and which titles look like duplicates once normalized.
//! The report is informational; it never feeds back into merging.

use crate::normalize::normalize_opt;
use crate::record::{extract_ids, JournalMapping};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::info;

/// How many example groups the human summary lists
const SUMMARY_SAMPLE: usize = 5;

/// Summary of one dataset
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiagnosticReport {
    pub total: usize,
    /// Records with an id after extraction from the url
    pub with_id: usize,
    pub without_id: usize,
    /// Display titles reported for more than one key, with their counts
    pub duplicated_titles: BTreeMap<String, usize>,
    /// Normalized scraped title → source keys that resolved to it
    pub normalized_duplicates: BTreeMap<String, Vec<String>>,
}

impl DiagnosticReport {
    /// Share of records with an id, as a percentage
    pub fn found_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.with_id as f64 * 100.0 / self.total as f64
        }
    }
}

/// Analyze a mapping; ids are extracted on a copy so the input is untouched
pub fn analyze(mapping: &JournalMapping) -> DiagnosticReport {
    let mut mapping = mapping.clone();
    extract_ids(&mut mapping);

    let with_id = mapping
        .values()
        .filter(|r| r.id.as_deref().is_some_and(|id| !id.is_empty()))
        .count();

    let mut title_counts: BTreeMap<String, usize> = BTreeMap::new();
    for title in mapping.values().filter_map(|r| r.title.as_deref()) {
        if !title.is_empty() {
            *title_counts.entry(title.to_string()).or_default() += 1;
        }
    }

    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, record) in &mapping {
        let normalized = normalize_opt(record.title.as_deref());
        if !normalized.is_empty() {
            groups.entry(normalized).or_default().push(key.clone());
        }
    }

    let report = DiagnosticReport {
        total: mapping.len(),
        with_id,
        without_id: mapping.len() - with_id,
        duplicated_titles: title_counts.into_iter().filter(|(_, n)| *n > 1).collect(),
        normalized_duplicates: groups.into_iter().filter(|(_, keys)| keys.len() > 1).collect(),
    };

    info!(
        total = report.total,
        with_id = report.with_id,
        without_id = report.without_id,
        duplicated_titles = report.duplicated_titles.len(),
        normalized_duplicates = report.normalized_duplicates.len(),
        "Dataset analyzed"
    );

    report
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total entries:        {}", self.total)?;
        writeln!(f, "Found (with id):      {} ({:.1}%)", self.with_id, self.found_ratio())?;
        write!(f, "Not found:            {}", self.without_id)?;

        if !self.duplicated_titles.is_empty() {
            write!(f, "\nDuplicated titles:    {}", self.duplicated_titles.len())?;
            for (title, count) in self.duplicated_titles.iter().take(SUMMARY_SAMPLE) {
                write!(f, "\n - '{}': {} times", title, count)?;
            }
            if self.duplicated_titles.len() > SUMMARY_SAMPLE {
                write!(f, "\n   ... and {} more", self.duplicated_titles.len() - SUMMARY_SAMPLE)?;
            }
        }

        if !self.normalized_duplicates.is_empty() {
            write!(f, "\nNormalized duplicates: {}", self.normalized_duplicates.len())?;
            for (key, titles) in self.normalized_duplicates.iter().take(SUMMARY_SAMPLE) {
                write!(f, "\n - '{}': {:?}", key, titles)?;
            }
            if self.normalized_duplicates.len() > SUMMARY_SAMPLE {
                write!(f, "\n   ... and {} more", self.normalized_duplicates.len() - SUMMARY_SAMPLE)?;
            }
        }

        Ok(())
    }
}
