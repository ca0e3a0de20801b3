//! Merging two scraped journal datasets into one.
//!
//! Records are matched by their exact raw title. When both sources know a
//! title, the better-ranked record (see [`compare`]) provides the scalar
//! fields and the areas/catalogs of both records are unioned, so nothing
//! learned by either source is lost.

use crate::compare::{compare, Quality};
use crate::record::{extract_ids, JournalMapping, JournalRecord};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// Counters describing one reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    /// Records in the merged mapping
    pub total_combined: usize,
    /// Shared titles whose `id` or `title` disagreed
    pub conflicts: usize,
    /// Conflicts where one record was clearly better
    pub conflict_resolution: usize,
    /// Conflicts settled by picking the better match
    pub better_matches: usize,
    /// Titles only the first source knew
    pub added_from_file1: usize,
    /// Titles only the second source knew
    pub added_from_file2: usize,
    /// Titles present in both sources
    pub matched: usize,
}

impl MergeStats {
    /// Emit the counters as a single structured log event
    pub fn log(&self) {
        info!(
            total = self.total_combined,
            from_file1 = self.added_from_file1,
            from_file2 = self.added_from_file2,
            matched = self.matched,
            conflicts = self.conflicts,
            resolved = self.conflict_resolution,
            better_matches = self.better_matches,
            "Reconciliation complete"
        );
    }
}

impl fmt::Display for MergeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Merge statistics ===")?;
        writeln!(f, "Journals in merged file:      {}", self.total_combined)?;
        writeln!(f, "Only in file 1:               {}", self.added_from_file1)?;
        writeln!(f, "Only in file 2:               {}", self.added_from_file2)?;
        writeln!(f, "In both files:                {}", self.matched)?;
        writeln!(f, "Conflicts found:              {}", self.conflicts)?;
        writeln!(f, "Conflicts resolved:           {}", self.conflict_resolution)?;
        write!(f, "Better match selected:        {}", self.better_matches)
    }
}

/// Combine two records for the same title.
///
/// The record [`compare`] ranks higher supplies `title`, `id`, `url`,
/// `similarity` and any extra fields; on a tie the first record does.
/// `areas` and `catalogos` are the union of both.
pub fn merge(a: &JournalRecord, b: &JournalRecord) -> JournalRecord {
    let (base, other) = match compare(a, b) {
        Quality::SecondBetter => (b, a),
        Quality::FirstBetter | Quality::Equivalent => (a, b),
    };

    let mut merged = base.clone();
    merged.areas.extend(other.areas.iter().cloned());
    merged.catalogos.extend(other.catalogos.iter().cloned());
    merged
}

/// Reconcile two title-keyed mappings into one.
///
/// Ids are first extracted from every record's url. Titles found in only
/// one mapping are copied as they are; titles found in both are combined
/// with [`merge`]. The result holds every title of either input.
pub fn reconcile(mut first: JournalMapping, mut second: JournalMapping) -> (JournalMapping, MergeStats) {
    extract_ids(&mut first);
    extract_ids(&mut second);

    let mut stats = MergeStats::default();
    let mut combined = JournalMapping::new();

    for (title, record_a) in first {
        let Some(record_b) = second.remove(&title) else {
            combined.insert(title, record_a);
            stats.added_from_file1 += 1;
            continue;
        };

        stats.matched += 1;

        if record_a.id != record_b.id || record_a.title != record_b.title {
            stats.conflicts += 1;
            let quality = compare(&record_a, &record_b);
            debug!(title = %title, ?quality, "Conflicting records");
            if quality != Quality::Equivalent {
                stats.conflict_resolution += 1;
                stats.better_matches += 1;
            }
        }

        let merged = merge(&record_a, &record_b);
        combined.insert(title, merged);
    }

    for (title, record_b) in second {
        if !combined.contains_key(&title) {
            combined.insert(title, record_b);
            stats.added_from_file2 += 1;
        }
    }

    stats.total_combined = combined.len();
    (combined, stats)
}
