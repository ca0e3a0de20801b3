//! Quality ranking between two candidate records for the same journal.

use crate::record::JournalRecord;

/// Minimum similarity lead needed before one match counts as better
pub const SIMILARITY_MARGIN: f64 = 0.05;

/// Outcome of [`compare`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    FirstBetter,
    SecondBetter,
    Equivalent,
}

/// Decide which of two records is the more trustworthy match.
///
/// Rules are checked in order and the first one that separates the
/// records decides:
///
/// 1. having both `id` and `url`
/// 2. having a non-empty `title`
/// 3. `similarity` ahead by more than [`SIMILARITY_MARGIN`] (missing counts as 0)
///
/// Anything else is [`Quality::Equivalent`].
pub fn compare(a: &JournalRecord, b: &JournalRecord) -> Quality {
    if let Some(quality) = prefer(a.has_id_and_url(), b.has_id_and_url()) {
        return quality;
    }

    if let Some(quality) = prefer(a.has_title(), b.has_title()) {
        return quality;
    }

    let (sim_a, sim_b) = (a.similarity_or_zero(), b.similarity_or_zero());
    if sim_a > sim_b + SIMILARITY_MARGIN {
        Quality::FirstBetter
    } else if sim_b > sim_a + SIMILARITY_MARGIN {
        Quality::SecondBetter
    } else {
        Quality::Equivalent
    }
}

fn prefer(a: bool, b: bool) -> Option<Quality> {
    match (a, b) {
        (true, false) => Some(Quality::FirstBetter),
        (false, true) => Some(Quality::SecondBetter),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: Option<&str>, url: Option<&str>, title: Option<&str>, sim: Option<f64>) -> JournalRecord {
        JournalRecord {
            id: id.map(String::from),
            url: url.map(String::from),
            title: title.map(String::from),
            similarity: sim,
            ..Default::default()
        }
    }

    #[test]
    fn test_id_and_url_wins_first() {
        let full = record(Some("1"), Some("https://site/x?q=1&"), None, Some(0.1));
        let titled = record(Some("1"), None, Some("Nature"), Some(0.99));
        assert_eq!(compare(&full, &titled), Quality::FirstBetter);
        assert_eq!(compare(&titled, &full), Quality::SecondBetter);
    }

    #[test]
    fn test_title_beats_missing_title() {
        let a = record(None, None, None, Some(0.9));
        let b = record(None, None, Some("Nature"), Some(0.2));
        assert_eq!(compare(&a, &b), Quality::SecondBetter);
    }

    #[test]
    fn test_similarity_margin() {
        let a = record(None, None, Some("A"), Some(0.90));
        let close = record(None, None, Some("A"), Some(0.87));
        let far = record(None, None, Some("A"), Some(0.80));
        assert_eq!(compare(&a, &close), Quality::Equivalent);
        assert_eq!(compare(&a, &far), Quality::FirstBetter);
        assert_eq!(compare(&far, &a), Quality::SecondBetter);
    }

    #[test]
    fn test_missing_similarity_is_zero() {
        let a = record(None, None, Some("A"), None);
        let b = record(None, None, Some("A"), Some(0.3));
        assert_eq!(compare(&a, &b), Quality::SecondBetter);
    }

    #[test]
    fn test_empty_records_equivalent() {
        assert_eq!(
            compare(&JournalRecord::default(), &JournalRecord::default()),
            Quality::Equivalent
        );
    }
}
