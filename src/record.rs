//! Journal records and title-keyed mappings.
//!
//! A [`JournalRecord`] is whatever one source knows about a journal. Every
//! field may be missing; an empty record is still a valid record.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

/// `q=<digits>` query parameter carrying the external journal id, between
/// `?`/`&` and a following `&`
static ID_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]q=(\d+)&").expect("id pattern is a valid regex"));

/// Raw title as it appeared in its source → record
pub type JournalMapping = BTreeMap<String, JournalRecord>;

/// Metadata known about one journal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalRecord {
    /// Display title reported by the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// External identifier, derived from `url`
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// Lookup URL the record was scraped from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Confidence score of the upstream fuzzy matcher
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    /// Subject areas
    #[serde(default, deserialize_with = "nullable_set")]
    pub areas: BTreeSet<String>,
    /// Indexing catalogs
    #[serde(default, deserialize_with = "nullable_set")]
    pub catalogos: BTreeSet<String>,
    /// Any other fields the scraper wrote; carried through untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl JournalRecord {
    /// Both a non-empty id and a non-empty url are present
    pub fn has_id_and_url(&self) -> bool {
        non_empty(&self.id) && non_empty(&self.url)
    }

    /// A non-empty display title is present
    pub fn has_title(&self) -> bool {
        non_empty(&self.title)
    }

    /// Similarity score, missing treated as 0
    pub fn similarity_or_zero(&self) -> f64 {
        self.similarity.unwrap_or(0.0)
    }

    /// Set `id` from the `q=<digits>` parameter of `url`, if there is one.
    ///
    /// Leaves the record untouched when the url is absent or has no such
    /// parameter.
    pub fn extract_id(&mut self) {
        if let Some(id) = self.url.as_deref().and_then(id_from_url) {
            self.id = Some(id);
        }
    }
}

/// First `q=<digits>` value of a lookup URL
pub fn id_from_url(url: &str) -> Option<String> {
    ID_PARAM_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Run [`JournalRecord::extract_id`] over every record of a mapping
pub fn extract_ids(mapping: &mut JournalMapping) {
    for record in mapping.values_mut() {
        record.extract_id();
    }
}

fn non_empty(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}

/// Scrapers sometimes write ids as numbers; keep them as strings
fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// Accept `null` as well as a list for set fields
fn nullable_set<'de, D>(deserializer: D) -> std::result::Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BTreeSet<String>>::deserialize(deserializer)?.unwrap_or_default())
}
