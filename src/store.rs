//! JSON persistence of journal mappings.
//!
//! Files are objects keyed by journal title. Output is pretty-printed UTF-8
//! with non-ASCII characters kept literal, and is written through a
//! temporary sibling file so a failed run never leaves a half-written
//! dataset behind.

use crate::error::{PathContext, Result};
use crate::record::JournalMapping;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Bibliometric dataset: title → opaque ranking object
pub type RankingMapping = BTreeMap<String, serde_json::Value>;

/// Load a journal mapping from a JSON file
pub fn load_mapping(path: &Path) -> Result<JournalMapping> {
    let mapping: JournalMapping = load_json(path)?;
    info!(path = %path.display(), count = mapping.len(), "Loaded journal mapping");
    Ok(mapping)
}

/// Load the ranking dataset that is shown next to each journal
pub fn load_rankings(path: &Path) -> Result<RankingMapping> {
    let rankings: RankingMapping = load_json(path)?;
    info!(path = %path.display(), count = rankings.len(), "Loaded ranking data");
    Ok(rankings)
}

/// Write a journal mapping, creating parent directories as needed
pub fn save_mapping(path: &Path, mapping: &JournalMapping) -> Result<()> {
    save_json(path, mapping)?;
    info!(path = %path.display(), count = mapping.len(), "Saved journal mapping");
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).with_path(path)?;
    serde_json::from_str(&content).with_path(path)
}

fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_path(parent)?;
    }

    let tmp = temp_path(path);
    debug!(tmp = %tmp.display(), "Writing temporary output");

    let written = write_pretty(&tmp, value);
    if written.is_err() {
        let _ = fs::remove_file(&tmp);
        return written;
    }

    fs::rename(&tmp, path).with_path(path)
}

fn write_pretty<T: Serialize>(tmp: &Path, value: &T) -> Result<()> {
    let file = fs::File::create(tmp).with_path(tmp)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).with_path(tmp)?;
    writer.write_all(b"\n").with_path(tmp)?;
    writer.flush().with_path(tmp)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
