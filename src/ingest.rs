//! Building the primary dataset from CSV exports.
//!
//! Every CSV file lists the journals of one subject area or one indexing
//! catalog, one title per row; the file name is the area/catalog name.
//! Exports come from different tools, so each file is decoded by trying a
//! list of candidate encodings until one works.

use crate::error::{CatalogError, PathContext, Result};
use crate::normalize::{clean_source_name, normalize_display};
use crate::record::JournalMapping;
use encoding_rs::Encoding;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Header cell some exports put on the first row
const HEADER_SENTINEL: &str = "TITULO:";

/// Which set field a CSV directory feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Area,
    Catalog,
}

/// Titles read from one CSV file
#[derive(Debug, Clone)]
pub struct CsvSource {
    /// Area or catalog name derived from the file name
    pub name: String,
    /// Encoding that decoded the file
    pub encoding: &'static str,
    pub titles: Vec<String>,
}

/// Build the title → areas/catalogs dataset from the two CSV directories.
///
/// A missing directory contributes nothing. A file no candidate encoding
/// can read is skipped with a warning.
pub fn build_dataset(areas_dir: &Path, catalogs_dir: &Path) -> Result<JournalMapping> {
    let mut mapping = JournalMapping::new();

    info!(dir = %areas_dir.display(), "Reading area CSV files");
    ingest_dir(&mut mapping, areas_dir, SourceKind::Area)?;

    info!(dir = %catalogs_dir.display(), "Reading catalog CSV files");
    ingest_dir(&mut mapping, catalogs_dir, SourceKind::Catalog)?;

    info!(journals = mapping.len(), "Dataset built");
    Ok(mapping)
}

/// Add every CSV file of `dir` to `mapping` under the given kind
pub fn ingest_dir(mapping: &mut JournalMapping, dir: &Path, kind: SourceKind) -> Result<()> {
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "CSV directory not found, skipping");
        return Ok(());
    }

    for path in csv_files(dir)? {
        match read_source(&path) {
            Ok(source) => {
                info!(
                    file = %path.display(),
                    encoding = source.encoding,
                    rows = source.titles.len(),
                    "CSV file read"
                );
                add_source(mapping, &source, kind);
            }
            Err(e) => warn!(file = %path.display(), error = %e, "Skipping unreadable CSV file"),
        }
    }

    Ok(())
}

/// Record every title of `source` under its area or catalog name
pub fn add_source(mapping: &mut JournalMapping, source: &CsvSource, kind: SourceKind) {
    for raw in &source.titles {
        let title = normalize_display(raw);
        if title.is_empty() {
            continue;
        }
        let record = mapping.entry(title).or_default();
        let field = match kind {
            SourceKind::Area => &mut record.areas,
            SourceKind::Catalog => &mut record.catalogos,
        };
        field.insert(source.name.clone());
    }
}

/// Read one CSV export, trying each candidate encoding in turn
pub fn read_source(path: &Path) -> Result<CsvSource> {
    let bytes = fs::read(path).with_path(path)?;
    let name = path
        .file_stem()
        .map(|s| clean_source_name(&s.to_string_lossy()))
        .unwrap_or_default();

    for encoding in candidate_encodings() {
        let (text, _, had_errors) = encoding.decode(&bytes);
        if had_errors {
            debug!(file = %path.display(), encoding = encoding.name(), "Decoding failed");
            continue;
        }
        match parse_titles(&text) {
            Ok(titles) => {
                return Ok(CsvSource {
                    name,
                    encoding: encoding.name(),
                    titles,
                })
            }
            Err(e) => {
                debug!(file = %path.display(), encoding = encoding.name(), error = %e, "CSV parse failed");
            }
        }
    }

    Err(CatalogError::Decode {
        path: path.to_path_buf(),
    })
}

/// Encodings tried in order. Windows-1252 also covers Latin-1 exports.
fn candidate_encodings() -> [&'static Encoding; 2] {
    [encoding_rs::UTF_8, encoding_rs::WINDOWS_1252]
}

/// First column of every row, minus blanks and the header sentinel
fn parse_titles(text: &str) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut titles = Vec::new();
    for row in reader.records() {
        let row = row?;
        let Some(cell) = row.get(0).map(str::trim) else {
            continue;
        };
        if cell.is_empty() || cell == HEADER_SENTINEL {
            continue;
        }
        titles.push(cell.to_string());
    }
    Ok(titles)
}

/// `*.csv` files of a directory in sorted order
fn csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_path(dir)? {
        let path = entry.with_path(dir)?.path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_titles_skips_header_and_blanks() -> Result<()> {
        let titles = parse_titles("TITULO:\nRevista Uno\n\n\"Revista, Dos\"\n  \n")?;
        assert_eq!(titles, vec!["Revista Uno", "Revista, Dos"]);
        Ok(())
    }

    #[test]
    fn test_read_source_latin1_fallback() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("Ciencias Médicas RadGridExport.csv");
        // "Revista Médica" in Windows-1252
        fs::write(&path, b"TITULO:\nRevista M\xe9dica\n")?;

        let source = read_source(&path)?;
        assert_eq!(source.name, "Ciencias Médicas");
        assert_eq!(source.encoding, "windows-1252");
        assert_eq!(source.titles, vec!["Revista Médica"]);
        Ok(())
    }

    #[test]
    fn test_read_source_utf8() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("Scopus_RadGridExport.csv");
        fs::write(&path, "Revista Médica\nCiência Hoje\n")?;

        let source = read_source(&path)?;
        assert_eq!(source.name, "Scopus");
        assert_eq!(source.encoding, "UTF-8");
        assert_eq!(source.titles.len(), 2);
        Ok(())
    }

    #[test]
    fn test_build_dataset() -> Result<()> {
        let root = TempDir::new()?;
        let areas = root.path().join("areas");
        let catalogs = root.path().join("catalogos");
        fs::create_dir_all(&areas)?;
        fs::create_dir_all(&catalogs)?;

        fs::write(areas.join("Medicina.csv"), "TITULO:\nRevista Médica\nSalud Pública\n")?;
        fs::write(areas.join("Biología.csv"), "REVISTA MÉDICA\n")?;
        fs::write(areas.join("notes.txt"), "ignored\n")?;
        fs::write(catalogs.join("Latindex RadGridExport.csv"), b"Salud P\xfablica\n")?;

        let mapping = build_dataset(&areas, &catalogs)?;
        assert_eq!(mapping.len(), 2);

        let medica = &mapping["revista medica"];
        let areas: Vec<&str> = medica.areas.iter().map(String::as_str).collect();
        assert_eq!(areas, vec!["Biología", "Medicina"]);
        assert!(medica.catalogos.is_empty());

        let salud = &mapping["salud publica"];
        assert!(salud.areas.contains("Medicina"));
        assert!(salud.catalogos.contains("Latindex"));
        Ok(())
    }

    #[test]
    fn test_missing_directory_is_empty() -> Result<()> {
        let root = TempDir::new()?;
        let mapping = build_dataset(&root.path().join("nope"), &root.path().join("nada"))?;
        assert!(mapping.is_empty());
        Ok(())
    }
}
