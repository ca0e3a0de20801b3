//! Data directory layout.
//!
//! ```text
//! <data_dir>/
//!   json/revistas.json             merged journal dataset
//!   json/revistas_scimagojr.json   ranking dataset
//!   csv/areas/*.csv                one file per subject area
//!   csv/catalogos/*.csv            one file per indexing catalog
//! ```

use crate::error::{CatalogError, Result};
use std::path::{Path, PathBuf};

/// Default data directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "datos";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "JOURNAL_CATALOG_DATA_DIR";

/// Locations of every dataset file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub journals: PathBuf,
    pub rankings: PathBuf,
    pub areas_dir: PathBuf,
    pub catalogs_dir: PathBuf,
}

impl DataPaths {
    /// Standard layout under `root`
    pub fn from_root(root: &Path) -> Self {
        Self {
            journals: root.join("json").join("revistas.json"),
            rankings: root.join("json").join("revistas_scimagojr.json"),
            areas_dir: root.join("csv").join("areas"),
            catalogs_dir: root.join("csv").join("catalogos"),
        }
    }

    /// Replace individual paths with explicit overrides
    pub fn with_overrides(
        mut self,
        journals: Option<PathBuf>,
        rankings: Option<PathBuf>,
        areas_dir: Option<PathBuf>,
        catalogs_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(p) = journals {
            self.journals = p;
        }
        if let Some(p) = rankings {
            self.rankings = p;
        }
        if let Some(p) = areas_dir {
            self.areas_dir = p;
        }
        if let Some(p) = catalogs_dir {
            self.catalogs_dir = p;
        }
        self
    }

    /// Check that the files the query service reads are present
    pub fn validate_for_serving(&self) -> Result<()> {
        for path in [&self.journals, &self.rankings] {
            if !path.is_file() {
                return Err(CatalogError::Config(format!(
                    "Dataset file not found: {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::from_root(Path::new(DEFAULT_DATA_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let paths = DataPaths::from_root(Path::new("/srv/datos"));
        assert_eq!(paths.journals, PathBuf::from("/srv/datos/json/revistas.json"));
        assert_eq!(paths.areas_dir, PathBuf::from("/srv/datos/csv/areas"));
    }

    #[test]
    fn test_overrides() {
        let paths = DataPaths::default().with_overrides(
            Some(PathBuf::from("merged.json")),
            None,
            None,
            Some(PathBuf::from("indices")),
        );
        assert_eq!(paths.journals, PathBuf::from("merged.json"));
        assert_eq!(paths.rankings, PathBuf::from("datos/json/revistas_scimagojr.json"));
        assert_eq!(paths.catalogs_dir, PathBuf::from("indices"));
    }

    #[test]
    fn test_validate_missing() {
        let paths = DataPaths::from_root(Path::new("/nonexistent"));
        let err = paths.validate_for_serving().expect_err("files are missing");
        assert!(err.to_string().contains("revistas.json"));
    }
}
