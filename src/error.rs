//! Custom error types for journal-catalog.
//!
//! All library functions return `Result<T, CatalogError>` instead of using `unwrap()`.
//! Errors that come from a specific file carry its path so the operator can
//! tell which input broke the run.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for journal-catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// File I/O error on a known path
    #[error("IO error on {path}: {source}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON file could not be parsed or written
    #[error("JSON error in {path}: {source}")]
    FileJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// None of the candidate encodings could decode a file
    #[error("Could not decode {path} with any candidate encoding")]
    Decode { path: PathBuf },

    /// CSV reader error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias using `CatalogError`
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Extension trait for attaching a file path to I/O and JSON errors
pub trait PathContext<T> {
    /// Wrap the error together with the path it came from
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> PathContext<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| CatalogError::FileIo {
            path: path.into(),
            source,
        })
    }
}

impl<T> PathContext<T> for std::result::Result<T, serde_json::Error> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| CatalogError::FileJson {
            path: path.into(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = Err::<(), _>(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))
            .with_path("datos/json/revistas.json");
        let msg = err.expect_err("should be an error").to_string();
        assert!(msg.contains("datos/json/revistas.json"));
        assert!(msg.contains("gone"));
    }
}
