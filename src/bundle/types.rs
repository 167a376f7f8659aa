//! Bundle pipeline type definitions.

use std::path::PathBuf;

use thiserror::Error;

use crate::input::properties::PropertiesError;

#[derive(Error, Debug)]
pub enum BundleError {
    /// The baseline document does not exist.
    #[error("Source file not found: {}", path.display())]
    MissingSourceFile { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: PropertiesError,
    },

    #[error("Failed to serialize bundle: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list {}: {message}", path.display())]
    Enumerate { path: PathBuf, message: String },
}

/// A single file that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub source_path: PathBuf,
    pub message: String,
}

/// Outcome of one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// `(source, output)` pairs, sorted by source path.
    pub converted: Vec<(PathBuf, PathBuf)>,
    /// Sorted by source path.
    pub failed: Vec<FileFailure>,
}

impl ConversionReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}
