//! Recognizes translation documents by extension and exclude patterns.

use std::path::Path;

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::BundlerSettings;

/// Extension (without dot) of translation documents.
pub const TRANSLATION_EXTENSION: &str = "properties";

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Decides which files in the source directory are translation documents.
#[derive(Debug, Clone)]
pub struct TranslationMatcher {
    /// Compiled `excludePatterns`.
    exclude_set: GlobSet,
}

impl TranslationMatcher {
    /// Creates a new matcher from settings.
    pub fn new(settings: &BundlerSettings) -> Result<Self, MatcherError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &settings.exclude_patterns {
            let glob = Glob::new(pattern).map_err(|source| MatcherError::InvalidExcludePattern {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }

        Ok(Self { exclude_set: builder.build()? })
    }

    /// Returns true if the file name ends in `.properties` and matches no exclude pattern.
    ///
    /// Only the final path component is inspected.
    #[must_use]
    pub fn is_translation_file(&self, path: &Path) -> bool {
        let Some(file_name) = path.file_name() else {
            return false;
        };

        Path::new(file_name).extension().is_some_and(|ext| ext == TRANSLATION_EXTENSION)
            && !self.exclude_set.is_match(file_name)
    }
}
