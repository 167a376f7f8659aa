//! Converts every translation document in the source directory.

use std::path::{
    Path,
    PathBuf,
};

use futures::StreamExt;
use ignore::WalkBuilder;

use super::filename::derive_output_path;
use super::merge::deep_merge;
use super::serializer::BundleFormat;
use super::source::{
    load_baseline,
    load_mapping,
};
use super::{
    BundleError,
    ConversionReport,
    FileFailure,
};
use crate::config::{
    BundlerSettings,
    ConfigError,
    TranslationMatcher,
    ValidationError,
};
use crate::types::{
    Mapping,
    leaf_count,
};

/// Runs the load / merge / serialize / write pipeline for one settings value.
#[derive(Debug, Clone)]
pub struct BundleConverter {
    /// Validated settings.
    settings: BundlerSettings,
    /// Rendering derived from the settings.
    format: BundleFormat,
    /// Filter for translation documents.
    matcher: TranslationMatcher,
}

impl BundleConverter {
    /// Validates `settings` eagerly, before any file is touched.
    ///
    /// # Errors
    /// Returns [`ConfigError::ValidationErrors`] for invalid settings (e.g. an
    /// unknown output type).
    pub fn new(settings: BundlerSettings) -> Result<Self, ConfigError> {
        let output_type = settings.validate().map_err(ConfigError::ValidationErrors)?;
        let matcher = TranslationMatcher::new(&settings).map_err(|e| {
            ConfigError::ValidationErrors(vec![ValidationError::new(
                "excludePatterns",
                e.to_string(),
            )])
        })?;
        let format = BundleFormat {
            output_type,
            variable_name: settings.variable_name.clone(),
            pretty: settings.pretty,
        };

        Ok(Self { settings, format, matcher })
    }

    #[must_use]
    pub const fn settings(&self) -> &BundlerSettings {
        &self.settings
    }

    #[must_use]
    pub const fn matcher(&self) -> &TranslationMatcher {
        &self.matcher
    }

    /// Loads the baseline and converts every translation document.
    ///
    /// # Errors
    /// Fails on a missing or unreadable baseline, an unlistable source
    /// directory, or an uncreatable output directory. Per-file failures are
    /// reported in [`ConversionReport::failed`] instead.
    pub async fn run(&self) -> Result<ConversionReport, BundleError> {
        let baseline =
            load_baseline(&self.settings.source_path(), self.settings.key_separator()).await?;
        self.convert_all(&baseline).await
    }

    /// Converts every translation document against an already loaded baseline.
    ///
    /// # Errors
    /// See [`BundleConverter::run`].
    pub async fn convert_all(&self, baseline: &Mapping) -> Result<ConversionReport, BundleError> {
        let files = self.find_translation_files()?;

        let output_dir = &self.settings.output_dir;
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|source| BundleError::CreateOutputDir { path: output_dir.clone(), source })?;

        let results: Vec<_> = futures::stream::iter(files)
            .map(|(source_path, output_path)| async move {
                let result = self.convert_file(baseline, &source_path, &output_path).await;
                (source_path, output_path, result)
            })
            .buffer_unordered(self.settings.concurrency())
            .collect()
            .await;

        let mut report = ConversionReport::default();
        for (source_path, output_path, result) in results {
            match result {
                Ok(()) => report.converted.push((source_path, output_path)),
                Err(e) => {
                    tracing::warn!(source = %source_path.display(), "Skipping file: {e}");
                    report.failed.push(FileFailure { source_path, message: e.to_string() });
                }
            }
        }
        report.converted.sort();
        report.failed.sort_by(|a, b| a.source_path.cmp(&b.source_path));

        tracing::info!(
            converted = report.converted.len(),
            failed = report.failed.len(),
            output_dir = %output_dir.display(),
            "Conversion finished"
        );

        Ok(report)
    }

    /// Merge-and-convert for one localized document.
    async fn convert_file(
        &self,
        baseline: &Mapping,
        source_path: &Path,
        output_path: &Path,
    ) -> Result<(), BundleError> {
        let localized = load_mapping(source_path, self.settings.key_separator()).await?;
        let merged = deep_merge(baseline, &localized);
        let rendered = self.format.render(&merged)?;

        tokio::fs::write(output_path, rendered)
            .await
            .map_err(|source| BundleError::Write { path: output_path.to_path_buf(), source })?;

        tracing::debug!(
            source = %source_path.display(),
            output = %output_path.display(),
            keys = leaf_count(&merged),
            "Converted"
        );
        Ok(())
    }

    /// Lists `(source, output)` pairs for the top level of the source directory.
    fn find_translation_files(&self) -> Result<Vec<(PathBuf, PathBuf)>, BundleError> {
        let source_dir = &self.settings.source_dir;
        if !source_dir.is_dir() {
            return Err(BundleError::Enumerate {
                path: source_dir.clone(),
                message: "not a directory".to_string(),
            });
        }

        let mut found_files = Vec::new();
        for result in WalkBuilder::new(source_dir)
            .max_depth(Some(1))
            .standard_filters(false)
            .follow_links(true)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            if !self.matcher.is_translation_file(path) {
                tracing::trace!(path = %path.display(), "Not a translation file");
                continue;
            }

            if let Some(output_path) =
                derive_output_path(&self.settings.output_dir, self.format.output_type, path)
            {
                found_files.push((path.to_path_buf(), output_path));
            }
        }

        Ok(found_files)
    }
}
