//! Loading translation documents from disk.

use std::io::ErrorKind;
use std::path::Path;

use super::BundleError;
use crate::input::properties::parse_properties;
use crate::types::{
    Mapping,
    leaf_count,
};

/// Loads the baseline mapping.
///
/// # Errors
/// - [`BundleError::MissingSourceFile`] if `path` does not exist
/// - [`BundleError::Read`] / [`BundleError::Parse`] otherwise
pub async fn load_baseline(path: &Path, separator: Option<&str>) -> Result<Mapping, BundleError> {
    let baseline = load_mapping(path, separator).await.map_err(|e| match e {
        BundleError::Read { path, source } if source.kind() == ErrorKind::NotFound => {
            BundleError::MissingSourceFile { path }
        }
        other => other,
    })?;

    tracing::debug!(path = %path.display(), keys = leaf_count(&baseline), "Loaded baseline");
    Ok(baseline)
}

/// Reads and parses one `.properties` document (UTF-8).
pub(crate) async fn load_mapping(
    path: &Path,
    separator: Option<&str>,
) -> Result<Mapping, BundleError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| BundleError::Read { path: path.to_path_buf(), source })?;

    parse_properties(&content, separator)
        .map_err(|source| BundleError::Parse { path: path.to_path_buf(), source })
}
