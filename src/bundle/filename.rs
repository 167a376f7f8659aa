//! Output path derivation.

use std::path::{
    Path,
    PathBuf,
};

use crate::config::{
    OutputType,
    TRANSLATION_EXTENSION,
};

/// Derives the bundle path for a translation document.
///
/// The `.properties` extension is replaced with the extension of
/// `output_type` and the file is placed in `output_dir`.
///
/// Returns `None` when `source` does not end in `.properties`.
///
/// # Examples
/// ```
/// use std::path::Path;
///
/// use i18n_bundler::bundle::filename::derive_output_path;
/// use i18n_bundler::config::OutputType;
///
/// let path = derive_output_path(Path::new("dist"), OutputType::Js, Path::new("i18n/fr.properties"));
/// assert_eq!(path, Some(Path::new("dist/fr.js").to_path_buf()));
/// ```
#[must_use]
pub fn derive_output_path(
    output_dir: &Path,
    output_type: OutputType,
    source: &Path,
) -> Option<PathBuf> {
    if source.extension()? != TRANSLATION_EXTENSION {
        return None;
    }
    let file_name = Path::new(source.file_name()?).with_extension(output_type.extension());
    Some(output_dir.join(file_name))
}
