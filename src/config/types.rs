use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use super::TRANSLATION_EXTENSION;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "excludePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered, one error per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format of the generated bundle files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputType {
    /// Plain JSON object.
    Json,
    /// Script assigning the JSON object to a variable.
    Js,
}

impl OutputType {
    /// File extension (without dot) used for bundles of this type.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Js => "js",
        }
    }
}

impl FromStr for OutputType {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "json" => Ok(Self::Json),
            "js" => Ok(Self::Js),
            other => Err(ValidationError::new(
                "outputType",
                format!("Unknown output type '{other}'. Supported types are \"json\" and \"js\""),
            )),
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BundlerSettings {
    /// Directory containing the `.properties` files.
    pub source_dir: PathBuf,
    /// Directory the bundles are written to. Created on demand.
    pub output_dir: PathBuf,
    /// Baseline file name, relative to `source_dir`.
    pub source_file: String,

    /// Nest keys into namespaces split by `namespace_separator`.
    pub namespaces: bool,
    pub namespace_separator: String,

    /// Raw output type; parsed and checked by [`BundlerSettings::validate`].
    pub output_type: String,
    /// Identifier assigned to in `js` bundles.
    pub variable_name: String,
    pub pretty: bool,

    pub watch: bool,

    /// Globs matched against file names; matching files are not converted.
    pub exclude_patterns: Vec<String>,

    /// Max number of files converted at once.
    /// Default: number of CPUs.
    pub concurrency: Option<usize>,
}

impl BundlerSettings {
    /// Validates the settings and returns the parsed output type.
    ///
    /// # Errors
    /// - Unknown output type
    /// - Empty or non-`.properties` source file
    /// - Empty namespace separator while namespacing is enabled
    /// - Variable name that is not a JavaScript identifier
    /// - Invalid glob pattern
    /// - Zero concurrency
    pub fn validate(&self) -> Result<OutputType, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let output_type = self.output_type.parse::<OutputType>().map_err(|e| errors.push(e)).ok();

        if self.source_file.is_empty() {
            errors.push(ValidationError::new(
                "sourceFile",
                "The source file cannot be empty. Example: \"en.properties\"",
            ));
        } else if !self.source_file.ends_with(&format!(".{TRANSLATION_EXTENSION}")) {
            errors.push(ValidationError::new(
                "sourceFile",
                format!(
                    "The source file '{}' must have the .{TRANSLATION_EXTENSION} extension",
                    self.source_file
                ),
            ));
        }

        if self.namespaces {
            let separator = &self.namespace_separator;
            if separator.is_empty() {
                errors.push(ValidationError::new(
                    "namespaceSeparator",
                    "The separator cannot be empty when namespaces are enabled. Example: \".\" (dot)",
                ));
            } else if separator.contains(['=', ':']) || separator.contains(char::is_whitespace) {
                errors.push(ValidationError::new(
                    "namespaceSeparator",
                    "The separator cannot contain '=', ':' or whitespace; they end a key",
                ));
            }
        }

        if !is_js_identifier(&self.variable_name) {
            errors.push(ValidationError::new(
                "variableName",
                format!("'{}' is not a valid JavaScript identifier", self.variable_name),
            ));
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if self.concurrency == Some(0) {
            errors.push(ValidationError::new("concurrency", "Concurrency must be at least 1"));
        }

        match output_type {
            Some(output_type) if errors.is_empty() => Ok(output_type),
            _ => Err(errors),
        }
    }

    /// Path of the baseline document.
    #[must_use]
    pub fn source_path(&self) -> PathBuf {
        self.source_dir.join(&self.source_file)
    }

    /// Separator used to split keys, or `None` when namespacing is off.
    #[must_use]
    pub fn key_separator(&self) -> Option<&str> {
        self.namespaces.then_some(self.namespace_separator.as_str())
    }

    /// Effective concurrency limit.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency.unwrap_or_else(num_cpus::get).max(1)
    }
}

impl Default for BundlerSettings {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            source_file: "en.properties".to_string(),
            namespaces: false,
            namespace_separator: ".".to_string(),
            output_type: "json".to_string(),
            variable_name: "i18n".to_string(),
            pretty: false,
            watch: false,
            exclude_patterns: Vec::new(),
            concurrency: None,
        }
    }
}

/// Checks for an ASCII identifier or a dotted member path such as `window.i18n`.
fn is_js_identifier(name: &str) -> bool {
    name.split('.').all(|segment| {
        let mut chars = segment.chars();
        chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
    })
}
