//! Bundler configuration: settings, loading, and translation file matching.

/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Translation file matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use matcher::{
    MatcherError,
    TRANSLATION_EXTENSION,
    TranslationMatcher,
};
pub use types::{
    BundlerSettings,
    ConfigError,
    OutputType,
    ValidationError,
};
