//! Command line interface.

use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use thiserror::Error;

use crate::bundle::{
    BundleConverter,
    BundleError,
};
use crate::config::{
    BundlerSettings,
    ConfigError,
    ConfigManager,
};
use crate::watch::{
    self,
    WatchError,
};

#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "i18n-bundler",
    version,
    about = "Merge .properties translations onto a baseline and write JSON or JS bundles"
)]
pub struct CliArgs {
    /// Directory containing the .properties files [default: .]
    #[arg(short, long, value_name = "DIR", value_hint = clap::ValueHint::DirPath)]
    pub source_dir: Option<PathBuf>,

    /// Directory the bundles are written to [default: .]
    #[arg(short, long, value_name = "DIR", value_hint = clap::ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,

    /// Baseline file name, relative to the source directory [default: en.properties]
    #[arg(short = 'f', long, value_name = "FILE")]
    pub source_file: Option<String>,

    /// Nest dotted keys into namespaces
    #[arg(short, long)]
    pub namespaces: bool,

    /// Delimiter used to split keys into namespaces [default: .]
    #[arg(long, value_name = "SEP")]
    pub namespace_separator: Option<String>,

    /// Output type: json or js [default: json]
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub output_type: Option<String>,

    /// Keep running and rebuild on every change
    #[arg(short, long)]
    pub watch: bool,

    /// Variable assigned to in js bundles [default: i18n]
    #[arg(long, value_name = "NAME")]
    pub variable_name: Option<String>,

    /// Pretty-print the JSON
    #[arg(long)]
    pub pretty: bool,

    /// Skip files whose name matches this glob (repeatable)
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude_patterns: Vec<String>,

    /// Max number of files converted at once [default: number of CPUs]
    #[arg(short = 'j', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Load settings from this JSON file instead of ./.i18n-bundler.json
    #[arg(long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,
}

impl CliArgs {
    /// Overrides `settings` with every flag given on the command line.
    pub fn apply_to(&self, settings: &mut BundlerSettings) {
        if let Some(source_dir) = &self.source_dir {
            settings.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &self.output_dir {
            settings.output_dir.clone_from(output_dir);
        }
        if let Some(source_file) = &self.source_file {
            settings.source_file.clone_from(source_file);
        }
        if self.namespaces {
            settings.namespaces = true;
        }
        if let Some(separator) = &self.namespace_separator {
            settings.namespace_separator.clone_from(separator);
        }
        if let Some(output_type) = &self.output_type {
            settings.output_type.clone_from(output_type);
        }
        if self.watch {
            settings.watch = true;
        }
        if let Some(variable_name) = &self.variable_name {
            settings.variable_name.clone_from(variable_name);
        }
        if self.pretty {
            settings.pretty = true;
        }
        settings.exclude_patterns.extend(self.exclude_patterns.iter().cloned());
        if self.concurrency.is_some() {
            settings.concurrency = self.concurrency;
        }
    }
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bundle(#[from] BundleError),

    #[error(transparent)]
    Watch(#[from] WatchError),
}

/// Resolves settings and runs once, or watches until `shutdown` resolves.
///
/// Settings come from defaults, then the config file, then `args`.
/// A single run that converts everything but some files returns
/// [`ExitCode::FAILURE`].
///
/// # Errors
/// Configuration errors, a missing baseline, or watcher setup failures.
pub async fn run<F>(args: &CliArgs, shutdown: F) -> Result<ExitCode, CliError>
where
    F: std::future::Future<Output = ()>,
{
    let mut manager = ConfigManager::new();
    manager.load_settings(args.config.as_deref(), Path::new("."))?;
    if let Some(config_path) = manager.config_path() {
        tracing::info!(config = %config_path.display(), "Loaded configuration file");
    }

    let mut settings = manager.get_settings().clone();
    args.apply_to(&mut settings);
    manager.update_settings(settings)?;

    let converter = BundleConverter::new(manager.get_settings().clone())?;

    if converter.settings().watch {
        watch::watch(Arc::new(converter), shutdown).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let report = converter.run().await?;
    for failure in &report.failed {
        tracing::error!(source = %failure.source_path.display(), "{}", failure.message);
    }

    Ok(if report.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
