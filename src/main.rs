//! Entry point for the `i18n-bundler` command.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use i18n_bundler::cli::{
    self,
    CliArgs,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{
    RollingFileAppender,
    Rotation,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{
    EnvFilter,
    fmt,
};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    let _guard = init_tracing(args.log_file.as_deref());

    match cli::run(&args, shutdown_signal()).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Logs to stderr (`RUST_LOG`, default `info`), and to `log_file` if given.
fn init_tracing(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = log_file.map(|path| {
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
        let prefix = path.file_name().map_or_else(
            || "i18n-bundler.log".to_string(),
            |name| name.to_string_lossy().into_owned(),
        );
        RollingFileAppender::builder().rotation(Rotation::NEVER).filename_prefix(prefix).build(dir)
    });

    let (file_layer, guard, file_error) = match file_appender {
        Some(Ok(appender)) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard), None)
        }
        Some(Err(e)) => (None, None, Some(e)),
        None => (None, None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    if let Some(e) = file_error {
        tracing::warn!("Log file disabled: {e}");
    }

    guard
}

/// Resolves on Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
