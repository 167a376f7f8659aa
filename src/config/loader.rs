//! 設定ファイルの読み込み関数

use std::path::{
    Path,
    PathBuf,
};

use super::{
    BundlerSettings,
    ConfigError,
};

/// 自動検出される設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".i18n-bundler.json";

/// 指定ディレクトリから設定を読み込む
///
/// `.i18n-bundler.json` ファイルを探して読み込む
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
pub(super) fn load_from_dir(dir: &Path) -> Result<Option<BundlerSettings>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    load_from_file(&config_path).map(Some)
}

/// 設定ファイルを読み込む
///
/// 相対パスの `sourceDir` / `outputDir` は設定ファイルのディレクトリ基準で解決する
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn load_from_file(config_path: &Path) -> Result<BundlerSettings, ConfigError> {
    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)?;
    let mut settings: BundlerSettings = serde_json::from_str(&content)?;

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new(""));
    settings.source_dir = resolve(base_dir, &settings.source_dir);
    settings.output_dir = resolve(base_dir, &settings.output_dir);

    Ok(settings)
}

/// 相対パスを `base_dir` 基準に変換する
fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() || base_dir.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
