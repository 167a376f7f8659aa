//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    BundlerSettings,
    ConfigError,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: BundlerSettings,

    /// 読み込んだ設定ファイルのパス
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: BundlerSettings::default(), config_path: None }
    }

    /// 設定を読み込む
    ///
    /// `config_file` が指定されていればそのファイルを、なければ `working_dir` の
    /// `.i18n-bundler.json` を読み込む。どちらもなければデフォルト値。
    ///
    /// バリデーションは行わない（コマンドライン引数で上書きした後、
    /// `update_settings` で検証する）
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    pub fn load_settings(
        &mut self,
        config_file: Option<&Path>,
        working_dir: &Path,
    ) -> Result<(), ConfigError> {
        tracing::debug!(?config_file, working_dir = %working_dir.display(), "Loading settings");

        let (settings, config_path) = if let Some(path) = config_file {
            (loader::load_from_file(path)?, Some(path.to_path_buf()))
        } else {
            loader::load_from_dir(working_dir)?.map_or_else(
                || (BundlerSettings::default(), None),
                |settings| (settings, Some(working_dir.join(loader::CONFIG_FILE_NAME))),
            )
        };

        self.current_settings = settings;
        self.config_path = config_path;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 設定を更新する（コマンドライン引数による上書き用）
    pub fn update_settings(&mut self, new_settings: BundlerSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &BundlerSettings {
        &self.current_settings
    }

    /// 読み込んだ設定ファイルのパスを取得
    #[must_use]
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}
