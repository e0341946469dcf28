//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    Settings,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: Settings,

    /// サイトのルートパス
    site_root: Option<PathBuf>,

    /// 読み込んだ設定ファイル（デフォルト設定なら `None`）
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: Settings::default(), site_root: None, config_path: None }
    }

    /// 設定を読み込む
    ///
    /// # Arguments
    /// * `site_root` - サイトのルートパス
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, site_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for site: {:?}", site_root);

        let loaded = match &site_root {
            Some(root) => loader::load_from_site(root)?,
            None => None,
        };
        let (settings, config_path) = loaded
            .map_or_else(|| (Settings::default(), None), |c| (c.settings, Some(c.path)));

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.site_root = site_root;
        self.config_path = config_path;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &Settings {
        &self.current_settings
    }

    /// 設定の読み込み元
    #[must_use]
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// 翻訳ファイルのディレクトリ（サイトルートからの相対パスを解決したもの）
    #[must_use]
    pub fn messages_dir(&self) -> PathBuf {
        let dir = Path::new(&self.current_settings.i18n.messages_dir);
        self.site_root.as_ref().map_or_else(|| dir.to_path_buf(), |root| root.join(dir))
    }
}
