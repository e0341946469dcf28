//! 設定ファイルの読み込み関数

use std::io::ErrorKind;
use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    Settings,
};

/// サイトルートに置く設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".portfolio.json";

/// 読み込んだ設定と、その読み込み元
#[derive(Debug, Clone)]
pub(super) struct LoadedConfig {
    pub path: PathBuf,
    pub settings: Settings,
}

/// サイトルートの `.portfolio.json` を読み込む
///
/// ファイルが無ければ `Ok(None)`。存在確認と読み込みの間に消えた場合も同じ扱い。
///
/// # Errors
/// - ファイル読み込みエラー（`NotFound` 以外）
/// - JSON パースエラー
pub(super) fn load_from_site(site_root: &Path) -> Result<Option<LoadedConfig>, ConfigError> {
    let path = site_root.join(CONFIG_FILE_NAME);

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No site configuration file");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let settings: Settings = serde_json::from_str(&content)?;
    tracing::debug!(path = %path.display(), "Loaded site configuration");

    Ok(Some(LoadedConfig { path, settings }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::*;
    use tempfile::TempDir;

    use super::*;

    #[fixture]
    fn site() -> TempDir {
        TempDir::new().unwrap()
    }

    /// 読み込み元のパスと、部分的な設定へのデフォルト補完
    #[rstest]
    fn test_load_from_site_reports_path_and_fills_defaults(site: TempDir) {
        fs::write(site.path().join(CONFIG_FILE_NAME), r#"{"http": {"retries": 0}}"#).unwrap();

        let loaded = load_from_site(site.path()).unwrap().unwrap();

        assert_that!(loaded.path, eq(&site.path().join(".portfolio.json")));
        assert_that!(loaded.settings.http.retries, eq(0));
        assert_that!(loaded.settings.i18n.base_namespace, eq("common"));
    }

    /// 設定ファイルが無い場合は `None`
    #[rstest]
    fn test_load_from_site_without_file(site: TempDir) {
        assert_that!(load_from_site(site.path()), ok(none()));
    }

    /// 同名のディレクトリは読み込みエラー（`NotFound` とは区別する）
    #[rstest]
    fn test_load_from_site_directory_is_io_error(site: TempDir) {
        fs::create_dir(site.path().join(CONFIG_FILE_NAME)).unwrap();

        assert!(matches!(load_from_site(site.path()), Err(ConfigError::IoError(_))));
    }

    /// JSON として不正
    #[rstest]
    #[case::not_json("invalid json")]
    #[case::wrong_type(r#"{"http": {"retries": "many"}}"#)]
    fn test_load_from_site_parse_error(site: TempDir, #[case] content: &str) {
        fs::write(site.path().join(CONFIG_FILE_NAME), content).unwrap();

        assert!(matches!(load_from_site(site.path()), Err(ConfigError::ParseError(_))));
    }
}
