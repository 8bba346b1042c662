// コマンド共通コンテキスト
//
// 設定ファイル読み込みやパス解決の重複をCLI層で集約する。

use crate::core::config::{Config, DatabaseConfig};
use crate::core::naming;
use crate::services::config_loader::ConfigLoader;
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// CLIコマンド共通の実行コンテキスト
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub project_path: PathBuf,
    pub config_path: PathBuf,
    pub config: Config,
}

impl CommandContext {
    /// プロジェクトルートから設定を読み込んでコンテキストを作成
    ///
    /// `config_override` が指定された場合は既定の設定ファイルパスの
    /// 代わりにそのパスを使用する。
    pub fn load(project_path: PathBuf, config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(path) => path,
            None => project_path.join(Config::DEFAULT_CONFIG_PATH),
        };

        if !config_path.exists() {
            return Err(anyhow!(
                "Config file not found: {:?}. Create {} with the shop database connection settings.",
                config_path,
                naming::CONFIG_FILE
            ));
        }

        let config =
            ConfigLoader::from_file(&config_path).with_context(|| "Failed to read config file")?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {:?}", config_path))?;

        Ok(Self {
            project_path,
            config_path,
            config,
        })
    }

    /// 指定環境のデータベース設定を取得
    pub fn database_config(&self, environment: &str) -> Result<DatabaseConfig> {
        self.config.get_database_config(environment)
    }

    /// ファイルパスをプロジェクトルート基準で解決
    pub fn resolve_path(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.project_path.join(file)
        }
    }
}
