// configuration:exportコマンドハンドラー
//
// 設定テーブルからの設定値エクスポート機能を実装します。
// - 設定キー（LIKEパターン対応）の値取得
// - JSON形式へのシリアライズとファイル出力
// - 見つからないキーの警告表示

use crate::adapters::configuration_store::{ConfigurationStore, DbConfigurationStore};
use crate::adapters::database::DatabaseConnectionService;
use crate::cli::command_context::CommandContext;
use crate::core::naming;
use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// configuration:exportコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct ConfigurationExportCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// 設定ファイルパスの上書き（--config）
    pub config_path: Option<PathBuf>,
    /// エクスポート対象のキー（`%` を含む場合はLIKEパターン）
    pub keys: Vec<String>,
    /// 出力先ファイル（Noneの場合は既定のps_configurations.json）
    pub output_file: Option<PathBuf>,
    /// 既存ファイルを上書きするか
    pub force: bool,
    /// 環境名
    pub env: String,
}

/// configuration:exportコマンドハンドラー
#[derive(Debug, Clone)]
pub struct ConfigurationExportCommandHandler {}

impl ConfigurationExportCommandHandler {
    /// 新しいConfigurationExportCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// configuration:exportコマンドを実行
    ///
    /// # Arguments
    ///
    /// * `command` - configuration:exportコマンドのパラメータ
    ///
    /// # Returns
    ///
    /// 成功時はエクスポート結果のサマリー、失敗時はエラーメッセージ
    pub async fn execute(&self, command: &ConfigurationExportCommand) -> Result<String> {
        let context = CommandContext::load(
            command.project_path.clone(),
            command.config_path.clone(),
        )?;

        let output_file = context.resolve_path(
            command
                .output_file
                .as_deref()
                .unwrap_or(Path::new(naming::DEFAULT_EXPORT_FILE)),
        );

        if output_file.exists() && !command.force {
            return Err(anyhow!(
                "Output file already exists: {:?}. Use --force to overwrite.",
                output_file
            ));
        }

        // データベースに接続
        let db_config = context
            .database_config(&command.env)
            .with_context(|| format!("Config for environment '{}' not found", command.env))?;

        if std::env::var_os("FOP_CONSOLE_VERBOSE").is_some() {
            eprintln!(
                "Exporting from environment '{}' (database '{}')",
                command.env, db_config.database
            );
        }

        let db_service = DatabaseConnectionService::new();
        let pool = db_service
            .create_pool(context.config.dialect, &db_config)
            .await
            .with_context(|| "Failed to connect to database")?;

        let store = DbConfigurationStore::new(pool, context.config.dialect, &context.config.db_prefix);

        // 設定値を収集
        let (values, warnings) = self.collect_values(&store, &command.keys).await?;

        // JSON形式にシリアライズしてファイルへ出力
        let json_export = serde_json::to_string_pretty(&values)
            .with_context(|| "Failed to serialize configuration to JSON")?;
        fs::write(&output_file, json_export)
            .with_context(|| format!("Failed to write export file: {:?}", output_file))?;

        Ok(self.format_export_summary(&values, &warnings, &output_file))
    }

    /// ストアから設定値を収集
    ///
    /// キーに `%` が含まれる場合はLIKEパターンとして展開する。
    /// 見つからないキーは警告として返し、エクスポートからは除外する。
    pub async fn collect_values(
        &self,
        store: &dyn ConfigurationStore,
        keys: &[String],
    ) -> Result<(BTreeMap<String, String>, Vec<String>)> {
        let mut values = BTreeMap::new();
        let mut warnings = Vec::new();

        for key in keys {
            // LIKEパターンのキーはデータベース側で展開する
            if key.contains('%') {
                for (name, value) in store.find_like(key).await? {
                    values.insert(name, value);
                }
                continue;
            }

            match store.get(key).await? {
                Some(value) => {
                    values.insert(key.clone(), value);
                }
                None => {
                    warnings.push(format!("Configuration key not found '{}' : ignored.", key));
                }
            }
        }

        Ok((values, warnings))
    }

    /// エクスポート結果のサマリーをフォーマット
    pub fn format_export_summary(
        &self,
        values: &BTreeMap<String, String>,
        warnings: &[String],
        output_file: &Path,
    ) -> String {
        let mut output = String::new();

        output.push_str("=== Configuration Export Complete ===\n\n");

        output.push_str(&format!("Exported keys: {}\n\n", values.len()));

        for name in values.keys() {
            output.push_str(&format!("  - {}\n", name));
        }

        if !warnings.is_empty() {
            output.push('\n');
            for warning in warnings {
                output.push_str(&format!("  {} {}\n", "⚠".yellow(), warning));
            }
        }

        output.push('\n');
        output.push_str(&format!(
            "{} Configuration dumped to {:?}\n",
            "✓".green(),
            output_file
        ));

        output
    }
}

impl Default for ConfigurationExportCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
