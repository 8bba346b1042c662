// configuration:importコマンドハンドラー
//
// JSONファイルからの設定値インポート機能を実装します。
// - インポートファイルの読み込みと値の正規化
// - 上書き対象キーのバックアップ出力
// - dry-runによる変更内容のプレビュー

use crate::adapters::configuration_store::{ConfigurationStore, DbConfigurationStore};
use crate::adapters::database::DatabaseConnectionService;
use crate::cli::command_context::CommandContext;
use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use colored::Colorize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// configuration:importコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct ConfigurationImportCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// 設定ファイルパスの上書き（--config）
    pub config_path: Option<PathBuf>,
    /// インポート対象のJSONファイル
    pub input_file: PathBuf,
    /// 変更内容の表示のみ行うか
    pub dry_run: bool,
    /// 上書き対象キーの現在値をバックアップするか
    pub backup: bool,
    /// 環境名
    pub env: String,
}

/// インポート適用の集計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// 新規に挿入されたキーの数
    pub created: usize,
    /// 更新されたキーの数
    pub updated: usize,
}

/// configuration:importコマンドハンドラー
#[derive(Debug, Clone)]
pub struct ConfigurationImportCommandHandler {}

impl ConfigurationImportCommandHandler {
    /// 新しいConfigurationImportCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// configuration:importコマンドを実行
    ///
    /// # Arguments
    ///
    /// * `command` - configuration:importコマンドのパラメータ
    ///
    /// # Returns
    ///
    /// 成功時はインポート結果のサマリー（dry-run時は変更内容）、
    /// 失敗時はエラーメッセージ
    pub async fn execute(&self, command: &ConfigurationImportCommand) -> Result<String> {
        let context = CommandContext::load(
            command.project_path.clone(),
            command.config_path.clone(),
        )?;

        let input_file = context.resolve_path(&command.input_file);
        let content = fs::read_to_string(&input_file)
            .with_context(|| format!("Failed to read import file: {:?}", input_file))?;
        let entries = Self::parse_import_entries(&content)
            .with_context(|| format!("Invalid import file: {:?}", input_file))?;

        if entries.is_empty() {
            return Ok("No configuration values to import.".to_string());
        }

        // データベースに接続
        let db_config = context
            .database_config(&command.env)
            .with_context(|| format!("Config for environment '{}' not found", command.env))?;

        if std::env::var_os("FOP_CONSOLE_VERBOSE").is_some() {
            eprintln!(
                "Importing into environment '{}' (database '{}')",
                command.env, db_config.database
            );
        }

        let db_service = DatabaseConnectionService::new();
        let pool = db_service
            .create_pool(context.config.dialect, &db_config)
            .await
            .with_context(|| "Failed to connect to database")?;

        let store = DbConfigurationStore::new(pool, context.config.dialect, &context.config.db_prefix);

        // 既存値を取得（dry-run表示とバックアップの両方で使用する）
        let current_values = self.read_current_values(&store, &entries).await?;

        if command.dry_run {
            return Ok(self.format_dry_run_summary(&entries, &current_values));
        }

        // 上書き対象キーの現在値をバックアップ
        let backup_file = if command.backup && !current_values.is_empty() {
            Some(self.write_backup(&context.project_path, &current_values)?)
        } else {
            None
        };

        let stats = self.apply_entries(&store, &entries, &current_values).await?;

        Ok(self.format_import_summary(&stats, backup_file.as_deref(), &input_file))
    }

    /// インポートファイルの内容をキーと値のマップに変換
    ///
    /// JSONオブジェクトのみを受け付ける。文字列はそのまま、数値と真偽値は
    /// 文字列化し、nullは空文字列にする。配列とネストしたオブジェクトはエラー。
    pub fn parse_import_entries(content: &str) -> Result<BTreeMap<String, String>> {
        let root: serde_json::Value =
            serde_json::from_str(content).with_context(|| "Failed to parse import file as JSON")?;

        let object = root
            .as_object()
            .ok_or_else(|| anyhow!("Import file must contain a JSON object of configuration values"))?;

        let mut entries = BTreeMap::new();

        for (key, value) in object {
            let value = match value {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Null => String::new(),
                _ => {
                    return Err(anyhow!(
                        "Unsupported value for configuration key '{}' (expected a scalar)",
                        key
                    ));
                }
            };
            entries.insert(key.clone(), value);
        }

        Ok(entries)
    }

    /// インポート対象キーの現在値を取得
    async fn read_current_values(
        &self,
        store: &dyn ConfigurationStore,
        entries: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>> {
        let mut current_values = BTreeMap::new();

        for key in entries.keys() {
            if let Some(value) = store.get(key).await? {
                current_values.insert(key.clone(), value);
            }
        }

        Ok(current_values)
    }

    /// 設定値をストアへ書き込み
    async fn apply_entries(
        &self,
        store: &dyn ConfigurationStore,
        entries: &BTreeMap<String, String>,
        current_values: &BTreeMap<String, String>,
    ) -> Result<ImportStats> {
        let mut stats = ImportStats::default();

        for (key, value) in entries {
            store.set(key, value).await?;

            if current_values.contains_key(key) {
                stats.updated += 1;
            } else {
                stats.created += 1;
            }
        }

        Ok(stats)
    }

    /// 上書き対象キーの現在値をタイムスタンプ付きファイルへ出力
    fn write_backup(
        &self,
        project_path: &Path,
        current_values: &BTreeMap<String, String>,
    ) -> Result<PathBuf> {
        let backup_file = project_path.join(format!(
            "configuration_backup_{}.json",
            Utc::now().format("%Y%m%d%H%M%S")
        ));

        let json_backup = serde_json::to_string_pretty(current_values)
            .with_context(|| "Failed to serialize backup to JSON")?;
        fs::write(&backup_file, json_backup)
            .with_context(|| format!("Failed to write backup file: {:?}", backup_file))?;

        Ok(backup_file)
    }

    /// dry-runのサマリーをフォーマット
    fn format_dry_run_summary(
        &self,
        entries: &BTreeMap<String, String>,
        current_values: &BTreeMap<String, String>,
    ) -> String {
        let mut output = String::new();

        output.push_str("=== Configuration Import (dry-run) ===\n\n");

        for (key, value) in entries {
            match current_values.get(key) {
                Some(old_value) if old_value == value => {
                    output.push_str(&format!("  - {}: unchanged\n", key));
                }
                Some(old_value) => {
                    output.push_str(&format!("  - {}: '{}' -> '{}'\n", key, old_value, value));
                }
                None => {
                    output.push_str(&format!("  - {}: '{}' (new)\n", key, value));
                }
            }
        }

        output.push('\n');
        output.push_str("Dry run - no values were written.\n");

        output
    }

    /// インポート結果のサマリーをフォーマット
    fn format_import_summary(
        &self,
        stats: &ImportStats,
        backup_file: Option<&Path>,
        input_file: &Path,
    ) -> String {
        let mut output = String::new();

        output.push_str("=== Configuration Import Complete ===\n\n");

        output.push_str(&format!(
            "Imported values: {} ({} new, {} updated)\n",
            stats.created + stats.updated,
            stats.created,
            stats.updated
        ));

        if let Some(backup_file) = backup_file {
            output.push_str(&format!("Backup: {:?}\n", backup_file));
        }

        output.push('\n');
        output.push_str(&format!(
            "{} Configuration imported from {:?}\n",
            "✓".green(),
            input_file
        ));

        output
    }
}

impl Default for ConfigurationImportCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
