// configuration:exportコマンドハンドラーのテスト

use anyhow::Result;
use fop_console::cli::commands::export::{
    ConfigurationExportCommand, ConfigurationExportCommandHandler,
};
use fop_console::core::config::{Config, DatabaseConfig, Dialect};
use sqlx::AnyPool;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;
use std::sync::Once;
use tempfile::TempDir;

/// SQLx Anyドライバーを一度だけ登録
fn install_drivers() {
    static INIT: Once = Once::new();
    INIT.call_once(sqlx::any::install_default_drivers);
}

/// テスト用のConfig作成ヘルパー
fn create_test_config(database: &str) -> Config {
    let mut environments = HashMap::new();

    let db_config = DatabaseConfig {
        host: String::new(),
        port: 0,
        database: database.to_string(),
        user: None,
        password: None,
        timeout: None,
    };

    environments.insert("development".to_string(), db_config);

    Config {
        version: "1.0".to_string(),
        dialect: Dialect::SQLite,
        db_prefix: "ps_".to_string(),
        environments,
    }
}

/// テスト用のプロジェクトと設定テーブルを作成
async fn setup_test_project(rows: &[(&str, &str)]) -> Result<(TempDir, PathBuf)> {
    install_drivers();

    let temp_dir = TempDir::new()?;
    let project_path = temp_dir.path().to_path_buf();

    // SQLiteデータベースと設定テーブルを作成
    let db_path = project_path.join("shop.db");
    fs::File::create(&db_path)?;

    let pool = AnyPool::connect(&format!("sqlite://{}", db_path.display())).await?;
    sqlx::query("CREATE TABLE ps_configuration (name TEXT PRIMARY KEY, value TEXT)")
        .execute(&pool)
        .await?;
    for (name, value) in rows {
        sqlx::query("INSERT INTO ps_configuration (name, value) VALUES (?, ?)")
            .bind(*name)
            .bind(*value)
            .execute(&pool)
            .await?;
    }
    pool.close().await;

    // 設定ファイルを作成
    let config = create_test_config(&db_path.display().to_string());
    let config_yaml = serde_saphyr::to_string(&config)?;
    fs::write(project_path.join(Config::DEFAULT_CONFIG_PATH), config_yaml)?;

    Ok((temp_dir, project_path))
}

fn export_command(project_path: PathBuf, keys: Vec<&str>) -> ConfigurationExportCommand {
    ConfigurationExportCommand {
        project_path,
        config_path: None,
        keys: keys.into_iter().map(String::from).collect(),
        output_file: None,
        force: false,
        env: "development".to_string(),
    }
}

#[tokio::test]
async fn test_export_writes_json_file() -> Result<()> {
    let (_temp_dir, project_path) = setup_test_project(&[
        ("PS_LANG_DEFAULT", "1"),
        ("PS_SHOP_NAME", "My Shop"),
    ])
    .await?;

    let handler = ConfigurationExportCommandHandler::new();
    let command = export_command(
        project_path.clone(),
        vec!["PS_LANG_DEFAULT", "PS_SHOP_NAME"],
    );

    let summary = handler.execute(&command).await?;
    assert!(summary.contains("Exported keys: 2"));

    let exported = fs::read_to_string(project_path.join("ps_configurations.json"))?;
    let values: BTreeMap<String, String> = serde_json::from_str(&exported)?;
    assert_eq!(values.get("PS_LANG_DEFAULT").map(String::as_str), Some("1"));
    assert_eq!(values.get("PS_SHOP_NAME").map(String::as_str), Some("My Shop"));

    Ok(())
}

#[tokio::test]
async fn test_export_expands_like_patterns() -> Result<()> {
    let (_temp_dir, project_path) = setup_test_project(&[
        ("PSGDPR_TOS", "0"),
        ("PSGDPR_EMAIL", "1"),
        ("PS_SHOP_NAME", "My Shop"),
    ])
    .await?;

    let handler = ConfigurationExportCommandHandler::new();
    let command = export_command(project_path.clone(), vec!["PSGDPR_%"]);

    let summary = handler.execute(&command).await?;
    assert!(summary.contains("Exported keys: 2"));

    let exported = fs::read_to_string(project_path.join("ps_configurations.json"))?;
    let values: BTreeMap<String, String> = serde_json::from_str(&exported)?;
    assert!(values.contains_key("PSGDPR_TOS"));
    assert!(values.contains_key("PSGDPR_EMAIL"));
    assert!(!values.contains_key("PS_SHOP_NAME"));

    Ok(())
}

#[tokio::test]
async fn test_export_warns_on_missing_key() -> Result<()> {
    let (_temp_dir, project_path) = setup_test_project(&[("PS_LANG_DEFAULT", "1")]).await?;

    let handler = ConfigurationExportCommandHandler::new();
    let command = export_command(
        project_path.clone(),
        vec!["PS_LANG_DEFAULT", "PS_MISSING"],
    );

    let summary = handler.execute(&command).await?;
    assert!(summary.contains("Configuration key not found 'PS_MISSING' : ignored."));

    let exported = fs::read_to_string(project_path.join("ps_configurations.json"))?;
    let values: BTreeMap<String, String> = serde_json::from_str(&exported)?;
    assert_eq!(values.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_export_refuses_to_overwrite_without_force() -> Result<()> {
    let (_temp_dir, project_path) = setup_test_project(&[("PS_LANG_DEFAULT", "1")]).await?;

    fs::write(project_path.join("ps_configurations.json"), "{}")?;

    let handler = ConfigurationExportCommandHandler::new();
    let command = export_command(project_path.clone(), vec!["PS_LANG_DEFAULT"]);

    let result = handler.execute(&command).await;
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("already exists"));

    // --force指定時は上書きされる
    let mut forced = export_command(project_path.clone(), vec!["PS_LANG_DEFAULT"]);
    forced.force = true;
    handler.execute(&forced).await?;

    let exported = fs::read_to_string(project_path.join("ps_configurations.json"))?;
    assert!(exported.contains("PS_LANG_DEFAULT"));

    Ok(())
}

#[tokio::test]
async fn test_export_with_custom_output_file() -> Result<()> {
    let (_temp_dir, project_path) = setup_test_project(&[("PS_LANG_DEFAULT", "1")]).await?;

    let handler = ConfigurationExportCommandHandler::new();
    let mut command = export_command(project_path.clone(), vec!["PS_LANG_DEFAULT"]);
    command.output_file = Some(PathBuf::from("configuration_lang.json"));

    let summary = handler.execute(&command).await?;
    assert!(summary.contains("configuration_lang.json"));
    assert!(project_path.join("configuration_lang.json").exists());

    Ok(())
}

#[tokio::test]
async fn test_export_without_config_file_fails() {
    let temp_dir = TempDir::new().unwrap();

    let handler = ConfigurationExportCommandHandler::new();
    let command = export_command(temp_dir.path().to_path_buf(), vec!["PS_LANG_DEFAULT"]);

    let result = handler.execute(&command).await;
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Config file not found"));
}

#[tokio::test]
async fn test_export_unknown_environment_fails() -> Result<()> {
    let (_temp_dir, project_path) = setup_test_project(&[("PS_LANG_DEFAULT", "1")]).await?;

    let handler = ConfigurationExportCommandHandler::new();
    let mut command = export_command(project_path, vec!["PS_LANG_DEFAULT"]);
    command.env = "production".to_string();

    let result = handler.execute(&command).await;
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("'production' not found"));

    Ok(())
}
