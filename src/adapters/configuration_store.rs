// 設定ストアアダプター
//
// ショップの設定テーブル（<prefix>configuration）への読み書きを抽象化します。
// SQLxのAnyドライバー上で、方言ごとのバインドプレースホルダーを使い分けます。

use crate::core::config::Dialect;
use crate::core::error::DatabaseError;
use crate::core::naming;
use async_trait::async_trait;
use regex::Regex;
use sqlx::{AnyPool, Row};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// 設定キーと値の読み書きインターフェース
#[async_trait]
pub trait ConfigurationStore: Send + Sync {
    /// キーに対応する値を取得
    async fn get(&self, key: &str) -> Result<Option<String>, DatabaseError>;

    /// LIKEパターンに一致するキーと値の一覧をキー順で取得
    async fn find_like(&self, pattern: &str) -> Result<Vec<(String, String)>, DatabaseError>;

    /// キーに値を設定（存在すれば更新、なければ挿入）
    async fn set(&self, key: &str, value: &str) -> Result<(), DatabaseError>;
}

/// データベース接続上の設定ストア
#[derive(Debug, Clone)]
pub struct DbConfigurationStore {
    pool: AnyPool,
    dialect: Dialect,
    table: String,
}

impl DbConfigurationStore {
    /// 新しいDbConfigurationStoreを作成
    pub fn new(pool: AnyPool, dialect: Dialect, db_prefix: &str) -> Self {
        Self {
            pool,
            dialect,
            table: format!("{}{}", db_prefix, naming::CONFIGURATION_TABLE),
        }
    }

    /// 設定テーブル名を取得
    pub fn table(&self) -> &str {
        &self.table
    }

    /// 方言ごとのバインドプレースホルダー
    fn placeholder(&self, position: usize) -> String {
        match self.dialect {
            Dialect::PostgreSQL => format!("${}", position),
            Dialect::MySQL | Dialect::SQLite => "?".to_string(),
        }
    }

    /// クエリエラーを生成
    fn query_error(message: &str, sql: &str, error: sqlx::Error) -> DatabaseError {
        DatabaseError::Query {
            message: format!("{}: {}", message, error),
            sql: Some(sql.to_string()),
        }
    }
}

#[async_trait]
impl ConfigurationStore for DbConfigurationStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let sql = format!(
            "SELECT value FROM {} WHERE name = {}",
            self.table,
            self.placeholder(1)
        );

        let row = sqlx::query(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::query_error("Failed to read configuration value", &sql, e))?;

        // valueカラムはNULLを許容する
        Ok(row.map(|r| r.get::<Option<String>, _>(0).unwrap_or_default()))
    }

    async fn find_like(&self, pattern: &str) -> Result<Vec<(String, String)>, DatabaseError> {
        let sql = format!(
            "SELECT name, value FROM {} WHERE name LIKE {} ORDER BY name",
            self.table,
            self.placeholder(1)
        );

        let rows = sqlx::query(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::query_error("Failed to query configuration values", &sql, e))?;

        Ok(rows
            .iter()
            .map(|r| {
                (
                    r.get::<String, _>(0),
                    r.get::<Option<String>, _>(1).unwrap_or_default(),
                )
            })
            .collect())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        // MySQLは値が変わらないUPDATEのrows_affectedを0と報告するため、
        // 更新と挿入の判定は存在確認で行う
        if self.get(key).await?.is_some() {
            let update_sql = format!(
                "UPDATE {} SET value = {} WHERE name = {}",
                self.table,
                self.placeholder(1),
                self.placeholder(2)
            );

            sqlx::query(&update_sql)
                .bind(value)
                .bind(key)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    Self::query_error("Failed to update configuration value", &update_sql, e)
                })?;
        } else {
            let insert_sql = format!(
                "INSERT INTO {} (name, value) VALUES ({}, {})",
                self.table,
                self.placeholder(1),
                self.placeholder(2)
            );

            sqlx::query(&insert_sql)
                .bind(key)
                .bind(value)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    Self::query_error("Failed to insert configuration value", &insert_sql, e)
                })?;
        }

        Ok(())
    }
}

/// インメモリ設定ストア
///
/// ハンドラーの単体テスト用。LIKEパターンは `%` と `_` をサポートする。
#[derive(Debug, Default)]
pub struct InMemoryConfigurationStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl InMemoryConfigurationStore {
    /// 空のストアを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期値を投入したストアを作成
    pub fn with_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            values: Mutex::new(values.into_iter().collect()),
        }
    }
}

#[async_trait]
impl ConfigurationStore for InMemoryConfigurationStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    async fn find_like(&self, pattern: &str) -> Result<Vec<(String, String)>, DatabaseError> {
        let regex = like_pattern_to_regex(pattern).map_err(|e| DatabaseError::Query {
            message: format!("Invalid LIKE pattern '{}': {}", pattern, e),
            sql: None,
        })?;

        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values
            .iter()
            .filter(|(name, _)| regex.is_match(name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// SQLのLIKEパターンを正規表現へ変換
fn like_pattern_to_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut translated = String::from("^");
    for ch in pattern.chars() {
        match ch {
            '%' => translated.push_str(".*"),
            '_' => translated.push('.'),
            _ => translated.push_str(&regex::escape(&ch.to_string())),
        }
    }
    translated.push('$');

    Regex::new(&translated)
}
