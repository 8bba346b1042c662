// 命名ポリシー
//
// アプリケーション名・コマンド名前空間・既定パスの単一ソースを提供します。

/// 現行アプリケーション名
pub const APP_NAME: &str = "fop-console";

/// バイナリ名
pub const BINARY_NAME: &str = "fop";

/// 既定の設定ファイル名
pub const CONFIG_FILE: &str = ".fop-console.yaml";

/// コマンド名の名前空間（`fop:configuration:export` の先頭部）
pub const COMMAND_NAMESPACE: &str = "fop";

/// サービス名のプレフィックス（`fop.console.configuration.export.command` の先頭部）
pub const SERVICE_PREFIX: &str = "fop.console";

/// 既定のエクスポート先ファイル名
pub const DEFAULT_EXPORT_FILE: &str = "ps_configurations.json";

/// 既定のテーブルプレフィックス
pub const DEFAULT_DB_PREFIX: &str = "ps_";

/// 設定テーブルのベース名（プレフィックスを除く）
pub const CONFIGURATION_TABLE: &str = "configuration";
