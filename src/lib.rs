// FOP Consoleライブラリのエントリーポイント
//
// モジュール構造:
// - cli: CLIレイヤー（ユーザー入力の受付とコマンドルーティング）
// - core: コアドメインロジック（設定モデル、コマンドレジストリ、命名規約）
// - adapters: データベースと設定テーブルへのアクセスを抽象化
// - services: 設定ファイル読み込みと命名規約バリデーター

pub mod cli;
pub mod core;
pub mod adapters;
pub mod services;
