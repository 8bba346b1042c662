use anyhow::{Context, Result};
use clap::Parser;
use colored::control as color_control;
use fop_console::cli::commands::export::{
    ConfigurationExportCommand, ConfigurationExportCommandHandler,
};
use fop_console::cli::commands::import::{
    ConfigurationImportCommand, ConfigurationImportCommandHandler,
};
use fop_console::cli::{Cli, Commands};
use std::env;
use std::process;

fn main() {
    sqlx::any::install_default_drivers();

    // CLIをパースして実行
    let cli = Cli::parse();

    // 非同期ランタイムを作成して実行
    let runtime = tokio::runtime::Runtime::new()
        .context("Failed to create Tokio runtime")
        .unwrap_or_else(|e| {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        });

    let result = runtime.block_on(run_command(cli));

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// コマンドを実行する
async fn run_command(cli: Cli) -> Result<String> {
    // --no-color フラグの処理
    if cli.no_color {
        color_control::set_override(false);
    }

    // --verbose フラグの処理
    // 環境変数を設定して、ハンドラーから参照可能にする
    if cli.verbose {
        env::set_var("FOP_CONSOLE_VERBOSE", "1");
        eprintln!("Verbose mode enabled");
    }

    // プロジェクトのルートパスを取得
    let project_path = env::current_dir()?;

    match cli.command {
        Commands::ConfigurationExport {
            keys,
            file,
            force,
            env,
        } => {
            let handler = ConfigurationExportCommandHandler::new();
            let command = ConfigurationExportCommand {
                project_path,
                config_path: cli.config,
                keys,
                output_file: file,
                force,
                env,
            };
            handler.execute(&command).await
        }

        Commands::ConfigurationImport {
            file,
            dry_run,
            backup,
            env,
        } => {
            let handler = ConfigurationImportCommandHandler::new();
            let command = ConfigurationImportCommand {
                project_path,
                config_path: cli.config,
                input_file: file,
                dry_run,
                backup,
                env,
            };
            handler.execute(&command).await
        }
    }
}
