// CLI Layer
// ユーザー入力の受付とコマンドルーティング

pub mod command_context;
pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// FOP Console - Shop Administration CLI
///
/// Command-line extensions for day-to-day shop maintenance.
/// Export and import shop configuration values as JSON files.
#[derive(Parser, Debug)]
#[command(name = "fop")]
#[command(author = "FOP Console Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Administrative CLI for e-commerce shops")]
#[command(long_about = "FOP Console - Shop Administration CLI

Command-line extensions for day-to-day shop maintenance.

FOP Console helps you:
  • Dump configuration values from the shop configuration table to JSON
  • Restore configuration values from a previously exported JSON file
  • Preview configuration changes before applying them (--dry-run)

Supported databases: MySQL, PostgreSQL, SQLite")]
#[command(propagate_version = true)]
#[command(after_help = "GETTING STARTED:
  1. Create .fop-console.yaml with the shop database connection settings
  2. Dump configuration values:     fop configuration:export PS_SHOP_NAME
  3. Edit the exported JSON file as needed
  4. Restore configuration values:  fop configuration:import ps_configurations.json

For detailed help on each command, use: fop <command> --help")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export configuration values (from the shop configuration table)
    ///
    /// Dumps the requested configuration values to a JSON file.
    /// The exported file can later be fed to configuration:import.
    /// Keys containing '%' are expanded with SQL LIKE semantics.
    ///
    /// EXAMPLES:
    ///   # Dump one value
    ///   fop configuration:export PS_COUNTRY_DEFAULT
    ///
    ///   # Dump multiple values
    ///   fop configuration:export PS_SHOP_NAME PS_SHOP_EMAIL
    ///
    ///   # Dump every value starting with PSGDPR_
    ///   fop configuration:export --file configuration_gdpr.json "PSGDPR_%"
    #[command(name = "configuration:export")]
    ConfigurationExport {
        /// Configuration values to export ('%' works as a SQL LIKE wildcard)
        #[arg(required = true, value_name = "KEYS")]
        keys: Vec<String>,

        /// File to dump to
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,

        /// Overwrite existing file
        #[arg(short, long)]
        force: bool,

        /// Target environment
        #[arg(short, long, value_name = "ENV", default_value = "development")]
        env: String,
    },

    /// Import configuration values from a JSON file
    ///
    /// Reads a JSON object of configuration values (as produced by
    /// configuration:export) and writes each entry to the shop
    /// configuration table.
    ///
    /// EXAMPLES:
    ///   # Preview the changes without writing
    ///   fop configuration:import ps_configurations.json --dry-run
    ///
    ///   # Import, backing up the overwritten values first
    ///   fop configuration:import ps_configurations.json --backup
    ///
    ///   # Import into production
    ///   fop configuration:import ps_configurations.json --env production
    #[command(name = "configuration:import")]
    ConfigurationImport {
        /// JSON file to import (as produced by configuration:export)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Show the changes without writing them
        #[arg(long)]
        dry_run: bool,

        /// Write current values of overwritten keys to a backup file first
        #[arg(long)]
        backup: bool,

        /// Target environment
        #[arg(short, long, value_name = "ENV", default_value = "development")]
        env: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
