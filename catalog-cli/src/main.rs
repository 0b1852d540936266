mod api;
mod catalog;
mod cli;
mod config;
mod sync;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use api::ChainedCredentialProvider;
use cli::commands::{DiffCommands, ImportCommands};
use config::Config;

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(about = "Import product workbooks and replay snapshot diffs against the catalog API")]
#[command(version)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create products from every sheet of a workbook
    Import(ImportCommands),
    /// Compare two CSV snapshots and optionally push changes
    Diff(DiffCommands),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "catalog_cli=debug"
    } else {
        "catalog_cli=info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = Config::load(cli.config.as_deref())?;
    let credentials = ChainedCredentialProvider::interactive();

    match cli.command {
        Commands::Import(args) => {
            cli::commands::import::handle_import_command(args, &config, &credentials).await?;
        }
        Commands::Diff(args) => {
            cli::commands::diff::handle_diff_command(args, &config, &credentials).await?;
        }
    }

    Ok(())
}
