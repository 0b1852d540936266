//! Import command handler

use anyhow::Result;
use colored::*;

use super::ImportCommands;
use crate::api::{CatalogClient, CredentialProvider, Throttle};
use crate::catalog::read_workbook;
use crate::config::Config;
use crate::sync::{ImportSummary, Importer, print_import_summary};

/// Create and fill in one remote product per named workbook row
pub async fn handle_import_command(
    args: ImportCommands,
    config: &Config,
    credentials: &dyn CredentialProvider,
) -> Result<ImportSummary> {
    if !args.workbook.exists() {
        anyhow::bail!("File not found: {}", args.workbook.display());
    }

    let api_key = credentials.resolve()?;

    println!("Loading Excel file... Please wait.");
    let sheets = read_workbook(&args.workbook)?;
    println!("Found {} sheets.", sheets.len().to_string().bold());

    let client = CatalogClient::new(config.api.clone(), api_key)?;
    let importer = Importer::new(&client, config, Throttle::from(&config.throttle));
    let summary = importer.run(&sheets).await;
    print_import_summary(&summary);

    Ok(summary)
}
