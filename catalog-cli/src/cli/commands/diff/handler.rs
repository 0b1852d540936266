//! Diff command handler

use anyhow::{Context, Result};
use colored::*;
use dialoguer::Confirm;

use super::DiffCommands;
use crate::api::{CatalogClient, CredentialProvider, Throttle};
use crate::catalog::report::{print_differences, write_report};
use crate::catalog::{DiffCounts, DiffEntry, diff_snapshots, read_snapshot};
use crate::config::Config;
use crate::sync::{ReplaySummary, Replayer, print_replay_summary};

/// Compare two snapshots, print and export the differences, then replay
/// changed products when asked to.
pub async fn handle_diff_command(
    args: DiffCommands,
    config: &Config,
    credentials: &dyn CredentialProvider,
) -> Result<Option<ReplaySummary>> {
    for path in [&args.baseline, &args.current] {
        if !path.exists() {
            anyhow::bail!("File not found: {}", path.display());
        }
    }

    println!();
    println!("Comparing:");
    println!("   Baseline: {}", args.baseline.display().to_string().cyan());
    println!("   Current:  {}", args.current.display().to_string().cyan());

    let baseline = read_snapshot(&args.baseline)?;
    let current = read_snapshot(&args.current)?;

    let differences = diff_snapshots(&baseline, &current);
    print_differences(&differences);

    if let Some(output) = &args.output {
        if write_report(output, &differences)? {
            println!();
            println!(
                "Results saved to: {}",
                output.display().to_string().bright_green()
            );
        } else {
            println!("No data to export to {}", output.display());
        }
    }

    if !args.update_api {
        return Ok(None);
    }

    replay_changes(&differences, args.yes, config, credentials).await
}

async fn replay_changes(
    differences: &[DiffEntry],
    assume_yes: bool,
    config: &Config,
    credentials: &dyn CredentialProvider,
) -> Result<Option<ReplaySummary>> {
    let changed = DiffCounts::of(differences).changed;
    if changed == 0 {
        println!();
        println!("{}", "No changed products, nothing to update via API.".green());
        return Ok(None);
    }

    println!();
    println!("{}", "=".repeat(100));

    let api_key = match credentials.resolve() {
        Ok(key) => key,
        Err(e) => {
            println!("{} {:#}. Skipping API update.", "✗".red(), e);
            return Ok(None);
        }
    };

    if !assume_yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Update {} products via the API?", changed))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            println!("{}", "API update cancelled.".yellow());
            return Ok(None);
        }
    }

    let client = CatalogClient::new(config.api.clone(), api_key)?;
    let replayer = Replayer::new(&client, config, Throttle::from(&config.throttle));
    let summary = replayer.run(differences).await;
    print_replay_summary(&summary);

    Ok(Some(summary))
}
