//! Replay changed diff entries against the remote catalog
//!
//! Each changed product is located by name (its old name when it was
//! renamed, since the remote side still has that one), then updated. New
//! and removed products are never replayed.

use std::fmt;

use colored::*;

use crate::api::models::{ProductId, RemoteProduct, UpdateResponse};
use crate::api::{CatalogApi, Throttle};
use crate::catalog::diff::DiffEntry;
use crate::config::Config;

use super::payload::sync_update_request;

/// What happened to one changed entry
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayOutcome {
    Updated(ProductId),
    /// Search succeeded but nothing usable matched
    NotFound,
    SearchFailed(String),
    UpdateFailed { id: ProductId, reason: String },
}

impl ReplayOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ReplayOutcome::Updated(_))
    }
}

impl fmt::Display for ReplayOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayOutcome::Updated(id) => write!(f, "updated {}", id),
            ReplayOutcome::NotFound => write!(f, "not found"),
            ReplayOutcome::SearchFailed(reason) => write!(f, "search failed: {}", reason),
            ReplayOutcome::UpdateFailed { id, reason } => {
                write!(f, "update of {} failed: {}", id, reason)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub succeeded: usize,
    pub failed: usize,
    pub total: usize,
}

/// Pick the product a search refers to: an exact (trimmed) name match, or
/// the first hit.
pub fn pick_match<'a>(name: &str, hits: &'a [RemoteProduct]) -> Option<&'a ProductId> {
    let wanted = name.trim();
    hits.iter()
        .find(|hit| hit.name.trim() == wanted)
        .or_else(|| hits.first())
        .and_then(|hit| hit.id.as_ref())
}

fn update_succeeded(response: &UpdateResponse) -> bool {
    response.status == 200 && response.code == Some(200)
}

pub struct Replayer<'a, A: CatalogApi + ?Sized> {
    api: &'a A,
    config: &'a Config,
    throttle: Throttle,
}

impl<'a, A: CatalogApi + ?Sized> Replayer<'a, A> {
    pub fn new(api: &'a A, config: &'a Config, throttle: Throttle) -> Self {
        Self {
            api,
            config,
            throttle,
        }
    }

    /// Changed entries only, in diff order
    pub fn changed<'e>(entries: &'e [DiffEntry]) -> Vec<&'e DiffEntry> {
        entries.iter().filter(|e| e.kind.is_changed()).collect()
    }

    /// Replay every changed entry; the throttle pause follows each one
    pub async fn run(&self, entries: &[DiffEntry]) -> ReplaySummary {
        let changed = Self::changed(entries);
        let mut summary = ReplaySummary {
            total: changed.len(),
            ..Default::default()
        };

        if changed.is_empty() {
            println!("No changed products to update.");
            return summary;
        }

        let rule = "=".repeat(100);
        println!();
        println!("{}", rule);
        println!("UPDATING VIA API - {} products", changed.len());
        println!("{}", rule);
        println!();

        for (idx, entry) in changed.iter().enumerate() {
            println!("[{}/{}] {}", idx + 1, changed.len(), entry.name.bold());
            if entry.is_renamed() {
                println!("  (old name: {})", entry.old_name);
            }

            let outcome = self.replay_entry(entry).await;
            log::debug!("{}: {}", entry.code, outcome);
            if outcome.is_success() {
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
            }

            println!();
            self.throttle.pause().await;
        }

        log::info!(
            "Replay complete: {} succeeded, {} failed of {}",
            summary.succeeded,
            summary.failed,
            summary.total
        );
        summary
    }

    /// Resolve and update a single entry
    pub async fn replay_entry(&self, entry: &DiffEntry) -> ReplayOutcome {
        let search_name = entry.search_name();
        println!("  Searching for '{}'...", search_name);

        let id = match self.resolve(search_name).await {
            Ok(Some(id)) => {
                println!("  {} Found product ID: {}", "✓".green(), id);
                id
            }
            Ok(None) => {
                println!("  {} Product not found in remote catalog", "✗".red());
                log::warn!("{}: no remote product matches '{}'", entry.code, search_name);
                return ReplayOutcome::NotFound;
            }
            Err(e) => {
                let reason = format!("{:#}", e);
                println!("  {} Search failed: {}", "✗".red(), reason);
                log::warn!("{}: search for '{}' failed: {}", entry.code, search_name, reason);
                return ReplayOutcome::SearchFailed(reason);
            }
        };

        let request = sync_update_request(entry, self.config);
        let reason = match self.api.update_product(&id, &request).await {
            Ok(response) if update_succeeded(&response) => {
                println!("  {} Updated", "✓".green());
                println!("     - Price: {} → {}", entry.price.old, entry.price.new);
                println!("     - Stock HN: {} → {}", entry.stock_hn.old, entry.stock_hn.new);
                return ReplayOutcome::Updated(id);
            }
            Ok(response) => format!(
                "HTTP {} (code {}): {}",
                response.status,
                response
                    .code
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "none".to_string()),
                response.body
            ),
            Err(e) => format!("{:#}", e),
        };

        println!("  {} Update failed: {}", "✗".red(), reason);
        log::warn!("{}: update of product {} failed: {}", entry.code, id, reason);
        ReplayOutcome::UpdateFailed { id, reason }
    }

    async fn resolve(&self, name: &str) -> anyhow::Result<Option<ProductId>> {
        let hits = self.api.search_products(name).await?;
        Ok(pick_match(name, &hits).cloned())
    }
}

/// Print the totals of a replay run
pub fn print_replay_summary(summary: &ReplaySummary) {
    let rule = "=".repeat(100);
    println!("{}", rule);
    println!("UPDATE RESULT:");
    println!("  {} Succeeded: {}/{}", "✓".green(), summary.succeeded, summary.total);
    println!("  {} Failed: {}/{}", "✗".red(), summary.failed, summary.total);
    println!("{}", rule);
}
