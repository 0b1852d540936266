//! Workbook import: create each product, then fill in its details
//!
//! Rows are handled one at a time. A failed create skips the row; a failed
//! update leaves the created product half-configured and is reported as
//! such, it is never rolled back.

use std::fmt;

use chrono::Utc;
use colored::*;

use crate::api::models::{ProductId, UpdateResponse};
use crate::api::{CatalogApi, Throttle};
use crate::catalog::record::CatalogRecord;
use crate::catalog::workbook::Sheet;
use crate::config::Config;

use super::payload::{ImportFields, create_request, import_update_request};

/// What happened to one workbook row
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Empty name, no call issued
    Skipped,
    CreateFailed(String),
    /// Product exists remotely but its details were not applied
    UpdateFailed { id: ProductId, reason: String },
    Imported(ProductId),
}

impl fmt::Display for RowOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowOutcome::Skipped => write!(f, "skipped"),
            RowOutcome::CreateFailed(reason) => write!(f, "create failed: {}", reason),
            RowOutcome::UpdateFailed { id, reason } => {
                write!(f, "created as {}, update failed: {}", id, reason)
            }
            RowOutcome::Imported(id) => write!(f, "imported as {}", id),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub partial: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl ImportSummary {
    fn record(&mut self, outcome: &RowOutcome) {
        match outcome {
            RowOutcome::Skipped => self.skipped += 1,
            RowOutcome::CreateFailed(_) => self.failed += 1,
            RowOutcome::UpdateFailed { .. } => self.partial += 1,
            RowOutcome::Imported(_) => self.imported += 1,
        }
    }

    pub fn attempted(&self) -> usize {
        self.imported + self.partial + self.failed
    }
}

/// Names that mark a row without a product
pub fn is_blank_name(name: &str) -> bool {
    let name = name.trim();
    name.is_empty() || name.eq_ignore_ascii_case("nan")
}

fn update_succeeded(response: &UpdateResponse) -> bool {
    matches!(response.status, 200 | 201)
}

pub struct Importer<'a, A: CatalogApi + ?Sized> {
    api: &'a A,
    config: &'a Config,
    throttle: Throttle,
}

impl<'a, A: CatalogApi + ?Sized> Importer<'a, A> {
    pub fn new(api: &'a A, config: &'a Config, throttle: Throttle) -> Self {
        Self {
            api,
            config,
            throttle,
        }
    }

    /// Import every row of every sheet
    pub async fn run(&self, sheets: &[Sheet]) -> ImportSummary {
        let mut summary = ImportSummary::default();

        for sheet in sheets {
            println!();
            println!(
                "Processing sheet: {} | {} rows",
                sheet.name.bright_cyan().bold(),
                sheet.records.len()
            );

            for record in &sheet.records {
                let outcome = self.import_record(&sheet.name, record).await;
                log::debug!("{}: {}", record.key, outcome);
                summary.record(&outcome);

                if matches!(
                    outcome,
                    RowOutcome::Imported(_) | RowOutcome::UpdateFailed { .. }
                ) {
                    self.throttle.pause().await;
                }
            }
        }

        log::info!(
            "Import complete: {} imported, {} partial, {} failed, {} skipped",
            summary.imported,
            summary.partial,
            summary.failed,
            summary.skipped
        );
        summary
    }

    /// Create then update a single row
    pub async fn import_record(&self, sheet: &str, record: &CatalogRecord) -> RowOutcome {
        let fields = ImportFields::from_record(record);
        if is_blank_name(&fields.name) {
            log::debug!("{}: no product name, skipping", record.key);
            return RowOutcome::Skipped;
        }

        println!(" -> Processing {}: {}", record.key, fields.name);

        let request = create_request(&fields.name, sheet, &self.config.product);
        let id = match self.api.create_product(&request).await {
            Ok(id) => {
                println!("   {} Created product: ID {}", "✓".green(), id);
                id
            }
            Err(e) => {
                let reason = format!("{:#}", e);
                println!("   {} Create failed: {}", "✗".red(), reason);
                log::warn!("{}: create failed: {}", record.key, reason);
                return RowOutcome::CreateFailed(reason);
            }
        };

        log::debug!(
            "Extracted -> Name: {} | Price: {} | Qty: {} | Brand: '{}' | Cat: '{}' | Warranty: '{}'",
            fields.name,
            fields.price,
            fields.total_quantity(),
            fields.brand,
            fields.category,
            fields.warranty
        );

        let update = import_update_request(&id, &fields, sheet, self.config, Utc::now());
        let reason = match self.api.update_product(&id, &update).await {
            Ok(response) if update_succeeded(&response) => {
                println!("   {} Updated details for product ID {}", "✓".green(), id);
                return RowOutcome::Imported(id);
            }
            Ok(response) => format!("HTTP {}, body: {}", response.status, response.body),
            Err(e) => format!("{:#}", e),
        };

        println!(
            "   {} Update failed for product ID {}: {}",
            "⚠".yellow(),
            id,
            reason
        );
        log::warn!("{}: product {} created but update failed: {}", record.key, id, reason);
        RowOutcome::UpdateFailed { id, reason }
    }
}

/// Print the totals of an import run
pub fn print_import_summary(summary: &ImportSummary) {
    let rule = "=".repeat(100);
    println!();
    println!("{}", rule);
    println!("IMPORT RESULT:");
    println!("  {} Imported: {}/{}", "✓".green(), summary.imported, summary.attempted());
    if summary.partial > 0 {
        println!(
            "  {} Created, details not applied: {}/{}",
            "⚠".yellow(),
            summary.partial,
            summary.attempted()
        );
    }
    println!("  {} Failed: {}/{}", "✗".red(), summary.failed, summary.attempted());
    println!("  Skipped rows without name: {}", summary.skipped);
    println!("{}", rule);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::record::RecordKey;
    use crate::sync::fake::{Call, FakeCatalog};
    use std::time::Duration;

    fn row(index: usize, pairs: &[(&str, &str)]) -> CatalogRecord {
        let mut record = CatalogRecord::new(RecordKey::Row {
            sheet: "CPU".to_string(),
            index,
        });
        for (header, value) in pairs {
            record.insert(*header, *value);
        }
        record
    }

    fn sheet(records: Vec<CatalogRecord>) -> Sheet {
        Sheet {
            name: "CPU".to_string(),
            records,
        }
    }

    #[test]
    fn test_blank_names() {
        assert!(is_blank_name(""));
        assert!(is_blank_name("   "));
        assert!(is_blank_name("nan"));
        assert!(is_blank_name("NaN"));
        assert!(!is_blank_name("Nano"));
    }

    #[tokio::test]
    async fn test_row_without_name_issues_no_call() {
        let api = FakeCatalog::new();
        let config = Config::default();
        let importer = Importer::new(&api, &config, Throttle::disabled());

        let nameless = row(1, &[("Giá bán", "100"), ("Product", "Unnamed Product")]);
        let outcome = importer.import_record("CPU", &nameless).await;

        assert_eq!(outcome, RowOutcome::Skipped);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_then_update() {
        let api = FakeCatalog::new();
        api.push_create(Ok(ProductId::new("77")));
        let config = Config::default();
        let importer = Importer::new(&api, &config, Throttle::disabled());

        let record = row(
            1,
            &[("Tên SP", "Ryzen 5"), ("Giá", "100"), ("Tồn HN", "2"), ("Tồn SG", "3")],
        );
        let outcome = importer.import_record("CPU", &record).await;

        assert_eq!(outcome, RowOutcome::Imported(ProductId::new("77")));
        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        match &calls[0] {
            Call::Create(request) => {
                assert_eq!(request.name, "Ryzen 5");
                assert_eq!(request.description, "CPU");
                assert_eq!(request.product_type, "PHYSICAL");
            }
            other => panic!("expected create, got {:?}", other),
        }
        let (id, update) = &api.updates()[0];
        assert_eq!(id, &ProductId::new("77"));
        assert_eq!(update.inventory_management.quantity, 5);
        assert_eq!(update.basic_info.tags, vec!["CPU".to_string()]);
    }

    #[tokio::test]
    async fn test_create_failure_skips_update() {
        let api = FakeCatalog::new();
        api.push_create(Err("Created but id missing in result".to_string()));
        let config = Config::default();
        let importer = Importer::new(&api, &config, Throttle::disabled());

        let outcome = importer
            .import_record("CPU", &row(1, &[("Tên SP", "Ryzen 5")]))
            .await;

        assert!(matches!(outcome, RowOutcome::CreateFailed(ref r) if r.contains("id missing")));
        assert!(api.updates().is_empty());
    }

    #[tokio::test]
    async fn test_update_rejection_leaves_partial_product() {
        let api = FakeCatalog::new();
        api.push_create(Ok(ProductId::new("9")));
        api.push_update(Ok(UpdateResponse {
            status: 400,
            code: Some(400),
            body: "bad sku".to_string(),
        }));
        let config = Config::default();
        let importer = Importer::new(&api, &config, Throttle::disabled());

        let outcome = importer
            .import_record("CPU", &row(1, &[("Tên SP", "Ryzen 5")]))
            .await;

        match outcome {
            RowOutcome::UpdateFailed { id, reason } => {
                assert_eq!(id, ProductId::new("9"));
                assert!(reason.contains("400"));
            }
            other => panic!("expected partial import, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_accepts_201_without_code() {
        let api = FakeCatalog::new();
        api.push_update(Ok(UpdateResponse {
            status: 201,
            code: None,
            body: String::new(),
        }));
        let config = Config::default();
        let importer = Importer::new(&api, &config, Throttle::disabled());

        let outcome = importer
            .import_record("CPU", &row(1, &[("Name", "Ryzen 7")]))
            .await;

        assert!(matches!(outcome, RowOutcome::Imported(_)));
    }

    #[tokio::test]
    async fn test_run_tallies_every_row() {
        let api = FakeCatalog::new();
        api.push_create(Ok(ProductId::new("1")));
        api.push_create(Err("Create rejected. Code: 500".to_string()));
        api.push_create(Ok(ProductId::new("3")));
        api.push_update(Ok(crate::sync::fake::ok_update()));
        api.push_update(Err("PUT request failed".to_string()));
        let config = Config::default();
        let importer = Importer::new(&api, &config, Throttle::disabled());

        let sheets = vec![sheet(vec![
            row(1, &[("Tên SP", "One")]),
            row(2, &[("Tên SP", "nan")]),
            row(3, &[("Tên SP", "Two")]),
            row(4, &[("Tên SP", "Three")]),
            row(5, &[("Tên SP", "")]),
        ])];

        let summary = importer.run(&sheets).await;

        assert_eq!(
            summary,
            ImportSummary {
                imported: 1,
                partial: 1,
                failed: 1,
                skipped: 2
            }
        );
        assert_eq!(summary.attempted(), 3);
        assert_eq!(api.creates().len(), 3);
        assert_eq!(api.updates().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_follows_only_successful_creates() {
        let api = FakeCatalog::new();
        api.push_create(Ok(ProductId::new("1")));
        api.push_create(Err("Create rejected. Code: 500".to_string()));
        api.push_create(Ok(ProductId::new("3")));
        api.push_update(Ok(crate::sync::fake::ok_update()));
        api.push_update(Err("PUT request failed".to_string()));
        let config = Config::default();
        let importer = Importer::new(&api, &config, Throttle::new(Duration::from_millis(500)));

        let sheets = vec![sheet(vec![
            row(1, &[("Tên SP", "One")]),
            row(2, &[("Tên SP", "")]),
            row(3, &[("Tên SP", "Two")]),
            row(4, &[("Tên SP", "Three")]),
        ])];

        let start = tokio::time::Instant::now();
        importer.run(&sheets).await;
        let elapsed = start.elapsed();

        // imported and partial rows pause, skipped and failed rows do not
        assert!(elapsed >= Duration::from_millis(1000));
        assert!(elapsed < Duration::from_millis(1500));
    }
}
