//! Keyed CSV snapshots of the catalog

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use super::aliases;
use super::record::{CatalogRecord, RecordKey};

const UTF8_BOM: char = '\u{feff}';

/// Records keyed by product code, in first-seen order.
///
/// A repeated code replaces the earlier record but keeps its position.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    order: Vec<String>,
    records: HashMap<String, CatalogRecord>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>, record: CatalogRecord) {
        let code = code.into();
        if !self.records.contains_key(&code) {
            self.order.push(code.clone());
        }
        self.records.insert(code, record);
    }

    pub fn get(&self, code: &str) -> Option<&CatalogRecord> {
        self.records.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.records.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Records in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CatalogRecord)> {
        self.order
            .iter()
            .filter_map(|code| self.records.get(code).map(|r| (code.as_str(), r)))
    }

    #[cfg(test)]
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

/// Load a snapshot from a CSV file with a header row
pub fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
    let snapshot = read_snapshot_from(file)
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;
    log::info!(
        "Loaded {} products from {}",
        snapshot.len(),
        path.display()
    );
    Ok(snapshot)
}

/// Load a snapshot from any CSV reader.
///
/// Rows without a product code are skipped.
pub fn read_snapshot_from<R: Read>(reader: R) -> Result<Snapshot> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .enumerate()
        .map(|(idx, h)| {
            let h = if idx == 0 { h.trim_start_matches(UTF8_BOM) } else { h };
            h.trim().to_string()
        })
        .collect();

    let mut snapshot = Snapshot::new();
    let mut skipped = 0usize;

    for (row_idx, result) in rdr.records().enumerate() {
        let row = result.with_context(|| format!("Failed to parse CSV row {}", row_idx + 2))?;
        let values: Vec<&str> = row.iter().collect();

        let mut record = CatalogRecord::from_row(
            RecordKey::Row {
                sheet: String::new(),
                index: row_idx + 1,
            },
            &headers,
            &values,
        );

        let code = record.text(aliases::CODE);
        if code.is_empty() {
            skipped += 1;
            continue;
        }

        record.key = RecordKey::Code(code.clone());
        snapshot.insert(code, record);
    }

    if skipped > 0 {
        log::debug!("Skipped {} rows without product code", skipped);
    }

    Ok(snapshot)
}
