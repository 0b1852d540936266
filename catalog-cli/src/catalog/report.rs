//! Diff report export and console rendering

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use colored::*;
use csv::Writer;

use super::diff::{DiffCounts, DiffEntry, DiffKind, ValueChange};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";


pub const HEADER: [&str; 10] = [
    "Mã",
    "Tên SP",
    "Tên SP cũ",
    "Trạng thái",
    "Giá cũ",
    "Giá mới",
    "Tồn HN cũ",
    "Tồn HN mới",
    "Tồn SG cũ",
    "Tồn SG mới",
];

/// Write the report as BOM-prefixed UTF-8 CSV.
///
/// Returns false without touching `path` when there is nothing to export.
pub fn write_report(path: &Path, entries: &[DiffEntry]) -> Result<bool> {
    if entries.is_empty() {
        log::info!("No differences to export to {}", path.display());
        return Ok(false);
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    write_report_to(file, entries)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;

    log::info!("Exported {} differences to {}", entries.len(), path.display());
    Ok(true)
}

pub fn write_report_to<W: Write>(mut writer: W, entries: &[DiffEntry]) -> Result<()> {
    writer.write_all(UTF8_BOM).context("Failed to write BOM")?;

    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(HEADER).context("Failed to write CSV header")?;

    for entry in entries {
        let status = entry.kind.status_label();
        wtr.write_record([
            entry.code.as_str(),
            entry.name.as_str(),
            entry.old_name.as_str(),
            status.as_str(),
            entry.price.old.as_str(),
            entry.price.new.as_str(),
            entry.stock_hn.old.as_str(),
            entry.stock_hn.new.as_str(),
            entry.stock_sg.old.as_str(),
            entry.stock_sg.new.as_str(),
        ])
        .with_context(|| format!("Failed to write row for {}", entry.code))?;
    }

    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

/// Read a report written by [`write_report`]
#[cfg(test)]
pub fn read_report(path: &Path) -> Result<Vec<DiffEntry>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
    read_report_from(file).with_context(|| format!("Failed to read report: {}", path.display()))
}

#[cfg(test)]
pub fn read_report_from<R: std::io::Read>(mut reader: R) -> Result<Vec<DiffEntry>> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .context("Failed to read report")?;
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);

    let mut rdr = csv::ReaderBuilder::new().from_reader(body);
    let mut entries = Vec::new();

    for (row_idx, result) in rdr.records().enumerate() {
        let row_num = row_idx + 2;
        let row = result.with_context(|| format!("Row {}: invalid CSV", row_num))?;
        let cell = |col: usize| row.get(col).unwrap_or("").to_string();

        let status = cell(cols::STATUS);
        let kind = DiffKind::parse_status(&status)
            .with_context(|| format!("Row {}: unknown status '{}'", row_num, status))?;

        entries.push(DiffEntry {
            code: cell(cols::CODE),
            name: cell(cols::NAME),
            old_name: cell(cols::OLD_NAME),
            kind,
            price: ValueChange::new(cell(cols::OLD_PRICE), cell(cols::NEW_PRICE)),
            stock_hn: ValueChange::new(cell(cols::OLD_HN), cell(cols::NEW_HN)),
            stock_sg: ValueChange::new(cell(cols::OLD_SG), cell(cols::NEW_SG)),
        });
    }

    Ok(entries)
}

/// Print differences grouped by classification
pub fn print_differences(entries: &[DiffEntry]) {
    if entries.is_empty() {
        println!("{}", "No differences between the two files.".green());
        return;
    }

    let rule = "=".repeat(100);
    let thin = "-".repeat(100);
    let counts = DiffCounts::of(entries);

    println!();
    println!("{}", rule);
    println!("TOTAL DIFFERENCES: {}", counts.total().to_string().bold());
    println!("{}", rule);

    if counts.new > 0 {
        println!();
        println!("{}", format!("NEW PRODUCTS ({}):", counts.new).bright_green().bold());
        println!("{}", thin);
        for entry in entries.iter().filter(|e| e.kind == DiffKind::New) {
            println!("  Code: {}", entry.code);
            println!("  Name: {}", entry.name);
            println!("  Price: {}", entry.price.new);
            println!(
                "  Stock HN: {} | Stock SG: {}",
                entry.stock_hn.new, entry.stock_sg.new
            );
            println!();
        }
    }

    if counts.removed > 0 {
        println!();
        println!("{}", format!("REMOVED PRODUCTS ({}):", counts.removed).red().bold());
        println!("{}", thin);
        for entry in entries.iter().filter(|e| e.kind == DiffKind::Removed) {
            println!("  Code: {}", entry.code);
            println!("  Name: {}", entry.name);
            println!("  Old price: {}", entry.price.old);
            println!();
        }
    }

    if counts.changed > 0 {
        println!();
        println!("{}", format!("CHANGED PRODUCTS ({}):", counts.changed).yellow().bold());
        println!("{}", thin);
        for entry in entries.iter().filter(|e| e.kind.is_changed()) {
            println!("  Code: {}", entry.code);
            println!("  Name: {}", entry.name);
            println!("  Changes: {}", entry.kind.status_label().cyan());
            print_change("Price", &entry.price);
            print_change("Stock HN", &entry.stock_hn);
            print_change("Stock SG", &entry.stock_sg);
            println!();
        }
    }
}

fn print_change(label: &str, change: &ValueChange) {
    if change.differs() {
        println!("  {}: {} → {}", label, change.old.dimmed(), change.new.bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::diff::ChangedField;

    fn entries() -> Vec<DiffEntry> {
        vec![
            DiffEntry {
                code: "A1".to_string(),
                name: "Widget, large".to_string(),
                old_name: "Widget".to_string(),
                kind: DiffKind::Changed(vec![ChangedField::Price, ChangedField::Name]),
                price: ValueChange::new("100", "1,500"),
                stock_hn: ValueChange::new("5", "5"),
                stock_sg: ValueChange::new("3", "3"),
            },
            DiffEntry {
                code: "B2".to_string(),
                name: "Gadget".to_string(),
                old_name: String::new(),
                kind: DiffKind::New,
                price: ValueChange::new("", "250"),
                stock_hn: ValueChange::new("", "0"),
                stock_sg: ValueChange::new("", "12"),
            },
            DiffEntry {
                code: "C3".to_string(),
                name: "Doohickey \"v2\"".to_string(),
                old_name: String::new(),
                kind: DiffKind::Removed,
                price: ValueChange::new("75", ""),
                stock_hn: ValueChange::new("1", ""),
                stock_sg: ValueChange::new("1", ""),
            },
        ]
    }

    #[test]
    fn test_report_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diff.csv");
        let original = entries();

        assert!(write_report(&path, &original).unwrap());
        let read_back = read_report(&path).unwrap();

        assert_eq!(read_back, original);
    }

    #[test]
    fn test_report_layout() {
        let mut buf = Vec::new();
        write_report_to(&mut buf, &entries()[..1]).unwrap();

        assert!(buf.starts_with(UTF8_BOM));
        let text = String::from_utf8(buf[UTF8_BOM.len()..].to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Mã,Tên SP,Tên SP cũ,Trạng thái,Giá cũ,Giá mới,Tồn HN cũ,Tồn HN mới,Tồn SG cũ,Tồn SG mới"
        );
        assert_eq!(
            lines.next().unwrap(),
            "A1,\"Widget, large\",Widget,\"THAY ĐỔI: Giá, Tên SP\",100,\"1,500\",5,5,3,3"
        );
    }

    #[test]
    fn test_empty_report_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diff.csv");

        assert!(!write_report(&path, &[]).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let data = "Mã,Tên SP,Tên SP cũ,Trạng thái,Giá cũ,Giá mới,Tồn HN cũ,Tồn HN mới,Tồn SG cũ,Tồn SG mới\nA1,W,,BOGUS,,,,,,\n";
        assert!(read_report_from(data.as_bytes()).is_err());
    }
}
