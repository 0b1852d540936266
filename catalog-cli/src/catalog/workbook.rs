//! Multi-sheet xlsx workbook loading

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{Data, Reader, Xlsx, open_workbook};

use super::record::{CatalogRecord, RecordKey};

/// One worksheet; its name tags every product created from it
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub records: Vec<CatalogRecord>,
}

/// Read every sheet of a workbook. The first row of each sheet is the header.
pub fn read_workbook(path: &Path) -> Result<Vec<Sheet>> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

    let mut sheets = Vec::new();
    for sheet_name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&sheet_name)
            .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

        let mut rows = range.rows();
        let headers: Vec<String> = match rows.next() {
            Some(header) => header.iter().map(|c| cell_to_string(c).trim().to_string()).collect(),
            None => {
                log::debug!("Sheet '{}' is empty", sheet_name);
                sheets.push(Sheet {
                    name: sheet_name,
                    records: Vec::new(),
                });
                continue;
            }
        };

        let records = rows
            .enumerate()
            .map(|(idx, row)| {
                let values: Vec<String> = row.iter().map(cell_to_string).collect();
                CatalogRecord::from_row(
                    RecordKey::Row {
                        sheet: sheet_name.clone(),
                        index: idx + 1,
                    },
                    &headers,
                    &values,
                )
            })
            .collect();

        sheets.push(Sheet {
            name: sheet_name,
            records,
        });
    }

    Ok(sheets)
}

/// Text rendering of a cell, whole floats without a fractional part
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::DateTime(dt) => format!("{}", dt),
        _ => String::new(),
    }
}
