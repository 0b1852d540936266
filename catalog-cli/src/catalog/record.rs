//! Catalog records and alias-tolerant field lookup

use std::collections::HashMap;
use std::fmt;

use super::aliases;

/// Identity of a record within its source
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKey {
    /// Stable product code from a snapshot
    Code(String),
    /// 1-based data row of a workbook sheet
    Row { sheet: String, index: usize },
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Code(code) => write!(f, "{}", code),
            RecordKey::Row { sheet, index } => write!(f, "{} row {}", sheet, index),
        }
    }
}

/// One row of tabular catalog data, keyed by trimmed header name
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    pub key: RecordKey,
    fields: HashMap<String, String>,
}

impl CatalogRecord {
    pub fn new(key: RecordKey) -> Self {
        Self {
            key,
            fields: HashMap::new(),
        }
    }

    /// Build a record from parallel header/value slices.
    ///
    /// Headers are trimmed; values beyond the header row are dropped and
    /// headers without a value are bound to an empty string. A repeated
    /// header keeps its first column.
    pub fn from_row<H, V>(key: RecordKey, headers: &[H], values: &[V]) -> Self
    where
        H: AsRef<str>,
        V: AsRef<str>,
    {
        let mut record = Self::new(key);
        for (idx, header) in headers.iter().enumerate() {
            let header = header.as_ref().trim();
            if header.is_empty() || record.fields.contains_key(header) {
                continue;
            }
            let value = values.get(idx).map(|v| v.as_ref()).unwrap_or("");
            record.insert(header, value);
        }
        record
    }

    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(header.into(), value.into());
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Value of the first alias present in the record.
    ///
    /// `None` only when no alias matches; an empty or zero value is still
    /// `Some`.
    pub fn lookup(&self, aliases: &[&str]) -> Option<&str> {
        lookup(&self.fields, aliases)
    }

    pub fn text(&self, aliases: &[&str]) -> String {
        normalize_text(self.lookup(aliases))
    }

    pub fn price(&self, aliases: &[&str]) -> f64 {
        parse_price(self.lookup(aliases))
    }

    pub fn quantity(&self, aliases: &[&str]) -> i64 {
        parse_quantity(self.lookup(aliases))
    }

    pub fn name(&self) -> String {
        self.text(aliases::NAME)
    }
}

/// First alias bound in `fields`, exact header match only
pub fn lookup<'a>(fields: &'a HashMap<String, String>, aliases: &[&str]) -> Option<&'a str> {
    aliases
        .iter()
        .find_map(|alias| fields.get(*alias))
        .map(String::as_str)
}

/// Trimmed text, absent → empty
pub fn normalize_text(value: Option<&str>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Decimal with thousands separators removed, anything unparsable → 0.0
pub fn parse_price(value: Option<&str>) -> f64 {
    parse_number(value).unwrap_or(0.0)
}

/// Whole units, fractional part truncated, anything unparsable → 0
pub fn parse_quantity(value: Option<&str>) -> i64 {
    parse_number(value).map(|n| n.trunc() as i64).unwrap_or(0)
}

fn parse_number(value: Option<&str>) -> Option<f64> {
    let cleaned = value?.trim().replace(',', "");
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> CatalogRecord {
        let mut record = CatalogRecord::new(RecordKey::Code("A1".to_string()));
        for (header, value) in pairs {
            record.insert(*header, *value);
        }
        record
    }

    #[test]
    fn test_lookup_takes_first_present_alias() {
        let r = record(&[("Giá", "10"), ("Giá bán", "20")]);
        assert_eq!(r.lookup(aliases::PRICE), Some("20"));
    }

    #[test]
    fn test_lookup_is_exact() {
        let r = record(&[("Giá bán lẻ", "10"), ("name", "lowercase")]);
        assert_eq!(r.lookup(aliases::PRICE), None);
        assert_eq!(r.lookup(aliases::NAME), None);
    }

    #[test]
    fn test_empty_and_zero_are_not_absent() {
        let r = record(&[("Tên SP", ""), ("Tồn HN", "0")]);
        assert_eq!(r.lookup(aliases::NAME), Some(""));
        assert_eq!(r.lookup(aliases::STOCK_HN), Some("0"));
        assert_eq!(r.lookup(aliases::STOCK_SG), None);
    }

    #[test]
    fn test_present_empty_alias_shadows_later_alias() {
        let r = record(&[("Tên SP", ""), ("Name", "Widget")]);
        assert_eq!(r.name(), "");
    }

    #[test]
    fn test_from_row_trims_headers_and_pads_values() {
        let r = CatalogRecord::from_row(
            RecordKey::Row {
                sheet: "CPU".to_string(),
                index: 1,
            },
            &[" Tên SP ", "Giá", "", "Tồn HN"],
            &["Ryzen 5", "3,500,000", "ignored"],
        );
        assert_eq!(r.name(), "Ryzen 5");
        assert_eq!(r.price(aliases::PRICE), 3_500_000.0);
        assert_eq!(r.lookup(aliases::STOCK_HN), Some(""));
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn test_repeated_header_keeps_first_column() {
        let r = CatalogRecord::from_row(
            RecordKey::Row {
                sheet: "CPU".to_string(),
                index: 1,
            },
            &["Tên SP", "Giá", " Giá "],
            &["Ryzen 5", "100", "999"],
        );
        assert_eq!(r.lookup(aliases::PRICE), Some("100"));
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn test_parse_price_defaults() {
        assert_eq!(parse_price(Some("1,250.5")), 1250.5);
        assert_eq!(parse_price(Some(" 99 ")), 99.0);
        assert_eq!(parse_price(Some("liên hệ")), 0.0);
        assert_eq!(parse_price(Some("nan")), 0.0);
        assert_eq!(parse_price(Some("")), 0.0);
        assert_eq!(parse_price(None), 0.0);
    }

    #[test]
    fn test_parse_quantity_truncates() {
        assert_eq!(parse_quantity(Some("5")), 5);
        assert_eq!(parse_quantity(Some("5.9")), 5);
        assert_eq!(parse_quantity(Some("1,200")), 1200);
        assert_eq!(parse_quantity(Some("n/a")), 0);
        assert_eq!(parse_quantity(None), 0);
    }

    #[test]
    fn test_record_key_display() {
        assert_eq!(RecordKey::Code("SP01".to_string()).to_string(), "SP01");
        assert_eq!(
            RecordKey::Row {
                sheet: "RAM".to_string(),
                index: 3
            }
            .to_string(),
            "RAM row 3"
        );
    }
}
