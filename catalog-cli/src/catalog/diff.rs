//! Snapshot diffing
//!
//! Classifies every product code of two snapshots as new, changed, removed
//! or unchanged. Only name, price and the two regional stock counts are
//! compared; other columns never produce a change.

use std::fmt;

use super::aliases;
use super::record::CatalogRecord;
use super::snapshot::Snapshot;

/// Compared field, displayed by its report label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangedField {
    Price,
    StockHn,
    StockSg,
    Name,
}

impl ChangedField {
    /// Comparison order, also the order labels appear in a status
    pub const ALL: [ChangedField; 4] = [
        ChangedField::Price,
        ChangedField::StockHn,
        ChangedField::StockSg,
        ChangedField::Name,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChangedField::Price => "Giá",
            ChangedField::StockHn => "Tồn HN",
            ChangedField::StockSg => "Tồn SG",
            ChangedField::Name => "Tên SP",
        }
    }

    #[cfg(test)]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label() == label.trim())
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            ChangedField::Price => aliases::SNAPSHOT_PRICE,
            ChangedField::StockHn => aliases::STOCK_HN,
            ChangedField::StockSg => aliases::STOCK_SG,
            ChangedField::Name => aliases::NAME,
        }
    }
}

/// Classification of a diff entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffKind {
    New,
    Changed(Vec<ChangedField>),
    Removed,
}

const STATUS_NEW: &str = "MỚI";
const STATUS_REMOVED: &str = "ĐÃ XÓA";
const STATUS_CHANGED_PREFIX: &str = "THAY ĐỔI";

impl DiffKind {
    /// Status label as written to reports
    pub fn status_label(&self) -> String {
        match self {
            DiffKind::New => STATUS_NEW.to_string(),
            DiffKind::Removed => STATUS_REMOVED.to_string(),
            DiffKind::Changed(fields) => {
                let labels: Vec<&str> = fields.iter().map(ChangedField::label).collect();
                format!("{}: {}", STATUS_CHANGED_PREFIX, labels.join(", "))
            }
        }
    }

    #[cfg(test)]
    pub fn parse_status(label: &str) -> Option<Self> {
        let label = label.trim();
        match label {
            STATUS_NEW => return Some(DiffKind::New),
            STATUS_REMOVED => return Some(DiffKind::Removed),
            _ => {}
        }

        let rest = label.strip_prefix(STATUS_CHANGED_PREFIX)?;
        let rest = rest.trim_start().strip_prefix(':')?;
        let fields = rest
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(ChangedField::from_label)
            .collect::<Option<Vec<_>>>()?;
        Some(DiffKind::Changed(fields))
    }

    pub fn is_changed(&self) -> bool {
        matches!(self, DiffKind::Changed(_))
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status_label())
    }
}

/// Old/new pair of a compared value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueChange {
    pub old: String,
    pub new: String,
}

impl ValueChange {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }

    pub fn differs(&self) -> bool {
        self.old != self.new
    }
}

/// One difference between two snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    pub code: String,
    /// Current name, or the baseline name of a removed product
    pub name: String,
    /// Baseline name of a changed product, empty otherwise
    pub old_name: String,
    pub kind: DiffKind,
    pub price: ValueChange,
    pub stock_hn: ValueChange,
    pub stock_sg: ValueChange,
}

impl DiffEntry {
    /// Name the remote catalog still knows this product under
    pub fn search_name(&self) -> &str {
        if self.old_name.is_empty() {
            &self.name
        } else {
            &self.old_name
        }
    }

    pub fn is_renamed(&self) -> bool {
        !self.old_name.is_empty() && self.old_name != self.name
    }
}

fn field_value(record: &CatalogRecord, field: ChangedField) -> String {
    record.text(field.aliases())
}

/// Diff `current` against `baseline`.
///
/// New and changed entries follow the order of `current`, removed entries
/// follow the order of `baseline` and come last.
pub fn diff_snapshots(baseline: &Snapshot, current: &Snapshot) -> Vec<DiffEntry> {
    let mut differences = Vec::new();

    for (code, after) in current.iter() {
        match baseline.get(code) {
            None => differences.push(DiffEntry {
                code: code.to_string(),
                name: field_value(after, ChangedField::Name),
                old_name: String::new(),
                kind: DiffKind::New,
                price: ValueChange::new("", field_value(after, ChangedField::Price)),
                stock_hn: ValueChange::new("", field_value(after, ChangedField::StockHn)),
                stock_sg: ValueChange::new("", field_value(after, ChangedField::StockSg)),
            }),
            Some(before) => {
                let changed: Vec<ChangedField> = ChangedField::ALL
                    .into_iter()
                    .filter(|f| field_value(before, *f) != field_value(after, *f))
                    .collect();

                if changed.is_empty() {
                    continue;
                }

                differences.push(DiffEntry {
                    code: code.to_string(),
                    name: field_value(after, ChangedField::Name),
                    old_name: field_value(before, ChangedField::Name),
                    kind: DiffKind::Changed(changed),
                    price: ValueChange::new(
                        field_value(before, ChangedField::Price),
                        field_value(after, ChangedField::Price),
                    ),
                    stock_hn: ValueChange::new(
                        field_value(before, ChangedField::StockHn),
                        field_value(after, ChangedField::StockHn),
                    ),
                    stock_sg: ValueChange::new(
                        field_value(before, ChangedField::StockSg),
                        field_value(after, ChangedField::StockSg),
                    ),
                });
            }
        }
    }

    for (code, before) in baseline.iter() {
        if current.contains(code) {
            continue;
        }
        differences.push(DiffEntry {
            code: code.to_string(),
            name: field_value(before, ChangedField::Name),
            old_name: String::new(),
            kind: DiffKind::Removed,
            price: ValueChange::new(field_value(before, ChangedField::Price), ""),
            stock_hn: ValueChange::new(field_value(before, ChangedField::StockHn), ""),
            stock_sg: ValueChange::new(field_value(before, ChangedField::StockSg), ""),
        });
    }

    differences
}

/// Entry counts per classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffCounts {
    pub new: usize,
    pub changed: usize,
    pub removed: usize,
}

impl DiffCounts {
    pub fn of(entries: &[DiffEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut counts, entry| {
            match entry.kind {
                DiffKind::New => counts.new += 1,
                DiffKind::Changed(_) => counts.changed += 1,
                DiffKind::Removed => counts.removed += 1,
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.new + self.changed + self.removed
    }
}
