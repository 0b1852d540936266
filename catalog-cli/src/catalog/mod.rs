//! Catalog data: records, workbook and snapshot loading, diffing, reports

pub mod aliases;
pub mod diff;
pub mod record;
pub mod report;
pub mod snapshot;
pub mod workbook;

pub use diff::{DiffCounts, DiffEntry, diff_snapshots};
pub use snapshot::read_snapshot;
pub use workbook::read_workbook;
