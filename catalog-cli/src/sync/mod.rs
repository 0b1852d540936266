//! Pipelines that push catalog data to the remote API

pub mod import;
pub mod payload;
pub mod replay;

#[cfg(test)]
pub(crate) mod fake;

pub use import::{ImportSummary, Importer, print_import_summary};
pub use replay::{ReplaySummary, Replayer, print_replay_summary};
