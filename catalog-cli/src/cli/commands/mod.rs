//! Subcommands

pub mod diff;
pub mod import;

pub use diff::DiffCommands;
pub use import::ImportCommands;
