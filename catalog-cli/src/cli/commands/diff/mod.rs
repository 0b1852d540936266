//! `diff`: compare two CSV snapshots and optionally replay the changes

pub mod handler;

use std::path::PathBuf;

use clap::Args;

pub use handler::handle_diff_command;

#[derive(Args, Debug)]
pub struct DiffCommands {
    /// Baseline snapshot (before)
    pub baseline: PathBuf,

    /// Current snapshot (after)
    pub current: PathBuf,

    /// Write the differences to this CSV file
    pub output: Option<PathBuf>,

    /// Update changed products through the remote API
    #[arg(long)]
    pub update_api: bool,

    /// Skip the confirmation before updating
    #[arg(short, long, requires = "update_api")]
    pub yes: bool,
}
