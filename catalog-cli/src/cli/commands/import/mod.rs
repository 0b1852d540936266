//! `import`: create products from a workbook

pub mod handler;

use std::path::PathBuf;

use clap::Args;

pub use handler::handle_import_command;

#[derive(Args, Debug)]
pub struct ImportCommands {
    /// Workbook to import; every sheet is read and its name becomes the product tag
    #[arg(default_value = "product.xlsx")]
    pub workbook: PathBuf,
}
