//! Order command implementation

use super::{load_site, read_inputs};
use crate::output::{create_formatter, OutputFormat};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the order command
#[derive(Debug, Args)]
pub struct OrderArgs {
    /// Site configuration file
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,

    /// Input files or patterns (supports glob), one entry per line
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl OrderArgs {
    /// Execute the order command
    pub fn execute(&self, quiet: bool) -> Result<()> {
        let site = load_site(&self.config)?;
        let files = read_inputs(&self.input, quiet)?;
        let mut formatter = create_formatter(self.format, self.output.as_deref(), true)?;

        let mut count = 0;
        for line in files.iter().flat_map(|file| &file.lines) {
            let title = site.clean_confusables(line.text.trim());
            let custom_order = site.custom_order(&title);
            formatter.format_entry(&title, &custom_order)?;
            count += 1;
        }
        formatter.finish()?;

        log::info!("Computed custom orders for {count} entries");
        Ok(())
    }
}
