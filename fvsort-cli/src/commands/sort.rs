//! Sort command implementation

use super::{load_site, read_inputs};
use crate::output::{create_formatter, OutputFormat};
use anyhow::Result;
use clap::Args;
use std::collections::HashSet;
use std::path::PathBuf;

/// Arguments for the sort command
#[derive(Debug, Args)]
pub struct SortArgs {
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

    /// Print the custom order after each entry in text output
    #[arg(long)]
    pub show_order: bool,

    /// Drop entries whose cleaned title repeats an earlier one
    #[arg(long)]
    pub unique: bool,
}

impl SortArgs {
    /// Execute the sort command
    pub fn execute(&self, quiet: bool) -> Result<()> {
        let site = load_site(&self.config)?;
        let files = read_inputs(&self.input, quiet)?;

        let mut titles: Vec<String> = files
            .iter()
            .flat_map(|file| &file.lines)
            .map(|line| site.clean_confusables(line.text.trim()))
            .collect();

        site.sort_entries(&mut titles, |title| title.as_str());
        if self.unique {
            let mut seen = HashSet::new();
            titles.retain(|title| seen.insert(title.clone()));
        }

        let mut formatter =
            create_formatter(self.format, self.output.as_deref(), self.show_order)?;
        for title in &titles {
            formatter.format_entry(title, &site.custom_order(title))?;
        }
        formatter.finish()?;

        log::info!("Sorted {} entries", titles.len());
        Ok(())
    }
}
