//! Recalculate command implementation

use super::{load_site, read_inputs, InputFile};
use crate::error::CliError;
use crate::output::open_writer;
use anyhow::{Context, Result};
use clap::Args;
use fvsort_core::recalculate::{recalculate_with_entries, Entry, RecalculationReport};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the recalculate command
#[derive(Debug, Args)]
pub struct RecalculateArgs {
    /// Site configuration file
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,

    /// Input files or patterns (supports glob); each line holds a title,
    /// optionally followed by a tab and its stored custom order
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file for the JSON report (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Number of worker threads (default: number of CPUs)
    #[arg(short, long, value_name = "N", env = "FVSORT_THREADS")]
    pub threads: Option<usize>,

    /// Include every recalculated entry in the report
    #[arg(long)]
    pub with_entries: bool,
}

/// JSON document written by the command
#[derive(Debug, Serialize)]
struct RecalculationOutput<'a> {
    #[serde(flatten)]
    report: &'a RecalculationReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    entries: Option<&'a [Entry]>,
}

/// Parse `title[\tcustom_order]`
fn parse_entry(text: &str) -> std::result::Result<Entry, String> {
    match text.split_once('\t') {
        Some((title, custom_order)) => {
            let title = title.trim();
            if title.is_empty() {
                return Err("empty title".to_string());
            }
            Ok(Entry::with_custom_order(title, custom_order.trim()))
        }
        None => Ok(Entry::new(text.trim())),
    }
}

fn collect_entries(files: &[InputFile]) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for file in files {
        for line in &file.lines {
            let entry = parse_entry(&line.text).map_err(|message| CliError::InvalidLine {
                line: line.number,
                message: format!("{} ({})", message, file.path.display()),
            })?;
            entries.push(entry);
        }
    }
    Ok(entries)
}

impl RecalculateArgs {
    /// Execute the recalculate command
    pub fn execute(&self, quiet: bool) -> Result<()> {
        let site = load_site(&self.config)?;
        let files = read_inputs(&self.input, quiet)?;
        let entries = collect_entries(&files)?;

        let threads = self.threads.unwrap_or_else(num_cpus::get).max(1);
        log::debug!("Recalculating {} entries on {threads} threads", entries.len());
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to build thread pool")?;

        let (report, recalculated) = pool.install(|| recalculate_with_entries(&site, &entries));

        let output = RecalculationOutput {
            report: &report,
            entries: self.with_entries.then_some(recalculated.as_slice()),
        };
        let mut writer = open_writer(self.output.as_deref())?;
        serde_json::to_writer_pretty(&mut writer, &output)?;
        writeln!(writer)?;
        writer.flush()?;

        if !report.unknown_character_count.is_empty() {
            log::warn!(
                "{} unknown characters found: {}",
                report.unknown_character_count.len(),
                report
                    .unknown_character_count
                    .keys()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(" ")
            );
        }
        Ok(())
    }
}
