//! CLI command implementations

use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader, InputLine};
use crate::progress::ProgressReporter;
use anyhow::Result;
use clap::Subcommand;
use fvsort_core::SiteAlphabet;
use std::path::{Path, PathBuf};

pub mod generate_config;
pub mod order;
pub mod recalculate;
pub mod sort;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the custom order string of each input line
    Order(order::OrderArgs),

    /// Sort input lines by the site alphabet
    Sort(sort::SortArgs),

    /// Recalculate titles and custom orders, reporting what changed
    Recalculate(recalculate::RecalculateArgs),

    /// Validate a site configuration file
    Validate(validate::ValidateArgs),

    /// Generate a site configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self, quiet: bool) -> Result<()> {
        match self {
            Commands::Order(args) => args.execute(quiet),
            Commands::Sort(args) => args.execute(quiet),
            Commands::Recalculate(args) => args.execute(quiet),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

/// Lines read from one input file
#[derive(Debug)]
pub struct InputFile {
    pub path: PathBuf,
    pub lines: Vec<InputLine>,
}

/// Load a site configuration and build its processors
pub fn load_site(path: &Path) -> Result<SiteAlphabet> {
    let site = SiteAlphabet::from_file(path)
        .map_err(|e| CliError::ConfigError(format!("{}: {}", path.display(), e)))?;
    log::info!("Loaded site {} ({})", site.code(), site.name());
    Ok(site)
}

/// Read every file matching `patterns`, reporting progress on stderr
pub fn read_inputs(patterns: &[String], quiet: bool) -> Result<Vec<InputFile>> {
    let paths = resolve_patterns(patterns)?;
    log::info!("Reading {} input file(s)", paths.len());

    let mut progress = ProgressReporter::new(quiet);
    progress.init_files(paths.len() as u64);

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let lines = FileReader::read_lines(&path)?;
        log::debug!("{}: {} lines", path.display(), lines.len());
        progress.file_completed(&path.display().to_string());
        files.push(InputFile { path, lines });
    }

    progress.finish();
    Ok(files)
}
