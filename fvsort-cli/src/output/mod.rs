//! Output formatting module

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single entry with its custom order
    fn format_entry(&mut self, title: &str, custom_order: &str) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One entry per line
    Text,
    /// JSON array of entries with their custom orders
    Json,
    /// Markdown table
    Markdown,
}

/// Writer for `path`, or stdout when no path is given
pub fn open_writer(path: Option<&Path>) -> Result<Box<dyn Write + Send + Sync>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

/// Build the formatter for `format`
///
/// `show_order` only affects text output; the other formats always carry
/// the custom order.
pub fn create_formatter(
    format: OutputFormat,
    output: Option<&Path>,
    show_order: bool,
) -> Result<Box<dyn OutputFormatter>> {
    let writer = open_writer(output)?;
    Ok(match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer, show_order)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_formatter_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.json");

        let mut formatter = create_formatter(OutputFormat::Json, Some(&path), false).unwrap();
        formatter.format_entry("ab", "!#").unwrap();
        formatter.finish().unwrap();
        drop(formatter);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"custom_order\": \"!#\""));
    }

    #[test]
    fn test_open_writer_bad_path() {
        let result = open_writer(Some(Path::new("/nonexistent/dir/out.txt")));
        let err = result.err().unwrap();
        assert!(err.to_string().contains("Failed to create output file"));
    }
}
