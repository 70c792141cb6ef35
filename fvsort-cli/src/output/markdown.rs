//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;

/// Markdown formatter - outputs entries as a markdown table
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    entry_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            entry_count: 0,
        }
    }
}

/// Escape table cell delimiters
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_entry(&mut self, title: &str, custom_order: &str) -> Result<()> {
        if self.entry_count == 0 {
            writeln!(self.writer, "| # | Title | Custom order |")?;
            writeln!(self.writer, "|---|-------|--------------|")?;
        }
        self.entry_count += 1;
        writeln!(
            self.writer,
            "| {} | {} | `{}` |",
            self.entry_count,
            cell(title),
            cell(custom_order)
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total entries: {}*", self.entry_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
