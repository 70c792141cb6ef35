//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - outputs one entry per line
///
/// With `show_order`, the custom order follows the title after a tab.
pub struct TextFormatter<W: Write> {
    writer: W,
    show_order: bool,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W, show_order: bool) -> Self {
        Self { writer, show_order }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_entry(&mut self, title: &str, custom_order: &str) -> Result<()> {
        if self.show_order {
            writeln!(self.writer, "{title}\t{custom_order}")?;
        } else {
            writeln!(self.writer, "{title}")?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
