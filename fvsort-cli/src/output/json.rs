//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use fvsort_core::has_unknown_characters;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - outputs entries as JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    entries: Vec<EntryData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct EntryData {
    /// The entry title after confusable cleanup
    pub title: String,
    /// Custom order string
    pub custom_order: String,
    /// Whether the title contains characters outside the alphabet
    pub has_unknown_characters: bool,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            entries: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_entry(&mut self, title: &str, custom_order: &str) -> Result<()> {
        self.entries.push(EntryData {
            title: title.to_string(),
            custom_order: custom_order.to_string(),
            has_unknown_characters: has_unknown_characters(custom_order),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.entries)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_array() {
        let mut formatter = JsonFormatter::new(Vec::new());
        formatter.format_entry("ab", "!#").unwrap();
        formatter.format_entry("ad", "!⚑d").unwrap();
        formatter.finish().unwrap();

        let parsed: Vec<EntryData> = serde_json::from_slice(&formatter.writer).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].title, "ab");
        assert!(!parsed[0].has_unknown_characters);
        assert_eq!(parsed[1].custom_order, "!⚑d");
        assert!(parsed[1].has_unknown_characters);
    }

    #[test]
    fn test_json_empty() {
        let mut formatter = JsonFormatter::new(Vec::new());
        formatter.finish().unwrap();
        assert_eq!(String::from_utf8(formatter.writer).unwrap().trim(), "[]");
    }
}
