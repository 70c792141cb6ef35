//! File reading utilities

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// One non-blank line of an input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    /// 1-based line number within its file
    pub number: usize,
    /// Line text without trailing whitespace
    pub text: String,
}

/// File reader with UTF-8 validation
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Read the non-blank lines of a file
    ///
    /// A leading byte order mark is dropped. Leading whitespace is kept so
    /// tab-separated columns stay aligned.
    pub fn read_lines(path: &Path) -> Result<Vec<InputLine>> {
        let content = Self::read_text(path)?;
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

        Ok(content
            .lines()
            .enumerate()
            .filter_map(|(index, line)| {
                let text = line.trim_end();
                (!text.trim_start().is_empty()).then(|| InputLine {
                    number: index + 1,
                    text: text.to_string(),
                })
            })
            .collect())
    }
}
