//! Alphabet-aware grapheme splitting
//!
//! Entries are escaped and joined into one alternation, longest entry
//! first, so a digraph such as `ch` always wins over `c`. Text that matches
//! no entry is emitted one character at a time.

use crate::alphabet::Alphabet;
use crate::error::Result;
use regex::{Regex, RegexBuilder};

/// Compiled size limit for large alphabets
const SPLITTER_SIZE_LIMIT: usize = 64 * (1 << 20);

/// Splits text into alphabet graphemes
#[derive(Debug, Clone)]
pub struct GraphemeTokenizer {
    /// `None` when there is nothing to match
    splitter: Option<Regex>,
}

impl GraphemeTokenizer {
    /// Build a tokenizer recognising `entries`
    ///
    /// Empty entries are ignored. Matching is case-sensitive.
    pub fn new<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut entries: Vec<&str> = entries.into_iter().filter(|e| !e.is_empty()).collect();
        if entries.is_empty() {
            return Ok(Self { splitter: None });
        }

        // stable, so equal-length entries keep their given order
        entries.sort_by_key(|entry| std::cmp::Reverse(entry.chars().count()));

        let pattern = entries
            .iter()
            .map(|entry| regex::escape(entry))
            .collect::<Vec<_>>()
            .join("|");

        let splitter = RegexBuilder::new(&pattern)
            .size_limit(SPLITTER_SIZE_LIMIT)
            .build()?;

        Ok(Self {
            splitter: Some(splitter),
        })
    }

    /// Build a tokenizer for the base graphemes and variants of `alphabet`
    pub fn from_alphabet(alphabet: &Alphabet) -> Result<Self> {
        Self::new(alphabet.entries())
    }

    /// Split `word` into graphemes of `alphabet`
    pub fn split(word: &str, alphabet: &Alphabet) -> Result<Vec<String>> {
        let tokenizer = Self::from_alphabet(alphabet)?;
        Ok(tokenizer.tokenize(word).map(str::to_string).collect())
    }

    /// Lazily split `text`; the iterator can be cloned to restart from its current point
    pub fn tokenize<'t>(&'t self, text: &'t str) -> Graphemes<'t> {
        Graphemes {
            splitter: self.splitter.as_ref(),
            text,
            position: 0,
            next_match: None,
            exhausted: self.splitter.is_none(),
        }
    }
}

/// Iterator over the graphemes of a string
#[derive(Debug, Clone)]
pub struct Graphemes<'t> {
    splitter: Option<&'t Regex>,
    text: &'t str,
    /// Byte offset of the next grapheme
    position: usize,
    /// Next splitter match at or after `position`, as a byte range
    next_match: Option<(usize, usize)>,
    /// No further splitter matches exist
    exhausted: bool,
}

impl<'t> Graphemes<'t> {
    fn refresh_match(&mut self) {
        let stale = self
            .next_match
            .map_or(true, |(start, _)| start < self.position);
        if self.exhausted || !stale {
            return;
        }

        self.next_match = self
            .splitter
            .and_then(|splitter| splitter.find_at(self.text, self.position))
            .map(|m| (m.start(), m.end()));
        if self.next_match.is_none() {
            self.exhausted = true;
        }
    }
}

impl<'t> Iterator for Graphemes<'t> {
    type Item = &'t str;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.position;
        let ch = self.text[start..].chars().next()?;

        self.refresh_match();
        let end = match self.next_match {
            Some((match_start, match_end)) if match_start == start => match_end,
            _ => start + ch.len_utf8(),
        };

        self.position = end;
        Some(&self.text[start..end])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.text.len() - self.position;
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl std::iter::FusedIterator for Graphemes<'_> {}
