//! Confusable-character normalization
//!
//! A [`ConfusableMap`] is a flat list of literal substitutions. Rules are
//! applied in a single left-to-right pass: at each position the longest
//! matching input wins, the replacement is emitted, and scanning resumes
//! after the matched span of the original text. Replacement output is never
//! rescanned, so one rule cannot feed another.

use crate::error::{Error, Result};
use crate::normalize::nfc;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Trie node keyed by character
#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    /// Replacement for the input ending at this node
    output: Option<String>,
}

/// A single literal substitution rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusablePair {
    /// Literal text to find
    #[serde(rename = "in")]
    pub input: String,
    /// Text to emit in its place
    #[serde(rename = "out")]
    pub output: String,
}

impl ConfusablePair {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// Ordered set of literal substitution rules with longest-match lookup
#[derive(Debug, Clone, Default)]
pub struct ConfusableMap {
    pairs: Vec<ConfusablePair>,
    root: TrieNode,
}

impl ConfusableMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from `(input, output)` pairs
    ///
    /// When an input is listed more than once the first rule is kept.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = Self::new();
        for (input, output) in pairs {
            map.insert(input, output)?;
        }
        Ok(map)
    }

    /// Build a map from per-character confusable lists
    ///
    /// Each source pairs a canonical character (or variant) with the
    /// confusables that should become it. Confusables are NFC-normalized.
    /// A confusable that is itself canonical or ignorable is skipped, and a
    /// confusable claimed by more than one canonical character is dropped.
    pub fn from_sources<'a, I>(
        canonical: &HashSet<String>,
        ignorables: &HashSet<String>,
        sources: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a [String])>,
    {
        let mut claimed: Vec<(String, String)> = Vec::new();
        let mut owned: HashSet<String> = HashSet::new();
        let mut duplicates: HashSet<String> = HashSet::new();

        for (target, confusables) in sources {
            let mut seen = HashSet::new();
            for confusable in confusables.iter().map(|c| nfc(c)) {
                if !seen.insert(confusable.clone()) {
                    continue;
                }
                if canonical.contains(&confusable) || ignorables.contains(&confusable) {
                    log::warn!(
                        "Skipping confusable {confusable:?}: same as a canonical or ignorable character"
                    );
                } else if !owned.insert(confusable.clone()) {
                    duplicates.insert(confusable);
                } else {
                    claimed.push((confusable, target.to_string()));
                }
            }
        }

        for duplicate in &duplicates {
            log::warn!("Removing confusable {duplicate:?}: claimed by more than one character");
        }

        Self::from_pairs(
            claimed
                .into_iter()
                .filter(|(confusable, _)| !duplicates.contains(confusable)),
        )
    }

    /// Add a rule; returns `false` when the input already has a rule
    pub fn insert(&mut self, input: impl Into<String>, output: impl Into<String>) -> Result<bool> {
        let input = input.into();
        let output = output.into();
        if input.is_empty() {
            return Err(Error::EmptyConfusable { output });
        }

        let mut current = &mut self.root;
        for ch in input.chars() {
            current = current.children.entry(ch).or_default();
        }
        if current.output.is_some() {
            return Ok(false);
        }
        current.output = Some(output.clone());
        self.pairs.push(ConfusablePair { input, output });
        Ok(true)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Rules in insertion order
    pub fn pairs(&self) -> &[ConfusablePair] {
        &self.pairs
    }

    /// Longest rule matching at the start of `text`: (matched byte length, output)
    fn longest_match<'m>(&'m self, text: &str) -> Option<(usize, &'m str)> {
        let mut current = &self.root;
        let mut best = None;

        for (offset, ch) in text.char_indices() {
            match current.children.get(&ch) {
                Some(node) => {
                    current = node;
                    if let Some(output) = &current.output {
                        best = Some((offset + ch.len_utf8(), output.as_str()));
                    }
                }
                None => break,
            }
        }

        best
    }

    /// Apply every rule in one pass without normalizing the result
    pub(crate) fn substitute(&self, text: &str) -> String {
        if self.is_empty() {
            return text.to_string();
        }

        let mut output = String::with_capacity(text.len());
        let mut position = 0;

        while position < text.len() {
            let rest = &text[position..];
            match self.longest_match(rest) {
                Some((length, replacement)) => {
                    output.push_str(replacement);
                    position += length;
                }
                None => {
                    // rest is non-empty, so there is a next char
                    let ch = rest.chars().next().unwrap_or_default();
                    output.push(ch);
                    position += ch.len_utf8();
                }
            }
        }

        output
    }

    /// Apply every rule in one pass and normalize the result to NFC
    pub fn apply(&self, text: &str) -> String {
        nfc(&self.substitute(text))
    }
}

/// Rewrite confusable substrings of `text` using `map`
pub fn normalize_confusables(text: &str, map: &ConfusableMap) -> String {
    map.apply(text)
}
