//! Text processors for one site's alphabet
//!
//! [`SiteAlphabet`] bundles everything a site needs to clean and sort its
//! entries: the confusable map, the variant-to-base rules, the collation
//! engine and a splitter that keeps variants and ignorables intact.

use crate::alphabet::Alphabet;
use crate::collation::{CollationEngine, SortKey, OOV_FLAG};
use crate::config::SiteConfig;
use crate::confusables::ConfusableMap;
use crate::error::Result;
use crate::tokenizer::GraphemeTokenizer;
use std::path::Path;

/// Alphabet-aware text processors for a site
#[derive(Debug)]
pub struct SiteAlphabet {
    code: String,
    name: String,
    /// Input-to-canonical substitutions
    confusables: ConfusableMap,
    /// Variant-to-base substitutions, base characters mapped to themselves
    presort: ConfusableMap,
    sorter: CollationEngine,
    /// Recognises base characters, variants and ignorables
    splitter: GraphemeTokenizer,
}

impl SiteAlphabet {
    /// Build the processors from their parts
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        alphabet: Alphabet,
        ignorables: Vec<String>,
        confusables: ConfusableMap,
    ) -> Result<Self> {
        let code = code.into();
        if confusables.is_empty() {
            log::warn!("Empty confusable map for site {code}");
        }

        let presort = ConfusableMap::from_pairs(
            alphabet
                .graphemes()
                .iter()
                .skip(1)
                .map(|base| (base.as_str(), base.as_str()))
                .chain(alphabet.variants()),
        )?;

        let splitter = GraphemeTokenizer::new(
            alphabet
                .entries()
                .chain(ignorables.iter().map(String::as_str)),
        )?;
        let sorter = CollationEngine::new(alphabet, ignorables)?;

        Ok(Self {
            code,
            name: name.into(),
            confusables,
            presort,
            sorter,
            splitter,
        })
    }

    /// Build the processors from a validated configuration
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        Self::new(
            config.metadata.code.clone(),
            config.metadata.name.clone(),
            config.alphabet()?,
            config.ignorable_characters().map(str::to_string).collect(),
            config.confusable_map()?,
        )
    }

    /// Load a configuration file and build the processors
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_config(&SiteConfig::from_file(path)?)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The collation engine used for custom orders
    pub fn sorter(&self) -> &CollationEngine {
        &self.sorter
    }

    pub fn confusables(&self) -> &ConfusableMap {
        &self.confusables
    }

    /// Rewrite confusables to canonical characters or variants
    ///
    /// Text is returned unchanged when the site has no confusables.
    pub fn clean_confusables(&self, text: &str) -> String {
        if self.confusables.is_empty() {
            return text.to_string();
        }
        self.confusables.apply(text)
    }

    /// Replace every variant with its base character
    pub fn base_form(&self, text: &str) -> String {
        self.presort.apply(text)
    }

    /// Custom order string following the site alphabet
    ///
    /// Variants are replaced by their base character before collation, so a
    /// variant can complete a digraph. Ignorables are skipped.
    pub fn custom_order(&self, text: &str) -> String {
        self.sorter.to_custom_order_string(&self.base_form(text))
    }

    /// Rank sequence of the base form of `text`
    pub fn numerical_sort_form(&self, text: &str) -> SortKey {
        self.sorter.rank_word(&self.base_form(text))
    }

    /// Characters of `text` as written: variants and ignorables are kept,
    /// unknown characters stand alone
    pub fn character_list(&self, text: &str) -> Vec<String> {
        self.splitter
            .tokenize(text)
            .map(str::to_string)
            .collect()
    }

    /// Sort `items` by the custom order of the text each one projects to
    pub fn sort_entries<T, F>(&self, items: &mut [T], text: F)
    where
        F: Fn(&T) -> &str,
    {
        items.sort_by_cached_key(|item| self.numerical_sort_form(text(item)));
    }
}

/// True when a custom order string contains an unknown character
pub fn has_unknown_characters(custom_order: &str) -> bool {
    custom_order.contains(OOV_FLAG)
}
