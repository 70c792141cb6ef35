//! Site alphabet configuration
//!
//! This module defines the TOML schema describing one site's alphabet:
//! characters in sort order with their variants and confusables, the
//! ignorable characters, and explicit confusable substitutions.

use crate::alphabet::{Alphabet, SPACE};
use crate::collation::MAX_ALPHABET_LENGTH;
use crate::confusables::{ConfusableMap, ConfusablePair};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Example configuration shipped with the crate
pub const EXAMPLE_CONFIG: &str = include_str!("../configs/example-site.toml");

/// Root site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub metadata: Metadata,
    #[serde(default)]
    pub ignorables: Ignorables,
    #[serde(default)]
    pub characters: Vec<CharacterConfig>,
    /// Explicit substitutions, applied in addition to per-character confusables
    #[serde(default)]
    pub confusables: Vec<ConfusablePair>,
}

/// Site metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub code: String,
    pub name: String,
}

/// Characters removed before sorting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ignorables {
    #[serde(default)]
    pub chars: Vec<String>,
}

/// One alphabet character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterConfig {
    pub title: String,
    /// Alternate spellings that sort as this character
    #[serde(default)]
    pub variants: Vec<String>,
    /// Input forms rewritten to this character before sorting
    #[serde(default)]
    pub confusables: Vec<String>,
}

impl SiteConfig {
    /// Parse and validate a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content)
            .map_err(|e| Error::Configuration(format!("Failed to parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("Failed to read file '{}': {}", path.display(), e))
        })?;

        let config: SiteConfig = toml::from_str(&content).map_err(|e| {
            Error::Configuration(format!(
                "Failed to parse TOML from '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// The bundled example configuration
    pub fn example() -> Result<Self> {
        Self::from_toml_str(EXAMPLE_CONFIG)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self)
            .map_err(|e| Error::Configuration(format!("Failed to serialize TOML: {e}")))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.metadata.code.trim().is_empty() {
            return Err(Error::Configuration("Site code must not be empty".to_string()));
        }

        // Alphabet length counts the implicit space
        let alphabet_length = self.characters.len() + 1;
        if alphabet_length > MAX_ALPHABET_LENGTH {
            return Err(Error::Configuration(format!(
                "Too many characters: {} (max {})",
                self.characters.len(),
                MAX_ALPHABET_LENGTH - 1
            )));
        }

        let mut titles: HashSet<&str> = HashSet::new();
        titles.insert(SPACE);
        let all_titles = self
            .characters
            .iter()
            .flat_map(|c| std::iter::once(&c.title).chain(c.variants.iter()))
            .chain(self.ignorables.chars.iter());
        for title in all_titles {
            if title.is_empty() {
                return Err(Error::Configuration(
                    "Character titles must not be empty".to_string(),
                ));
            }
            if !titles.insert(title.as_str()) {
                return Err(Error::Configuration(format!(
                    "The title {title:?} is used more than once"
                )));
            }
        }

        for pair in &self.confusables {
            if pair.input.is_empty() {
                return Err(Error::Configuration(format!(
                    "Confusable with output {:?} has an empty input",
                    pair.output
                )));
            }
        }

        Ok(())
    }

    /// Base character titles in sort order
    pub fn base_characters(&self) -> impl Iterator<Item = &str> + '_ {
        self.characters.iter().map(|c| c.title.as_str())
    }

    /// `(variant, base)` pairs
    pub fn variant_characters(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.characters.iter().flat_map(|c| {
            c.variants
                .iter()
                .map(move |variant| (variant.as_str(), c.title.as_str()))
        })
    }

    pub fn ignorable_characters(&self) -> impl Iterator<Item = &str> + '_ {
        self.ignorables.chars.iter().map(String::as_str)
    }

    /// Build the alphabet with its variant aliases
    pub fn alphabet(&self) -> Result<Alphabet> {
        Alphabet::with_variants(self.base_characters(), self.variant_characters())
    }

    /// Build the input-to-canonical confusable map
    ///
    /// Explicit substitutions come first; per-character confusables are then
    /// added unless an explicit rule already covers the same input.
    pub fn confusable_map(&self) -> Result<ConfusableMap> {
        let canonical: HashSet<String> = self
            .base_characters()
            .chain(self.variant_characters().map(|(variant, _)| variant))
            .map(str::to_string)
            .collect();
        let ignorables: HashSet<String> =
            self.ignorable_characters().map(str::to_string).collect();

        let sourced = ConfusableMap::from_sources(
            &canonical,
            &ignorables,
            self.characters
                .iter()
                .map(|c| (c.title.as_str(), c.confusables.as_slice())),
        )?;

        let mut map = ConfusableMap::new();
        for pair in self.confusables.iter().chain(sourced.pairs()) {
            map.insert(pair.input.clone(), pair.output.clone())?;
        }
        Ok(map)
    }
}
