//! Ordered alphabets with variant aliases
//!
//! The position of a grapheme in the alphabet is its rank. A space is
//! always prepended at rank 0 so whitespace sorts before every letter.
//! Variants (for example upper-case forms) share the rank of their base
//! character.

use crate::collation::OOV_BASE;
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Grapheme implicitly placed at rank 0
pub const SPACE: &str = " ";

/// Ordered alphabet of graphemes plus variant aliases
#[derive(Debug, Clone)]
pub struct Alphabet {
    /// Base graphemes in rank order, space first
    graphemes: Vec<String>,
    /// Variant graphemes and the rank of their base character
    variants: Vec<(String, u32)>,
    /// Rank lookup covering both base graphemes and variants
    ranks: HashMap<String, u32>,
}

impl Alphabet {
    /// Build an alphabet from graphemes listed in sort order
    pub fn from_ordered_graphemes<I, S>(graphemes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered = vec![SPACE.to_string()];
        ordered.extend(graphemes.into_iter().map(Into::into));

        if ordered.len() >= OOV_BASE as usize {
            return Err(Error::AlphabetOverflow {
                length: ordered.len(),
                limit: OOV_BASE as usize,
            });
        }

        let mut ranks = HashMap::with_capacity(ordered.len());
        for (rank, grapheme) in ordered.iter().enumerate() {
            if grapheme.is_empty() {
                return Err(Error::EmptyGrapheme);
            }
            if ranks.insert(grapheme.clone(), rank as u32).is_some() {
                return Err(Error::DuplicateGrapheme(grapheme.clone()));
            }
        }

        Ok(Self {
            graphemes: ordered,
            variants: Vec::new(),
            ranks,
        })
    }

    /// Build an alphabet with `(variant, base)` aliases
    ///
    /// Every base must already be an alphabet entry. Variants may not repeat
    /// a base grapheme or another variant.
    pub fn with_variants<I, G, J, V, B>(graphemes: I, variants: J) -> Result<Self>
    where
        I: IntoIterator<Item = G>,
        G: Into<String>,
        J: IntoIterator<Item = (V, B)>,
        V: Into<String>,
        B: AsRef<str>,
    {
        let mut alphabet = Self::from_ordered_graphemes(graphemes)?;
        for (variant, base) in variants {
            alphabet.add_variant(variant.into(), base.as_ref())?;
        }
        Ok(alphabet)
    }

    fn add_variant(&mut self, variant: String, base: &str) -> Result<()> {
        if variant.is_empty() {
            return Err(Error::EmptyGrapheme);
        }
        let rank = self
            .graphemes
            .iter()
            .position(|g| g == base)
            .ok_or_else(|| Error::UnknownBaseCharacter {
                variant: variant.clone(),
                base: base.to_string(),
            })? as u32;

        if self.ranks.contains_key(&variant) {
            return Err(Error::DuplicateGrapheme(variant));
        }
        self.ranks.insert(variant.clone(), rank);
        self.variants.push((variant, rank));
        Ok(())
    }

    /// Number of ranked graphemes, counting the prepended space
    pub fn len(&self) -> usize {
        self.graphemes.len()
    }

    /// True when the alphabet holds nothing beyond the implicit space
    pub fn is_empty(&self) -> bool {
        self.graphemes.len() <= 1
    }

    /// Rank of a base grapheme or variant
    pub fn rank_of(&self, grapheme: &str) -> Option<u32> {
        self.ranks.get(grapheme).copied()
    }

    /// Base grapheme at `rank`
    pub fn grapheme(&self, rank: u32) -> Option<&str> {
        self.graphemes.get(rank as usize).map(String::as_str)
    }

    /// Base graphemes in rank order, starting with the space
    pub fn graphemes(&self) -> &[String] {
        &self.graphemes
    }

    /// Variant graphemes paired with their base grapheme
    pub fn variants(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.variants
            .iter()
            .map(|(variant, rank)| (variant.as_str(), self.graphemes[*rank as usize].as_str()))
    }

    /// Every string the tokenizer should recognise: base graphemes then variants
    pub fn entries(&self) -> impl Iterator<Item = &str> + '_ {
        self.graphemes
            .iter()
            .map(String::as_str)
            .chain(self.variants.iter().map(|(variant, _)| variant.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_is_rank_zero() {
        let alphabet = Alphabet::from_ordered_graphemes(["a", "b", "c"]).unwrap();
        assert_eq!(alphabet.len(), 4);
        assert_eq!(alphabet.rank_of(" "), Some(0));
        assert_eq!(alphabet.rank_of("a"), Some(1));
        assert_eq!(alphabet.rank_of("c"), Some(3));
        assert_eq!(alphabet.grapheme(2), Some("b"));
        assert_eq!(alphabet.grapheme(4), None);
    }

    #[test]
    fn test_empty_alphabet_keeps_space() {
        let alphabet = Alphabet::from_ordered_graphemes(Vec::<String>::new()).unwrap();
        assert!(alphabet.is_empty());
        assert_eq!(alphabet.len(), 1);
        assert_eq!(alphabet.graphemes(), &[" ".to_string()]);
    }

    #[test]
    fn test_duplicates_rejected() {
        let result = Alphabet::from_ordered_graphemes(["a", "b", "a"]);
        assert!(matches!(result, Err(Error::DuplicateGrapheme(g)) if g == "a"));

        // the implicit space cannot be listed again
        let result = Alphabet::from_ordered_graphemes([" ", "a"]);
        assert!(matches!(result, Err(Error::DuplicateGrapheme(g)) if g == " "));
    }

    #[test]
    fn test_empty_grapheme_rejected() {
        let result = Alphabet::from_ordered_graphemes(["a", ""]);
        assert!(matches!(result, Err(Error::EmptyGrapheme)));
    }

    #[test]
    fn test_variants_share_base_rank() {
        let alphabet =
            Alphabet::with_variants(["a", "b"], [("A", "a"), ("ᐱ", "a"), ("B", "b")]).unwrap();
        assert_eq!(alphabet.rank_of("A"), Some(1));
        assert_eq!(alphabet.rank_of("ᐱ"), Some(1));
        assert_eq!(alphabet.rank_of("B"), Some(2));
        // variants do not add ranks
        assert_eq!(alphabet.len(), 3);

        let variants: Vec<_> = alphabet.variants().collect();
        assert_eq!(variants, vec![("A", "a"), ("ᐱ", "a"), ("B", "b")]);

        let entries: Vec<_> = alphabet.entries().collect();
        assert_eq!(entries, vec![" ", "a", "b", "A", "ᐱ", "B"]);
    }

    #[test]
    fn test_variant_errors() {
        let result = Alphabet::with_variants(["a"], [("A", "z")]);
        assert!(matches!(result, Err(Error::UnknownBaseCharacter { .. })));

        let result = Alphabet::with_variants(["a", "b"], [("b", "a")]);
        assert!(matches!(result, Err(Error::DuplicateGrapheme(g)) if g == "b"));

        let result = Alphabet::with_variants(["a"], [("A", "a"), ("A", "a")]);
        assert!(matches!(result, Err(Error::DuplicateGrapheme(g)) if g == "A"));
    }

    #[test]
    fn test_overflow_rejected() {
        let graphemes: Vec<String> = (0..OOV_BASE).map(|i| format!("g{i}")).collect();
        let result = Alphabet::from_ordered_graphemes(graphemes);
        assert!(matches!(result, Err(Error::AlphabetOverflow { .. })));
    }
}
