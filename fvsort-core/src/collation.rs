//! Custom-alphabet collation
//!
//! Words are split with a [`GraphemeTokenizer`] and each grapheme becomes an
//! integer rank: its alphabet position for known graphemes, or
//! [`OOV_BASE`] plus the code point for anything else. Comparing rank lists
//! lexicographically gives the alphabet order, with unknown characters after
//! every known one.
//!
//! Ranks can also be rendered as a custom order string in which every known
//! rank is a single printable character, so plain string comparison gives the
//! same order. Unknown characters are written as [`OOV_FLAG`] followed by the
//! character itself.

use crate::alphabet::Alphabet;
use crate::error::{Error, Result};
use crate::tokenizer::GraphemeTokenizer;
use smallvec::SmallVec;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::Range;
use std::sync::{Mutex, PoisonError};

/// First rank used for out-of-vocabulary characters
pub const OOV_BASE: u32 = 10_000;

/// Marker placed before out-of-vocabulary characters in custom order strings
pub const OOV_FLAG: char = '\u{2691}';

/// Rank sequence for one word
pub type SortKey = SmallVec<[u32; 16]>;

/// Basic Latin, space through tilde
const BASIC_LATIN: Range<u32> = 32..127;
/// Latin Extended-A and Latin Extended-B
const EXTENDED_LATIN: Range<u32> = 256..592;
/// Double quote and backslash would need escaping in exports
const EXCLUDED_CHARS: [char; 2] = ['"', '\\'];

/// Largest alphabet (including the space) with a distinct character per rank
pub const MAX_ALPHABET_LENGTH: usize = (BASIC_LATIN.end - BASIC_LATIN.start) as usize
    + (EXTENDED_LATIN.end - EXTENDED_LATIN.start) as usize
    - EXCLUDED_CHARS.len();

/// Mapping between known ranks and their custom order characters
#[derive(Debug, Clone)]
pub struct CustomOrderTable {
    chars: Vec<char>,
    index: HashMap<char, u32>,
    /// Number of known ranks, which may exceed `chars.len()`
    alphabet_length: usize,
}

impl CustomOrderTable {
    /// Build the table for an alphabet of `alphabet_length` ranks
    ///
    /// Alphabets larger than [`MAX_ALPHABET_LENGTH`] share the last table
    /// character for every rank past the capacity; a warning is logged.
    pub fn new(alphabet_length: usize) -> Self {
        if alphabet_length > MAX_ALPHABET_LENGTH {
            log::warn!(
                "Alphabet length ({alphabet_length}) exceeds possible custom order ({MAX_ALPHABET_LENGTH})"
            );
        }

        let chars: Vec<char> = BASIC_LATIN
            .chain(EXTENDED_LATIN)
            .filter_map(char::from_u32)
            .filter(|ch| !EXCLUDED_CHARS.contains(ch))
            .take(alphabet_length)
            .collect();
        let index = chars
            .iter()
            .enumerate()
            .map(|(rank, ch)| (*ch, rank as u32))
            .collect();

        Self {
            chars,
            index,
            alphabet_length,
        }
    }

    /// Character for a known rank
    pub fn encode(&self, rank: u32) -> Option<char> {
        let rank = rank as usize;
        if rank >= self.alphabet_length {
            return None;
        }
        self.chars
            .get(rank)
            .or_else(|| self.chars.last())
            .copied()
    }

    /// Rank for a table character
    pub fn decode(&self, ch: char) -> Option<u32> {
        self.index.get(&ch).copied()
    }

    /// Number of distinct table characters in use
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// True when some ranks share the final table character
    pub fn is_capped(&self) -> bool {
        self.alphabet_length > self.chars.len()
    }
}

/// Out-of-vocabulary characters seen by an engine, keyed by rank
#[derive(Debug, Default)]
struct OovRegistry {
    entries: Mutex<BTreeMap<u32, char>>,
}

impl OovRegistry {
    fn register(&self, ch: char) -> u32 {
        let rank = OOV_BASE + u32::from(ch);
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(rank)
            .or_insert(ch);
        rank
    }

    fn lookup(&self, rank: u32) -> Option<char> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&rank)
            .copied()
    }

    fn chars(&self) -> Vec<char> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .copied()
            .collect()
    }
}

/// One collated unit of a word
enum Unit {
    /// A grapheme found in the alphabet, with its rank
    Known(u32),
    /// A character outside the alphabet
    Unknown(char),
}

/// Assigns sort keys and custom order strings for one alphabet
#[derive(Debug)]
pub struct CollationEngine {
    alphabet: Alphabet,
    ignorable: HashSet<String>,
    tokenizer: GraphemeTokenizer,
    table: CustomOrderTable,
    oov: OovRegistry,
}

impl CollationEngine {
    /// Build an engine for `alphabet`, dropping `ignorable` graphemes
    pub fn new<I, S>(alphabet: Alphabet, ignorable: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ignorable: HashSet<String> = ignorable
            .into_iter()
            .map(Into::into)
            .filter(|g: &String| !g.is_empty())
            .collect();
        let tokenizer = GraphemeTokenizer::new(
            alphabet
                .entries()
                .chain(ignorable.iter().map(String::as_str)),
        )?;
        let table = CustomOrderTable::new(alphabet.len());

        log::debug!(
            "Built collation engine: {} ranks, {} variants, {} ignorables",
            alphabet.len(),
            alphabet.variants().count(),
            ignorable.len()
        );

        Ok(Self {
            alphabet,
            ignorable,
            tokenizer,
            table,
            oov: OovRegistry::default(),
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn ignorables(&self) -> &HashSet<String> {
        &self.ignorable
    }

    pub fn table(&self) -> &CustomOrderTable {
        &self.table
    }

    pub fn is_ignorable(&self, grapheme: &str) -> bool {
        self.ignorable.contains(grapheme)
    }

    /// Walk the collated units of `word`, registering unknown characters
    fn visit(&self, word: &str, mut visit: impl FnMut(Unit)) {
        for grapheme in self.tokenizer.tokenize(word) {
            if self.is_ignorable(grapheme) {
                continue;
            }
            if let Some(rank) = self.alphabet.rank_of(grapheme) {
                visit(Unit::Known(rank));
                continue;
            }
            for ch in grapheme.chars() {
                let mut buf = [0u8; 4];
                if self.is_ignorable(ch.encode_utf8(&mut buf)) {
                    continue;
                }
                self.oov.register(ch);
                visit(Unit::Unknown(ch));
            }
        }
    }

    /// Rank sequence for `word`
    pub fn rank_word(&self, word: &str) -> SortKey {
        let mut ranks = SortKey::new();
        self.visit(word, |unit| match unit {
            Unit::Known(rank) => ranks.push(rank),
            Unit::Unknown(ch) => ranks.push(OOV_BASE + u32::from(ch)),
        });
        ranks
    }

    /// Custom order string for `word`
    pub fn to_custom_order_string(&self, word: &str) -> String {
        let mut order = String::with_capacity(word.len());
        self.visit(word, |unit| match unit {
            Unit::Known(rank) => {
                if let Some(ch) = self.table.encode(rank) {
                    order.push(ch);
                }
            }
            Unit::Unknown(ch) => {
                order.push(OOV_FLAG);
                order.push(ch);
            }
        });
        order
    }

    /// Graphemes of `word` as they are collated: variants become their base,
    /// ignorables are dropped, unknown characters stand alone
    pub fn word_as_chars(&self, word: &str) -> Vec<String> {
        let mut chars = Vec::new();
        self.visit(word, |unit| match unit {
            Unit::Known(rank) => {
                if let Some(grapheme) = self.alphabet.grapheme(rank) {
                    chars.push(grapheme.to_string());
                }
            }
            Unit::Unknown(ch) => chars.push(ch.to_string()),
        });
        chars
    }

    /// Render one rank as it appears in a custom order string
    pub fn custom_sort_char(&self, rank: u32) -> Option<String> {
        if let Some(ch) = self.table.encode(rank) {
            return Some(ch.to_string());
        }
        if rank >= OOV_BASE {
            let ch = char::from_u32(rank - OOV_BASE)?;
            return Some([OOV_FLAG, ch].iter().collect());
        }
        None
    }

    /// Rank for a single custom order character of a known grapheme
    pub fn decode_custom_char(&self, ch: char) -> Option<u32> {
        self.table.decode(ch)
    }

    /// Turn ranks back into text
    ///
    /// Out-of-vocabulary ranks decode only once this engine has seen them.
    pub fn values_as_word(&self, values: &[u32]) -> Result<String> {
        let mut word = String::new();
        for &rank in values {
            if let Some(grapheme) = self.alphabet.grapheme(rank) {
                word.push_str(grapheme);
            } else if let Some(ch) = self.oov.lookup(rank) {
                word.push(ch);
            } else {
                return Err(Error::UnknownRank(rank));
            }
        }
        Ok(word)
    }

    /// Unknown characters encountered so far, in rank order
    pub fn registered_oov(&self) -> Vec<char> {
        self.oov.chars()
    }

    /// Sort `items` by the rank key of the text each one projects to
    pub fn sort_by_key<T, F>(&self, items: &mut [T], text: F)
    where
        F: Fn(&T) -> &str,
    {
        items.sort_by_cached_key(|item| self.rank_word(text(item)));
    }
}
