//! Custom-alphabet collation for community orthographies
//!
//! Many orthographies do not follow Unicode code point order: digraphs such
//! as `ch` or `kw` are single letters, some punctuation is ignored when
//! sorting, and visually similar characters typed from other keyboards need
//! to be folded into the canonical ones. This crate turns a site's alphabet
//! into sort keys and into printable custom order strings that sort
//! correctly with plain string comparison.
//!
//! # Architecture
//!
//! - [`confusables`]: flat, non-feeding, longest-first literal substitution
//! - [`tokenizer`]: longest-first grapheme splitting
//! - [`collation`]: rank assignment, out-of-vocabulary flagging and the
//!   custom order encoding
//! - [`config`] and [`site`]: TOML site configuration and the processors
//!   built from it
//! - [`recalculate`]: batch recalculation reports
//!
//! # Example
//!
//! ```rust
//! use fvsort_core::{Alphabet, CollationEngine};
//!
//! let alphabet = Alphabet::from_ordered_graphemes(["a", "b", "c"]).unwrap();
//! let sorter = CollationEngine::new(alphabet, Vec::<String>::new()).unwrap();
//!
//! assert_eq!(sorter.rank_word("ab abcd").as_slice(), &[1, 2, 0, 1, 2, 3, 10100]);
//! assert_eq!(sorter.to_custom_order_string("ab abcd"), "!# !#$⚑d");
//! ```

pub mod alphabet;
pub mod collation;
pub mod config;
pub mod confusables;
pub mod error;
pub mod normalize;
pub mod recalculate;
pub mod site;
pub mod tokenizer;

pub use alphabet::{Alphabet, SPACE};
pub use collation::{
    CollationEngine, CustomOrderTable, SortKey, MAX_ALPHABET_LENGTH, OOV_BASE, OOV_FLAG,
};
pub use config::{CharacterConfig, SiteConfig};
pub use confusables::{normalize_confusables, ConfusableMap, ConfusablePair};
pub use error::{Error, Result};
pub use normalize::{clean_input, nfc};
pub use recalculate::{recalculate, recalculate_entry, Entry, RecalculationReport, UpdatedEntry};
pub use site::{has_unknown_characters, SiteAlphabet};
pub use tokenizer::{GraphemeTokenizer, Graphemes};
