//! Error types for alphabet construction, configuration and decoding

use thiserror::Error;

/// Errors raised while building or using a collation engine
#[derive(Debug, Error)]
pub enum Error {
    /// The same grapheme appears twice among base characters, variants or ignorables
    #[error("duplicate grapheme in alphabet: {0:?}")]
    DuplicateGrapheme(String),

    /// An alphabet entry or variant is the empty string
    #[error("alphabet entries must not be empty")]
    EmptyGrapheme,

    /// A variant refers to a base character that is not in the alphabet
    #[error("variant {variant:?} refers to unknown base character {base:?}")]
    UnknownBaseCharacter {
        /// The variant grapheme
        variant: String,
        /// The base grapheme it was mapped to
        base: String,
    },

    /// The alphabet is so large its ranks would collide with out-of-vocabulary ranks
    #[error("alphabet has {length} entries, must stay below {limit}")]
    AlphabetOverflow {
        /// Number of entries including the prepended space
        length: usize,
        /// Exclusive upper bound
        limit: usize,
    },

    /// A confusable rule with an empty input string
    #[error("confusable input must not be empty (output {output:?})")]
    EmptyConfusable {
        /// The output the empty rule would have produced
        output: String,
    },

    /// A rank that was never produced by this engine
    #[error("unknown rank: {0}")]
    UnknownRank(u32),

    /// The grapheme splitter could not be compiled
    #[error("failed to build grapheme splitter: {0}")]
    Splitter(#[from] regex::Error),

    /// Configuration loading, parsing or validation error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for collation operations
pub type Result<T> = std::result::Result<T, Error>;
