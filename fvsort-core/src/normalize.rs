//! Unicode normalization helpers
//!
//! Every string stored alongside a custom order is expected to be in NFC.

use unicode_normalization::UnicodeNormalization;

/// Normalize text to NFC by decomposing then recomposing
pub fn nfc(text: &str) -> String {
    text.nfd().nfc().collect()
}

/// Strip surrounding whitespace and normalize to NFC
///
/// Missing input is treated as the empty string.
pub fn clean_input(text: Option<&str>) -> String {
    match text {
        Some(text) => nfc(text.trim()),
        None => String::new(),
    }
}
