//! fvsort CLI library
//!
//! This library provides the command-line interface for sorting and
//! recalculating dictionary entries against a site's custom alphabet.

pub mod commands;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
