//! # Stoker
//!
//! Stoker splits text into words, numbers, quoted strings, and single
//! characters, driven by a per-character syntax table that can be changed or
//! reset entirely between tokens.

pub extern crate fnv;
pub mod error;
pub mod pretty;
pub mod source;
pub mod table;
pub mod token;
pub mod tokenizer;

#[macro_export]
macro_rules! trace {
    ($($log:expr),*) => {
        #[cfg(feature = "log")]
        log::trace!($($log),*);
    };
}

#[macro_export]
macro_rules! debug {
    ($($log:expr),*) => {
        #[cfg(feature = "log")]
        log::debug!($($log),*);
    };
}

#[macro_export]
macro_rules! info {
    ($($log:expr),*) => {
        #[cfg(feature = "log")]
        log::info!($($log),*);
    };
}

#[macro_export]
macro_rules! warn {
    ($($log:expr),*) => {
        #[cfg(feature = "log")]
        log::warn!($($log),*);
    };
}

#[macro_export]
macro_rules! error {
    ($($log:expr),*) => {
        #[cfg(feature = "log")]
        log::error!($($log),*);
    };
}

use {error::ScanError, std::path::Path, token::Token, tokenizer::Tokenizer};

/// Scans a string to completion with the standard table, through the final
/// end-of-file token inclusive.
pub fn tokenize(text: &str) -> Result<Vec<Token>, ScanError> {
    debug!("tokenize");
    Tokenizer::from_text(text).scan_all()
}

/// Reads a file and scans its contents.
pub fn tokenize_file(file: &Path) -> Result<Vec<Token>, ScanError> {
    debug!("tokenize {}", file.display());
    let contents = std::fs::read_to_string(file)
        .map_err(|err| ScanError::from(err).file(file.display().to_string()))?;
    Tokenizer::from_text(&contents)
        .scan_all()
        .map_err(|err| err.file(file.display().to_string()))
}
