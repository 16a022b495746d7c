//! Text analysis module for Emosi.
//!
//! This module turns noisy Indonesian social-media text into the normalized
//! string the vectorizer consumes: slang substitution, stopword filtering,
//! rule-based cleaning and stemming.

pub mod char_filter;
pub mod cleaner;
pub mod normalizer;
pub mod slang;
pub mod stemmer;
pub mod stop;

/// Split on whitespace, counting the ASCII information separators
/// `\x1c`..=`\x1f` as whitespace too. Empty pieces are skipped.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || ('\x1c'..='\x1f').contains(&c))
        .filter(|word| !word.is_empty())
}

// Re-export commonly used types
pub use cleaner::TextCleaner;
pub use normalizer::{NormalizedStages, TextNormalizer};
pub use slang::{SlangDictionary, SlangNormalizer};
pub use stemmer::{IdentityStemmer, IndonesianStemmer, Stemmer};
pub use stop::{IndonesianStopwordRemover, StopwordFilter, StopwordRemover};
