//! Stopword removal for Indonesian text.
//!
//! Two layers are applied, in this order:
//!
//! 1. A [`StopwordRemover`] capability that drops a standard Indonesian
//!    stopword vocabulary. [`IndonesianStopwordRemover`] is the default.
//! 2. The [`StopwordFilter`] residual token list: single-letter fragments,
//!    a few connectives and the `username` placeholder that anonymized
//!    datasets leave behind.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use emosi::analysis::stop::{IndonesianStopwordRemover, StopwordFilter};
//!
//! let filter = StopwordFilter::new(Arc::new(IndonesianStopwordRemover::new()));
//! assert_eq!(filter.filter("saya sedih dan kecewa username"), "sedih kecewa");
//! ```

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use crate::analysis::split_words;

/// Default Indonesian stopword vocabulary.
const DEFAULT_INDONESIAN_STOP_WORDS: &[&str] = &[
    "yang", "untuk", "pada", "ke", "para", "namun", "menurut", "antara", "dia", "dua", "ia",
    "seperti", "jika", "sehingga", "kembali", "dan", "tidak", "ini", "karena", "kepada", "oleh",
    "saat", "harus", "sementara", "setelah", "belum", "kami", "sekitar", "bagi", "serta", "di",
    "dari", "telah", "sebagai", "masih", "hal", "ketika", "adalah", "itu", "dalam", "bisa",
    "bahwa", "atau", "hanya", "kita", "dengan", "akan", "juga", "ada", "mereka", "sudah", "saya",
    "terhadap", "secara", "agar", "lain", "anda", "begitu", "mengapa", "kenapa", "yaitu", "yakni",
    "daripada", "itulah", "lagi", "maka", "tentang", "demi", "dimana", "kemana", "pula", "sambil",
    "sebelum", "sesudah", "supaya", "guna", "kah", "pun", "sampai", "sedangkan", "selagi",
    "tetapi", "apakah", "kecuali", "sebab", "selain", "seolah", "seraya", "seterusnya", "tanpa",
    "agak", "boleh", "dapat", "dsb", "dst", "dll", "dahulu", "dulunya", "anu", "demikian", "tapi",
    "ingin", "nggak", "mari", "nanti", "melainkan", "oh", "ok", "seharusnya", "sebetulnya",
    "setiap", "setidaknya", "sesuatu", "pasti", "saja", "toh", "ya", "walau", "tolong", "tentu",
    "amat", "apalagi", "bagaimanapun",
];

/// Residual tokens dropped after the stopword remover has run.
///
/// `user name` can never equal a whitespace-split token; it is kept so the
/// list stays faithful to the placeholders found in the training data.
pub const DEFAULT_RESIDUAL_TOKENS: &[&str] =
    &["t", "n", "dengan", "yang", "dan", "user name", "username"];

/// Default Indonesian stopwords as a HashSet.
pub static DEFAULT_INDONESIAN_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    DEFAULT_INDONESIAN_STOP_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// Capability that removes a stopword vocabulary from text.
pub trait StopwordRemover: Send + Sync {
    /// Remove stopwords from the text.
    fn remove(&self, text: &str) -> String;

    /// Get the name of this remover.
    fn name(&self) -> &'static str;
}

/// Removes the standard Indonesian stopword vocabulary.
///
/// Matching is exact and case sensitive; the slang stage has already
/// lowercased the text by the time this runs.
#[derive(Clone, Debug)]
pub struct IndonesianStopwordRemover {
    stop_words: Arc<HashSet<String>>,
}

impl IndonesianStopwordRemover {
    /// Create a remover with the default Indonesian vocabulary.
    pub fn new() -> Self {
        Self::with_stop_words(DEFAULT_INDONESIAN_STOP_WORDS_SET.clone())
    }

    /// Create a remover with a custom vocabulary.
    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        Self {
            stop_words: Arc::new(stop_words),
        }
    }

    /// Create a remover from a list of words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_stop_words(words.into_iter().map(Into::into).collect())
    }

    /// Check if a word is a stopword.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Get the number of stopwords.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for IndonesianStopwordRemover {
    fn default() -> Self {
        Self::new()
    }
}

impl StopwordRemover for IndonesianStopwordRemover {
    fn remove(&self, text: &str) -> String {
        text.split(' ')
            .filter(|word| !self.is_stop_word(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn name(&self) -> &'static str {
        "indonesian"
    }
}

/// Applies a [`StopwordRemover`] and then drops residual tokens.
#[derive(Clone)]
pub struct StopwordFilter {
    remover: Arc<dyn StopwordRemover>,
    residual_tokens: Arc<HashSet<String>>,
}

impl std::fmt::Debug for StopwordFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopwordFilter")
            .field("remover", &self.remover.name())
            .field("residual_tokens", &self.residual_tokens.len())
            .finish()
    }
}

impl StopwordFilter {
    /// Create a filter with the default residual token list.
    pub fn new(remover: Arc<dyn StopwordRemover>) -> Self {
        Self::with_residual_tokens(remover, DEFAULT_RESIDUAL_TOKENS.iter().copied())
    }

    /// Create a filter with a custom residual token list.
    pub fn with_residual_tokens<I, S>(remover: Arc<dyn StopwordRemover>, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            remover,
            residual_tokens: Arc::new(tokens.into_iter().map(Into::into).collect()),
        }
    }

    /// Check if a token is on the residual list.
    pub fn is_residual(&self, token: &str) -> bool {
        self.residual_tokens.contains(token)
    }

    /// Remove stopwords, then residual tokens, and rejoin with single spaces.
    pub fn filter(&self, text: &str) -> String {
        let words = split_words(text).collect::<Vec<_>>().join(" ");
        let removed = self.remover.remove(&words);
        split_words(&removed)
            .filter(|token| !self.is_residual(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
