//! Slang dictionary and normalizer.
//!
//! Informal Indonesian social-media writing is full of abbreviations and
//! phonetic spellings (`gmn`, `bgt`, `udh`). The [`SlangNormalizer`] rewrites
//! each such token into its canonical form using a [`SlangDictionary`] that is
//! loaded once at startup and never mutated afterwards.
//!
//! # Examples
//!
//! ```
//! use emosi::analysis::slang::{SlangDictionary, SlangNormalizer};
//!
//! let dictionary = SlangDictionary::from_pairs([("gmn", "bagaimana")]).unwrap();
//! let normalizer = SlangNormalizer::new(dictionary.into());
//!
//! assert_eq!(normalizer.normalize("GMN\nkabar  kamu"), "bagaimana kabar kamu");
//! ```

use std::path::Path;
use std::sync::Arc;

use ahash::AHashMap;

use crate::analysis::split_words;
use crate::error::{EmosiError, Result};

/// Immutable mapping from lowercase slang words to canonical words.
#[derive(Debug, Clone, Default)]
pub struct SlangDictionary {
    entries: AHashMap<String, String>,
}

impl SlangDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from `(slang, canonical)` pairs.
    ///
    /// Both sides are lowercased. Two keys that collide after lowercasing are
    /// rejected unless they map to the same canonical word.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut entries = AHashMap::new();
        for (key, value) in pairs {
            let key = key.as_ref().trim().to_lowercase();
            let value = value.as_ref().trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            if let Some(existing) = entries.get(&key) {
                if existing != &value {
                    return Err(EmosiError::artifact(format!(
                        "Slang key '{key}' maps to both '{existing}' and '{value}'"
                    )));
                }
                continue;
            }
            entries.insert(key, value);
        }
        Ok(Self { entries })
    }

    /// Load a dictionary from a JSON object file (`{"gmn": "bagaimana"}`).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            EmosiError::artifact(format!(
                "Failed to read slang dictionary '{}': {}",
                path.display(),
                e
            ))
        })?;

        let pairs: AHashMap<String, String> = serde_json::from_str(&content).map_err(|e| {
            EmosiError::artifact(format!(
                "Failed to parse slang dictionary '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_pairs(pairs)
    }

    /// Look up the canonical form of a word.
    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(word).map(String::as_str)
    }

    /// Check whether a word is a slang key.
    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rewrites slang tokens into their canonical forms.
#[derive(Debug, Clone)]
pub struct SlangNormalizer {
    dictionary: Arc<SlangDictionary>,
}

impl SlangNormalizer {
    /// Create a normalizer backed by the given dictionary.
    pub fn new(dictionary: Arc<SlangDictionary>) -> Self {
        Self { dictionary }
    }

    /// The dictionary this normalizer reads from.
    pub fn dictionary(&self) -> &SlangDictionary {
        &self.dictionary
    }

    /// Lowercase, collapse whitespace and substitute slang tokens.
    ///
    /// Tokens are never dropped, only replaced.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        split_words(&lowered)
            .map(|word| self.dictionary.get(word).unwrap_or(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
