//! TF-IDF vectorizer for text feature extraction.

use std::path::Path;

use ahash::{AHashMap, AHashSet};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{EmosiError, Result};
use crate::ml::artifact;
use crate::ml::types::FeatureVector;

/// Turns a normalized string into a fixed-dimension feature vector.
pub trait Vectorizer: Send + Sync {
    /// Transform a single document.
    fn transform(&self, text: &str) -> Result<FeatureVector>;

    /// Length of every vector returned by [`Vectorizer::transform`].
    fn dimension(&self) -> usize;

    /// Get the name of this vectorizer for debugging and logging.
    fn name(&self) -> &'static str;
}

/// Default token pattern: runs of two or more word characters.
pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Row normalization applied after idf weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    L1,
    None,
}

fn default_lowercase() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// Serialized form of a fitted [`TfIdfVectorizer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfIdfArtifact {
    /// Term to column index.
    pub vocabulary: AHashMap<String, usize>,
    /// Inverse document frequency for each column.
    pub idf: Vec<f64>,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    /// Inclusive `(min_n, max_n)` word n-gram range.
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub stop_words: Vec<String>,
    /// Replace term counts `tf` with `1 + ln(tf)`.
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub norm: Norm,
}

impl TfIdfArtifact {
    /// An artifact with default settings for the given vocabulary.
    pub fn new(vocabulary: AHashMap<String, usize>, idf: Vec<f64>) -> Self {
        Self {
            vocabulary,
            idf,
            lowercase: default_lowercase(),
            token_pattern: default_token_pattern(),
            ngram_range: default_ngram_range(),
            stop_words: Vec::new(),
            sublinear_tf: false,
            norm: Norm::default(),
        }
    }
}

/// TF-IDF vectorizer loaded from a fitted artifact.
#[derive(Clone)]
pub struct TfIdfVectorizer {
    vocabulary: AHashMap<String, usize>,
    idf: Vec<f64>,
    lowercase: bool,
    token_pattern: Regex,
    ngram_range: (usize, usize),
    stop_words: AHashSet<String>,
    sublinear_tf: bool,
    norm: Norm,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("token_pattern", &self.token_pattern.as_str())
            .field("ngram_range", &self.ngram_range)
            .field("sublinear_tf", &self.sublinear_tf)
            .field("norm", &self.norm)
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Validate an artifact and build the vectorizer.
    pub fn from_artifact(artifact: TfIdfArtifact) -> Result<Self> {
        let dimension = artifact.vocabulary.len();
        if artifact.idf.len() != dimension {
            return Err(EmosiError::artifact(format!(
                "Vectorizer idf has {} entries but the vocabulary has {} terms",
                artifact.idf.len(),
                dimension
            )));
        }
        if let Some(weight) = artifact.idf.iter().find(|w| !w.is_finite()) {
            return Err(EmosiError::artifact(format!(
                "Vectorizer idf contains a non-finite weight: {weight}"
            )));
        }

        let mut seen = vec![false; dimension];
        for (term, &index) in &artifact.vocabulary {
            if index >= dimension {
                return Err(EmosiError::artifact(format!(
                    "Vocabulary term '{term}' has column {index}, dimension is {dimension}"
                )));
            }
            if seen[index] {
                return Err(EmosiError::artifact(format!(
                    "Vocabulary column {index} is assigned to more than one term"
                )));
            }
            seen[index] = true;
        }

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(EmosiError::artifact(format!(
                "Invalid ngram_range ({min_n}, {max_n})"
            )));
        }

        let token_pattern = Regex::new(&artifact.token_pattern)?;
        if token_pattern.captures_len() > 2 {
            return Err(EmosiError::artifact(
                "Token pattern may contain at most one capturing group",
            ));
        }

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            lowercase: artifact.lowercase,
            token_pattern,
            ngram_range: artifact.ngram_range,
            stop_words: artifact.stop_words.into_iter().collect(),
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
        })
    }

    /// Load a vectorizer artifact (`.json`, `.bin` or `.bincode`).
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_artifact(artifact::load(path)?)
    }

    /// Serializable form of this vectorizer.
    pub fn to_artifact(&self) -> TfIdfArtifact {
        let mut stop_words: Vec<String> = self.stop_words.iter().cloned().collect();
        stop_words.sort();
        TfIdfArtifact {
            vocabulary: self.vocabulary.clone(),
            idf: self.idf.clone(),
            lowercase: self.lowercase,
            token_pattern: self.token_pattern.as_str().to_string(),
            ngram_range: self.ngram_range,
            stop_words,
            sublinear_tf: self.sublinear_tf,
            norm: self.norm,
        }
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Split a document into the terms looked up in the vocabulary.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = if self.token_pattern.captures_len() == 2 {
            self.token_pattern
                .captures_iter(&text)
                .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
                .collect()
        } else {
            self.token_pattern
                .find_iter(&text)
                .map(|m| m.as_str())
                .collect()
        };

        let tokens: Vec<&str> = tokens
            .into_iter()
            .filter(|token| !self.stop_words.contains(*token))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    fn normalize(&self, values: &mut [f64]) {
        let norm = match self.norm {
            Norm::L2 => values.iter().map(|v| v * v).sum::<f64>().sqrt(),
            Norm::L1 => values.iter().map(|v| v.abs()).sum::<f64>(),
            Norm::None => return,
        };
        if norm > 0.0 {
            for value in values.iter_mut() {
                *value /= norm;
            }
        }
    }
}

impl TryFrom<TfIdfArtifact> for TfIdfVectorizer {
    type Error = EmosiError;

    fn try_from(artifact: TfIdfArtifact) -> Result<Self> {
        Self::from_artifact(artifact)
    }
}

impl Vectorizer for TfIdfVectorizer {
    fn transform(&self, text: &str) -> Result<FeatureVector> {
        let mut values: Vec<f64> = vec![0.0; self.vocabulary.len()];

        // Count term frequencies
        for term in self.analyze(text) {
            if let Some(&index) = self.vocabulary.get(&term) {
                values[index] += 1.0;
            }
        }

        for (index, value) in values.iter_mut().enumerate() {
            if *value == 0.0 {
                continue;
            }
            if self.sublinear_tf {
                *value = 1.0 + value.ln();
            }
            *value *= self.idf[index];
        }

        self.normalize(&mut values);
        Ok(FeatureVector::new(values))
    }

    fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    fn name(&self) -> &'static str {
        "tfidf"
    }
}
