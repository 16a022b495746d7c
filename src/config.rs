//! Startup configuration for the prediction service.
//!
//! Values come from an optional JSON file and are then overridden by
//! command-line flags (see [`crate::cli::args`]). Every field has a default,
//! so a partial file is fine:
//!
//! ```json
//! {
//!   "vectorizer": "model/vectorizer.bin",
//!   "classifier": "model/classifier.bin",
//!   "uncertainty_threshold": 0.6
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EmosiError, Result};

/// Default uncertainty threshold.
pub const DEFAULT_UNCERTAINTY_THRESHOLD: f64 = 0.5;

/// Bundled root word list. Set `stemmer_dictionary` to `null` for the greedy
/// stemmer.
pub const DEFAULT_STEMMER_DICTIONARY: &str = "assets/root_words.txt";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Configuration for [`crate::prediction::PredictionService`] and the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// JSON object of slang word to canonical word.
    pub slang_dictionary: PathBuf,
    /// Vectorizer artifact (`.json`, `.bin` or `.bincode`).
    pub vectorizer: PathBuf,
    /// Classifier artifact (`.json`, `.bin` or `.bincode`).
    pub classifier: PathBuf,
    /// Newline-delimited root word list for the stemmer. `None` selects
    /// greedy affix stripping.
    pub stemmer_dictionary: Option<PathBuf>,
    /// Predictions below this confidence are flagged as uncertain.
    pub uncertainty_threshold: f64,
    pub host: String,
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            slang_dictionary: PathBuf::from("assets/slang_words.json"),
            vectorizer: PathBuf::from("model/vectorizer.json"),
            classifier: PathBuf::from("model/classifier.json"),
            stemmer_dictionary: Some(PathBuf::from(DEFAULT_STEMMER_DICTIONARY)),
            uncertainty_threshold: DEFAULT_UNCERTAINTY_THRESHOLD,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServiceConfig {
    /// Read a configuration file. The result is not validated yet.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            EmosiError::config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            EmosiError::config(format!("Failed to parse config '{}': {}", path.display(), e))
        })
    }

    /// Check value ranges and required paths.
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.uncertainty_threshold)?;

        for (name, path) in [
            ("slang_dictionary", &self.slang_dictionary),
            ("vectorizer", &self.vectorizer),
            ("classifier", &self.classifier),
        ] {
            if path.as_os_str().is_empty() {
                return Err(EmosiError::config(format!("'{name}' path must not be empty")));
            }
        }

        if self.host.is_empty() {
            return Err(EmosiError::config("'host' must not be empty"));
        }
        Ok(())
    }

    /// `host:port` to bind the server to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Thresholds must lie in `[0, 1]`.
pub fn validate_threshold(threshold: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(EmosiError::config(format!(
            "Uncertainty threshold must be within [0, 1], got {threshold}"
        )));
    }
    Ok(())
}
