//! Emotion prediction over the full pipeline.
//!
//! ```text
//! raw text → TextNormalizer → Vectorizer → Classifier → PredictionResult
//! ```
//!
//! The service owns no mutable state. One instance is built at startup and
//! shared across requests behind an `Arc`.

use std::sync::Arc;

use chrono::Local;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::{NormalizedStages, TextNormalizer};
use crate::analysis::slang::SlangDictionary;
use crate::analysis::stemmer::{IndonesianStemmer, Stemmer};
use crate::analysis::stop::IndonesianStopwordRemover;
use crate::config::{ServiceConfig, validate_threshold};
use crate::error::{EmosiError, Result};
use crate::ml::classifier::{Classifier, LinearClassifier};
use crate::ml::types::{ClassProbabilities, Emotion};
use crate::ml::vectorizer::{TfIdfVectorizer, Vectorizer};

/// Format of [`PredictionResult::timestamp`].
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Response for a single text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// The input text, unmodified.
    pub text: String,
    pub prediction: Emotion,
    /// Probability of `prediction`.
    pub confidence: f64,
    /// `confidence < uncertainty_threshold`.
    pub is_uncertain: bool,
    /// Local time, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
}

/// Runs normalization, vectorization and classification, then applies the
/// uncertainty policy.
pub struct PredictionService {
    normalizer: TextNormalizer,
    vectorizer: Arc<dyn Vectorizer>,
    classifier: Arc<dyn Classifier>,
    uncertainty_threshold: f64,
}

impl std::fmt::Debug for PredictionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionService")
            .field("normalizer", &self.normalizer)
            .field("vectorizer", &self.vectorizer.name())
            .field("classifier", &self.classifier.name())
            .field("dimension", &self.vectorizer.dimension())
            .field("uncertainty_threshold", &self.uncertainty_threshold)
            .finish()
    }
}

impl PredictionService {
    /// Assemble a service from already loaded collaborators.
    ///
    /// Fails if the vectorizer and classifier disagree on the feature
    /// dimension or if the threshold is outside `[0, 1]`.
    pub fn new(
        normalizer: TextNormalizer,
        vectorizer: Arc<dyn Vectorizer>,
        classifier: Arc<dyn Classifier>,
        uncertainty_threshold: f64,
    ) -> Result<Self> {
        validate_threshold(uncertainty_threshold)?;

        if vectorizer.dimension() != classifier.n_features() {
            return Err(EmosiError::config(format!(
                "Vectorizer '{}' produces {} features but classifier '{}' expects {}",
                vectorizer.name(),
                vectorizer.dimension(),
                classifier.name(),
                classifier.n_features()
            )));
        }

        Ok(Self {
            normalizer,
            vectorizer,
            classifier,
            uncertainty_threshold,
        })
    }

    /// Load every artifact named in the configuration.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;

        let normalizer = load_normalizer(config)?;

        let vectorizer = TfIdfVectorizer::load(&config.vectorizer)?;
        info!(
            "Loaded vectorizer from {} ({} terms)",
            config.vectorizer.display(),
            vectorizer.vocabulary_size()
        );

        let classifier = LinearClassifier::load(&config.classifier)?;
        info!(
            "Loaded classifier from {} ({:?})",
            config.classifier.display(),
            classifier.probability_method()
        );

        Self::new(
            normalizer,
            Arc::new(vectorizer),
            Arc::new(classifier),
            config.uncertainty_threshold,
        )
    }

    pub fn uncertainty_threshold(&self) -> f64 {
        self.uncertainty_threshold
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Normalized text after each lexical stage.
    pub fn trace(&self, text: &str) -> Result<NormalizedStages> {
        self.normalizer.stages(text)
    }

    /// Class probabilities for a raw text.
    pub fn predict_proba(&self, text: &str) -> Result<ClassProbabilities> {
        let normalized = self.normalizer.normalize(text)?;
        let features = self.vectorizer.transform(&normalized)?;
        self.classifier.predict_proba(&features)
    }

    /// Classify a raw text.
    ///
    /// Empty text is still run through the pipeline; rejecting it is up to
    /// the caller.
    pub fn predict(&self, text: &str) -> Result<PredictionResult> {
        let probabilities = self.predict_proba(text)?;
        let result = self.decide(text, &probabilities);
        debug!(
            "Predicted {} (confidence {:.4}, uncertain: {}) for {:?}",
            result.prediction, result.confidence, result.is_uncertain, text
        );
        Ok(result)
    }

    /// Apply argmax and the uncertainty threshold.
    pub fn decide(&self, text: &str, probabilities: &ClassProbabilities) -> PredictionResult {
        let (prediction, confidence) = probabilities.argmax();
        PredictionResult {
            text: text.to_string(),
            prediction,
            confidence,
            is_uncertain: confidence < self.uncertainty_threshold,
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Build the lexical pipeline from the slang dictionary and optional stemmer
/// root words named in the configuration.
pub fn load_normalizer(config: &ServiceConfig) -> Result<TextNormalizer> {
    let dictionary = SlangDictionary::load_from_file(&config.slang_dictionary)?;
    info!(
        "Loaded {} slang entries from {}",
        dictionary.len(),
        config.slang_dictionary.display()
    );

    let stemmer: Arc<dyn Stemmer> = match &config.stemmer_dictionary {
        Some(path) => {
            let stemmer = IndonesianStemmer::load_root_words(path)?;
            info!("Loaded stemmer root words from {}", path.display());
            Arc::new(stemmer)
        }
        None => Arc::new(IndonesianStemmer::new()),
    };

    TextNormalizer::with_defaults(
        Arc::new(dictionary),
        Arc::new(IndonesianStopwordRemover::new()),
        stemmer,
    )
}
