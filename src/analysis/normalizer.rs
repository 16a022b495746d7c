//! The lexical normalization pipeline.
//!
//! [`TextNormalizer`] runs the four lexical stages in their fixed order:
//!
//! ```text
//! raw → SlangNormalizer → StopwordFilter → TextCleaner → Stemmer → normalized
//! ```
//!
//! Slang and stopword processing deliberately run before URL/HTML/emoji
//! stripping. Changing the order changes what the downstream model sees.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::cleaner::TextCleaner;
use crate::analysis::slang::{SlangDictionary, SlangNormalizer};
use crate::analysis::stemmer::Stemmer;
use crate::analysis::stop::{StopwordFilter, StopwordRemover};
use crate::error::Result;

/// The text after each normalization stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedStages {
    pub raw: String,
    pub slang_normalized: String,
    pub stopword_filtered: String,
    pub cleaned: String,
    pub stemmed: String,
}

/// Runs slang normalization, stopword filtering, cleaning and stemming.
#[derive(Clone)]
pub struct TextNormalizer {
    slang: SlangNormalizer,
    stopwords: StopwordFilter,
    cleaner: TextCleaner,
    stemmer: Arc<dyn Stemmer>,
}

impl std::fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("slang_entries", &self.slang.dictionary().len())
            .field("stopwords", &self.stopwords)
            .field("cleaner_rules", &self.cleaner.rules().len())
            .field("stemmer", &self.stemmer.name())
            .finish()
    }
}

impl TextNormalizer {
    /// Assemble a normalizer from its stages.
    pub fn new(
        slang: SlangNormalizer,
        stopwords: StopwordFilter,
        cleaner: TextCleaner,
        stemmer: Arc<dyn Stemmer>,
    ) -> Self {
        Self {
            slang,
            stopwords,
            cleaner,
            stemmer,
        }
    }

    /// Assemble a normalizer with the default residual tokens and cleaning rules.
    pub fn with_defaults(
        dictionary: Arc<SlangDictionary>,
        remover: Arc<dyn StopwordRemover>,
        stemmer: Arc<dyn Stemmer>,
    ) -> Result<Self> {
        Ok(Self::new(
            SlangNormalizer::new(dictionary),
            StopwordFilter::new(remover),
            TextCleaner::new()?,
            stemmer,
        ))
    }

    /// Normalize text and return only the final result.
    pub fn normalize(&self, text: &str) -> Result<String> {
        Ok(self.stages(text)?.stemmed)
    }

    /// Normalize text and keep every intermediate result.
    pub fn stages(&self, text: &str) -> Result<NormalizedStages> {
        let slang_normalized = self.slang.normalize(text);
        let stopword_filtered = self.stopwords.filter(&slang_normalized);
        let cleaned = self.cleaner.clean(&stopword_filtered);
        let stemmed = self.stemmer.stem(&cleaned)?;

        Ok(NormalizedStages {
            raw: text.to_string(),
            slang_normalized,
            stopword_filtered,
            cleaned,
            stemmed,
        })
    }

    pub fn stemmer(&self) -> &Arc<dyn Stemmer> {
        &self.stemmer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::stemmer::{IdentityStemmer, IndonesianStemmer};
    use crate::analysis::stop::IndonesianStopwordRemover;
    use crate::error::EmosiError;

    fn normalizer(stemmer: Arc<dyn Stemmer>) -> TextNormalizer {
        let dictionary =
            SlangDictionary::from_pairs([("gmn", "bagaimana"), ("yg", "yang"), ("bgt", "banget")])
                .unwrap();
        TextNormalizer::with_defaults(
            Arc::new(dictionary),
            Arc::new(IndonesianStopwordRemover::new()),
            stemmer,
        )
        .unwrap()
    }

    struct FailingStemmer;

    impl Stemmer for FailingStemmer {
        fn stem(&self, _text: &str) -> Result<String> {
            Err(EmosiError::analysis("stemmer unavailable"))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn test_slang_replaced_before_stopwords() {
        let stages = normalizer(Arc::new(IdentityStemmer::new()))
            .stages("Gmn nasib yg ditinggal")
            .unwrap();
        assert_eq!(stages.slang_normalized, "bagaimana nasib yang ditinggal");
        // "yang" only becomes a stopword after slang substitution.
        assert_eq!(stages.stopword_filtered, "bagaimana nasib ditinggal");
    }

    #[test]
    fn test_stage_order() {
        let stages = normalizer(Arc::new(IndonesianStemmer::new()))
            .stages("met pagi semuanyaa! cek https://x.co/abc #happy @someone")
            .unwrap();
        assert!(stages.stopword_filtered.contains("https://x.co/abc"));
        assert_eq!(stages.cleaned, "met pagi semuanyaa cek happy");
        assert!(!stages.stemmed.contains("http"));
        assert!(!stages.stemmed.contains("someone"));
    }

    #[test]
    fn test_stemming_runs_last() {
        let stages = normalizer(Arc::new(IndonesianStemmer::new()))
            .stages("ketakutan BGT <br>")
            .unwrap();
        assert_eq!(stages.cleaned, "ketakutan banget");
        assert_eq!(stages.stemmed, "takut banget");
    }

    #[test]
    fn test_empty_text() {
        let stages = normalizer(Arc::new(IndonesianStemmer::new()))
            .stages("")
            .unwrap();
        assert_eq!(stages.stemmed, "");
    }

    #[test]
    fn test_stemmer_failure_propagates() {
        let result = normalizer(Arc::new(FailingStemmer)).normalize("halo");
        assert!(matches!(result, Err(EmosiError::Analysis(_))));
    }
}
