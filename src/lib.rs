//! # Emosi
//!
//! Emotion classification for short Indonesian social-media text.
//!
//! ## Features
//!
//! - Ordered lexical normalization: slang, stopwords, cleaning rules, stemming
//! - TF-IDF vectorizer and linear classifier loaded from JSON or bincode artifacts
//! - Five emotion classes with an explicit uncertainty threshold
//! - `GET /predict-teks` HTTP endpoint on tokio
//! - `emosi` command-line tool
//!
//! ## Example
//!
//! ```no_run
//! use emosi::config::ServiceConfig;
//! use emosi::prediction::PredictionService;
//!
//! # fn main() -> emosi::error::Result<()> {
//! let service = PredictionService::from_config(&ServiceConfig::default())?;
//! let result = service.predict("aku senang banget hari ini")?;
//! println!("{} ({:.2})", result.prediction, result.confidence);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod ml;
pub mod prediction;
pub mod server;

pub mod prelude {
    pub use crate::analysis::{
        IndonesianStemmer, IndonesianStopwordRemover, SlangDictionary, Stemmer,
        StopwordRemover, TextNormalizer,
    };
    pub use crate::config::ServiceConfig;
    pub use crate::error::{EmosiError, Result};
    pub use crate::ml::{Classifier, Emotion, LinearClassifier, TfIdfVectorizer, Vectorizer};
    pub use crate::prediction::{PredictionResult, PredictionService};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
