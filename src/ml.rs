//! Model artifacts for emotion classification.
//!
//! A normalized string is turned into a [`FeatureVector`] by a
//! [`Vectorizer`] and scored by a [`Classifier`]. Both are loaded once at
//! startup from serialized artifacts and shared read-only afterwards.

pub mod artifact;
pub mod classifier;
pub mod types;
pub mod vectorizer;

pub use classifier::{Classifier, LinearArtifact, LinearClassifier, ProbabilityMethod};
pub use types::{ClassProbabilities, Emotion, FeatureVector};
pub use vectorizer::{Norm, TfIdfArtifact, TfIdfVectorizer, Vectorizer};
