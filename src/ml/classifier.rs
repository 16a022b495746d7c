//! Emotion classifier trait and the linear model behind it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EmosiError, Result};
use crate::ml::artifact;
use crate::ml::types::{ClassProbabilities, Emotion, FeatureVector};

/// Emotion classifier trait.
///
/// Implementations map a feature vector to a probability for each class in
/// [`Emotion::ALL`] order.
pub trait Classifier: Send + Sync {
    /// Class probabilities for a single feature vector.
    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities>;

    /// Dimension of the feature vectors this classifier accepts.
    fn n_features(&self) -> usize;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &'static str;
}

/// How decision scores are turned into probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbabilityMethod {
    /// Multinomial softmax over the five scores.
    #[default]
    Softmax,
    /// Independent logistic sigmoid per class, renormalized to sum to one.
    Ovr,
}

/// Serialized form of a [`LinearClassifier`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearArtifact {
    /// One weight row per class.
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    #[serde(default)]
    pub probability: ProbabilityMethod,
    /// Class order the model was trained with, if recorded.
    #[serde(default)]
    pub labels: Option<Vec<String>>,
}

/// Linear model with one weight row per emotion.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    coef: Vec<Vec<f64>>,
    intercept: [f64; Emotion::COUNT],
    probability: ProbabilityMethod,
    n_features: usize,
}

impl LinearClassifier {
    /// Validate an artifact and build the classifier.
    pub fn from_artifact(artifact: LinearArtifact) -> Result<Self> {
        if let Some(labels) = &artifact.labels {
            let expected: Vec<&str> = Emotion::ALL.iter().map(|e| e.as_str()).collect();
            if labels.iter().map(String::as_str).ne(expected.iter().copied()) {
                return Err(EmosiError::artifact(format!(
                    "Classifier labels {labels:?} do not match the expected order {expected:?}"
                )));
            }
        }

        if artifact.coef.len() != Emotion::COUNT {
            return Err(EmosiError::artifact(format!(
                "Classifier has {} weight rows, expected {}",
                artifact.coef.len(),
                Emotion::COUNT
            )));
        }
        let intercept: [f64; Emotion::COUNT] =
            artifact.intercept.as_slice().try_into().map_err(|_| {
                EmosiError::artifact(format!(
                    "Classifier has {} intercepts, expected {}",
                    artifact.intercept.len(),
                    Emotion::COUNT
                ))
            })?;

        let n_features = artifact.coef[0].len();
        if artifact.coef.iter().any(|row| row.len() != n_features) {
            return Err(EmosiError::artifact("Classifier weight rows have different widths"));
        }
        if artifact
            .coef
            .iter()
            .flatten()
            .chain(intercept.iter())
            .any(|w| !w.is_finite())
        {
            return Err(EmosiError::artifact("Classifier contains non-finite weights"));
        }

        Ok(Self {
            coef: artifact.coef,
            intercept,
            probability: artifact.probability,
            n_features,
        })
    }

    /// Load a classifier artifact (`.json`, `.bin` or `.bincode`).
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_artifact(artifact::load(path)?)
    }

    /// Serializable form of this classifier.
    pub fn to_artifact(&self) -> LinearArtifact {
        LinearArtifact {
            coef: self.coef.clone(),
            intercept: self.intercept.to_vec(),
            probability: self.probability,
            labels: Some(Emotion::ALL.iter().map(|e| e.to_string()).collect()),
        }
    }

    pub fn probability_method(&self) -> ProbabilityMethod {
        self.probability
    }

    /// Raw scores `coef · x + intercept`, one per class.
    pub fn decision_function(&self, features: &FeatureVector) -> Result<[f64; Emotion::COUNT]> {
        if features.dimension() != self.n_features {
            return Err(EmosiError::prediction(format!(
                "Feature vector has dimension {}, classifier expects {}",
                features.dimension(),
                self.n_features
            )));
        }

        let mut scores = self.intercept;
        for (score, row) in scores.iter_mut().zip(&self.coef) {
            *score += row
                .iter()
                .zip(features.values())
                .map(|(w, x)| w * x)
                .sum::<f64>();
        }
        Ok(scores)
    }
}

impl TryFrom<LinearArtifact> for LinearClassifier {
    type Error = EmosiError;

    fn try_from(artifact: LinearArtifact) -> Result<Self> {
        Self::from_artifact(artifact)
    }
}

fn softmax(scores: &[f64; Emotion::COUNT]) -> [f64; Emotion::COUNT] {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut out = scores.map(|s| (s - max).exp());
    let sum: f64 = out.iter().sum();
    for p in out.iter_mut() {
        *p /= sum;
    }
    out
}

fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

fn one_vs_rest(scores: &[f64; Emotion::COUNT]) -> [f64; Emotion::COUNT] {
    let mut out = scores.map(sigmoid);
    let sum: f64 = out.iter().sum();
    if sum == 0.0 {
        // Every sigmoid underflowed.
        return [1.0 / Emotion::COUNT as f64; Emotion::COUNT];
    }
    for p in out.iter_mut() {
        *p /= sum;
    }
    out
}

impl Classifier for LinearClassifier {
    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities> {
        let scores = self.decision_function(features)?;
        let probabilities = match self.probability {
            ProbabilityMethod::Softmax => softmax(&scores),
            ProbabilityMethod::Ovr => one_vs_rest(&scores),
        };
        ClassProbabilities::new(&probabilities)
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn name(&self) -> &'static str {
        "linear"
    }
}
