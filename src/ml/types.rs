//! Common types for emotion classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EmosiError, Result};

/// Tolerance used when checking that probabilities sum to one.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Emotion classes, in the order the classifier was trained with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anger,
    Fear,
    Happy,
    Love,
    Sadness,
}

impl Emotion {
    /// Number of classes.
    pub const COUNT: usize = 5;

    /// All classes in label order. Index `i` of a probability vector
    /// belongs to `Emotion::ALL[i]`.
    pub const ALL: [Emotion; Emotion::COUNT] = [
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Happy,
        Emotion::Love,
        Emotion::Sadness,
    ];

    /// Class at a label index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Label index of this class.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
            Emotion::Happy => "happy",
            Emotion::Love => "love",
            Emotion::Sadness => "sadness",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = EmosiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|emotion| emotion.as_str() == s)
            .ok_or_else(|| EmosiError::invalid_argument(format!("Unknown emotion label '{s}'")))
    }
}

/// Fixed-dimension numeric representation of a normalized text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// An all-zero vector of the given dimension.
    pub fn zeros(dimension: usize) -> Self {
        Self(vec![0.0; dimension])
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.0.iter().filter(|v| **v != 0.0).count()
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// Probability distribution over [`Emotion::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities([f64; Emotion::COUNT]);

impl ClassProbabilities {
    /// Validate and wrap classifier output.
    ///
    /// Requires exactly five finite, non-negative values summing to one
    /// within [`PROBABILITY_TOLERANCE`].
    pub fn new(values: &[f64]) -> Result<Self> {
        let probabilities: [f64; Emotion::COUNT] = values.try_into().map_err(|_| {
            EmosiError::prediction(format!(
                "Expected {} class probabilities, got {}",
                Emotion::COUNT,
                values.len()
            ))
        })?;

        if probabilities.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(EmosiError::prediction(format!(
                "Class probabilities must be finite and non-negative: {probabilities:?}"
            )));
        }

        let sum: f64 = probabilities.iter().sum();
        if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(EmosiError::prediction(format!(
                "Class probabilities sum to {sum}, expected 1"
            )));
        }

        Ok(Self(probabilities))
    }

    pub fn values(&self) -> &[f64; Emotion::COUNT] {
        &self.0
    }

    pub fn get(&self, emotion: Emotion) -> f64 {
        self.0[emotion.index()]
    }

    /// Most probable class and its probability.
    ///
    /// Ties go to the lowest label index.
    pub fn argmax(&self) -> (Emotion, f64) {
        let mut best = 0;
        for (index, probability) in self.0.iter().enumerate().skip(1) {
            if *probability > self.0[best] {
                best = index;
            }
        }
        (Emotion::ALL[best], self.0[best])
    }
}
