//! Shared fixtures: artifacts written to a temporary directory.

#![allow(dead_code)]

use std::path::Path;

use ahash::AHashMap;
use emosi::config::ServiceConfig;
use emosi::ml::artifact;
use emosi::ml::{LinearArtifact, TfIdfArtifact};
use tempfile::TempDir;

/// One vocabulary term per emotion, in label order.
pub const TERMS: [&str; 5] = ["marah", "takut", "senang", "sayang", "sedih"];

pub const LABELS: [&str; 5] = ["anger", "fear", "happy", "love", "sadness"];

pub const SLANG: &str = r#"{
    "gmn": "bagaimana",
    "bgt": "banget",
    "seneng": "senang",
    "yg": "yang",
    "takot": "takut"
}"#;

pub const ROOT_WORDS: &str = "marah\ntakut\nsenang\nsayang\nsedih\nbanget\npagi\n";

pub struct Fixture {
    pub dir: TempDir,
    pub config: ServiceConfig,
}

pub fn vectorizer_artifact(terms: &[&str]) -> TfIdfArtifact {
    let vocabulary: AHashMap<String, usize> = terms
        .iter()
        .enumerate()
        .map(|(i, t)| (t.to_string(), i))
        .collect();
    TfIdfArtifact::new(vocabulary, vec![1.0; terms.len()])
}

/// Weight 4 on the term matching each class, zero elsewhere.
pub fn classifier_artifact(n_features: usize) -> LinearArtifact {
    let coef = (0..5)
        .map(|row| {
            (0..n_features)
                .map(|col| if row == col { 4.0 } else { 0.0 })
                .collect()
        })
        .collect();
    LinearArtifact {
        coef,
        intercept: vec![0.0; 5],
        probability: Default::default(),
        labels: Some(LABELS.iter().map(|s| s.to_string()).collect()),
    }
}

pub fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// A complete, valid configuration backed by files in a temp directory.
pub fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();

    let slang_dictionary = write(dir.path(), "slang.json", SLANG);
    let stemmer_dictionary = write(dir.path(), "root_words.txt", ROOT_WORDS);

    let vectorizer = dir.path().join("vectorizer.bin");
    artifact::save(&vectorizer_artifact(&TERMS), &vectorizer).unwrap();

    let classifier = dir.path().join("classifier.json");
    artifact::save(&classifier_artifact(TERMS.len()), &classifier).unwrap();

    let config = ServiceConfig {
        slang_dictionary,
        vectorizer,
        classifier,
        stemmer_dictionary: Some(stemmer_dictionary),
        host: "127.0.0.1".to_string(),
        port: 0,
        ..Default::default()
    };

    Fixture { dir, config }
}
