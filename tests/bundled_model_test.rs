//! The shipped dictionaries and demo model must load together under the
//! default configuration.

use std::path::Path;

use emosi::config::ServiceConfig;
use emosi::error::Result;
use emosi::ml::Emotion;
use emosi::prediction::PredictionService;

/// `ServiceConfig::default()` with its relative paths anchored at the crate root.
fn bundled_config() -> ServiceConfig {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let defaults = ServiceConfig::default();
    ServiceConfig {
        slang_dictionary: root.join(&defaults.slang_dictionary),
        vectorizer: root.join(&defaults.vectorizer),
        classifier: root.join(&defaults.classifier),
        stemmer_dictionary: defaults
            .stemmer_dictionary
            .as_ref()
            .map(|path| root.join(path)),
        ..defaults
    }
}

#[test]
fn test_default_config_loads() -> Result<()> {
    let config = bundled_config();
    assert!(config.stemmer_dictionary.is_some());

    let service = PredictionService::from_config(&config)?;
    assert_eq!(service.uncertainty_threshold(), 0.5);
    Ok(())
}

#[test]
fn test_bundled_model_predictions() -> Result<()> {
    let service = PredictionService::from_config(&bundled_config())?;

    let cases = [
        ("aku seneng bgt hari ini", Emotion::Happy),
        ("aku ketakutan sendirian", Emotion::Fear),
        ("kesedihan ini tak berujung", Emotion::Sadness),
        ("aku sayang kamu", Emotion::Love),
        ("kesal sama dia #marah", Emotion::Anger),
    ];
    for (text, expected) in cases {
        let result = service.predict(text)?;
        assert_eq!(result.prediction, expected, "{text}");
        assert_eq!(result.is_uncertain, result.confidence < 0.5);
    }
    Ok(())
}

#[test]
fn test_bundled_root_words_drive_stemming() -> Result<()> {
    let service = PredictionService::from_config(&bundled_config())?;
    assert_eq!(service.trace("ketakutan")?.stemmed, "takut");
    Ok(())
}

#[test]
fn test_bundled_model_with_greedy_stemmer() -> Result<()> {
    let mut config = bundled_config();
    config.stemmer_dictionary = None;
    let service = PredictionService::from_config(&config)?;

    let result = service.predict("")?;
    assert!((0.0..=1.0).contains(&result.confidence));
    Ok(())
}
