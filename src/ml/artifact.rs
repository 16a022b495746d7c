//! Loading of serialized model artifacts.
//!
//! The storage format is picked from the file extension:
//!
//! | extension           | format                      |
//! |---------------------|-----------------------------|
//! | `.json`             | JSON via `serde_json`       |
//! | `.bin`, `.bincode`  | `bincode` (serde, standard) |

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{EmosiError, Result};

/// Artifact serialization formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Bincode,
}

impl ArtifactFormat {
    /// Detect the format of an artifact path.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(ArtifactFormat::Json),
            Some("bin") | Some("bincode") => Ok(ArtifactFormat::Bincode),
            _ => Err(EmosiError::config(format!(
                "Unsupported artifact format for '{}' (expected .json, .bin or .bincode)",
                path.display()
            ))),
        }
    }
}

/// Read and deserialize an artifact.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = ArtifactFormat::from_path(path)?;
    let bytes = std::fs::read(path).map_err(|e| {
        EmosiError::artifact(format!("Failed to read artifact '{}': {}", path.display(), e))
    })?;
    decode(&bytes, format).map_err(|e| {
        EmosiError::artifact(format!("Failed to decode artifact '{}': {}", path.display(), e))
    })
}

/// Serialize an artifact to a file, picking the format from its extension.
pub fn save<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let bytes = encode(value, ArtifactFormat::from_path(path)?)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Deserialize an artifact from bytes.
pub fn decode<T: DeserializeOwned>(bytes: &[u8], format: ArtifactFormat) -> Result<T> {
    match format {
        ArtifactFormat::Json => Ok(serde_json::from_slice(bytes)?),
        ArtifactFormat::Bincode => {
            let (value, _) =
                bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
            Ok(value)
        }
    }
}

/// Serialize an artifact to bytes.
pub fn encode<T: Serialize>(value: &T, format: ArtifactFormat) -> Result<Vec<u8>> {
    match format {
        ArtifactFormat::Json => Ok(serde_json::to_vec_pretty(value)?),
        ArtifactFormat::Bincode => bincode::serde::encode_to_vec(value, bincode::config::standard())
            .map_err(|e| EmosiError::artifact(format!("Failed to encode artifact: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ArtifactFormat::from_path(Path::new("model/vectorizer.json")).unwrap(),
            ArtifactFormat::Json
        );
        assert_eq!(
            ArtifactFormat::from_path(Path::new("model/classifier.bin")).unwrap(),
            ArtifactFormat::Bincode
        );
        assert!(ArtifactFormat::from_path(Path::new("model/svm.joblib")).is_err());
    }

    #[test]
    fn test_load_json_and_bincode() {
        let dir = tempfile::TempDir::new().unwrap();
        let value: HashMap<String, Vec<f64>> =
            HashMap::from([("coef".to_string(), vec![0.5, -1.0])]);

        for name in ["a.json", "a.bin", "a.bincode"] {
            let path = dir.path().join(name);
            save(&value, &path).unwrap();
            let loaded: HashMap<String, Vec<f64>> = load(&path).unwrap();
            assert_eq!(loaded, value);
        }
    }

    #[test]
    fn test_load_errors_are_artifact_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            load::<Vec<f64>>(&missing),
            Err(EmosiError::Artifact(_))
        ));

        let corrupt = dir.path().join("corrupt.json");
        std::fs::write(&corrupt, b"{not json").unwrap();
        assert!(matches!(
            load::<Vec<f64>>(&corrupt),
            Err(EmosiError::Artifact(_))
        ));
    }
}
