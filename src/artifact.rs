use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::ArtifactError;

/// A fitted object persisted as a JSON document.
///
/// `validate` runs right after deserialization and rejects documents whose
/// attributes are internally inconsistent (e.g. mismatched array lengths).
pub trait Artifact: DeserializeOwned {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Read, parse and validate one artifact file.
pub fn load_artifact<T: Artifact>(path: &Path) -> Result<T, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::Missing {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let artifact: T = serde_json::from_str(&text).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    artifact.validate().map_err(|reason| ArtifactError::Invalid {
        path: path.to_path_buf(),
        reason,
    })?;
    log::debug!("Loaded artifact {}", path.display());
    Ok(artifact)
}
