use std::path::PathBuf;

use crate::config::CatalogConfig;
use crate::error::PredictError;

/// A model artifact found on disk, identified by its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEntry {
    pub name: String,
    pub path: PathBuf,
}

/// List candidate models, sorted by name.
///
/// Only the first configured directory that exists is scanned. Having no
/// directory, or an empty one, is `NoModelsAvailable`.
pub fn list_models(config: &CatalogConfig) -> Result<Vec<ModelEntry>, PredictError> {
    let no_models = || PredictError::NoModelsAvailable {
        dirs: config.model_dirs.clone(),
    };

    let Some(dir) = config.model_dirs.iter().find(|d| d.is_dir()) else {
        return Err(no_models());
    };

    let read_dir = std::fs::read_dir(dir).map_err(|e| {
        log::error!("Failed to read model directory {}: {e}", dir.display());
        no_models()
    })?;

    let mut models: Vec<ModelEntry> = read_dir
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(&config.extension))
        })
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?.to_string();
            Some(ModelEntry { name, path })
        })
        .collect();

    if models.is_empty() {
        return Err(no_models());
    }
    models.sort_by(|a, b| a.name.cmp(&b.name));
    log::info!("Found {} models in {}", models.len(), dir.display());
    Ok(models)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dirs: Vec<PathBuf>) -> CatalogConfig {
        CatalogConfig {
            model_dirs: dirs,
            extension: "json".into(),
        }
    }

    #[test]
    fn test_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["zeta.json", "alpha.json", "notes.txt", "Mid.JSON"] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub.json")).unwrap();

        let models = list_models(&config(vec![dir.path().to_path_buf()])).unwrap();
        let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Mid.JSON", "alpha.json", "zeta.json"]);
    }

    #[test]
    fn test_first_existing_dir_wins() {
        let root = tempfile::tempdir().unwrap();
        let second = root.path().join("second");
        std::fs::create_dir(&second).unwrap();
        std::fs::write(second.join("m.json"), "{}").unwrap();

        let models = list_models(&config(vec![root.path().join("missing"), second])).unwrap();
        assert_eq!(models.len(), 1);
    }

    #[test]
    fn test_empty_or_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_models(&config(vec![dir.path().to_path_buf()])).unwrap_err();
        assert!(matches!(err, PredictError::NoModelsAvailable { .. }));

        let err = list_models(&config(vec![dir.path().join("nope")])).unwrap_err();
        assert!(matches!(err, PredictError::NoModelsAvailable { .. }));
    }
}
