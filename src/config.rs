//! Runtime configuration: artifact locations and fixed column roles.
//!
//! Every field has a default matching the on-disk layout the app ships with.
//! `AppConfig::load` overlays a JSON file named by `PREDICTION_VIEWER_CONFIG`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "PREDICTION_VIEWER_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// File read when the user has not opened one.
    pub default_input: PathBuf,
    pub catalog: CatalogConfig,
    pub prepare: PrepareConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_input: PathBuf::from("X_nuevo_prediccion.csv"),
            catalog: CatalogConfig::default(),
            prepare: PrepareConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Scanned in order; the first one that exists is used.
    pub model_dirs: Vec<PathBuf>,
    /// Extension (without dot) that marks a file as a model artifact.
    pub extension: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            model_dirs: vec![PathBuf::from("models/trainedModels")],
            extension: "json".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepareConfig {
    pub encoders: EncoderPaths,
    /// CSV whose header row is the training column schema.
    pub training_schema: PathBuf,
    pub binary_columns: Vec<String>,
    pub ordinal_columns: Vec<String>,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            encoders: EncoderPaths::default(),
            training_schema: PathBuf::from("models/X_train_balanced.csv"),
            binary_columns: vec!["GENERO".into(), "POSEE_AUTO".into()],
            ordinal_columns: vec![
                "DESC_ESCOLARIDAD_MAX".into(),
                "HORA_OFICIAL_INICIO_LABORAL".into(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderPaths {
    pub binary: PathBuf,
    pub ordinal: PathBuf,
    pub onehot: PathBuf,
    pub scaler: PathBuf,
}

impl Default for EncoderPaths {
    fn default() -> Self {
        let misc = Path::new("models").join("misc");
        Self {
            binary: misc.join("binary_encoder.json"),
            ordinal: misc.join("ordinal_encoder.json"),
            onehot: misc.join("onehot_encoder.json"),
            scaler: misc.join("scaler_trained.json"),
        }
    }
}

impl AppConfig {
    /// Defaults, overlaid with the file named by `PREDICTION_VIEWER_CONFIG` if set.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// Parse a (possibly partial) JSON config; missing keys keep their defaults.
    ///
    /// Relative paths resolve against the directory holding the file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Using configuration from {}", path.display());
        Ok(match path.parent() {
            Some(base) if !base.as_os_str().is_empty() => config.rooted_at(base),
            _ => config,
        })
    }

    /// Resolve every relative path against `base`.
    pub fn rooted_at(mut self, base: &Path) -> Self {
        let root = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        root(&mut self.default_input);
        self.catalog.model_dirs.iter_mut().for_each(root);
        root(&mut self.prepare.training_schema);
        root(&mut self.prepare.encoders.binary);
        root(&mut self.prepare.encoders.ordinal);
        root(&mut self.prepare.encoders.onehot);
        root(&mut self.prepare.encoders.scaler);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shipped_layout() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.default_input, PathBuf::from("X_nuevo_prediccion.csv"));
        assert_eq!(cfg.catalog.model_dirs, vec![PathBuf::from("models/trainedModels")]);
        assert_eq!(
            cfg.prepare.encoders.scaler,
            PathBuf::from("models/misc/scaler_trained.json")
        );
        assert_eq!(cfg.prepare.binary_columns, vec!["GENERO", "POSEE_AUTO"]);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(
            &path,
            r#"{"catalog": {"model_dirs": ["m1", "m2"]}, "prepare": {"binary_columns": ["SEXO"]}}"#,
        )
        .unwrap();

        let cfg = AppConfig::from_file(&path).unwrap();
        assert_eq!(cfg.catalog.model_dirs, vec![dir.path().join("m1"), dir.path().join("m2")]);
        assert_eq!(cfg.default_input, dir.path().join("X_nuevo_prediccion.csv"));
        assert_eq!(cfg.catalog.extension, "json");
        assert_eq!(cfg.prepare.binary_columns, vec!["SEXO"]);
        assert_eq!(cfg.prepare.ordinal_columns.len(), 2);
    }

    #[test]
    fn test_rooted_at() {
        let cfg = AppConfig::default().rooted_at(Path::new("/srv/app"));
        assert_eq!(cfg.default_input, PathBuf::from("/srv/app/X_nuevo_prediccion.csv"));
        assert_eq!(
            cfg.prepare.encoders.binary,
            PathBuf::from("/srv/app/models/misc/binary_encoder.json")
        );
    }
}
