use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level errors surfaced to the user
// ---------------------------------------------------------------------------

/// Terminal conditions of one load → prepare → predict cycle.
///
/// Every variant renders as a short message meant for the status line.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error(
        "No data available: open a CSV/XLSX file or place {} in the working directory",
        .default_path.display()
    )]
    NoDataAvailable { default_path: PathBuf },

    #[error("No models available in {}", display_dirs(.dirs))]
    NoModelsAvailable { dirs: Vec<PathBuf> },

    #[error("Failed to load {}: {message}", .path.display())]
    DatasetLoad { path: PathBuf, message: String },

    #[error("Error preparing data: {0}")]
    Preparation(#[from] PrepareError),

    #[error("Prediction failed: {0}")]
    Prediction(#[from] ModelError),
}

fn display_dirs(dirs: &[PathBuf]) -> String {
    dirs.iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Feature preparation
// ---------------------------------------------------------------------------

/// Which of the four fitted transformers an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderRole {
    Binary,
    Ordinal,
    OneHot,
    Scaler,
}

impl fmt::Display for EncoderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EncoderRole::Binary => "binary",
            EncoderRole::Ordinal => "ordinal",
            EncoderRole::OneHot => "one-hot",
            EncoderRole::Scaler => "scaler",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum PrepareError {
    #[error("could not load the {role} encoder: {source}")]
    EncoderLoad {
        role: EncoderRole,
        #[source]
        source: ArtifactError,
    },

    #[error("column '{column}' required by the {role} encoder is missing")]
    MissingColumn { column: String, role: EncoderRole },

    #[error("found unknown category '{value}' in column '{column}'")]
    UnseenCategory { column: String, value: String },

    #[error("the {role} encoder was fit on columns {expected:?} but received {found:?}")]
    FeatureNames {
        role: EncoderRole,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("the {role} encoder expects {expected} columns but received {found}")]
    ColumnCount {
        role: EncoderRole,
        expected: usize,
        found: usize,
    },

    #[error("column '{column}' has non-numeric value '{value}'")]
    NonNumeric { column: String, value: String },

    #[error("block '{block}' has {found} rows, expected {expected}")]
    RowMismatch {
        block: String,
        expected: usize,
        found: usize,
    },

    #[error("could not read the training schema {}: {message}", .path.display())]
    Schema { path: PathBuf, message: String },
}

// ---------------------------------------------------------------------------
// Models
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("could not load model '{name}': {source}")]
    Load {
        name: String,
        #[source]
        source: ArtifactError,
    },

    #[error("model expects {expected} features but received {found}")]
    Shape { expected: usize, found: usize },

    #[error("model was fit on features {expected:?} but received {found:?}")]
    FeatureNames {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("row {row} has a missing or non-finite value in feature '{column}'")]
    NonFinite { row: usize, column: String },
}

// ---------------------------------------------------------------------------
// Artifact files
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("{} does not exist", .path.display())]
    Missing { path: PathBuf },

    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },
}
