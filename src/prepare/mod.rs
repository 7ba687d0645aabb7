//! Feature preparation: raw dataset → scaled feature matrix.
//!
//! ```text
//!  Dataset ──┬─ binary roles ──► BinaryEncoder ──┐
//!            ├─ ordinal roles ─► OrdinalEncoder ─┤
//!            ├─ one-hot inputs ► OneHotEncoder ──┼─► hstack ─► reconcile(schema) ─► Scaler
//!            └─ everything else ─► remainder__* ─┘
//! ```

pub mod schema;

use crate::config::PrepareConfig;
use crate::data::frame::Frame;
use crate::data::matrix::FeatureMatrix;
use crate::data::model::Dataset;
use crate::encoding::onehot::InputColumns;
use crate::encoding::{EncoderSet, Transform};
use crate::error::{EncoderRole, PrepareError};

use schema::{SchemaStatus, load_schema};

/// Prefix given to pass-through columns.
pub const REMAINDER_PREFIX: &str = "remainder__";

/// Turns a raw dataset into the matrix a model expects.
///
/// Holds only configuration; artifacts are re-read on every call.
#[derive(Debug, Clone)]
pub struct FeaturePreparer {
    config: PrepareConfig,
}

impl FeaturePreparer {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    /// Load the encoders and the training schema from disk, then prepare.
    pub fn prepare(&self, dataset: &Dataset) -> Result<FeatureMatrix, PrepareError> {
        let encoders = EncoderSet::load(&self.config.encoders)?;
        let schema = load_schema(&self.config.training_schema)?;
        self.prepare_with(&encoders, &schema, dataset)
    }

    /// Prepare with already loaded encoders and schema.
    pub fn prepare_with(
        &self,
        encoders: &EncoderSet,
        schema: &SchemaStatus,
        dataset: &Dataset,
    ) -> Result<FeatureMatrix, PrepareError> {
        let frame = Frame::from_dataset(dataset);

        let binary_in = take_columns(&frame, &self.config.binary_columns, EncoderRole::Binary)?;
        let binary = encoders.binary.transform(&binary_in)?;

        let ordinal_in = take_columns(&frame, &self.config.ordinal_columns, EncoderRole::Ordinal)?;
        let ordinal = encoders.ordinal.transform(&ordinal_in)?;

        let onehot_cols = encoders.onehot.input_columns();
        let onehot_in = take_columns(&frame, onehot_cols, EncoderRole::OneHot)?;
        let onehot = encoders.onehot.transform(&onehot_in)?;

        let consumed = |name: &str| {
            self.config.binary_columns.iter().any(|c| c == name)
                || self.config.ordinal_columns.iter().any(|c| c == name)
                || onehot_cols.iter().any(|c| c == name)
        };
        let mut remainder = Frame::empty(frame.n_rows());
        for col in frame.columns.iter().filter(|c| !consumed(&c.name)) {
            remainder.push(col.clone())?;
        }
        let remainder = remainder.with_prefix(REMAINDER_PREFIX);

        log::debug!(
            "Encoded blocks: binary={} ordinal={} onehot={} remainder={}",
            binary.n_cols(),
            ordinal.n_cols(),
            onehot.n_cols(),
            remainder.n_cols()
        );

        let candidate = Frame::hstack(vec![binary, ordinal, onehot, remainder])?;
        let candidate = match schema {
            SchemaStatus::Available(columns) => candidate.reconcile(columns),
            SchemaStatus::Unavailable => {
                log::warn!(
                    "Training schema {} not found; passing {} candidate columns to the scaler unreconciled",
                    self.config.training_schema.display(),
                    candidate.n_cols()
                );
                candidate
            }
        };

        let scaled = encoders.scaler.transform(&candidate)?;
        let matrix = FeatureMatrix::from_frame(&scaled)?;
        log::info!("Prepared feature matrix: {} rows × {} columns", matrix.n_rows(), matrix.n_cols());
        Ok(matrix)
    }
}

/// Copy the named columns, in the given order, into a new frame.
fn take_columns(frame: &Frame, names: &[String], role: EncoderRole) -> Result<Frame, PrepareError> {
    let mut out = Frame::empty(frame.n_rows());
    for name in names {
        let col = frame.get(name).ok_or_else(|| PrepareError::MissingColumn {
            column: name.clone(),
            role,
        })?;
        out.push(col.clone())?;
    }
    Ok(out)
}
