//! Fitted feature transformers.
//!
//! Four roles take part in preparation: a binary encoder, an ordinal encoder,
//! a one-hot encoder and a final scaler. Each is read from its own JSON
//! artifact and only ever *applied*; nothing here fits anything.

pub mod binary;
pub mod category;
pub mod onehot;
pub mod ordinal;
pub mod scaler;

use serde::{Deserialize, Serialize};

use crate::artifact::load_artifact;
use crate::config::EncoderPaths;
use crate::data::frame::Frame;
use crate::error::{EncoderRole, PrepareError};

pub use binary::BinaryEncoder;
pub use category::Category;
pub use onehot::OneHotEncoder;
pub use ordinal::OrdinalEncoder;
pub use scaler::Scaler;

/// The only capability preparation needs from a fitted transformer.
pub trait Transform {
    fn transform(&self, input: &Frame) -> Result<Frame, PrepareError>;
}

/// What to do with a value that is not in the fitted vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleUnknown {
    #[default]
    Error,
    /// Ordinal only: emit the recorded `unknown_value`.
    UseEncodedValue,
    /// One-hot only: emit an all-zero indicator block.
    Ignore,
}

/// Reject a frame whose columns differ from the names a transformer was fit on.
pub(crate) fn check_feature_names(
    role: EncoderRole,
    expected: Option<&[String]>,
    input: &Frame,
) -> Result<(), PrepareError> {
    let found = input.column_names();
    match expected {
        Some(expected) if expected != found.as_slice() => Err(PrepareError::FeatureNames {
            role,
            expected: expected.to_vec(),
            found,
        }),
        _ => Ok(()),
    }
}

/// All four transformers, freshly read from disk.
#[derive(Debug, Clone)]
pub struct EncoderSet {
    pub binary: BinaryEncoder,
    pub ordinal: OrdinalEncoder,
    pub onehot: OneHotEncoder,
    pub scaler: Scaler,
}

impl EncoderSet {
    /// Load every role; the first failure aborts with the failing role named.
    pub fn load(paths: &EncoderPaths) -> Result<Self, PrepareError> {
        fn role_err(role: EncoderRole) -> impl FnOnce(crate::error::ArtifactError) -> PrepareError {
            move |source| PrepareError::EncoderLoad { role, source }
        }

        Ok(EncoderSet {
            binary: load_artifact(&paths.binary).map_err(role_err(EncoderRole::Binary))?,
            ordinal: load_artifact(&paths.ordinal).map_err(role_err(EncoderRole::Ordinal))?,
            onehot: load_artifact(&paths.onehot).map_err(role_err(EncoderRole::OneHot))?,
            scaler: load_artifact(&paths.scaler).map_err(role_err(EncoderRole::Scaler))?,
        })
    }
}
