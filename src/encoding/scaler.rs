use serde::Deserialize;

use super::{Transform, check_feature_names};
use crate::artifact::Artifact;
use crate::data::frame::{Column, Frame};
use crate::data::matrix::FeatureMatrix;
use crate::error::{EncoderRole, PrepareError};

/// Final numeric transform over the whole assembled matrix.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    /// `(x - mean) / scale`; either part may be absent.
    Standard {
        #[serde(default)]
        feature_names_in: Option<Vec<String>>,
        #[serde(default)]
        mean: Option<Vec<f64>>,
        #[serde(default)]
        scale: Option<Vec<f64>>,
    },
    /// `x * scale + min`.
    MinMax {
        #[serde(default)]
        feature_names_in: Option<Vec<String>>,
        min: Vec<f64>,
        scale: Vec<f64>,
    },
}

impl Scaler {
    fn feature_names_in(&self) -> Option<&[String]> {
        match self {
            Scaler::Standard { feature_names_in, .. } | Scaler::MinMax { feature_names_in, .. } => {
                feature_names_in.as_deref()
            }
        }
    }

    /// Number of columns the scaler was fit on, when it is recorded at all.
    pub fn n_features_in(&self) -> Option<usize> {
        if let Some(names) = self.feature_names_in() {
            return Some(names.len());
        }
        match self {
            Scaler::Standard { mean, scale, .. } => {
                mean.as_ref().or(scale.as_ref()).map(|v| v.len())
            }
            Scaler::MinMax { min, .. } => Some(min.len()),
        }
    }

    fn scale_value(&self, col: usize, x: f64) -> f64 {
        match self {
            Scaler::Standard { mean, scale, .. } => {
                let centered = mean.as_ref().map_or(x, |m| x - m[col]);
                scale.as_ref().map_or(centered, |s| centered / s[col])
            }
            Scaler::MinMax { min, scale, .. } => x * scale[col] + min[col],
        }
    }
}

impl Artifact for Scaler {
    fn validate(&self) -> Result<(), String> {
        let lengths: Vec<(&str, usize)> = match self {
            Scaler::Standard {
                feature_names_in,
                mean,
                scale,
            } => [
                ("feature_names_in", feature_names_in.as_ref().map(|v| v.len())),
                ("mean", mean.as_ref().map(|v| v.len())),
                ("scale", scale.as_ref().map(|v| v.len())),
            ]
            .into_iter()
            .filter_map(|(k, n)| n.map(|n| (k, n)))
            .collect(),
            Scaler::MinMax {
                feature_names_in,
                min,
                scale,
            } => {
                let mut v = vec![("min", min.len()), ("scale", scale.len())];
                if let Some(names) = feature_names_in {
                    v.push(("feature_names_in", names.len()));
                }
                v
            }
        };
        match lengths.split_first() {
            Some(((first, n), rest)) => match rest.iter().find(|(_, m)| m != n) {
                Some((other, m)) => Err(format!("{first} has {n} entries but {other} has {m}")),
                None => Ok(()),
            },
            None => Ok(()),
        }
    }
}

impl Transform for Scaler {
    fn transform(&self, input: &Frame) -> Result<Frame, PrepareError> {
        check_feature_names(EncoderRole::Scaler, self.feature_names_in(), input)?;
        if let Some(expected) = self.n_features_in() {
            if expected != input.n_cols() {
                return Err(PrepareError::ColumnCount {
                    role: EncoderRole::Scaler,
                    expected,
                    found: input.n_cols(),
                });
            }
        }

        let numeric = FeatureMatrix::from_frame(input)?;
        let mut out = Frame::empty(input.n_rows());
        for (j, name) in numeric.column_names.iter().enumerate() {
            let values = numeric
                .rows
                .iter()
                .map(|row| self.scale_value(j, row[j]))
                .collect();
            out.push(Column::numeric(name.clone(), values))?;
        }
        Ok(out)
    }
}
