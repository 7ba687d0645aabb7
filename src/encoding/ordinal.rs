use serde::Deserialize;

use super::category::{Category, position_of};
use super::{HandleUnknown, Transform, check_feature_names};
use crate::artifact::Artifact;
use crate::data::frame::{Column, Frame};
use crate::error::{EncoderRole, PrepareError};

/// Encodes ordered categorical columns as the position of each value in its
/// recorded category list.
#[derive(Debug, Clone, Deserialize)]
pub struct OrdinalEncoder {
    /// Recorded input names; absent when the encoder was fit without names.
    #[serde(default)]
    pub feature_names_in: Option<Vec<String>>,
    /// One ordered category list per input column.
    pub categories: Vec<Vec<Category>>,
    #[serde(default)]
    pub handle_unknown: HandleUnknown,
    #[serde(default)]
    pub unknown_value: Option<f64>,
}

impl Artifact for OrdinalEncoder {
    fn validate(&self) -> Result<(), String> {
        if let Some(names) = &self.feature_names_in {
            if names.len() != self.categories.len() {
                return Err(format!(
                    "{} feature names but {} category lists",
                    names.len(),
                    self.categories.len()
                ));
            }
        }
        match (self.handle_unknown, self.unknown_value) {
            (HandleUnknown::Ignore, _) => {
                Err("handle_unknown 'ignore' is not supported by the ordinal encoder".into())
            }
            (HandleUnknown::UseEncodedValue, None) => {
                Err("handle_unknown 'use_encoded_value' requires unknown_value".into())
            }
            _ => Ok(()),
        }
    }
}

impl Transform for OrdinalEncoder {
    fn transform(&self, input: &Frame) -> Result<Frame, PrepareError> {
        check_feature_names(EncoderRole::Ordinal, self.feature_names_in.as_deref(), input)?;
        if input.n_cols() != self.categories.len() {
            return Err(PrepareError::ColumnCount {
                role: EncoderRole::Ordinal,
                expected: self.categories.len(),
                found: input.n_cols(),
            });
        }

        let mut out = Frame::empty(input.n_rows());
        for (col, cats) in input.columns.iter().zip(&self.categories) {
            let codes = col
                .values
                .iter()
                .map(|cell| match (position_of(cats, cell), self.unknown_value) {
                    (Some(pos), _) => Ok(pos as f64),
                    (None, Some(code)) if self.handle_unknown == HandleUnknown::UseEncodedValue => {
                        Ok(code)
                    }
                    (None, _) => Err(PrepareError::UnseenCategory {
                        column: col.name.clone(),
                        value: cell.to_string(),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            out.push(Column::numeric(col.name.clone(), codes))?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn input(esc: Vec<CellValue>, hora: Vec<CellValue>) -> Frame {
        let n = esc.len();
        Frame::new(
            vec![
                Column::new("DESC_ESCOLARIDAD_MAX", esc),
                Column::new("HORA_OFICIAL_INICIO_LABORAL", hora),
            ],
            n,
        )
        .unwrap()
    }

    fn encoder(extra: &str) -> OrdinalEncoder {
        serde_json::from_str(&format!(
            r#"{{"feature_names_in": ["DESC_ESCOLARIDAD_MAX", "HORA_OFICIAL_INICIO_LABORAL"],
                "categories": [["LOW", "HIGH"], [8, 9]]{extra}}}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_position_codes() {
        let out = encoder("")
            .transform(&input(
                vec![CellValue::String("HIGH".into()), CellValue::String("LOW".into())],
                vec![CellValue::Integer(8), CellValue::Integer(9)],
            ))
            .unwrap();
        assert_eq!(out.columns[0].values, vec![CellValue::Float(1.0), CellValue::Float(0.0)]);
        assert_eq!(out.columns[1].values, vec![CellValue::Float(0.0), CellValue::Float(1.0)]);
    }

    #[test]
    fn test_unknown_uses_encoded_value() {
        let enc = encoder(r#", "handle_unknown": "use_encoded_value", "unknown_value": -1"#);
        let out = enc
            .transform(&input(
                vec![CellValue::String("PHD".into())],
                vec![CellValue::Integer(10)],
            ))
            .unwrap();
        assert_eq!(out.columns[0].values, vec![CellValue::Float(-1.0)]);
        assert_eq!(out.columns[1].values, vec![CellValue::Float(-1.0)]);
    }

    #[test]
    fn test_unknown_errors_by_default() {
        let err = encoder("")
            .transform(&input(
                vec![CellValue::String("PHD".into())],
                vec![CellValue::Integer(8)],
            ))
            .unwrap_err();
        assert!(matches!(err, PrepareError::UnseenCategory { ref column, .. } if column == "DESC_ESCOLARIDAD_MAX"));
    }

    #[test]
    fn test_recorded_names_must_match() {
        let frame = Frame::new(
            vec![
                Column::new("HORA_OFICIAL_INICIO_LABORAL", vec![CellValue::Integer(8)]),
                Column::new("DESC_ESCOLARIDAD_MAX", vec![CellValue::String("LOW".into())]),
            ],
            1,
        )
        .unwrap();
        let err = encoder("").transform(&frame).unwrap_err();
        assert!(matches!(err, PrepareError::FeatureNames { role: EncoderRole::Ordinal, .. }));
    }

    #[test]
    fn test_validate_requires_unknown_value() {
        let enc = encoder(r#", "handle_unknown": "use_encoded_value""#);
        assert!(enc.validate().is_err());
    }
}
