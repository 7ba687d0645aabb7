use serde::Deserialize;

use super::category::{Category, position_of};
use super::{HandleUnknown, Transform, check_feature_names};
use crate::artifact::Artifact;
use crate::data::frame::{Column, Frame};
use crate::error::{EncoderRole, PrepareError};

/// Ordered input columns recorded by a fitted encoder.
pub trait InputColumns {
    fn input_columns(&self) -> &[String];
}

/// The two metadata layouts one-hot artifacts come in.
///
/// Newer artifacts record `feature_names_in`; older ones carry a separate
/// `feature_names` attribute. Resolved once when the artifact is read.
#[derive(Debug, Clone, PartialEq)]
pub enum OneHotInputs {
    FeatureNamesIn(Vec<String>),
    FeatureNames(Vec<String>),
}

impl InputColumns for OneHotInputs {
    fn input_columns(&self) -> &[String] {
        match self {
            OneHotInputs::FeatureNamesIn(names) | OneHotInputs::FeatureNames(names) => names,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawOneHot {
    #[serde(default)]
    feature_names_in: Option<Vec<String>>,
    #[serde(default)]
    feature_names: Option<Vec<String>>,
    categories: Vec<Vec<Category>>,
    #[serde(default)]
    handle_unknown: HandleUnknown,
}

/// Expands each input column into one indicator column per recorded category.
///
/// Indicator columns are named `{input}__{category}` in recorded order.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawOneHot")]
pub struct OneHotEncoder {
    pub inputs: OneHotInputs,
    pub categories: Vec<Vec<Category>>,
    pub handle_unknown: HandleUnknown,
}

impl TryFrom<RawOneHot> for OneHotEncoder {
    type Error = String;

    fn try_from(raw: RawOneHot) -> Result<Self, Self::Error> {
        let inputs = match (raw.feature_names_in, raw.feature_names) {
            (Some(names), _) => OneHotInputs::FeatureNamesIn(names),
            (None, Some(names)) => OneHotInputs::FeatureNames(names),
            (None, None) => {
                return Err("one-hot artifact records neither feature_names_in nor feature_names".into());
            }
        };
        Ok(OneHotEncoder {
            inputs,
            categories: raw.categories,
            handle_unknown: raw.handle_unknown,
        })
    }
}

impl Artifact for OneHotEncoder {
    fn validate(&self) -> Result<(), String> {
        let n_inputs = self.inputs.input_columns().len();
        if n_inputs != self.categories.len() {
            return Err(format!(
                "{n_inputs} input columns but {} category lists",
                self.categories.len()
            ));
        }
        if self.handle_unknown == HandleUnknown::UseEncodedValue {
            return Err("handle_unknown 'use_encoded_value' is not supported by the one-hot encoder".into());
        }
        Ok(())
    }
}

impl InputColumns for OneHotEncoder {
    fn input_columns(&self) -> &[String] {
        self.inputs.input_columns()
    }
}

impl OneHotEncoder {
    /// Flattened indicator names, `{input}__{category}`, in recorded order.
    pub fn output_columns(&self) -> Vec<String> {
        self.input_columns()
            .iter()
            .zip(&self.categories)
            .flat_map(|(name, cats)| cats.iter().map(move |c| format!("{name}__{c}")))
            .collect()
    }
}

impl Transform for OneHotEncoder {
    fn transform(&self, input: &Frame) -> Result<Frame, PrepareError> {
        check_feature_names(EncoderRole::OneHot, Some(self.input_columns()), input)?;

        let mut out = Frame::empty(input.n_rows());
        for (col, cats) in input.columns.iter().zip(&self.categories) {
            let mut indicators = vec![vec![0.0; input.n_rows()]; cats.len()];
            for (row, cell) in col.values.iter().enumerate() {
                match position_of(cats, cell) {
                    Some(pos) => indicators[pos][row] = 1.0,
                    None if self.handle_unknown == HandleUnknown::Ignore => {}
                    None => {
                        return Err(PrepareError::UnseenCategory {
                            column: col.name.clone(),
                            value: cell.to_string(),
                        });
                    }
                }
            }
            for (cat, values) in cats.iter().zip(indicators) {
                out.push(Column::numeric(format!("{}__{cat}", col.name), values))?;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn color_frame(values: &[&str]) -> Frame {
        Frame::new(
            vec![Column::new(
                "COLOR",
                values.iter().map(|v| CellValue::String(v.to_string())).collect(),
            )],
            values.len(),
        )
        .unwrap()
    }

    #[test]
    fn test_naming_follows_recorded_order() {
        let enc: OneHotEncoder =
            serde_json::from_str(r#"{"feature_names_in": ["COLOR"], "categories": [["RED", "BLUE"]]}"#)
                .unwrap();
        assert_eq!(enc.output_columns(), vec!["COLOR__RED", "COLOR__BLUE"]);

        let out = enc.transform(&color_frame(&["BLUE", "RED"])).unwrap();
        assert_eq!(out.column_names(), vec!["COLOR__RED", "COLOR__BLUE"]);
        assert_eq!(out.columns[0].values, vec![CellValue::Float(0.0), CellValue::Float(1.0)]);
        assert_eq!(out.columns[1].values, vec![CellValue::Float(1.0), CellValue::Float(0.0)]);
    }

    #[test]
    fn test_falls_back_to_feature_names() {
        let enc: OneHotEncoder =
            serde_json::from_str(r#"{"feature_names": ["TURNO"], "categories": [[1, 2.0]]}"#).unwrap();
        assert_eq!(enc.inputs, OneHotInputs::FeatureNames(vec!["TURNO".into()]));
        assert_eq!(enc.output_columns(), vec!["TURNO__1", "TURNO__2.0"]);
    }

    #[test]
    fn test_feature_names_in_wins() {
        let enc: OneHotEncoder = serde_json::from_str(
            r#"{"feature_names_in": ["A"], "feature_names": ["B"], "categories": [["x"]]}"#,
        )
        .unwrap();
        assert_eq!(enc.input_columns(), ["A".to_string()]);
    }

    #[test]
    fn test_missing_metadata_is_rejected() {
        let res: Result<OneHotEncoder, _> = serde_json::from_str(r#"{"categories": [["x"]]}"#);
        assert!(res.unwrap_err().to_string().contains("feature_names_in"));
    }

    #[test]
    fn test_unknown_category() {
        let enc: OneHotEncoder =
            serde_json::from_str(r#"{"feature_names_in": ["COLOR"], "categories": [["RED", "BLUE"]]}"#)
                .unwrap();
        let err = enc.transform(&color_frame(&["GREEN"])).unwrap_err();
        assert!(matches!(err, PrepareError::UnseenCategory { .. }));

        let ignoring = OneHotEncoder {
            handle_unknown: HandleUnknown::Ignore,
            ..enc
        };
        let out = ignoring.transform(&color_frame(&["GREEN"])).unwrap();
        assert!(out.columns.iter().all(|c| c.values == vec![CellValue::Float(0.0)]));
    }
}
