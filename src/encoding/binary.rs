use serde::Deserialize;

use super::category::Category;
use super::{Transform, check_feature_names};
use crate::artifact::Artifact;
use crate::data::frame::{Column, Frame};
use crate::error::{EncoderRole, PrepareError};

/// One binary column: each of its (at most two) categories maps to 0 or 1.
#[derive(Debug, Clone, Deserialize)]
pub struct BinaryMapping {
    pub column: String,
    pub mapping: Vec<(Category, u8)>,
}

/// Encodes a fixed set of two-valued categorical columns in place.
///
/// Output columns keep their input names. Values outside the recorded
/// mapping are always an error.
#[derive(Debug, Clone, Deserialize)]
pub struct BinaryEncoder {
    pub columns: Vec<BinaryMapping>,
}

impl Artifact for BinaryEncoder {
    fn validate(&self) -> Result<(), String> {
        for m in &self.columns {
            if m.mapping.is_empty() || m.mapping.len() > 2 {
                return Err(format!(
                    "column '{}' maps {} categories, expected 1 or 2",
                    m.column,
                    m.mapping.len()
                ));
            }
            if let Some((cat, code)) = m.mapping.iter().find(|(_, code)| *code > 1) {
                return Err(format!(
                    "column '{}' maps '{cat}' to {code}, codes must be 0 or 1",
                    m.column
                ));
            }
        }
        Ok(())
    }
}

impl BinaryEncoder {
    pub fn input_columns(&self) -> Vec<String> {
        self.columns.iter().map(|m| m.column.clone()).collect()
    }
}

impl Transform for BinaryEncoder {
    fn transform(&self, input: &Frame) -> Result<Frame, PrepareError> {
        check_feature_names(EncoderRole::Binary, Some(self.input_columns().as_slice()), input)?;

        let mut out = Frame::empty(input.n_rows());
        for (col, m) in input.columns.iter().zip(&self.columns) {
            let codes = col
                .values
                .iter()
                .map(|cell| {
                    m.mapping
                        .iter()
                        .find(|(cat, _)| cat.matches(cell))
                        .map(|(_, code)| f64::from(*code))
                        .ok_or_else(|| PrepareError::UnseenCategory {
                            column: col.name.clone(),
                            value: cell.to_string(),
                        })
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

    fn encoder() -> BinaryEncoder {
        serde_json::from_str(
            r#"{"columns": [
                {"column": "GENERO", "mapping": [["F", 0], ["M", 1]]},
                {"column": "POSEE_AUTO", "mapping": [["N", 0], ["Y", 1]]}
            ]}"#,
        )
        .unwrap()
    }

    fn text(xs: &[&str]) -> Vec<CellValue> {
        xs.iter().map(|s| CellValue::String(s.to_string())).collect()
    }

    #[test]
    fn test_encodes_in_place() {
        let input = Frame::new(
            vec![
                Column::new("GENERO", text(&["M", "F"])),
                Column::new("POSEE_AUTO", text(&["Y", "N"])),
            ],
            2,
        )
        .unwrap();
        let out = encoder().transform(&input).unwrap();
        assert_eq!(out.column_names(), vec!["GENERO", "POSEE_AUTO"]);
        assert_eq!(out.columns[0].values, vec![CellValue::Float(1.0), CellValue::Float(0.0)]);
        assert_eq!(out.columns[1].values, vec![CellValue::Float(1.0), CellValue::Float(0.0)]);
    }

    #[test]
    fn test_unknown_value_errors() {
        let input = Frame::new(
            vec![
                Column::new("GENERO", text(&["X"])),
                Column::new("POSEE_AUTO", text(&["Y"])),
            ],
            1,
        )
        .unwrap();
        let err = encoder().transform(&input).unwrap_err();
        assert!(matches!(err, PrepareError::UnseenCategory { ref value, .. } if value == "X"));
    }

    #[test]
    fn test_rejects_non_binary_codes() {
        let enc: BinaryEncoder = serde_json::from_str(
            r#"{"columns": [{"column": "A", "mapping": [["x", 0], ["y", 2]]}]}"#,
        )
        .unwrap();
        assert!(enc.validate().unwrap_err().contains("0 or 1"));
    }
}
