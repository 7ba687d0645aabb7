use crate::error::PrepareError;

use super::frame::Frame;

/// The numeric feature matrix handed to a model. Row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    pub column_names: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Convert a frame to numbers; any cell without a numeric reading fails.
    pub fn from_frame(frame: &Frame) -> Result<Self, PrepareError> {
        let mut rows = vec![Vec::with_capacity(frame.n_cols()); frame.n_rows()];
        for col in &frame.columns {
            for (row, cell) in rows.iter_mut().zip(&col.values) {
                let v = cell.as_f64().ok_or_else(|| PrepareError::NonNumeric {
                    column: col.name.clone(),
                    value: cell.to_string(),
                })?;
                row.push(v);
            }
        }
        Ok(FeatureMatrix {
            column_names: frame.column_names(),
            rows,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.column_names.len()
    }
}
