use serde::Deserialize;

use super::{Predict, check_input};
use crate::data::matrix::FeatureMatrix;
use crate::data::model::CellValue;
use crate::encoding::Category;
use crate::error::ModelError;

fn dot(w: &[f64], x: &[f64]) -> f64 {
    w.iter().zip(x).map(|(a, b)| a * b).sum()
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn softmax(z: &[f64]) -> Vec<f64> {
    let max = z.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = z.iter().map(|v| (v - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// Index of the largest value; the first one wins ties.
pub(crate) fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |best, (i, &v)| if v > best.1 { (i, v) } else { best })
        .0
}

// ---------------------------------------------------------------------------
// Logistic regression
// ---------------------------------------------------------------------------

/// Binary (one coefficient row) or multinomial (one row per class) logistic model.
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticRegression {
    pub classes: Vec<Category>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    #[serde(default)]
    pub feature_names_in: Option<Vec<String>>,
}

impl LogisticRegression {
    pub fn n_features(&self) -> usize {
        self.coef.first().map(|r| r.len()).unwrap_or(0)
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        let rows = self.coef.len();
        let expected_rows = if self.classes.len() == 2 { 1 } else { self.classes.len() };
        if self.classes.len() < 2 {
            return Err(format!("{} classes, need at least 2", self.classes.len()));
        }
        if rows != expected_rows || self.intercept.len() != rows {
            return Err(format!(
                "{} classes need {expected_rows} coefficient rows and intercepts, found {rows} and {}",
                self.classes.len(),
                self.intercept.len()
            ));
        }
        if self.coef.iter().any(|r| r.len() != self.n_features()) {
            return Err("coefficient rows differ in length".into());
        }
        Ok(())
    }
}

impl Predict for LogisticRegression {
    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<CellValue>, ModelError> {
        let proba = self.predict_proba(x)?.unwrap_or_default();
        Ok(proba
            .iter()
            .map(|p| CellValue::from(&self.classes[argmax(p)]))
            .collect())
    }

    fn predict_proba(&self, x: &FeatureMatrix) -> Result<Option<Vec<Vec<f64>>>, ModelError> {
        check_input(self.feature_names_in.as_deref(), self.n_features(), x)?;
        let proba = x
            .rows
            .iter()
            .map(|row| {
                let z: Vec<f64> = self
                    .coef
                    .iter()
                    .zip(&self.intercept)
                    .map(|(w, b)| dot(w, row) + b)
                    .collect();
                if z.len() == 1 {
                    let p = sigmoid(z[0]);
                    vec![1.0 - p, p]
                } else {
                    softmax(&z)
                }
            })
            .collect();
        Ok(Some(proba))
    }
}

// ---------------------------------------------------------------------------
// Linear regression
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct LinearRegression {
    pub coef: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub feature_names_in: Option<Vec<String>>,
}

impl Predict for LinearRegression {
    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<CellValue>, ModelError> {
        check_input(self.feature_names_in.as_deref(), self.coef.len(), x)?;
        Ok(x
            .rows
            .iter()
            .map(|row| CellValue::Float(dot(&self.coef, row) + self.intercept))
            .collect())
    }

    fn predict_proba(&self, _x: &FeatureMatrix) -> Result<Option<Vec<Vec<f64>>>, ModelError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<f64>>) -> FeatureMatrix {
        let n = rows.first().map(|r| r.len()).unwrap_or(0);
        FeatureMatrix {
            column_names: (0..n).map(|i| format!("f{i}")).collect(),
            rows,
        }
    }

    #[test]
    fn test_binary_logistic() {
        let model = LogisticRegression {
            classes: vec![Category::Int(0), Category::Int(1)],
            coef: vec![vec![2.0, -1.0]],
            intercept: vec![0.0],
            feature_names_in: None,
        };
        model.validate().unwrap();
        let x = matrix(vec![vec![1.0, 0.0], vec![-1.0, 0.0]]);

        let proba = model.predict_proba(&x).unwrap().unwrap();
        assert!((proba[0][1] - sigmoid(2.0)).abs() < 1e-12);
        assert!((proba[0][0] + proba[0][1] - 1.0).abs() < 1e-12);

        let pred = model.predict(&x).unwrap();
        assert_eq!(pred, vec![CellValue::Integer(1), CellValue::Integer(0)]);
    }

    #[test]
    fn test_multinomial_logistic() {
        let model = LogisticRegression {
            classes: vec![
                Category::Text("a".into()),
                Category::Text("b".into()),
                Category::Text("c".into()),
            ],
            coef: vec![vec![1.0], vec![0.0], vec![-1.0]],
            intercept: vec![0.0, 0.0, 0.0],
            feature_names_in: None,
        };
        model.validate().unwrap();
        let proba = model.predict_proba(&matrix(vec![vec![-3.0]])).unwrap().unwrap();
        assert_eq!(proba[0].len(), 3);
        assert!((proba[0].iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert_eq!(
            model.predict(&matrix(vec![vec![-3.0]])).unwrap(),
            vec![CellValue::String("c".into())]
        );
    }

    #[test]
    fn test_shape_mismatch() {
        let model = LinearRegression {
            coef: vec![1.0, 1.0, 1.0],
            intercept: 0.0,
            feature_names_in: None,
        };
        let err = model.predict(&matrix(vec![vec![1.0, 2.0]])).unwrap_err();
        assert!(matches!(err, ModelError::Shape { expected: 3, found: 2 }));
    }

    #[test]
    fn test_linear_regression_has_no_proba() {
        let model = LinearRegression {
            coef: vec![2.0],
            intercept: 1.0,
            feature_names_in: None,
        };
        let x = matrix(vec![vec![3.0]]);
        assert_eq!(model.predict(&x).unwrap(), vec![CellValue::Float(7.0)]);
        assert!(model.predict_proba(&x).unwrap().is_none());
    }

    #[test]
    fn test_validate_rejects_bad_shapes() {
        let model = LogisticRegression {
            classes: vec![Category::Int(0), Category::Int(1), Category::Int(2)],
            coef: vec![vec![1.0]],
            intercept: vec![0.0],
            feature_names_in: None,
        };
        assert!(model.validate().is_err());
    }
}
