//! Trained models: catalog, artifact formats, inference and output assembly.

pub mod catalog;
pub mod linear;
pub mod tree;

use serde::Deserialize;

use crate::artifact::{Artifact, load_artifact};
use crate::data::matrix::FeatureMatrix;
use crate::data::model::{CellValue, Dataset};
use crate::error::ModelError;

pub use catalog::{ModelEntry, list_models};
pub use linear::{LinearRegression, LogisticRegression};
pub use tree::DecisionTree;

/// Column holding the model output in the result table.
pub const PREDICTION_COLUMN: &str = "prediction";

/// Inference contract shared by every model kind.
pub trait Predict {
    /// One prediction per row.
    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<CellValue>, ModelError>;

    /// Per-class probabilities (N × K), or `None` for models without that capability.
    fn predict_proba(&self, x: &FeatureMatrix) -> Result<Option<Vec<Vec<f64>>>, ModelError>;
}

/// Check a matrix against what a model was fit on.
pub(crate) fn check_input(
    feature_names_in: Option<&[String]>,
    n_features: usize,
    x: &FeatureMatrix,
) -> Result<(), ModelError> {
    if x.n_cols() != n_features {
        return Err(ModelError::Shape {
            expected: n_features,
            found: x.n_cols(),
        });
    }
    if let Some(names) = feature_names_in {
        if names != x.column_names.as_slice() {
            return Err(ModelError::FeatureNames {
                expected: names.to_vec(),
                found: x.column_names.clone(),
            });
        }
    }
    for (row, values) in x.rows.iter().enumerate() {
        if let Some(j) = values.iter().position(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite {
                row,
                column: x.column_names[j].clone(),
            });
        }
    }
    Ok(())
}

/// A deserialized model artifact, tagged by `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Model {
    LogisticRegression(LogisticRegression),
    LinearRegression(LinearRegression),
    DecisionTreeClassifier(DecisionTree),
    DecisionTreeRegressor(DecisionTree),
}

impl Artifact for Model {
    fn validate(&self) -> Result<(), String> {
        match self {
            Model::LogisticRegression(m) => m.validate(),
            Model::LinearRegression(_) => Ok(()),
            Model::DecisionTreeClassifier(t) => t.validate(true),
            Model::DecisionTreeRegressor(t) => t.validate(false),
        }
    }
}

impl Model {
    fn inner(&self) -> &dyn Predict {
        match self {
            Model::LogisticRegression(m) => m,
            Model::LinearRegression(m) => m,
            Model::DecisionTreeClassifier(t) | Model::DecisionTreeRegressor(t) => t,
        }
    }
}

impl Predict for Model {
    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<CellValue>, ModelError> {
        self.inner().predict(x)
    }

    fn predict_proba(&self, x: &FeatureMatrix) -> Result<Option<Vec<Vec<f64>>>, ModelError> {
        self.inner().predict_proba(x)
    }
}

/// Read a model artifact chosen from the catalog.
pub fn load_model(entry: &ModelEntry) -> Result<Model, ModelError> {
    load_artifact(&entry.path).map_err(|source| ModelError::Load {
        name: entry.name.clone(),
        source,
    })
}

/// Run the model and attach its outputs to a copy of the original rows.
///
/// Adds `prediction` (replacing an existing column of that name) and, when the
/// model has probabilities, `prob_0..prob_{K-1}` by class position.
pub fn predict_rows(
    model: &impl Predict,
    x: &FeatureMatrix,
    dataset: &Dataset,
) -> Result<Dataset, ModelError> {
    let predictions = model.predict(x)?;
    let mut out = dataset.clone();
    out.set_column(PREDICTION_COLUMN, predictions);

    if let Some(proba) = model.predict_proba(x)? {
        let n_classes = proba.first().map(|p| p.len()).unwrap_or(0);
        for k in 0..n_classes {
            let column = proba.iter().map(|p| CellValue::Float(p[k])).collect();
            out.set_column(&format!("prob_{k}"), column);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Category;

    fn dataset() -> Dataset {
        Dataset::new(
            vec!["EDAD".into(), "prediction".into()],
            vec![
                vec![CellValue::Integer(30), CellValue::Null],
                vec![CellValue::Integer(45), CellValue::Null],
            ],
        )
    }

    fn matrix() -> FeatureMatrix {
        FeatureMatrix {
            column_names: vec!["remainder__EDAD".into()],
            rows: vec![vec![-1.0], vec![1.0]],
        }
    }

    #[test]
    fn test_deserialize_tagged_models() {
        let model: Model = serde_json::from_str(
            r#"{"kind": "logistic_regression", "classes": [0, 1], "coef": [[1.5]], "intercept": [0.0]}"#,
        )
        .unwrap();
        assert!(matches!(model, Model::LogisticRegression(_)));
        model.validate().unwrap();

        let model: Model =
            serde_json::from_str(r#"{"kind": "linear_regression", "coef": [2.0], "intercept": 1.0}"#)
                .unwrap();
        assert!(matches!(model, Model::LinearRegression(_)));
    }

    #[test]
    fn test_predict_rows_with_proba() {
        let model = Model::LogisticRegression(LogisticRegression {
            classes: vec![Category::Int(0), Category::Int(1)],
            coef: vec![vec![3.0]],
            intercept: vec![0.0],
            feature_names_in: None,
        });
        let out = predict_rows(&model, &matrix(), &dataset()).unwrap();

        // Existing `prediction` column is replaced in place.
        assert_eq!(out.column_names, vec!["EDAD", "prediction", "prob_0", "prob_1"]);
        assert_eq!(
            out.column("prediction").unwrap(),
            vec![CellValue::Integer(0), CellValue::Integer(1)]
        );
        assert_eq!(out.column("EDAD").unwrap(), dataset().column("EDAD").unwrap());
    }

    #[test]
    fn test_predict_rows_without_proba() {
        let model = Model::LinearRegression(LinearRegression {
            coef: vec![10.0],
            intercept: 0.0,
            feature_names_in: None,
        });
        let out = predict_rows(&model, &matrix(), &dataset()).unwrap();
        assert_eq!(out.column_names, vec!["EDAD", "prediction"]);
        assert_eq!(out.rows[1][1], CellValue::Float(10.0));
    }

    #[test]
    fn test_tree_with_empty_classes_fails_validation() {
        let model: Model = serde_json::from_str(
            r#"{"kind": "decision_tree_classifier", "n_features": 1,
                "children_left": [-1], "children_right": [-1], "feature": [-2],
                "threshold": [-2.0], "value": [[]], "classes": []}"#,
        )
        .unwrap();
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_missing_feature_value_is_rejected() {
        let model = Model::LogisticRegression(LogisticRegression {
            classes: vec![Category::Int(0), Category::Int(1)],
            coef: vec![vec![3.0]],
            intercept: vec![0.0],
            feature_names_in: None,
        });
        let mut x = matrix();
        x.rows[1][0] = f64::NAN;
        let err = predict_rows(&model, &x, &dataset()).unwrap_err();
        assert!(matches!(
            err,
            ModelError::NonFinite { row: 1, ref column } if column == "remainder__EDAD"
        ));
    }

    #[test]
    fn test_recorded_feature_names_are_checked() {
        let model = Model::LinearRegression(LinearRegression {
            coef: vec![1.0],
            intercept: 0.0,
            feature_names_in: Some(vec!["EDAD".into()]),
        });
        let err = predict_rows(&model, &matrix(), &dataset()).unwrap_err();
        assert!(matches!(err, ModelError::FeatureNames { .. }));
    }
}
