use serde::Deserialize;

use super::linear::argmax;
use super::{Predict, check_input};
use crate::data::matrix::FeatureMatrix;
use crate::data::model::CellValue;
use crate::encoding::Category;
use crate::error::ModelError;

/// Marker for "no child" in the flattened node arrays.
const LEAF: i64 = -1;

/// A fitted decision tree stored as parallel node arrays.
///
/// Node `i` splits on `feature[i]` at `threshold[i]`; samples with
/// `x <= threshold` go to `children_left[i]`. Leaves have both children set to
/// `-1`. `value[i]` holds per-class weights (classifier) or a single output
/// (regressor).
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub n_features: usize,
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
    /// Present for classifiers.
    #[serde(default)]
    pub classes: Option<Vec<Category>>,
    #[serde(default)]
    pub feature_names_in: Option<Vec<String>>,
}

impl DecisionTree {
    pub(crate) fn validate(&self, classifier: bool) -> Result<(), String> {
        let n = self.children_left.len();
        if n == 0 {
            return Err("tree has no nodes".into());
        }
        if [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ]
        .iter()
        .any(|&len| len != n)
        {
            return Err("node arrays differ in length".into());
        }
        for i in 0..n {
            let (l, r) = (self.children_left[i], self.children_right[i]);
            if l == LEAF && r == LEAF {
                continue;
            }
            let in_range = |c: i64| c > i as i64 && (c as usize) < n;
            if !in_range(l) || !in_range(r) {
                return Err(format!("node {i} has invalid children ({l}, {r})"));
            }
            if self.feature[i] < 0 || self.feature[i] as usize >= self.n_features {
                return Err(format!("node {i} splits on feature {}", self.feature[i]));
            }
        }
        match (&self.classes, classifier) {
            (None, true) => Err("classifier tree records no classes".into()),
            (Some(classes), true) if classes.len() < 2 => {
                Err(format!("classifier tree needs at least 2 classes, got {}", classes.len()))
            }
            (Some(classes), true) if self.value.iter().any(|v| v.len() != classes.len()) => {
                Err("leaf values do not match the number of classes".into())
            }
            (Some(_), false) => Err("regressor tree must not record classes".into()),
            (None, false) if self.value.iter().any(|v| v.is_empty()) => {
                Err("regressor node without a value".into())
            }
            _ => Ok(()),
        }
    }

    /// Index of the leaf a sample lands in.
    fn leaf_for(&self, sample: &[f64]) -> usize {
        let mut node = 0usize;
        // Children always point forward, so this terminates.
        while self.children_left[node] != LEAF {
            let f = self.feature[node] as usize;
            node = if sample[f] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        node
    }

    fn leaf_proba(&self, leaf: usize) -> Vec<f64> {
        let weights = &self.value[leaf];
        let total: f64 = weights.iter().sum();
        if total > 0.0 {
            weights.iter().map(|w| w / total).collect()
        } else {
            vec![0.0; weights.len()]
        }
    }
}

impl Predict for DecisionTree {
    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<CellValue>, ModelError> {
        check_input(self.feature_names_in.as_deref(), self.n_features, x)?;
        Ok(x
            .rows
            .iter()
            .map(|row| {
                let leaf = self.leaf_for(row);
                match &self.classes {
                    Some(classes) => CellValue::from(&classes[argmax(&self.value[leaf])]),
                    None => CellValue::Float(self.value[leaf][0]),
                }
            })
            .collect())
    }

    fn predict_proba(&self, x: &FeatureMatrix) -> Result<Option<Vec<Vec<f64>>>, ModelError> {
        if self.classes.is_none() {
            return Ok(None);
        }
        check_input(self.feature_names_in.as_deref(), self.n_features, x)?;
        Ok(Some(
            x.rows
                .iter()
                .map(|row| self.leaf_proba(self.leaf_for(row)))
                .collect(),
        ))
    }
}
