//! One user interaction: load → (pick model) → prepare → predict.
//!
//! These are the only entry points the UI calls. Nothing is cached between
//! calls; encoders and the chosen model are re-read from disk every time.

use std::path::Path;

use crate::config::AppConfig;
use crate::data::loader;
use crate::data::model::Dataset;
use crate::error::PredictError;
use crate::predict::{self, ModelEntry};
use crate::prepare::FeaturePreparer;

/// The uploaded file if any, otherwise the configured default input.
pub fn load_dataset(config: &AppConfig, uploaded: Option<&Path>) -> Result<Dataset, PredictError> {
    loader::load_dataset(uploaded, &config.default_input)
}

/// Model names available for the dropdown.
pub fn list_models(config: &AppConfig) -> Result<Vec<ModelEntry>, PredictError> {
    predict::list_models(&config.catalog)
}

/// Prepare the dataset and run the chosen model over it.
///
/// Returns the original rows plus `prediction` and any `prob_*` columns.
pub fn run_prediction(
    config: &AppConfig,
    dataset: &Dataset,
    entry: &ModelEntry,
) -> Result<Dataset, PredictError> {
    let model = predict::load_model(entry)?;
    let features = FeaturePreparer::new(config.prepare.clone()).prepare(dataset)?;
    let output = predict::predict_rows(&model, &features, dataset)?;
    log::info!(
        "Model '{}' produced {} predictions",
        entry.name,
        output.len()
    );
    Ok(output)
}
