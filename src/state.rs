use std::path::PathBuf;

use crate::color::ColorMap;
use crate::config::AppConfig;
use crate::data::model::{CellValue, Dataset};
use crate::error::PredictError;
use crate::predict::{ModelEntry, PREDICTION_COLUMN};
use crate::session;

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    /// Nothing to show yet; a hint for the user.
    Info(String),
    Error(String),
}

impl From<&PredictError> for Status {
    fn from(e: &PredictError) -> Self {
        match e {
            PredictError::NoDataAvailable { .. } => Status::Info(e.to_string()),
            _ => Status::Error(e.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// File the user opened; `None` means the configured default input.
    pub uploaded: Option<PathBuf>,

    /// Loaded dataset (None when no source is available).
    pub dataset: Option<Dataset>,

    /// Models found in the catalog, sorted by name.
    pub models: Vec<ModelEntry>,

    /// Name of the model picked in the dropdown.
    pub selected_model: Option<String>,

    /// Original rows plus prediction / probability columns.
    pub output: Option<Dataset>,

    /// Prediction counts per class, in legend order.
    pub class_counts: Vec<(String, usize)>,

    /// Active colour map for predicted classes.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status: Option<Status>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            uploaded: None,
            dataset: None,
            models: Vec::new(),
            selected_model: None,
            output: None,
            class_counts: Vec::new(),
            color_map: None,
            status: None,
        }
    }

    /// Run one full interaction: load → catalog → prepare → predict.
    ///
    /// Every call starts from disk again; any failure stops the cycle and
    /// becomes the status message.
    pub fn refresh(&mut self) {
        self.output = None;
        self.class_counts.clear();
        self.color_map = None;
        self.status = None;

        if let Err(e) = self.run_cycle() {
            match &e {
                PredictError::NoDataAvailable { .. } => log::info!("{e}"),
                _ => log::error!("{e}"),
            }
            self.status = Some(Status::from(&e));
        }
    }

    fn run_cycle(&mut self) -> Result<(), PredictError> {
        self.dataset = None;
        self.models.clear();

        let dataset = session::load_dataset(&self.config, self.uploaded.as_deref())?;
        let dataset = self.dataset.insert(dataset);

        self.models = session::list_models(&self.config)?;
        let entry = match self
            .selected_model
            .as_ref()
            .and_then(|name| self.models.iter().find(|m| &m.name == name))
        {
            Some(entry) => entry,
            None => &self.models[0],
        };
        self.selected_model = Some(entry.name.clone());

        let output = session::run_prediction(&self.config, dataset, entry)?;
        if let Some(predictions) = output.column(PREDICTION_COLUMN) {
            self.color_map = ColorMap::for_predictions(&predictions);
            self.class_counts = count_classes(&predictions, self.color_map.as_ref());
        }
        self.output = Some(output);
        Ok(())
    }

    /// Use a file picked by the user instead of the default input.
    pub fn open_file(&mut self, path: PathBuf) {
        self.uploaded = Some(path);
        self.refresh();
    }

    /// Pick another model and re-run.
    pub fn select_model(&mut self, name: &str) {
        if self.selected_model.as_deref() != Some(name) {
            self.selected_model = Some(name.to_string());
            self.refresh();
        }
    }
}

/// Occurrences of each predicted class, ordered like the colour legend.
fn count_classes(
    predictions: &[CellValue],
    color_map: Option<&ColorMap>,
) -> Vec<(String, usize)> {
    let Some(cm) = color_map else {
        return Vec::new();
    };
    cm.legend_entries()
        .into_iter()
        .map(|(label, _)| {
            let n = predictions.iter().filter(|p| p.to_string() == label).count();
            (label, n)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn test_refresh_runs_full_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(testing::write_bundle(dir.path()));
        state.refresh();

        assert_eq!(state.status, None);
        assert_eq!(state.models.len(), 3);
        assert_eq!(state.selected_model.as_deref(), Some("linear_score.json"));
        assert_eq!(state.output.as_ref().unwrap().len(), 2);
        // Regression output: no class colours.
        assert!(state.color_map.is_none());
    }

    #[test]
    fn test_select_classifier() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(testing::write_bundle(dir.path()));
        state.refresh();
        state.select_model("logit_balanced.json");

        assert_eq!(state.status, None);
        assert_eq!(
            state.class_counts,
            vec![("0".to_string(), 1), ("1".to_string(), 1)]
        );
        let output = state.output.as_ref().unwrap();
        assert!(output.column_names.contains(&"prob_1".to_string()));
    }

    #[test]
    fn test_no_data_is_informational_and_skips_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let config = testing::write_bundle(dir.path());
        std::fs::remove_file(&config.default_input).unwrap();

        let mut state = AppState::new(config);
        state.refresh();
        assert!(matches!(state.status, Some(Status::Info(_))));
        assert!(state.models.is_empty());
        assert!(state.output.is_none());
    }

    #[test]
    fn test_preparation_error_keeps_dataset_visible() {
        let dir = tempfile::tempdir().unwrap();
        let config = testing::write_bundle(dir.path());
        std::fs::write(
            &config.default_input,
            "GENERO,POSEE_AUTO,DESC_ESCOLARIDAD_MAX,HORA_OFICIAL_INICIO_LABORAL,EDAD\nX,Y,HIGH,8,30\n",
        )
        .unwrap();

        let mut state = AppState::new(config);
        state.refresh();
        match &state.status {
            Some(Status::Error(msg)) => assert!(msg.starts_with("Error preparing data")),
            other => panic!("unexpected status {other:?}"),
        }
        assert!(state.dataset.is_some());
        assert!(state.output.is_none());
    }
}
