use eframe::egui;

use crate::config::AppConfig;
use crate::state::AppState;
use crate::ui::{chart, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PredictionViewerApp {
    pub state: AppState,
}

impl PredictionViewerApp {
    /// Build the app and run the first prediction cycle on the default input.
    pub fn new(config: AppConfig) -> Self {
        let mut state = AppState::new(config);
        state.refresh();
        Self { state }
    }
}

impl eframe::App for PredictionViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: model selection ----
        egui::SidePanel::left("model_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: class counts ----
        if self.state.color_map.is_some() {
            egui::TopBottomPanel::bottom("chart_panel")
                .resizable(true)
                .show(ctx, |ui| {
                    chart::prediction_chart(ui, &self.state);
                });
        }

        // ---- Central panel: result table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::result_table(ui, &self.state);
        });
    }
}
