mod app;
mod artifact;
mod color;
mod config;
mod data;
mod encoding;
mod error;
mod predict;
mod prepare;
mod session;
mod state;
#[cfg(test)]
mod testing;
mod ui;

use app::PredictionViewerApp;
use config::AppConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        log::error!("{e:#}; falling back to default configuration");
        AppConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Prediction Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(PredictionViewerApp::new(config)))),
    )
}
