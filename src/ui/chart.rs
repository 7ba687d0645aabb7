use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Prediction counts (bottom panel)
// ---------------------------------------------------------------------------

/// Bar chart with one bar per predicted class, coloured like the table.
pub fn prediction_chart(ui: &mut Ui, state: &AppState) {
    if state.output.is_none() {
        return;
    }
    let Some(color_map) = &state.color_map else {
        ui.label("Continuous predictions: no class breakdown.");
        return;
    };

    Plot::new("prediction_counts")
        .legend(Legend::default())
        .height(160.0)
        .x_axis_label("Predicted class")
        .y_axis_label("Rows")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            // class_counts follows legend order
            let legend = color_map.legend_entries();
            for (i, (label, count)) in state.class_counts.iter().enumerate() {
                let color = legend.get(i).map(|(_, c)| *c).unwrap_or(Color32::GRAY);
                let bar = Bar::new(i as f64, *count as f64).width(0.6).fill(color);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(label).color(color));
            }
        });
}
