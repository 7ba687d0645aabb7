use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, Status};

// ---------------------------------------------------------------------------
// Left side panel – model selection and summary
// ---------------------------------------------------------------------------

/// Render the left panel: model dropdown, source and class legend.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Model");
    ui.separator();

    if state.models.is_empty() {
        ui.label("No models loaded.");
    } else {
        let current = state.selected_model.clone().unwrap_or_default();
        let mut picked: Option<String> = None;
        egui::ComboBox::from_id_salt("model_select")
            .selected_text(current.as_str())
            .width(ui.available_width())
            .show_ui(ui, |ui: &mut Ui| {
                for entry in &state.models {
                    if ui
                        .selectable_label(current == entry.name, entry.name.as_str())
                        .clicked()
                    {
                        picked = Some(entry.name.clone());
                    }
                }
            });
        if let Some(name) = picked {
            state.select_model(&name);
        }
    }

    ui.add_space(8.0);
    ui.heading("Data");
    ui.separator();

    let source = state
        .uploaded
        .as_ref()
        .unwrap_or(&state.config.default_input);
    ui.label(format!("Source: {}", source.display()));
    if let Some(ds) = &state.dataset {
        ui.label(format!("{} rows × {} columns", ds.len(), ds.column_names.len()));
    }

    if let Some(cm) = &state.color_map {
        ui.add_space(8.0);
        ui.heading("Classes");
        ui.separator();
        for ((label, color), (_, count)) in cm.legend_entries().iter().zip(&state.class_counts) {
            ui.label(RichText::new(format!("■ {label}  ({count})")).color(*color));
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Use default input").clicked() {
                state.uploaded = None;
                state.refresh();
                ui.close_menu();
            }
        });

        if ui.button("⟳ Reload").clicked() {
            state.refresh();
        }

        ui.separator();

        if let Some(out) = &state.output {
            ui.label(format!("{} predictions", out.len()));
            ui.separator();
        }

        match &state.status {
            Some(Status::Error(msg)) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            Some(Status::Info(msg)) => {
                ui.label(RichText::new(msg).color(Color32::LIGHT_BLUE));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open examples to predict")
        .add_filter("Supported files", &["csv", "xlsx", "xlsm", "xls", "ods", "parquet", "pq", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Spreadsheet", &["xlsx", "xlsm", "xls", "ods"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.open_file(path);
    }
}
