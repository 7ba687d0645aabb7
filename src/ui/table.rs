use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::predict::PREDICTION_COLUMN;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Result table (central panel)
// ---------------------------------------------------------------------------

/// Show the prediction output, or the raw dataset while there is none.
pub fn result_table(ui: &mut Ui, state: &AppState) {
    let Some(table) = state.output.as_ref().or(state.dataset.as_ref()) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to predict  (File → Open…)");
        });
        return;
    };

    let prediction_idx = state
        .output
        .as_ref()
        .and_then(|out| out.column_index(PREDICTION_COLUMN));

    egui::ScrollArea::horizontal()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(TableColumn::auto().at_least(32.0))
                .columns(
                    TableColumn::auto().at_least(70.0).clip(true),
                    table.column_names.len(),
                )
                .header(22.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("#");
                    });
                    for name in &table.column_names {
                        header.col(|ui| {
                            ui.strong(name.as_str());
                        });
                    }
                })
                .body(|body| {
                    body.rows(20.0, table.len(), |mut row| {
                        let i = row.index();
                        row.col(|ui| {
                            ui.label(i.to_string());
                        });
                        for (j, cell) in table.rows[i].iter().enumerate() {
                            row.col(|ui| {
                                let mut text = RichText::new(cell.to_string());
                                if Some(j) == prediction_idx {
                                    text = text.strong();
                                    if let Some(cm) = &state.color_map {
                                        text = text.color(cm.color_for(cell));
                                    }
                                }
                                ui.label(text);
                            });
                        }
                    });
                });
        });
}
