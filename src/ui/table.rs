use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Tidy table (below the chart)
// ---------------------------------------------------------------------------

/// Show the tidy records verbatim, in pipeline order.
pub fn tidy_table(ui: &mut Ui, state: &AppState) {
    if state.records.is_empty() {
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(100.0))
        .column(Column::auto().at_least(160.0))
        .column(Column::remainder())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            header.col(|ui| {
                ui.strong("Date");
            });
            header.col(|ui| {
                ui.strong("Artist");
            });
            header.col(|ui| {
                ui.strong("Streams");
            });
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.records.len(), |mut row| {
                let record = &state.records[row.index()];
                row.col(|ui| {
                    ui.label(record.date.format("%Y-%m-%d").to_string());
                });
                row.col(|ui| {
                    ui.label(record.artist.as_str());
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", record.streams));
                });
            });
        });
}
