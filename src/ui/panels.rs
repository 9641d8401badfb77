use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::{Normalization, YearRange};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Artists");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    // ---- Display mode ----
    ui.strong("Stream Value Display");
    let mut mode = state.mode;
    for option in Normalization::ALL {
        ui.radio_value(&mut mode, option, option.label());
    }
    state.set_mode(mode);
    ui.separator();

    // ---- Year range ----
    ui.strong("Select Year Range");
    match (state.year_bounds, state.years) {
        (Some(bounds), Some(years)) => {
            let mut low = years.low;
            let mut high = years.high;
            ui.add(egui::Slider::new(&mut low, bounds.low..=bounds.high).text("from"));
            ui.add(egui::Slider::new(&mut high, bounds.low..=bounds.high).text("to"));
            // Dragging one end past the other moves both.
            if low > high {
                if low != years.low {
                    high = low;
                } else {
                    low = high;
                }
            }
            state.set_years(YearRange::new(low, high));
        }
        _ => {
            ui.label(RichText::new("No parseable dates in this file.").italics());
        }
    }
    ui.separator();

    // ---- Artist multi-select ----
    let header = format!(
        "Select Artist(s)  ({}/{})",
        state.selected.len(),
        state.artist_names.len()
    );
    ui.strong(header);
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });

    let names = state.artist_names.clone();
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for name in &names {
                let mut checked = state.selected.contains(name);
                let text = RichText::new(name).color(state.color_map.color_for(name));
                let songs = dataset.songs_of(name).join("\n");
                if ui
                    .checkbox(&mut checked, text)
                    .on_hover_text(songs)
                    .changed()
                {
                    state.toggle_artist(name);
                }
            }
        });
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
            if ui
                .add_enabled(state.data_path.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
            if ui
                .add_enabled(!state.records.is_empty(), egui::Button::new("Export table…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            if ds.is_empty() {
                ui.label(format!("{} artists, no data rows", ds.index.len()));
            } else {
                ui.label(format!(
                    "{} rows, {} artists, {} records shown",
                    ds.len(),
                    ds.index.len(),
                    state.records.len()
                ));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open streams data")
        .add_filter("Semicolon CSV", &["csv", "txt"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export tidy table")
        .set_file_name("streams_tidy.csv")
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        state.export(&path);
    }
}
