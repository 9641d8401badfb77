use chrono::{Datelike, NaiveDate};
use eframe::egui::{RichText, Ui};
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoint, PlotPoints};

use crate::data::model::{Normalization, TidyRecord};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Streams chart (central panel)
// ---------------------------------------------------------------------------

/// Render the time-series line chart, one line per selected artist.
pub fn streams_plot(ui: &mut Ui, state: &AppState, height: f32) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            let text = match &state.status_message {
                Some(msg) => msg.clone(),
                None => "Open a streams file to begin  (File → Open…)".to_string(),
            };
            ui.heading(text);
        });
        return;
    }

    if state.needs_selection() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(
                RichText::new("Please select at least one artist to view the data.").heading(),
            );
        });
        return;
    }

    let y_label = match state.mode {
        Normalization::Raw => "Streams",
        Normalization::Indexed => "Streams (index 0-100)",
    };

    ui.heading("Combined Streams Over Time by Artist");
    Plot::new("streams_plot")
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Date")
        .y_axis_label(y_label)
        .x_axis_formatter(|mark: GridMark, _range| format_day(mark.value))
        .label_formatter(|name, point: &PlotPoint| {
            format!("{name}\n{}\n{:.2}", format_day(point.x), point.y)
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (artist, records) in group_by_artist(&state.records) {
                let points: PlotPoints = records
                    .iter()
                    .map(|r| [day_number(r.date), r.streams])
                    .collect();

                let line = Line::new(points)
                    .name(artist)
                    .color(state.color_map.color_for(artist))
                    .width(1.5);

                plot_ui.line(line);
            }
        });
}

/// Split records into consecutive runs sharing the same artist.
///
/// The pipeline emits records artist by artist, so each run is one line.
fn group_by_artist(records: &[TidyRecord]) -> Vec<(&str, &[TidyRecord])> {
    let mut groups = Vec::new();
    let mut start = 0;
    for i in 1..=records.len() {
        if i == records.len() || records[i].artist != records[start].artist {
            groups.push((records[start].artist.as_str(), &records[start..i]));
            start = i;
        }
    }
    groups
}

/// Plot x coordinate of a date.
fn day_number(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn format_day(x: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
