use eframe::egui;

use crate::config::Config;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EdmStreamsApp {
    pub state: AppState,
}

impl EdmStreamsApp {
    /// Build the app and load the configured data file.
    pub fn new(config: Config) -> Self {
        let path = config.data.clone();
        let mut state = AppState::new(config);
        state.load(&path);
        Self { state }
    }
}

impl eframe::App for EdmStreamsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selection ----
        egui::SidePanel::left("selection_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart above tidy table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let chart_height = (ui.available_height() * 0.6).max(200.0);
            plot::streams_plot(ui, &self.state, chart_height);
            ui.separator();
            table::tidy_table(ui, &self.state);
        });
    }
}
