mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::EdmStreamsApp;
use clap::Parser;
use config::Config;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = Config::parse();
    log::debug!("Starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "EDM Streams Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(EdmStreamsApp::new(config)))),
    )
}
