mod app;
mod data;
mod plot;
mod state;
mod ui;

use std::path::PathBuf;

use app::HydroViewApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Data directory: first CLI argument, default ./data
    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("HydroView")
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "HydroView",
        options,
        Box::new(move |cc| Ok(Box::new(HydroViewApp::new(cc, data_dir)))),
    )
}
