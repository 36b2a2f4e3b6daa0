mod app;
mod color;
mod data;
mod request;
mod state;
mod ui;

use std::path::PathBuf;

use app::TimingLensApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional positional argument: a timing table to load at startup.
    let table_path = std::env::args().nth(1).map(PathBuf::from);

    let app = match table_path {
        Some(path) => TimingLensApp::with_table(path),
        None => TimingLensApp::default(),
    };
    let size = app.state.request.figure_size;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    // Blocks until the viewer closes the window.
    eframe::run_native(
        "Timing Lens – Validity Timing Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
