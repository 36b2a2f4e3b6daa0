use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct TimingLensApp {
    pub state: AppState,
}

impl TimingLensApp {
    /// Start with a table already loaded (command-line path).
    pub fn with_table(path: std::path::PathBuf) -> Self {
        let mut app = Self::default();
        panels::load_table_into(&mut app.state, path);
        app
    }
}

impl eframe::App for TimingLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: plot configuration ----
        egui::SidePanel::left("config_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: raw-table preview (toggleable) ----
        if self.state.show_table {
            egui::TopBottomPanel::bottom("table_panel")
                .default_height(220.0)
                .resizable(true)
                .show(ctx, |ui| {
                    table::table_panel(ui, &self.state);
                });
        }

        // ---- Central panel: scatter plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::grouped_scatter(ui, &self.state);
        });
    }
}
