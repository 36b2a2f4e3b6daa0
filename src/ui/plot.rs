use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::color::gradient;
use crate::data::model::TimingTable;
use crate::request::PlotMode;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Comparative scatter (central panel)
// ---------------------------------------------------------------------------

/// Render the configured scatter in the central panel.
pub fn grouped_scatter(ui: &mut Ui, state: &AppState) {
    let table = match &state.table {
        Some(t) => t,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a timing table to plot  (File → Open…)");
            });
            return;
        }
    };

    let request = &state.request;
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&request.title);
    });

    let x_label = if request.x_label.is_empty() {
        request.x_column.clone()
    } else {
        request.x_label.clone()
    };
    let y_label = if request.y_label.is_empty() {
        request.y_column.clone()
    } else {
        request.y_label.clone()
    };

    let plot = Plot::new("timing_scatter")
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    plot.show(ui, |plot_ui| match &request.mode {
        PlotMode::Grouped => {
            // Partition order is draw order: later groups land on top.
            for part in &state.partitions {
                let points = xy_points(table, &part.indices, &request.x_column, &request.y_column);
                if points.is_empty() {
                    // Warned at partition time; an empty series adds nothing.
                    continue;
                }
                let [r, g, b] = part.color;
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(&part.label)
                        .color(Color32::from_rgb(r, g, b))
                        .shape(MarkerShape::Circle)
                        .radius(3.0),
                );
            }
        }
        PlotMode::Continuous { color_column } => {
            // Whole table at once, gradient over the third column.
            let Ok(magnitudes) = table.numeric_column(color_column) else {
                return;
            };
            let (min, max) = magnitudes
                .iter()
                .flatten()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                });
            let range = max - min;

            let (Ok(xi), Ok(yi)) = (
                table.column_index(&request.x_column),
                table.column_index(&request.y_column),
            ) else {
                return;
            };
            for (row_idx, row) in table.rows.iter().enumerate() {
                let (Some(x), Some(y)) = (row[xi].as_f64(), row[yi].as_f64()) else {
                    continue;
                };
                let Some(m) = magnitudes[row_idx] else { continue };
                let t = if range > 0.0 { (m - min) / range } else { 0.5 };
                plot_ui.points(
                    Points::new(PlotPoints::from(vec![[x, y]]))
                        .color(gradient(t))
                        .shape(MarkerShape::Circle)
                        .radius(3.0),
                );
            }
        }
    });
}

/// Collect the (x, y) coordinates of the given rows, skipping rows whose
/// x or y cell is non-numeric.
fn xy_points(table: &TimingTable, indices: &[usize], x: &str, y: &str) -> Vec<[f64; 2]> {
    let (Ok(xi), Ok(yi)) = (table.column_index(x), table.column_index(y)) else {
        return Vec::new();
    };
    indices
        .iter()
        .filter_map(|&row| {
            let r = table.rows.get(row)?;
            Some([r[xi].as_f64()?, r[yi].as_f64()?])
        })
        .collect()
}
