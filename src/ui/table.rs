use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Raw-table preview (bottom panel)
// ---------------------------------------------------------------------------

/// Render the loaded table as a scrollable grid.
pub fn table_panel(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        ui.label("No table loaded.");
        return;
    };

    TableBuilder::new(ui)
        .striped(true)
        .columns(Column::auto().at_least(60.0), table.columns.len())
        .header(20.0, |mut header| {
            for name in &table.columns {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, table.len(), |mut row| {
                let cells = &table.rows[row.index()];
                for value in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(value.to_string());
                    });
                }
            });
        });
}
