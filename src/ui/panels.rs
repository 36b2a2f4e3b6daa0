use std::path::PathBuf;

use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Ui};

use crate::data::loader;
use crate::data::partition::RowPredicate;
use crate::request::{PlotMode, PlotRequest};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – plot configuration
// ---------------------------------------------------------------------------

/// Render the left configuration panel: axis columns, labels, mode, groups.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Plot setup");
    ui.separator();

    let columns = match &state.table {
        Some(t) => t.columns.clone(),
        None => {
            ui.label("No table loaded.");
            return;
        }
    };

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Axis columns ----
            ui.strong("X axis");
            changed |= column_combo(ui, "x_col", &columns, &mut state.request.x_column);
            ui.strong("Y axis");
            changed |= column_combo(ui, "y_col", &columns, &mut state.request.y_column);
            ui.separator();

            // ---- Labels ----
            ui.strong("Title");
            ui.text_edit_singleline(&mut state.request.title);
            ui.strong("X label");
            ui.text_edit_singleline(&mut state.request.x_label);
            ui.strong("Y label");
            ui.text_edit_singleline(&mut state.request.y_label);
            ui.separator();

            // ---- Mode ----
            ui.strong("Mode");
            ui.horizontal(|ui: &mut Ui| {
                let grouped = matches!(state.request.mode, PlotMode::Grouped);
                if ui.selectable_label(grouped, "Grouped").clicked() && !grouped {
                    state.request.mode = PlotMode::Grouped;
                    changed = true;
                }
                if ui.selectable_label(!grouped, "Continuous").clicked() && grouped {
                    state.request.mode = PlotMode::Continuous {
                        color_column: state.request.y_column.clone(),
                    };
                    changed = true;
                }
            });

            match &mut state.request.mode {
                PlotMode::Continuous { color_column } => {
                    ui.strong("Color by");
                    changed |= column_combo(ui, "color_col", &columns, color_column);
                }
                PlotMode::Grouped => {
                    ui.separator();
                    changed |= group_editor(ui, state, &columns);
                }
            }
        });

    if changed {
        state.repartition();
    }
}

/// Group-rule list with per-rule editors. Returns whether anything changed.
fn group_editor(ui: &mut Ui, state: &mut AppState, columns: &[String]) -> bool {
    let mut changed = false;
    let mut remove: Option<usize> = None;

    ui.strong(format!("Groups  ({})", state.request.groups.len()));

    for (i, rule) in state.request.groups.iter_mut().enumerate() {
        ui.push_id(i, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                // Label and color are baked into the cached partitions, so
                // editing them needs a repartition too.
                changed |= ui.color_edit_button_srgb(&mut rule.color).changed();
                changed |= ui.text_edit_singleline(&mut rule.label).changed();
                if ui.small_button("✖").clicked() {
                    remove = Some(i);
                }
            });
            changed |= predicate_editor(ui, columns, &mut rule.predicate);
        });
        ui.add_space(4.0);
    }

    if let Some(i) = remove {
        state.remove_group_rule(i);
    }

    if ui.button("Add group").clicked() {
        // New rules default to the last rule's column; first use falls back
        // to the first non-axis column (the grouping variable is usually not
        // an axis, e.g. NNode when plotting Time over NDomain).
        let col = state
            .request
            .groups
            .last()
            .and_then(|r| r.predicate.column().map(str::to_string))
            .or_else(|| {
                columns
                    .iter()
                    .find(|c| **c != state.request.x_column && **c != state.request.y_column)
                    .cloned()
            })
            .or_else(|| columns.first().cloned());
        if let Some(col) = col {
            state.add_group_rule(&col);
        }
    }

    changed
}

/// Editor for one predicate: kind selector plus its numeric fields.
fn predicate_editor(ui: &mut Ui, columns: &[String], predicate: &mut RowPredicate) -> bool {
    let mut changed = false;

    ui.horizontal(|ui: &mut Ui| {
        let kind = match predicate {
            RowPredicate::Equals { .. } => "=",
            RowPredicate::Between { .. } => "range",
            RowPredicate::All => "all",
        };
        egui::ComboBox::from_id_salt("pred_kind")
            .selected_text(kind)
            .width(60.0)
            .show_ui(ui, |ui: &mut Ui| {
                let column = predicate
                    .column()
                    .map(str::to_string)
                    .or_else(|| columns.first().cloned())
                    .unwrap_or_default();
                if ui.selectable_label(kind == "=", "=").clicked() && kind != "=" {
                    *predicate = RowPredicate::Equals { column, value: 0.0 };
                    changed = true;
                } else if ui.selectable_label(kind == "range", "range").clicked()
                    && kind != "range"
                {
                    *predicate = RowPredicate::Between {
                        column,
                        min: 0.0,
                        max: 1.0,
                    };
                    changed = true;
                } else if ui.selectable_label(kind == "all", "all").clicked() && kind != "all" {
                    *predicate = RowPredicate::All;
                    changed = true;
                }
            });

        match predicate {
            RowPredicate::Equals { column, value } => {
                changed |= column_combo(ui, "pred_col", columns, column);
                changed |= ui.add(DragValue::new(value).speed(1.0)).changed();
            }
            RowPredicate::Between { column, min, max } => {
                changed |= column_combo(ui, "pred_col", columns, column);
                changed |= ui.add(DragValue::new(min).speed(1.0)).changed();
                ui.label("..");
                changed |= ui.add(DragValue::new(max).speed(1.0)).changed();
            }
            RowPredicate::All => {}
        }
    });

    changed
}

/// Column-name dropdown bound to `selected`. Returns whether it changed.
fn column_combo(ui: &mut Ui, id: &str, columns: &[String], selected: &mut String) -> bool {
    let mut changed = false;
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected.clone())
        .show_ui(ui, |ui: &mut Ui| {
            for col in columns {
                if ui.selectable_label(selected == col, col).clicked() && selected != col {
                    *selected = col.clone();
                    changed = true;
                }
            }
        });
    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open table…").clicked() {
                open_table_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Open preset…").clicked() {
                open_preset_dialog(state);
                ui.close_menu();
            }
            if ui.button("Save preset…").clicked() {
                save_preset_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            let source = state
                .source_path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!(
                "{source}: {} rows, {} columns",
                table.len(),
                table.columns.len()
            ));
        }

        ui.separator();

        if ui
            .selectable_label(state.show_table, "Data")
            .on_hover_text("Show the raw table")
            .clicked()
        {
            state.show_table = !state.show_table;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_table_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open timing table")
        .add_filter("Tab-separated values", &["tsv", "tab", "txt"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        load_table_into(state, path);
    }
}

/// Load a table from `path` into the state; shared by the dialog and the
/// command-line startup path.
pub fn load_table_into(state: &mut AppState, path: PathBuf) {
    match loader::load_table(&path, loader::TAB) {
        Ok(table) => {
            log::info!(
                "loaded {} rows with columns {:?} from {}",
                table.len(),
                table.columns,
                path.display()
            );
            state.set_table(path, table);
        }
        Err(e) => {
            log::error!("failed to load table: {e}");
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}

fn open_preset_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open plot preset")
        .add_filter("JSON preset", &["json"])
        .pick_file();

    if let Some(path) = file {
        match PlotRequest::load_preset(&path) {
            Ok(request) => {
                log::info!("loaded preset from {}", path.display());
                state.set_request(request);
            }
            Err(e) => {
                log::error!("failed to load preset: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn save_preset_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save plot preset")
        .add_filter("JSON preset", &["json"])
        .set_file_name("plot_preset.json")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.request.save_preset(&path) {
            log::error!("failed to save preset: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
