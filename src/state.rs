use std::path::PathBuf;

use crate::color::default_rule_color;
use crate::data::model::TimingTable;
use crate::data::partition::{partition, GroupRule, Partition, RowPredicate};
use crate::request::{PlotMode, PlotRequest};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table (None until a file is opened).
    pub table: Option<TimingTable>,

    /// Where the current table came from.
    pub source_path: Option<PathBuf>,

    /// The plot being configured and drawn.
    pub request: PlotRequest,

    /// Partitions for the current request (cached; empty in continuous mode).
    pub partitions: Vec<Partition>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether the raw-table preview panel is open.
    pub show_table: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            source_path: None,
            request: PlotRequest::default(),
            partitions: Vec::new(),
            status_message: None,
            show_table: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded table: default the axis columns, drop group
    /// rules that reference columns the new table does not have, repartition.
    pub fn set_table(&mut self, path: PathBuf, table: TimingTable) {
        self.request.adopt_columns(&table);
        self.request.groups.retain(|rule| {
            rule.predicate
                .column()
                .is_none_or(|c| table.columns.contains(&c.to_string()))
        });
        self.table = Some(table);
        self.source_path = Some(path);
        self.status_message = None;
        self.repartition();
    }

    /// Replace the whole request (preset loaded from disk) and re-derive
    /// everything that depends on it.
    pub fn set_request(&mut self, request: PlotRequest) {
        self.request = request;
        if let Some(table) = &self.table {
            self.request.adopt_columns(table);
        }
        self.repartition();
    }

    /// Recompute cached partitions after any request or table change.
    /// Validation and partitioning errors land in the status line.
    pub fn repartition(&mut self) {
        self.partitions.clear();
        let Some(table) = &self.table else {
            return;
        };
        if let Err(e) = self.request.validate(table) {
            self.status_message = Some(format!("Error: {e}"));
            return;
        }
        match self.request.mode {
            PlotMode::Grouped => match partition(table, &self.request.groups) {
                Ok(parts) => {
                    self.partitions = parts;
                    self.status_message = None;
                }
                Err(e) => self.status_message = Some(format!("Error: {e}")),
            },
            PlotMode::Continuous { .. } => {
                self.status_message = None;
            }
        }
    }

    /// Append a fresh group rule on the given column, seeded with the
    /// column's smallest distinct value and the next palette colour.
    pub fn add_group_rule(&mut self, column: &str) {
        let value = self
            .table
            .as_ref()
            .and_then(|t| t.unique_values.get(column))
            .and_then(|vals| vals.iter().find_map(|v| v.as_f64()))
            .unwrap_or(0.0);

        let rule = GroupRule {
            label: format!("{column} = {value}"),
            predicate: RowPredicate::Equals {
                column: column.to_string(),
                value,
            },
            color: default_rule_color(self.request.groups.len()),
        };
        self.request.groups.push(rule);
        self.repartition();
    }

    /// Remove the i-th group rule.
    pub fn remove_group_rule(&mut self, index: usize) {
        if index < self.request.groups.len() {
            self.request.groups.remove(index);
            self.repartition();
        }
    }
}
