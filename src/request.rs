use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::model::TimingTable;
use crate::data::partition::GroupSpec;
use crate::data::DataError;

// ---------------------------------------------------------------------------
// PlotRequest – everything one comparative scatter needs
// ---------------------------------------------------------------------------

/// How points get their colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlotMode {
    /// One discrete series per group rule, drawn in rule order.
    Grouped,
    /// Whole table at once, point color driven by a continuous gradient over
    /// the named column (the third dimension of the original 3D plots).
    Continuous { color_column: String },
}

/// The full configuration of one plot: axis columns, labels, mode, groups.
/// Replaces the hard-coded constants of the original per-plot scripts; can be
/// saved to and loaded from a JSON preset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotRequest {
    pub title: String,
    pub x_column: String,
    pub y_column: String,
    pub x_label: String,
    pub y_label: String,
    pub mode: PlotMode,
    pub groups: GroupSpec,
    /// Initial window size in logical pixels.
    pub figure_size: [f32; 2],
}

impl Default for PlotRequest {
    fn default() -> Self {
        PlotRequest {
            title: "Timing".to_string(),
            x_column: String::new(),
            y_column: String::new(),
            x_label: String::new(),
            y_label: "(ms)".to_string(),
            mode: PlotMode::Grouped,
            groups: Vec::new(),
            figure_size: [1200.0, 800.0],
        }
    }
}

impl PlotRequest {
    /// Check every referenced column against the table, before any drawing.
    pub fn validate(&self, table: &TimingTable) -> Result<(), DataError> {
        table.column_index(&self.x_column)?;
        table.column_index(&self.y_column)?;
        if let PlotMode::Continuous { color_column } = &self.mode {
            table.column_index(color_column)?;
        }
        for rule in &self.groups {
            if let Some(col) = rule.predicate.column() {
                table.column_index(col)?;
            }
        }
        Ok(())
    }

    /// Pick axis defaults for a freshly loaded table: x is the first column,
    /// y is the last (the elapsed-time column in all observed files).
    pub fn adopt_columns(&mut self, table: &TimingTable) {
        let known = |c: &String| table.columns.contains(c);
        if !known(&self.x_column) {
            self.x_column = table.columns.first().cloned().unwrap_or_default();
            self.x_label = self.x_column.clone();
        }
        if !known(&self.y_column) {
            self.y_column = table.columns.last().cloned().unwrap_or_default();
        }
        if let PlotMode::Continuous { color_column } = &mut self.mode {
            if !table.columns.contains(color_column) {
                *color_column = self.y_column.clone();
            }
        }
    }

    /// Load a request preset from a JSON file.
    pub fn load_preset(path: &Path) -> Result<PlotRequest> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading preset {}", path.display()))?;
        serde_json::from_str(&text).context("parsing preset JSON")
    }

    /// Save this request as a JSON preset.
    pub fn save_preset(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self).context("serialising preset")?;
        std::fs::write(path, text)
            .with_context(|| format!("writing preset {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Value;
    use crate::data::partition::GroupRule;

    fn table() -> TimingTable {
        TimingTable::new(
            vec!["NDomain".into(), "Time(ms)".into()],
            vec![vec![Value::Int(5), Value::Int(10)]],
        )
    }

    fn request() -> PlotRequest {
        PlotRequest {
            title: "Adjacency Size vs Validity Check Time(ms)".into(),
            x_column: "NDomain".into(),
            y_column: "Time(ms)".into(),
            x_label: "Domain Size".into(),
            y_label: "(ms)".into(),
            mode: PlotMode::Grouped,
            groups: vec![GroupRule::equals("1 Node", "NNode", 1.0, [220, 40, 40])],
            figure_size: [1200.0, 800.0],
        }
    }

    #[test]
    fn validate_rejects_missing_axis_column() {
        let mut req = request();
        req.groups.clear();
        req.x_column = "NReq".into();
        let err = req.validate(&table()).unwrap_err();
        assert!(matches!(err, DataError::ColumnNotFound(ref c) if c == "NReq"));
    }

    #[test]
    fn validate_rejects_missing_group_column() {
        let req = request();
        // NNode is referenced by the group rule but absent from the table.
        let err = req.validate(&table()).unwrap_err();
        assert!(matches!(err, DataError::ColumnNotFound(ref c) if c == "NNode"));
    }

    #[test]
    fn validate_rejects_missing_color_column() {
        let mut req = request();
        req.groups.clear();
        req.mode = PlotMode::Continuous {
            color_column: "NNode".into(),
        };
        let err = req.validate(&table()).unwrap_err();
        assert!(matches!(err, DataError::ColumnNotFound(ref c) if c == "NNode"));
    }

    #[test]
    fn adopt_columns_defaults_x_first_y_last() {
        let mut req = PlotRequest::default();
        req.adopt_columns(&table());
        assert_eq!(req.x_column, "NDomain");
        assert_eq!(req.y_column, "Time(ms)");
        assert_eq!(req.x_label, "NDomain");
    }

    #[test]
    fn preset_json_round_trips() {
        let req = request();
        let json = serde_json::to_string(&req).unwrap();
        let back: PlotRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, req);
    }
}
