use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::DataError;

// ---------------------------------------------------------------------------
// Value – a single cell of the timing table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value. Timing tables are numeric in practice, but
/// free-form header names make no type promise, so text cells are tolerated.
/// Using `BTreeMap` / `BTreeSet` downstream so `Value` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    Null,
}

// -- Manual Eq/Ord so we can put Value in BTreeSet --

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Null => 0,
                Int(_) => 1,
                Float(_) => 2,
                Text(_) => 3,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Null => write!(f, "<null>"),
        }
    }
}

impl Value {
    /// Guess the type of a raw cell token: int, then float, then text.
    pub fn parse(s: &str) -> Value {
        let s = s.trim();
        if s.is_empty() {
            return Value::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return Value::Int(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return Value::Float(f);
        }
        Value::Text(s.to_string())
    }

    /// Try to interpret the value as an `f64` for plotting and predicates.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// TimingTable – the complete loaded table
// ---------------------------------------------------------------------------

/// One loaded timing-measurement file: header order and row order are exactly
/// the file's, with per-column unique values pre-computed for the group editor.
#[derive(Debug, Clone, Default)]
pub struct TimingTable {
    /// Column names in header order.
    pub columns: Vec<String>,
    /// Rows in file order; each row has one `Value` per column.
    pub rows: Vec<Vec<Value>>,
    /// For each column the sorted set of distinct values.
    pub unique_values: BTreeMap<String, BTreeSet<Value>>,
}

impl TimingTable {
    /// Build a table and its unique-value index from parsed rows.
    /// Callers guarantee every row has `columns.len()` cells.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let mut unique_values: BTreeMap<String, BTreeSet<Value>> = columns
            .iter()
            .map(|c| (c.clone(), BTreeSet::new()))
            .collect();
        for row in &rows {
            for (col, val) in columns.iter().zip(row) {
                if let Some(set) = unique_values.get_mut(col) {
                    set.insert(val.clone());
                }
            }
        }
        TimingTable {
            columns,
            rows,
            unique_values,
        }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolve a column name to its index, failing with the name that was
    /// asked for so the error message identifies the missing column.
    pub fn column_index(&self, name: &str) -> Result<usize, DataError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))
    }

    /// The cell at (row, column name), if both exist.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Numeric view of one column, `None` for non-numeric cells.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>, DataError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|r| r[idx].as_f64()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TimingTable {
        TimingTable::new(
            vec!["NNode".into(), "Time(ms)".into()],
            vec![
                vec![Value::Int(1), Value::Float(10.5)],
                vec![Value::Int(6), Value::Float(20.0)],
                vec![Value::Int(1), Value::Float(15.0)],
            ],
        )
    }

    #[test]
    fn parse_guesses_int_then_float_then_text() {
        assert_eq!(Value::parse("42"), Value::Int(42));
        assert_eq!(Value::parse("4.25"), Value::Float(4.25));
        assert_eq!(Value::parse("fast"), Value::Text("fast".into()));
        assert_eq!(Value::parse(""), Value::Null);
        assert_eq!(Value::parse(" 7 "), Value::Int(7));
    }

    #[test]
    fn as_f64_covers_numeric_variants_only() {
        assert_eq!(Value::Int(3).as_f64(), Some(3.0));
        assert_eq!(Value::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::Text("x".into()).as_f64(), None);
        assert_eq!(Value::Null.as_f64(), None);
    }

    #[test]
    fn unique_values_indexed_per_column() {
        let t = sample();
        let nodes = &t.unique_values["NNode"];
        assert_eq!(nodes.len(), 2);
        assert!(nodes.contains(&Value::Int(1)));
        assert!(nodes.contains(&Value::Int(6)));
    }

    #[test]
    fn column_index_reports_missing_name() {
        let t = sample();
        assert_eq!(t.column_index("Time(ms)").unwrap(), 1);
        let err = t.column_index("NDomain").unwrap_err();
        assert!(matches!(err, DataError::ColumnNotFound(ref c) if c == "NDomain"));
    }

    #[test]
    fn numeric_column_preserves_row_order() {
        let t = sample();
        let times = t.numeric_column("Time(ms)").unwrap();
        assert_eq!(times, vec![Some(10.5), Some(20.0), Some(15.0)]);
    }
}
