use serde::{Deserialize, Serialize};

use super::model::TimingTable;
use super::DataError;

// ---------------------------------------------------------------------------
// GroupSpec: ordered, named row predicates with display colors
// ---------------------------------------------------------------------------

/// A row-selection predicate over one column. Numeric comparison only;
/// non-numeric cells never match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RowPredicate {
    /// Cell equals the given value exactly (e.g. `NNode == 1`).
    Equals { column: String, value: f64 },
    /// Cell lies in the half-open interval `[min, max)`.
    Between { column: String, min: f64, max: f64 },
    /// Every row matches.
    All,
}

impl RowPredicate {
    /// The column this predicate reads, if any.
    pub fn column(&self) -> Option<&str> {
        match self {
            RowPredicate::Equals { column, .. } | RowPredicate::Between { column, .. } => {
                Some(column)
            }
            RowPredicate::All => None,
        }
    }
}

/// One entry of a [`GroupSpec`]: label, predicate, and display color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRule {
    pub label: String,
    pub predicate: RowPredicate,
    /// RGB display color for the series.
    pub color: [u8; 3],
}

impl GroupRule {
    pub fn equals(label: &str, column: &str, value: f64, color: [u8; 3]) -> Self {
        GroupRule {
            label: label.to_string(),
            predicate: RowPredicate::Equals {
                column: column.to_string(),
                value,
            },
            color,
        }
    }
}

/// Ordered list of group rules. Declaration order is plotting order: later
/// groups are drawn on top and appear later in the legend.
pub type GroupSpec = Vec<GroupRule>;

// ---------------------------------------------------------------------------
// Partition
// ---------------------------------------------------------------------------

/// The rows selected by one group rule, as indices into the source table in
/// original row order.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub label: String,
    pub color: [u8; 3],
    pub indices: Vec<usize>,
}

/// Split a table into one partition per group rule, in rule order.
///
/// A row may land in several partitions (overlapping predicates are allowed)
/// or in none. A rule selecting zero rows yields an empty partition and a
/// warning, never an error. A predicate naming an absent column fails before
/// any row is evaluated.
pub fn partition(table: &TimingTable, spec: &GroupSpec) -> Result<Vec<Partition>, DataError> {
    // Resolve every referenced column up front so a bad spec fails whole.
    let col_indices: Vec<Option<usize>> = spec
        .iter()
        .map(|rule| match rule.predicate.column() {
            Some(name) => table.column_index(name).map(Some),
            None => Ok(None),
        })
        .collect::<Result<_, _>>()?;

    let mut partitions = Vec::with_capacity(spec.len());
    for (rule, col_idx) in spec.iter().zip(col_indices) {
        let indices: Vec<usize> = table
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| match (&rule.predicate, col_idx) {
                (RowPredicate::All, _) => true,
                (RowPredicate::Equals { value, .. }, Some(c)) => {
                    row[c].as_f64().is_some_and(|v| v == *value)
                }
                (RowPredicate::Between { min, max, .. }, Some(c)) => {
                    row[c].as_f64().is_some_and(|v| v >= *min && v < *max)
                }
                _ => false,
            })
            .map(|(i, _)| i)
            .collect();

        if indices.is_empty() {
            log::warn!("group '{}' matched no rows", rule.label);
        }

        partitions.push(Partition {
            label: rule.label.clone(),
            color: rule.color,
            indices,
        });
    }

    Ok(partitions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Value;

    const RED: [u8; 3] = [220, 40, 40];
    const GREEN: [u8; 3] = [40, 180, 80];
    const BLUE: [u8; 3] = [60, 90, 220];

    fn node_table() -> TimingTable {
        TimingTable::new(
            vec!["NNode".into(), "NDomain".into(), "Time(ms)".into()],
            vec![
                vec![Value::Int(1), Value::Int(5), Value::Int(10)],
                vec![Value::Int(6), Value::Int(5), Value::Int(20)],
                vec![Value::Int(1), Value::Int(8), Value::Int(15)],
            ],
        )
    }

    #[test]
    fn selects_matching_rows_in_original_order() {
        let table = node_table();
        let spec = vec![GroupRule::equals("1 Node", "NNode", 1.0, RED)];
        let parts = partition(&table, &spec).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].label, "1 Node");
        assert_eq!(parts[0].indices, vec![0, 2]);
    }

    #[test]
    fn partition_order_follows_spec_declaration_order() {
        let table = node_table();
        let spec = vec![
            GroupRule::equals("6 Nodes", "NNode", 6.0, GREEN),
            GroupRule::equals("1 Node", "NNode", 1.0, RED),
        ];
        let parts = partition(&table, &spec).unwrap();
        let labels: Vec<&str> = parts.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["6 Nodes", "1 Node"]);
        // Deterministic across repeated calls.
        assert_eq!(partition(&table, &spec).unwrap(), parts);
    }

    #[test]
    fn row_may_appear_in_several_partitions() {
        let table = node_table();
        let spec = vec![
            GroupRule::equals("1 Node", "NNode", 1.0, RED),
            GroupRule {
                label: "small".into(),
                predicate: RowPredicate::Between {
                    column: "NNode".into(),
                    min: 0.0,
                    max: 10.0,
                },
                color: BLUE,
            },
        ];
        let parts = partition(&table, &spec).unwrap();
        assert_eq!(parts[0].indices, vec![0, 2]);
        assert_eq!(parts[1].indices, vec![0, 1, 2]);
    }

    #[test]
    fn unmatched_rows_are_excluded_everywhere() {
        let table = node_table();
        let spec = vec![GroupRule::equals("6 Nodes", "NNode", 6.0, GREEN)];
        let parts = partition(&table, &spec).unwrap();
        assert_eq!(parts[0].indices, vec![1]);
    }

    #[test]
    fn empty_group_is_allowed() {
        let table = node_table();
        let spec = vec![GroupRule::equals("11 Nodes", "NNode", 11.0, BLUE)];
        let parts = partition(&table, &spec).unwrap();
        assert_eq!(parts.len(), 1);
        assert!(parts[0].indices.is_empty());
    }

    #[test]
    fn empty_table_partitions_without_error() {
        let table = TimingTable::new(vec!["NNode".into(), "Time(ms)".into()], Vec::new());
        let spec = vec![GroupRule::equals("1 Node", "NNode", 1.0, RED)];
        let parts = partition(&table, &spec).unwrap();
        assert!(parts[0].indices.is_empty());
    }

    #[test]
    fn absent_predicate_column_fails_before_evaluation() {
        let table = node_table();
        let spec = vec![GroupRule::equals("1 Req", "NReq", 1.0, RED)];
        let err = partition(&table, &spec).unwrap_err();
        assert!(matches!(err, DataError::ColumnNotFound(ref c) if c == "NReq"));
    }

    #[test]
    fn between_is_half_open() {
        let table = node_table();
        let spec = vec![GroupRule {
            label: "mid".into(),
            predicate: RowPredicate::Between {
                column: "NNode".into(),
                min: 1.0,
                max: 6.0,
            },
            color: BLUE,
        }];
        let parts = partition(&table, &spec).unwrap();
        // 1 is included, 6 is not.
        assert_eq!(parts[0].indices, vec![0, 2]);
    }
}
