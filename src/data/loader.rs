use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::model::{TimingTable, Value};
use super::DataError;

// ---------------------------------------------------------------------------
// Delimited-table loader
// ---------------------------------------------------------------------------

/// The delimiter used by every timing file observed so far.
pub const TAB: u8 = b'\t';

/// Load a timing table from a delimited text file.
///
/// The first record is the header naming each column; every following record
/// is one measurement row. Cell types are guessed per token (int, float,
/// text; empty cells become null).
pub fn load_table(path: &Path, delimiter: u8) -> Result<TimingTable, DataError> {
    let file = File::open(path).map_err(|source| DataError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(file, delimiter)
}

/// Parse a table from any reader. Split out of [`load_table`] so tests can
/// feed byte slices through the exact production code path.
pub fn parse_table(reader: impl Read, delimiter: u8) -> Result<TimingTable, DataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        // Ragged rows are reported as ColumnCount below, with row context.
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in csv_reader.records().enumerate() {
        let record = result?;
        if record.len() != columns.len() {
            return Err(DataError::ColumnCount {
                row: row_no,
                expected: columns.len(),
                found: record.len(),
            });
        }
        rows.push(record.iter().map(Value::parse).collect());
    }

    Ok(TimingTable::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_count_and_columns_match_input() {
        let input = "NNode\tNDomain\tNReq\tTime(ms)\n\
                     1\t5\t2\t10.5\n\
                     6\t5\t2\t20\n\
                     11\t8\t3\t41.25\n";
        let table = parse_table(input.as_bytes(), TAB).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.columns, vec!["NNode", "NDomain", "NReq", "Time(ms)"]);
        assert_eq!(table.value(1, "Time(ms)"), Some(&Value::Int(20)));
        assert_eq!(table.value(2, "Time(ms)"), Some(&Value::Float(41.25)));
    }

    #[test]
    fn header_only_input_yields_empty_table() {
        let table = parse_table("NNode\tTime(ms)\n".as_bytes(), TAB).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns.len(), 2);
    }

    #[test]
    fn ragged_row_is_rejected_with_position() {
        let input = "NNode\tTime(ms)\n1\t10\n6\n";
        let err = parse_table(input.as_bytes(), TAB).unwrap_err();
        match err {
            DataError::ColumnCount {
                row,
                expected,
                found,
            } => {
                assert_eq!(row, 1);
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("expected ColumnCount, got {other}"),
        }
    }

    #[test]
    fn missing_file_fails_with_open_error() {
        let err = load_table(Path::new("no_such_timing_file.tsv"), TAB).unwrap_err();
        assert!(matches!(err, DataError::Open { .. }));
    }

    #[test]
    fn alternate_delimiter_is_honoured() {
        let table = parse_table("N,Time(ms)\n500,12.5\n".as_bytes(), b',').unwrap();
        assert_eq!(table.columns, vec!["N", "Time(ms)"]);
        assert_eq!(table.value(0, "N"), Some(&Value::Int(500)));
    }
}
