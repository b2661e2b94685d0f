// src/table.rs
//
// Typed table: header row + `Cell` rows.
// Column typing happens here, once, the way a dataframe reader infers dtypes:
// a column is numeric only if every non-missing cell in it parses as a number,
// and integer when every row has a value and all of them are whole numbers.

use crate::core::Cell;
use crate::csv::{self, SourceEncoding};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    /// Per column: every row holds an integer literal. Such cells are written back without `.0`.
    pub integer_columns: Vec<bool>,
}

impl Table {
    /// Build from raw string rows (first row = header).
    /// Short rows are padded with `Missing`, long rows are cut to the header width.
    pub fn from_raw_rows(mut raw: Vec<Vec<String>>) -> Option<Table> {
        if raw.is_empty() { return None; }
        let headers = raw.remove(0);
        let width = headers.len();

        let numeric: Vec<bool> = (0..width)
            .map(|ci| {
                raw.iter()
                    .filter_map(|r| r.get(ci))
                    .map(|c| c.trim())
                    .filter(|c| !Cell::is_na_marker(c))
                    .all(|c| Cell::parse_number(c).is_some())
            })
            .collect();

        let integer_columns: Vec<bool> = (0..width)
            .map(|ci| {
                !raw.is_empty()
                    && raw.iter().all(|r| {
                        r.get(ci)
                            .map(|c| c.trim())
                            .is_some_and(|c| !Cell::is_na_marker(c) && c.parse::<i64>().is_ok())
                    })
            })
            .collect();

        let rows = raw
            .into_iter()
            .map(|r| {
                (0..width)
                    .map(|ci| type_cell(r.get(ci).map(|s| s.as_str()), numeric[ci]))
                    .collect()
            })
            .collect();

        Some(Table { headers, rows, integer_columns })
    }

    /// Decode bytes with the first working encoding and type the result.
    pub fn from_bytes(bytes: &[u8]) -> Option<(SourceEncoding, Table)> {
        let (enc, raw) = csv::decode_rows(bytes)?;
        let table = Table::from_raw_rows(raw)?;
        Some((enc, table))
    }

    /// Parse already-decoded text (tests, in-memory snapshots).
    pub fn from_text(text: &str) -> Option<Table> {
        let text = text.strip_prefix(csv::UTF8_BOM).unwrap_or(text);
        Table::from_raw_rows(csv::parse_rows(text, csv::SEP))
    }

    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Cell at (row, col); out-of-range reads as `Missing`.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        static MISSING: Cell = Cell::Missing;
        self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(&MISSING)
    }

    /// Is every non-missing cell of the column a number?
    /// An all-missing column counts as numeric, like a float column of NaNs.
    pub fn is_numeric_column(&self, col: usize) -> bool {
        self.rows
            .iter()
            .filter_map(|r| r.get(col))
            .all(|c| matches!(c, Cell::Number(_) | Cell::Missing))
    }

    pub fn is_integer_column(&self, col: usize) -> bool {
        self.integer_columns.get(col).copied().unwrap_or(false)
    }
}

fn type_cell(raw: Option<&str>, numeric: bool) -> Cell {
    let Some(raw) = raw else { return Cell::Missing };
    let t = raw.trim();
    if Cell::is_na_marker(t) {
        return Cell::Missing;
    }
    if numeric {
        if let Some(v) = Cell::parse_number(t) {
            return Cell::Number(v);
        }
    }
    Cell::Text(s!(t))
}
