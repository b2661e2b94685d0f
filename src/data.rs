// src/data.rs
//
// Light wrappers around canonical and view-layer data.
//
// - Snapshot: read-only holder for the published `latest_data.csv`.
//             Only an import replaces it, via the store.
// - SearchView: derived (view) data produced from a Dashboard by applying
//               the search filter for on-screen display.

use std::path::{Path, PathBuf};

use crate::core::columns::clean_header;
use crate::dashboard::{Dashboard, DashboardRow};
use crate::pipeline::COL_UPDATED_AT;
use crate::table::Table;

/// Authoritative published dataset, as read back from disk.
#[derive(Clone, Debug)]
pub struct Snapshot {
    path: PathBuf,
    table: Table,
    /// Trading date the data belongs to, if known.
    pub data_date: Option<String>,
}

impl Snapshot {
    pub fn new(path: impl Into<PathBuf>, table: Table, data_date: Option<String>) -> Self {
        Self { path: path.into(), table, data_date }
    }

    pub fn path(&self) -> &Path { &self.path }

    /// Read-only view of the table.
    pub fn table(&self) -> &Table { &self.table }

    /// `数据更新时间` of the first row; every row carries the same stamp.
    pub fn updated_at(&self) -> Option<String> {
        let ci = self.table.headers.iter().position(|h| clean_header(h) == COL_UPDATED_AT)?;
        let v = self.table.cell(0, ci).to_field();
        if v.is_empty() { None } else { Some(v) }
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::from_table(&self.table)
    }
}

/// Zero-copy filtered view for display.
/// Holds list of row indexes into the dashboard rows.
#[derive(Clone, Debug)]
pub struct SearchView<'a> {
    /// Positions of kept rows
    pub row_ix: Vec<usize>,
    rows: &'a [DashboardRow],
}

impl<'a> SearchView<'a> {
    pub fn all(rows: &'a [DashboardRow]) -> Self {
        Self { row_ix: (0..rows.len()).collect(), rows }
    }

    pub fn from_indices(rows: &'a [DashboardRow], row_ix: Vec<usize>) -> Self {
        Self { row_ix, rows }
    }

    pub fn len(&self) -> usize { self.row_ix.len() }
    pub fn is_empty(&self) -> bool { self.row_ix.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &'a DashboardRow> + '_ {
        self.row_ix.iter().filter_map(|&ix| self.rows.get(ix))
    }

    /// Display cells, serial numbers starting at 1 in view order.
    pub fn numbered_cells(&self) -> Vec<[String; 8]> {
        self.iter().enumerate().map(|(i, r)| r.display_cells(i + 1)).collect()
    }
}
