// src/pipeline.rs
//
// Ingest stage: vendor CSV → scored, filtered, ranked snapshot.
//
//   normalize headers → coerce cells → classify → temperature → filter → sort
//
// Pure apart from `process_file`, which only reads the input bytes. The update
// timestamp is passed in so the same input always renders the same bytes.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::config::consts::STAMP_FORMAT;
use crate::core::cell::fmt_float;
use crate::core::coerce::{coerce_attention, coerce_percentile, coerce_ratio};
use crate::core::columns::{self, Canonical, ColumnMap};
use crate::core::temperature::{fallback_temperature, percentile_temperature, DEFAULT_PB, DEFAULT_PE};
use crate::core::{classify, is_industry, Advice, Category, Cell};
use crate::csv::{self, SourceEncoding};
use crate::table::Table;

/* ---------------- Errors ---------------- */

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("could not read {path} as CSV under any supported encoding")]
    Parse { path: PathBuf },

    #[error("required column `{0}` not found")]
    MissingColumn(&'static str),

    #[error("no usable rows after filtering")]
    Empty,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/* ---------------- Records ---------------- */

/// One input row, viewed through the canonical columns.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexRecord {
    pub name: String,
    pub pe_raw: Cell,
    pub pb_raw: Cell,
    pub pe_percentile: Cell,
    pub pb_percentile: Cell,
    pub attention_raw: Cell,
    pub ytd_change: Cell,
    pub daily_change: Cell,
}

impl IndexRecord {
    pub fn from_row(table: &Table, cols: &ColumnMap, row: usize) -> IndexRecord {
        let at = |c: Canonical| -> Cell {
            cols.get(c).map(|ci| table.cell(row, ci).clone()).unwrap_or(Cell::Missing)
        };
        IndexRecord {
            name: at(Canonical::Name).to_field().trim().to_string(),
            pe_raw: at(Canonical::Pe),
            pb_raw: at(Canonical::Pb),
            pe_percentile: at(Canonical::PePercentile),
            pb_percentile: at(Canonical::PbPercentile),
            attention_raw: at(Canonical::Attention),
            ytd_change: at(Canonical::YtdChange),
            daily_change: at(Canonical::DailyChange),
        }
    }
}

/// A record that survived the filters, with everything derived from it.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredRecord {
    pub record: IndexRecord,
    /// Full source row, aligned with `ProcessedDataset::headers`.
    pub source: Vec<Cell>,
    /// Label written to the `类别` column (source text if the export had one).
    pub category_label: String,
    /// `None` when a source label isn't one of the known categories.
    pub category: Option<Category>,
    pub pe_percentile_value: Option<f64>,
    pub pb_percentile_value: Option<f64>,
    pub temperature: f64,
    pub advice: Advice,
    pub attention_value: f64,
}

impl ScoredRecord {
    /// Unknown labels rank after every known category.
    pub fn category_rank(&self) -> usize {
        self.category.map(Category::rank).unwrap_or(Category::RANK_ORDER.len())
    }
}

/// Which temperature formula produced the dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoringPath {
    Percentile,
    Fallback,
}

#[derive(Clone, Debug)]
pub struct ProcessedDataset {
    /// Normalized source headers (canonical labels where an alias matched).
    pub headers: Vec<String>,
    pub records: Vec<ScoredRecord>,
    pub path: ScoringPath,
    pub stamped_at: NaiveDateTime,
    pub has_attention: bool,
    pub has_category: bool,
    /// Source columns read as integers; they are written back the same way.
    pub integer_columns: Vec<bool>,
    pub encoding: Option<SourceEncoding>,
    /// Rows read before filtering.
    pub rows_in: usize,
}

impl ProcessedDataset {
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}

/* ---------------- Entry points ---------------- */

/// Read, decode and process a vendor export.
pub fn process_file(path: &Path, stamped_at: NaiveDateTime) -> Result<ProcessedDataset, PipelineError> {
    let bytes = std::fs::read(path)?;
    let (enc, table) = Table::from_bytes(&bytes)
        .ok_or_else(|| PipelineError::Parse { path: path.to_path_buf() })?;
    logf!("Pipeline: {} decoded as {} ({} rows)", path.display(), enc.label(), table.len());

    let mut ds = process_table(&table, stamped_at)?;
    ds.encoding = Some(enc);
    Ok(ds)
}

/// Score, filter and rank an already-typed table.
pub fn process_table(table: &Table, stamped_at: NaiveDateTime) -> Result<ProcessedDataset, PipelineError> {
    let cols = columns::normalize(&table.headers);
    if !cols.has(Canonical::Name) {
        loge!("Pipeline: no index name column in {:?}", table.headers);
        return Err(PipelineError::MissingColumn(Canonical::Name.label()));
    }

    let path = if cols.has_percentiles() { ScoringPath::Percentile } else { ScoringPath::Fallback };
    let zero_numeric_check = percentile_columns_numeric(table, &cols);

    let mut records = Vec::with_capacity(table.len());
    for (ri, row) in table.rows.iter().enumerate() {
        let rec = IndexRecord::from_row(table, &cols, ri);
        if rec.name.is_empty() {
            continue;
        }
        if path == ScoringPath::Percentile
            && !percentiles_usable(&rec.pe_percentile, &rec.pb_percentile, zero_numeric_check)
        {
            continue;
        }

        let scored = score(rec, row.clone(), &cols, path);
        if scored.temperature == 0.0 || !scored.temperature.is_finite() {
            continue;
        }
        records.push(scored);
    }

    logf!(
        "Pipeline: {:?} scoring, {} of {} rows kept",
        path, records.len(), table.len()
    );
    if records.is_empty() {
        return Err(PipelineError::Empty);
    }

    sort_records(&mut records);

    Ok(ProcessedDataset {
        headers: cols.headers.clone(),
        records,
        path,
        stamped_at,
        has_attention: cols.has(Canonical::Attention),
        has_category: cols.has(Canonical::Category),
        integer_columns: table.integer_columns.clone(),
        encoding: None,
        rows_in: table.len(),
    })
}

/* ---------------- Stages ---------------- */

fn score(record: IndexRecord, source: Vec<Cell>, cols: &ColumnMap, path: ScoringPath) -> ScoredRecord {
    let (pe_pct, pb_pct, temperature) = match path {
        ScoringPath::Percentile => {
            let pe = coerce_percentile(&record.pe_percentile);
            let pb = coerce_percentile(&record.pb_percentile);
            (Some(pe), Some(pb), percentile_temperature(pe, pb, is_industry(&record.name)))
        }
        ScoringPath::Fallback => {
            let pe = ratio_or_default(cols, Canonical::Pe, &record.pe_raw, DEFAULT_PE);
            let pb = ratio_or_default(cols, Canonical::Pb, &record.pb_raw, DEFAULT_PB);
            (None, None, fallback_temperature(pe, pb))
        }
    };

    let (category_label, category) = match cols.get(Canonical::Category) {
        Some(ci) => {
            let label = source.get(ci).map(Cell::to_field).unwrap_or_default();
            let cat = Category::from_label(label.trim());
            (label, cat)
        }
        None => {
            let cat = classify(&record.name);
            (s!(cat.label()), Some(cat))
        }
    };

    let attention_value = coerce_attention(&record.attention_raw);

    ScoredRecord {
        record,
        source,
        category_label,
        category,
        pe_percentile_value: pe_pct,
        pb_percentile_value: pb_pct,
        temperature,
        advice: Advice::from_temperature(temperature),
        attention_value,
    }
}

/// Absent column → default; present column → the cell, which may be unreadable.
fn ratio_or_default(cols: &ColumnMap, c: Canonical, cell: &Cell, default: f64) -> Option<f64> {
    if cols.has(c) { coerce_ratio(cell) } else { Some(default) }
}

/// Numeric zeros are only rejected when both percentile columns were read as numbers.
pub fn percentile_columns_numeric(table: &Table, cols: &ColumnMap) -> bool {
    match (cols.get(Canonical::PePercentile), cols.get(Canonical::PbPercentile)) {
        (Some(pe), Some(pb)) => table.is_numeric_column(pe) && table.is_numeric_column(pb),
        _ => false,
    }
}

/// Row keeps its percentiles iff neither is missing, `-`, `0`, `0%`
/// (nor numeric zero when the columns are numeric).
pub fn percentiles_usable(pe: &Cell, pb: &Cell, numeric_columns: bool) -> bool {
    percentile_cell_usable(pe, numeric_columns) && percentile_cell_usable(pb, numeric_columns)
}

fn percentile_cell_usable(cell: &Cell, numeric_columns: bool) -> bool {
    match cell {
        Cell::Missing => false,
        Cell::Text(t) => !matches!(t.as_str(), "-" | "0" | "0%"),
        Cell::Number(v) => !(numeric_columns && *v == 0.0) && !v.is_nan(),
    }
}

/// Attention desc, category rank asc, temperature desc. Stable on full ties.
pub fn sort_records(records: &mut [ScoredRecord]) {
    records.sort_by(|a, b| {
        b.attention_value
            .partial_cmp(&a.attention_value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.category_rank().cmp(&b.category_rank()))
            .then_with(|| b.temperature.partial_cmp(&a.temperature).unwrap_or(Ordering::Equal))
    });
}

/* ---------------- Snapshot ---------------- */

pub const COL_PE_PCT_VALUE: &str = "PE分位点数值";
pub const COL_PB_PCT_VALUE: &str = "PB分位点数值";
pub const COL_TEMPERATURE: &str = "基金温度";
pub const COL_ADVICE: &str = "投资建议";
pub const COL_UPDATED_AT: &str = "数据更新时间";
pub const COL_ATTENTION_VALUE: &str = "关注度数值";
pub const COL_CATEGORY_RANK: &str = "类别排序";

/// Snapshot header row: source columns, then derived columns not already present.
pub fn snapshot_headers(ds: &ProcessedDataset) -> Vec<String> {
    let mut headers = ds.headers.clone();
    for name in derived_columns(ds) {
        if !headers.iter().any(|h| h == name) {
            headers.push(s!(name));
        }
    }
    headers
}

fn derived_columns(ds: &ProcessedDataset) -> Vec<&'static str> {
    let mut cols = Vec::with_capacity(8);
    if ds.path == ScoringPath::Percentile {
        cols.push(COL_PE_PCT_VALUE);
        cols.push(COL_PB_PCT_VALUE);
    }
    cols.extend([
        COL_TEMPERATURE,
        COL_ADVICE,
        COL_UPDATED_AT,
        COL_ATTENTION_VALUE,
        Canonical::Category.label(),
        COL_CATEGORY_RANK,
    ]);
    cols
}

/// Text rows of the snapshot, aligned with `snapshot_headers`.
pub fn snapshot_rows(ds: &ProcessedDataset) -> (Vec<String>, Vec<Vec<String>>) {
    let headers = snapshot_headers(ds);
    let stamp = ds.stamped_at.format(STAMP_FORMAT).to_string();
    // Unknown labels leave a hole in the rank column, which turns it into floats.
    let ranks_integral = ds.records.iter().all(|r| r.category.is_some());

    let rows = ds
        .records
        .iter()
        .map(|r| {
            let mut row: Vec<String> = r
                .source
                .iter()
                .enumerate()
                .map(|(ci, c)| {
                    if ds.integer_columns.get(ci).copied().unwrap_or(false) {
                        c.to_integer_field()
                    } else {
                        c.to_field()
                    }
                })
                .collect();
            row.resize(headers.len(), s!());

            let mut put = |name: &str, value: String| {
                if let Some(ix) = headers.iter().position(|h| h == name) {
                    row[ix] = value;
                }
            };

            if let (Some(pe), Some(pb)) = (r.pe_percentile_value, r.pb_percentile_value) {
                put(COL_PE_PCT_VALUE, fmt_float(pe));
                put(COL_PB_PCT_VALUE, fmt_float(pb));
            }
            put(COL_TEMPERATURE, fmt_float(r.temperature));
            put(COL_ADVICE, s!(r.advice.label()));
            put(COL_UPDATED_AT, stamp.clone());
            put(
                COL_ATTENTION_VALUE,
                if ds.has_attention { fmt_float(r.attention_value) } else { s!("0") },
            );
            if !ds.has_category {
                put(Canonical::Category.label(), r.category_label.clone());
            }
            let rank = match r.category {
                Some(c) if ranks_integral => c.rank().to_string(),
                Some(c) => fmt_float(c.rank() as f64),
                None => s!(),
            };
            put(COL_CATEGORY_RANK, rank);

            row
        })
        .collect();

    (headers, rows)
}

/// Snapshot as BOM-prefixed UTF-8 CSV text.
pub fn render_snapshot(ds: &ProcessedDataset) -> String {
    let (headers, rows) = snapshot_rows(ds);
    csv::rows_to_string(&headers, &rows, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 24)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap()
    }

    fn run(text: &str) -> Result<ProcessedDataset, PipelineError> {
        process_table(&Table::from_text(text).unwrap(), stamp())
    }

    #[test]
    fn percentile_path_scores_and_filters() {
        let ds = run(
            "指数名称,PE分位点,PB分位点,关注度\n\
             中证白酒,40%,60%,\"1,200\"\n\
             沪深300,20%,40%,900\n\
             中证500,0%,50%,800\n\
             上证50,-,50%,700\n",
        )
        .unwrap();

        assert_eq!(ds.path, ScoringPath::Percentile);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].record.name, "中证白酒");
        assert_eq!(ds.records[0].temperature, 60.0);
        assert_eq!(ds.records[0].advice, Advice::NormalHigh);
        assert_eq!(ds.records[1].temperature, 30.0);
        assert_eq!(ds.records[1].advice, Advice::NormalLow);
    }

    #[test]
    fn numeric_zero_rejected_only_in_numeric_columns() {
        assert!(!percentiles_usable(&Cell::Number(0.0), &Cell::Number(0.5), true));
        assert!(percentiles_usable(&Cell::Number(0.0), &Cell::Number(0.5), false));
        assert!(!percentiles_usable(&Cell::Text(s!("0")), &Cell::Number(0.5), false));
        assert!(!percentiles_usable(&Cell::Missing, &Cell::Number(0.5), false));
    }

    #[test]
    fn fallback_path_uses_defaults_for_absent_columns() {
        // No PB column: PB defaults to 1.5
        let ds = run("指数名称,PE\n沪深300,12.0\n坏数据,abc\n").unwrap();
        assert_eq!(ds.path, ScoringPath::Fallback);
        assert_eq!(ds.len(), 2);
        let bad = ds.records.iter().find(|r| r.record.name == "坏数据").unwrap();
        assert_eq!(bad.temperature, 50.0);
    }

    #[test]
    fn nan_percent_scores_as_zero_and_is_kept() {
        let ds = run("指数名称,PE分位点,PB分位点\n沪深300,nan%,50%\n").unwrap();
        let temps: Vec<f64> = ds.records.iter().map(|r| r.temperature).collect();
        assert_eq!(temps, vec![25.0]);
    }

    #[test]
    fn missing_name_column_is_an_error() {
        assert!(matches!(run("PE,PB\n10,1\n"), Err(PipelineError::MissingColumn(_))));
    }

    #[test]
    fn everything_filtered_is_empty() {
        assert!(matches!(run("指数名称,PE分位点,PB分位点\nA,-,-\n"), Err(PipelineError::Empty)));
    }

    #[test]
    fn sort_uses_attention_then_rank_then_temperature() {
        // `=50` keeps the attention column textual; a numeric column would score 0 everywhere.
        let ds = run(
            "指数名称,PE分位点,PB分位点,关注度\n\
             中证500,30%,30%,=50\n\
             中证银行,40%,40%,100\n\
             沪深300,50%,50%,100\n",
        )
        .unwrap();
        let names: Vec<&str> = ds.records.iter().map(|r| r.record.name.as_str()).collect();
        assert_eq!(names, vec!["沪深300", "中证银行", "中证500"]);
    }

    #[test]
    fn same_attention_and_category_ranks_hotter_first() {
        let ds = run(
            "指数名称,PE分位点,PB分位点,关注度\n\
             沪深300,20%,20%,=100\n\
             上证50,60%,60%,=100\n",
        )
        .unwrap();
        assert_eq!(ds.records[0].category, ds.records[1].category);
        let ranked: Vec<(&str, f64)> =
            ds.records.iter().map(|r| (r.record.name.as_str(), r.temperature)).collect();
        assert_eq!(ranked, vec![("上证50", 60.0), ("沪深300", 20.0)]);
    }

    #[test]
    fn snapshot_has_derived_columns_and_bom() {
        let ds = run("指数名称,PE分位点,PB分位点\n沪深300,20%,40%\n").unwrap();
        let out = render_snapshot(&ds);
        assert!(out.starts_with(csv::UTF8_BOM));
        let mut lines = out.trim_start_matches(csv::UTF8_BOM).lines();
        assert_eq!(
            lines.next().unwrap(),
            "指数名称,PE分位点,PB分位点,PE分位点数值,PB分位点数值,基金温度,投资建议,数据更新时间,关注度数值,类别,类别排序"
        );
        assert_eq!(
            lines.next().unwrap(),
            "沪深300,20%,40%,0.2,0.4,30.0,正常偏低，可继续持有,2025-12-24 09:30:00,0,大盘,0"
        );
    }

    #[test]
    fn source_category_column_is_kept() {
        let ds = run("指数名称,PE分位点,PB分位点,类别\n沪深300,20%,40%,自选\n").unwrap();
        assert_eq!(ds.records[0].category_label, "自选");
        assert_eq!(ds.records[0].category, None);
        let (_, rows) = snapshot_rows(&ds);
        assert_eq!(rows[0].last().map(String::as_str), Some(""));
    }
}
