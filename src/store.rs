// src/store.rs
//
// On-disk layout under the data root:
//
//   uploaded/{date}.csv                 raw vendor exports, one per trading date
//   processed/processed_{date}.csv      snapshots, one per trading date
//   latest_data.csv                     the snapshot the dashboard shows
//
// Last write wins; nothing is locked.

use std::{fs, path::PathBuf, time::SystemTime};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use crate::config::consts::DATE_FORMAT;
use crate::config::{AppConfig, DataPaths};
use crate::core::dates::extract_date_from_filename;
use crate::core::sanitize::{allowed_file, secure_filename};
use crate::data::Snapshot;
use crate::file::{self, CsvEntry};
use crate::pipeline::{self, ProcessedDataset};
use crate::progress::Progress;
use crate::table::Table;

type BoxErr = Box<dyn std::error::Error>;

/// Shown when no date can be found for the latest data.
pub const UNKNOWN_DATE: &str = "未知日期";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedUpload {
    pub path: PathBuf,
    pub date: String,
    /// Date came from the file name rather than from `today`.
    pub date_from_name: bool,
    pub overwrote: bool,
}

#[derive(Clone, Debug)]
pub struct ImportReport {
    pub upload: SavedUpload,
    pub processed_path: PathBuf,
    pub rows_in: usize,
    pub rows_out: usize,
}

/// One line of the history listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub name: String,
    /// `YYYY-MM-DD HH:MM`, local time
    pub modified: String,
    /// `{kb:.1} KB`
    pub size: String,
}

impl From<&CsvEntry> for HistoryEntry {
    fn from(e: &CsvEntry) -> Self {
        HistoryEntry {
            name: e.name.clone(),
            modified: e.modified.map(|t| local(t).format("%Y-%m-%d %H:%M").to_string()).unwrap_or_default(),
            size: format!("{:.1} KB", e.size as f64 / 1024.0),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    pub uploaded: Vec<HistoryEntry>,
    pub processed: Vec<HistoryEntry>,
}

fn local(t: SystemTime) -> DateTime<Local> {
    DateTime::<Local>::from(t)
}

#[derive(Clone, Debug)]
pub struct Store {
    paths: DataPaths,
    max_upload_bytes: u64,
}

impl Store {
    pub fn new(cfg: &AppConfig) -> Self {
        Self { paths: cfg.paths.clone(), max_upload_bytes: cfg.max_upload_bytes }
    }

    /// Like `new`, but also creates `uploaded/` and `processed/`.
    pub fn open(cfg: &AppConfig) -> Result<Self, BoxErr> {
        let store = Self::new(cfg);
        file::ensure_directory(&store.paths.uploaded_dir())?;
        file::ensure_directory(&store.paths.processed_dir())?;
        logf!("Store: data root {}", store.paths.root().display());
        Ok(store)
    }

    /* ---------------- Uploads ---------------- */

    /// Store an uploaded export as `uploaded/{date}.csv`.
    /// The date comes from the (sanitised) file name, else `today`.
    pub fn save_upload(&self, file_name: &str, bytes: &[u8], today: NaiveDate) -> Result<SavedUpload, BoxErr> {
        if file_name.trim().is_empty() {
            return Err("no file selected".into());
        }
        if !allowed_file(file_name) {
            return Err(format!("only .csv files can be uploaded: {file_name}").into());
        }
        if (bytes.len() as u64) > self.max_upload_bytes {
            return Err(format!(
                "upload is {} bytes, limit is {}",
                bytes.len(), self.max_upload_bytes
            ).into());
        }

        let safe = secure_filename(file_name);
        let (date, date_from_name) = match extract_date_from_filename(&safe) {
            Some(d) => (d, true),
            None => (today.format(DATE_FORMAT).to_string(), false),
        };

        let path = self.paths.uploaded_file(&date);
        let overwrote = path.exists();
        file::write_file(&path, bytes)?;
        logf!(
            "Store: saved upload {:?} as {} ({} bytes{})",
            file_name, path.display(), bytes.len(),
            if overwrote { ", replaced existing" } else { "" }
        );

        Ok(SavedUpload { path, date, date_from_name, overwrote })
    }

    /// Write the snapshot as `processed/processed_{date}.csv` and `latest_data.csv`.
    pub fn publish(&self, ds: &ProcessedDataset, date: &str) -> Result<PathBuf, BoxErr> {
        let text = pipeline::render_snapshot(ds);
        let processed = self.paths.processed_file(date);
        file::write_bom_csv(&processed, &text)?;
        file::write_bom_csv(&self.paths.latest_file(), &text)?;
        logf!("Store: published {} rows to {}", ds.len(), processed.display());
        Ok(processed)
    }

    /// Save → process → publish.
    pub fn import_upload(
        &self,
        file_name: &str,
        bytes: &[u8],
        now: NaiveDateTime,
        progress: &mut dyn Progress,
    ) -> Result<ImportReport, BoxErr> {
        progress.begin(3);
        let res = self.import_steps(file_name, bytes, now, progress);
        if let Err(e) = &res {
            loge!("Store: import of {:?} failed: {}", file_name, e);
            progress.log(&format!("Import failed: {e}"));
        }
        progress.finish();
        res
    }

    fn import_steps(
        &self,
        file_name: &str,
        bytes: &[u8],
        now: NaiveDateTime,
        progress: &mut dyn Progress,
    ) -> Result<ImportReport, BoxErr> {
        let upload = self.save_upload(file_name, bytes, now.date())?;
        if upload.date_from_name {
            progress.log(&format!("Date {} taken from file name", upload.date));
        } else {
            progress.log(&format!("No date in file name, using {}", upload.date));
        }
        if upload.overwrote {
            progress.log(&format!("Replaced existing upload for {}", upload.date));
        }
        progress.step_done("save");

        let ds = pipeline::process_file(&upload.path, now)?;
        progress.log(&format!("{} of {} rows kept", ds.len(), ds.rows_in));
        progress.step_done("process");

        let processed_path = self.publish(&ds, &upload.date)?;
        progress.step_done("publish");

        Ok(ImportReport { rows_in: ds.rows_in, rows_out: ds.len(), upload, processed_path })
    }

    /// Rebuild `latest_data.csv` from the newest upload when it's missing or empty.
    /// Returns whether a snapshot was written.
    pub fn ensure_latest(&self, now: NaiveDateTime) -> Result<bool, BoxErr> {
        if file::is_nonempty_file(&self.paths.latest_file()) {
            return Ok(false);
        }
        let uploads = file::list_csv_files(&self.paths.uploaded_dir())?;
        let Some(newest) = uploads.first() else {
            logd!("Store: no latest snapshot and no uploads");
            return Ok(false);
        };

        logf!("Store: rebuilding latest snapshot from {}", newest.name);
        match pipeline::process_file(&newest.path, now) {
            Ok(ds) => {
                file::write_bom_csv(&self.paths.latest_file(), &pipeline::render_snapshot(&ds))?;
                Ok(true)
            }
            Err(e) => {
                loge!("Store: rebuilding from {} failed: {}", newest.name, e);
                Ok(false)
            }
        }
    }

    /* ---------------- Reading ---------------- */

    pub fn history(&self, limit: usize) -> Result<History, BoxErr> {
        let take = |dir: PathBuf| -> Result<Vec<HistoryEntry>, BoxErr> {
            Ok(file::list_csv_files(&dir)?.iter().take(limit).map(HistoryEntry::from).collect())
        };
        Ok(History {
            uploaded: take(self.paths.uploaded_dir())?,
            processed: take(self.paths.processed_dir())?,
        })
    }

    /// Date of the latest data: mtime of `latest_data.csv`, else the date in the
    /// newest processed file name.
    pub fn latest_data_date(&self) -> Option<String> {
        if let Some(t) = self.latest_mtime() {
            return Some(local(t).format(DATE_FORMAT).to_string());
        }
        let processed = file::list_csv_files(&self.paths.processed_dir()).ok()?;
        processed.first().and_then(|e| extract_date_from_filename(&e.name))
    }

    /// `{data date} {HH:MM:SS of latest_data.csv}`.
    pub fn last_updated(&self) -> Option<String> {
        let t = self.latest_mtime()?;
        let date = self.latest_data_date().unwrap_or_else(|| s!(UNKNOWN_DATE));
        Some(format!("{} {}", date, local(t).format("%H:%M:%S")))
    }

    fn latest_mtime(&self) -> Option<SystemTime> {
        fs::metadata(self.paths.latest_file()).ok()?.modified().ok()
    }

    /// Published snapshot, or `None` if nothing has been published yet.
    pub fn load_latest(&self) -> Result<Option<Snapshot>, BoxErr> {
        let path = self.paths.latest_file();
        if !file::is_nonempty_file(&path) {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        let (_, table) = Table::from_bytes(&bytes)
            .ok_or_else(|| format!("unreadable snapshot: {}", path.display()))?;
        Ok(Some(Snapshot::new(path, table, self.latest_data_date())))
    }
}
