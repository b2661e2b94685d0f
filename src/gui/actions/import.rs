// src/gui/actions/import.rs
use std::path::PathBuf;

use crate::{
    file::normalize_separators,
    gui::{app::App, progress::GuiProgress},
};

pub fn import(app: &mut App) {
    if !app.state.session.is_logged_in() {
        app.status("Log in to import data");
        return;
    }

    let raw = app.state.gui.import_path.trim().trim_matches('"').to_string();
    if raw.is_empty() {
        app.status("No file selected");
        return;
    }

    let path = PathBuf::from(normalize_separators(&raw));
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let bytes = match std::fs::read(&path) {
        Ok(b) => b,
        Err(e) => {
            loge!("Import: cannot read {}: {}", path.display(), e);
            app.status(format!("Cannot read {}: {e}", path.display()));
            return;
        }
    };

    logf!("Import: Begin {} ({} bytes)", path.display(), bytes.len());
    let mut prog = GuiProgress::new(app.status.clone());

    match app.store.import_upload(&file_name, &bytes, super::now(), &mut prog) {
        Ok(report) => {
            logf!(
                "Import: OK date={} rows {}/{}",
                report.upload.date, report.rows_out, report.rows_in
            );
            app.reload();
            app.history = None;
            app.status(format!(
                "Data updated for {}: {} of {} rows",
                report.upload.date, report.rows_out, report.rows_in
            ));
        }
        Err(e) => {
            // GuiProgress already showed the failure; keep the detail in the status too.
            app.status(format!("Import failed: {e}"));
        }
    }
}
