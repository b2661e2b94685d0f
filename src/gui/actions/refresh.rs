// src/gui/actions/refresh.rs
use crate::{config::consts::HISTORY_LIMIT, gui::app::App};

/// Re-read the published snapshot (rebuilding it from uploads if needed).
pub fn refresh(app: &mut App) {
    if let Err(e) = app.store.ensure_latest(super::now()) {
        loge!("Refresh: ensure_latest failed: {}", e);
    }
    app.reload();
    app.status(if app.dashboard.is_empty() { "No data yet" } else { "Ready" });
}

pub fn load_history(app: &mut App) {
    match app.store.history(HISTORY_LIMIT) {
        Ok(h) => {
            logd!("History: {} uploaded, {} processed", h.uploaded.len(), h.processed.len());
            app.history = Some(h);
        }
        Err(e) => {
            loge!("History: {}", e);
            app.status(format!("History unavailable: {e}"));
        }
    }
}
