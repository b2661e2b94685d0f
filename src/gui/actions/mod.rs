// src/gui/actions/mod.rs
//
// Folder module facade: re-export public entrypoints.
// Submodules stay private; consumers only see actions::{import, refresh, ...}.

mod import;   // src/gui/actions/import.rs
mod refresh;  // src/gui/actions/refresh.rs

pub use import::import;
pub use refresh::{refresh, load_history};

use chrono::{Local, NaiveDateTime};

/// Wall clock for snapshot stamps. The pipeline never reads it itself.
#[inline]
pub(super) fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
