// src/core/dates.rs
//
// Upload file names carry their trading date somewhere in the name,
// either as `2025-12-24` or `20251224`.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static DASHED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4}-\d{2}-\d{2})").expect("static regex"));

static COMPACT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})(\d{2})(\d{2})").expect("static regex"));

/// Canonical `YYYY-MM-DD` from a file name.
///
/// The dashed form is tried first, then the compact one. Only the first match of
/// each pattern is considered; an impossible calendar date counts as no date.
pub fn extract_date_from_filename(filename: &str) -> Option<String> {
    if let Some(m) = DASHED_RE.captures(filename).and_then(|c| c.get(1)) {
        if let Ok(d) = NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d") {
            return Some(d.format("%Y-%m-%d").to_string());
        }
    }

    if let Some(c) = COMPACT_RE.captures(filename) {
        let candidate = format!("{}-{}-{}", &c[1], &c[2], &c[3]);
        if NaiveDate::parse_from_str(&candidate, "%Y-%m-%d").is_ok() {
            return Some(candidate);
        }
    }

    None
}
