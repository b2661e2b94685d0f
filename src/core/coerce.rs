// src/core/coerce.rs
//
// Value coercion for vendor cells. Every function here is fail-soft: a cell
// that can't be read becomes the stage's fallback value, never an error.

use super::cell::Cell;

/// Strip one leading `=` (spreadsheet formula export, e.g. `=0.8210`).
#[inline]
fn strip_eq(s: &str) -> &str {
    s.strip_prefix('=').unwrap_or(s)
}

#[inline]
fn finite_or_zero(v: Option<f64>) -> f64 {
    match v {
        Some(x) if x.is_finite() => x,
        _ => 0.0,
    }
}

/// Percentile rank → fraction.
///
/// - Missing, `"-"`, `""` → 0
/// - `"=…"` → prefix stripped, then the text rules below
/// - text with `%` → number / 100
/// - other text → parsed as an already-fractional number
/// - numbers > 1 are whole percents and get divided by 100, others pass as-is
///
/// Numbers are not clamped: `120` gives `1.2`. Historical output depends on it.
pub fn coerce_percentile(cell: &Cell) -> f64 {
    match cell {
        Cell::Missing => 0.0,
        Cell::Number(v) if v.is_nan() => 0.0,
        Cell::Number(v) => {
            if *v > 1.0 { v / 100.0 } else { *v }
        }
        Cell::Text(raw) => percentile_text(raw),
    }
}

fn percentile_text(raw: &str) -> f64 {
    let t = raw.trim();
    if t.is_empty() || t == "-" {
        return 0.0;
    }
    let t = strip_eq(t);
    if t.contains('%') {
        let v = t.replace('%', "").trim().parse::<f64>().ok();
        // `nan%` becomes 0, not NaN: the row stays and scores on the other percentile.
        return finite_or_zero(v.map(|x| x / 100.0));
    }
    finite_or_zero(t.trim().parse::<f64>().ok())
}

/// Attention / popularity score. Only text cells carry a value;
/// `=` and thousands separators are removed before parsing.
pub fn coerce_attention(cell: &Cell) -> f64 {
    let Cell::Text(raw) = cell else { return 0.0 };
    let t = raw.trim();
    if t.is_empty() || t == "-" {
        return 0.0;
    }
    let cleaned: String = t.chars().filter(|c| *c != '=' && *c != ',').collect();
    finite_or_zero(cleaned.trim().parse::<f64>().ok())
}

/// Price change as display text (`"10.15%"`).
///
/// `|v| > 1` is read as a percent magnitude already, otherwise as a fraction.
/// Text that already has `%` passes through; unparseable text is returned as-is.
pub fn coerce_percentage_display(cell: &Cell) -> String {
    match cell {
        Cell::Missing => s!("-"),
        Cell::Number(v) if !v.is_finite() => s!("-"),
        Cell::Number(v) => percent_string(*v),
        Cell::Text(raw) => {
            let t = raw.trim();
            if t.is_empty() || t == "-" {
                return s!("-");
            }
            if t.contains('%') {
                return raw.clone();
            }
            match t.parse::<f64>() {
                Ok(v) if v.is_finite() => percent_string(v),
                _ => raw.clone(),
            }
        }
    }
}

fn percent_string(v: f64) -> String {
    if v.abs() > 1.0 {
        format!("{:.2}%", v)
    } else {
        format!("{:.2}%", v * 100.0)
    }
}

/// Raw valuation ratio (PE/PB) for the fallback estimator.
/// `None` means "present but unreadable", which the estimator treats as missing.
pub fn coerce_ratio(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Missing => None,
        Cell::Number(v) if v.is_finite() => Some(*v),
        Cell::Number(_) => None,
        Cell::Text(raw) => {
            let cleaned: String = raw.trim().chars().filter(|c| *c != '=' && *c != ',').collect();
            cleaned.trim().parse::<f64>().ok().filter(|v| v.is_finite())
        }
    }
}

/// Remove `=` markers from a text cell; other cells are returned unchanged.
/// Display-stage cleanup for change/attention columns.
pub fn strip_equals(cell: &Cell) -> Cell {
    match cell {
        Cell::Text(raw) => {
            let t = raw.strip_prefix('=').unwrap_or(raw);
            Cell::Text(t.replace('=', ""))
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Cell { Cell::Text(s!(s)) }

    #[test]
    fn percentile_strings() {
        assert!((coerce_percentile(&t("82.10%")) - 0.821).abs() < 1e-12);
        assert_eq!(coerce_percentile(&t("=0.75")), 0.75);
        assert!((coerce_percentile(&t("=45.5%")) - 0.455).abs() < 1e-12);
        assert_eq!(coerce_percentile(&t("-")), 0.0);
        assert_eq!(coerce_percentile(&t("")), 0.0);
        assert_eq!(coerce_percentile(&t("abc")), 0.0);
        assert_eq!(coerce_percentile(&t("nan%")), 0.0);
        assert_eq!(coerce_percentile(&Cell::Missing), 0.0);
    }

    #[test]
    fn percentile_text_is_already_fractional() {
        // Text is never rescaled, even when > 1.
        assert_eq!(coerce_percentile(&t("45")), 45.0);
    }

    #[test]
    fn percentile_numbers() {
        assert_eq!(coerce_percentile(&Cell::Number(45.0)), 0.45);
        assert_eq!(coerce_percentile(&Cell::Number(0.3)), 0.3);
        assert_eq!(coerce_percentile(&Cell::Number(1.0)), 1.0);
        // Unclamped on purpose.
        assert_eq!(coerce_percentile(&Cell::Number(120.0)), 1.2);
        assert_eq!(coerce_percentile(&Cell::Number(f64::NAN)), 0.0);
    }

    #[test]
    fn attention_only_reads_text() {
        assert_eq!(coerce_attention(&t("=12,345")), 12345.0);
        assert_eq!(coerce_attention(&t("1,000.5")), 1000.5);
        assert_eq!(coerce_attention(&t("-")), 0.0);
        assert_eq!(coerce_attention(&t("hot")), 0.0);
        assert_eq!(coerce_attention(&Cell::Number(500.0)), 0.0);
        assert_eq!(coerce_attention(&Cell::Missing), 0.0);
    }

    #[test]
    fn percentage_display() {
        assert_eq!(coerce_percentage_display(&t("-")), "-");
        assert_eq!(coerce_percentage_display(&Cell::Missing), "-");
        assert_eq!(coerce_percentage_display(&t("3.5%")), "3.5%");
        assert_eq!(coerce_percentage_display(&Cell::Number(0.1015)), "10.15%");
        assert_eq!(coerce_percentage_display(&Cell::Number(10.15)), "10.15%");
        assert_eq!(coerce_percentage_display(&Cell::Number(-5.0)), "-5.00%");
        assert_eq!(coerce_percentage_display(&Cell::Number(-0.02)), "-2.00%");
        assert_eq!(coerce_percentage_display(&t("0.5")), "50.00%");
        assert_eq!(coerce_percentage_display(&t("n/a?")), "n/a?");
    }

    #[test]
    fn ratio_parsing() {
        assert_eq!(coerce_ratio(&Cell::Number(12.5)), Some(12.5));
        assert_eq!(coerce_ratio(&t("=1,234.5")), Some(1234.5));
        assert_eq!(coerce_ratio(&t("-")), None);
        assert_eq!(coerce_ratio(&Cell::Missing), None);
    }

    #[test]
    fn strip_equals_text_only() {
        assert_eq!(strip_equals(&t("=1.2%")), t("1.2%"));
        assert_eq!(strip_equals(&t("a=b")), t("ab"));
        assert_eq!(strip_equals(&Cell::Number(2.0)), Cell::Number(2.0));
    }
}
