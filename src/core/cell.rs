// src/core/cell.rs
//
// One parsed CSV cell. Produced once when a table is read; every coercion
// downstream pattern-matches on this instead of re-sniffing strings.

use std::fmt;

/// Markers a dataframe reader treats as "no value".
/// `"-"` is deliberately absent: the vendor uses it as a visible placeholder
/// and the filters look for it explicitly.
pub const NA_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None",
    "#N/A", "#N/A N/A", "#NA", "<NA>", "1.#IND", "1.#QNAN", "-1.#IND", "-1.#QNAN",
];

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Missing,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn is_na_marker(raw: &str) -> bool {
        NA_MARKERS.contains(&raw)
    }

    /// Lenient float parse used for column typing. Accepts what a dataframe
    /// reader accepts for a numeric column: optional sign, decimals, exponent,
    /// `inf`. Rejects thousands separators and percent signs.
    pub fn parse_number(raw: &str) -> Option<f64> {
        let t = raw.trim();
        if t.is_empty() { return None; }
        // `f64::from_str` also takes "infinity"/"nan"; NA markers are handled before this.
        t.parse::<f64>().ok()
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Field text for a cell of an integer column: `300`, not `300.0`.
    pub fn to_integer_field(&self) -> String {
        match self {
            Cell::Number(v) if v.is_finite() => format!("{:.0}", v),
            other => other.to_field(),
        }
    }

    /// Text as it should appear in an output CSV.
    /// Missing is an empty field; numbers use the Python-style float repr.
    pub fn to_field(&self) -> String {
        match self {
            Cell::Missing => s!(),
            Cell::Text(s) => s.clone(),
            Cell::Number(v) => fmt_float(*v),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_field())
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self { Cell::Text(s!(s)) }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self { Cell::Number(v) }
}

/// Float formatting compatible with snapshots written by the previous tooling:
/// integral values keep a trailing `.0`, everything else is the shortest
/// round-trip representation.
pub fn fmt_float(v: f64) -> String {
    if v.is_nan() {
        return s!();
    }
    if v.is_infinite() {
        return s!(if v > 0.0 { "inf" } else { "-inf" });
    }
    if v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}

/// Round to one decimal, ties to even on the scaled value.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round_ties_even() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_float_keeps_trailing_zero() {
        assert_eq!(fmt_float(30.0), "30.0");
        assert_eq!(fmt_float(0.821), "0.821");
        assert_eq!(fmt_float(-2.5), "-2.5");
        assert_eq!(fmt_float(f64::NAN), "");
    }

    #[test]
    fn integer_field_drops_trailing_zero() {
        assert_eq!(Cell::Number(300.0).to_integer_field(), "300");
        assert_eq!(Cell::Number(-45.0).to_integer_field(), "-45");
        assert_eq!(Cell::Text(s!("x")).to_integer_field(), "x");
    }

    #[test]
    fn round1_matches_dataframe_rounding() {
        assert_eq!(round1(30.000000000000004), 30.0);
        assert_eq!(round1(60.00000000000001), 60.0);
        assert_eq!(round1(47.26), 47.3);
    }

    #[test]
    fn dash_is_not_na() {
        assert!(Cell::is_na_marker(""));
        assert!(Cell::is_na_marker("NaN"));
        assert!(!Cell::is_na_marker("-"));
    }

    #[test]
    fn parse_number_rejects_decorated_text() {
        assert_eq!(Cell::parse_number(" 12.5 "), Some(12.5));
        assert_eq!(Cell::parse_number("1e2"), Some(100.0));
        assert_eq!(Cell::parse_number("1,234"), None);
        assert_eq!(Cell::parse_number("82.10%"), None);
        assert_eq!(Cell::parse_number("=0.5"), None);
    }
}
