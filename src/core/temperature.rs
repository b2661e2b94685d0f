// src/core/temperature.rs
//
// Temperature engine: a 0–100 "how expensive is it" score per index.
// Policy constants (weights, thresholds, fallback curve) must stay as they are;
// historical snapshots were produced with them.

use super::cell::round1;

/// Fallback defaults when the export has no PE / PB column at all.
pub const DEFAULT_PE: f64 = 15.0;
pub const DEFAULT_PB: f64 = 1.5;

/// Temperature when a present PE/PB cell can't be read.
pub const UNKNOWN_RATIO_TEMPERATURE: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Advice {
    Undervalued,
    NormalLow,
    NormalHigh,
    Overvalued,
}

impl Advice {
    /// `<30`, `<50`, `<70`, else. Exactly 30 is `NormalLow`.
    pub fn from_temperature(t: f64) -> Advice {
        if t < 30.0 {
            Advice::Undervalued
        } else if t < 50.0 {
            Advice::NormalLow
        } else if t < 70.0 {
            Advice::NormalHigh
        } else {
            Advice::Overvalued
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Advice::Undervalued => "低估区域，可考虑定投",
            Advice::NormalLow   => "正常偏低，可继续持有",
            Advice::NormalHigh  => "正常偏高，注意风险",
            Advice::Overvalued  => "高估区域，考虑减仓",
        }
    }
}

/// Percentile formula. Industry indices use PB only; P/E is unreliable there.
/// Inputs are fractions (0.4 = 40th percentile). Not rounded.
pub fn percentile_temperature_raw(pe_pct: f64, pb_pct: f64, industry: bool) -> f64 {
    if industry {
        pb_pct * 100.0
    } else {
        (pe_pct + pb_pct) / 2.0 * 100.0
    }
}

/// Percentile formula, rounded to one decimal.
pub fn percentile_temperature(pe_pct: f64, pb_pct: f64, industry: bool) -> f64 {
    round1(percentile_temperature_raw(pe_pct, pb_pct, industry))
}

/// Log-scaled PE component of the fallback estimator, 0..=95.
pub fn pe_component(pe: f64) -> f64 {
    if pe <= 0.0 {
        0.0
    } else if pe > 50.0 {
        95.0
    } else {
        (pe + 1.0).log10() / 51f64.log10() * 95.0
    }
}

/// Log-scaled PB component of the fallback estimator, 0..=95.
pub fn pb_component(pb: f64) -> f64 {
    if pb <= 0.0 {
        0.0
    } else if pb > 10.0 {
        95.0
    } else {
        (pb + 0.5).log10() / 10.5f64.log10() * 95.0
    }
}

/// Fallback estimator used when the export carries no percentile columns.
/// `None` for either ratio means the cell was present but unreadable.
pub fn fallback_temperature(pe: Option<f64>, pb: Option<f64>) -> f64 {
    let (Some(pe), Some(pb)) = (pe, pb) else {
        return UNKNOWN_RATIO_TEMPERATURE;
    };
    round1(pe_component(pe) * 0.5 + pb_component(pb) * 0.5)
}
