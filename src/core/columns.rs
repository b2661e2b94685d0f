// src/core/columns.rs
//! Column normalizer.
//!
//! Vendor exports name the same field several ways (`PE`, `市盈率`,
//! `PE-TTM(当前值)`, …). This module maps each known alias onto one canonical
//! column and leaves unknown headers untouched.
//!
//! Collision rule: the alias table is ordered and the **first listed alias that
//! is present in the header wins** for its canonical column. Any later alias of
//! the same canonical column keeps its raw name and travels along as an
//! ordinary pass-through column.

use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Canonical {
    Name,
    Pe,
    Pb,
    PePercentile,
    PbPercentile,
    Attention,
    YtdChange,
    DailyChange,
    Category,
}

impl Canonical {
    pub const ALL: [Canonical; 9] = [
        Canonical::Name,
        Canonical::Pe,
        Canonical::Pb,
        Canonical::PePercentile,
        Canonical::PbPercentile,
        Canonical::Attention,
        Canonical::YtdChange,
        Canonical::DailyChange,
        Canonical::Category,
    ];

    /// Header text written to snapshots. Kept identical to what historical
    /// snapshots carry so old files load without a migration.
    pub fn label(self) -> &'static str {
        match self {
            Canonical::Name         => "指数名称",
            Canonical::Pe           => "PE",
            Canonical::Pb           => "PB",
            Canonical::PePercentile => "PE分位点",
            Canonical::PbPercentile => "PB分位点",
            Canonical::Attention    => "关注度",
            Canonical::YtdChange    => "今年以来涨跌幅",
            Canonical::DailyChange  => "涨跌幅",
            Canonical::Category     => "类别",
        }
    }

    /// Short ASCII key, used in logs and CLI output.
    pub fn key(self) -> &'static str {
        match self {
            Canonical::Name         => "name",
            Canonical::Pe           => "pe",
            Canonical::Pb           => "pb",
            Canonical::PePercentile => "pe_percentile",
            Canonical::PbPercentile => "pb_percentile",
            Canonical::Attention    => "attention",
            Canonical::YtdChange    => "ytd_change",
            Canonical::DailyChange  => "daily_change",
            Canonical::Category     => "category",
        }
    }
}

/// `(alias, canonical)` in priority order.
pub const ALIASES: &[(&str, Canonical)] = &[
    ("指数名称", Canonical::Name),
    ("指数", Canonical::Name),
    ("name", Canonical::Name),
    ("index_name", Canonical::Name),

    ("PE", Canonical::Pe),
    ("市盈率", Canonical::Pe),
    ("pe", Canonical::Pe),
    ("PE-TTM(当前值)", Canonical::Pe),

    ("PB", Canonical::Pb),
    ("市净率", Canonical::Pb),
    ("pb", Canonical::Pb),
    ("PB(当前值)", Canonical::Pb),

    ("PE分位点", Canonical::PePercentile),
    ("PE-TTM(分位点%)", Canonical::PePercentile),
    ("pe_percentile", Canonical::PePercentile),

    ("PB分位点", Canonical::PbPercentile),
    ("PB(分位点%)", Canonical::PbPercentile),
    ("pb_percentile", Canonical::PbPercentile),

    ("关注度", Canonical::Attention),
    ("attention", Canonical::Attention),

    ("今年以来涨跌幅", Canonical::YtdChange),
    ("今年涨跌", Canonical::YtdChange),
    ("ytd_change", Canonical::YtdChange),

    ("涨跌幅", Canonical::DailyChange),
    ("昨涨跌", Canonical::DailyChange),
    ("daily_change", Canonical::DailyChange),

    ("类别", Canonical::Category),
    ("category", Canonical::Category),
];

/// Strip whitespace and a stray BOM that survives some decoders.
pub fn clean_header(raw: &str) -> &str {
    raw.trim().trim_start_matches('\u{feff}').trim()
}

/// Result of normalizing one header row.
#[derive(Clone, Debug, Default)]
pub struct ColumnMap {
    /// Output header text per source position.
    pub headers: Vec<String>,
    /// Canonical → source column index.
    index: HashMap<Canonical, usize>,
}

impl ColumnMap {
    pub fn get(&self, c: Canonical) -> Option<usize> {
        self.index.get(&c).copied()
    }

    pub fn has(&self, c: Canonical) -> bool {
        self.index.contains_key(&c)
    }

    /// Both percentile columns present → percentile path for scoring.
    pub fn has_percentiles(&self) -> bool {
        self.has(Canonical::PePercentile) && self.has(Canonical::PbPercentile)
    }
}

/// Map raw header names onto canonical columns.
pub fn normalize(raw_headers: &[String]) -> ColumnMap {
    let cleaned: Vec<&str> = raw_headers.iter().map(|h| clean_header(h)).collect();
    let mut headers: Vec<String> = cleaned.iter().map(|h| s!(*h)).collect();
    let mut index: HashMap<Canonical, usize> = HashMap::new();

    for (alias, canonical) in ALIASES {
        if index.contains_key(canonical) { continue; }
        if let Some(pos) = cleaned.iter().position(|h| h == alias) {
            index.insert(*canonical, pos);
            headers[pos] = s!(canonical.label());
        }
    }

    let known: Vec<&str> = {
        let mut v: Vec<Canonical> = index.keys().copied().collect();
        v.sort();
        v.into_iter().map(|c| c.key()).collect()
    };
    logd!("Columns: {} headers, canonical={:?}", raw_headers.len(), known);

    ColumnMap { headers, index }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_vendor_aliases() {
        let m = normalize(&strs!["指数名称", "PE-TTM(当前值)", "PB", "PE-TTM(分位点%)", "PB(分位点%)", "备注"]);
        assert_eq!(m.get(Canonical::Name), Some(0));
        assert_eq!(m.get(Canonical::Pe), Some(1));
        assert_eq!(m.get(Canonical::PePercentile), Some(3));
        assert_eq!(m.headers[1], "PE");
        assert_eq!(m.headers[3], "PE分位点");
        assert_eq!(m.headers[5], "备注"); // unknown passes through
        assert!(m.has_percentiles());
    }

    #[test]
    fn first_listed_alias_wins() {
        // "市盈率" is listed before "PE-TTM(当前值)" even though it appears later in the file.
        let m = normalize(&strs!["指数", "PE-TTM(当前值)", "市盈率"]);
        assert_eq!(m.get(Canonical::Pe), Some(2));
        assert_eq!(m.headers[1], "PE-TTM(当前值)");
        assert_eq!(m.headers[2], "PE");
    }

    #[test]
    fn bom_and_whitespace_are_ignored() {
        let m = normalize(&strs!["\u{feff}指数名称", " PB分位点 "]);
        assert_eq!(m.get(Canonical::Name), Some(0));
        assert_eq!(m.get(Canonical::PbPercentile), Some(1));
        assert!(!m.has_percentiles());
    }
}
