// src/dashboard.rs
//
// Display stage: a published snapshot → ranked rows for the index page.
// Re-derives temperature and category so older snapshots still show
// current scoring, then applies the display filters.

use std::cmp::Ordering;

use crate::core::coerce::{coerce_attention, coerce_percentage_display, coerce_percentile, coerce_ratio, strip_equals};
use crate::core::columns::{self, Canonical, ColumnMap};
use crate::core::temperature::percentile_temperature;
use crate::core::{classify, is_industry, Advice, Category, Cell};
use crate::data::SearchView;
use crate::pipeline::{self, COL_TEMPERATURE};
use crate::table::Table;

/// Column titles of the index table, in display order.
pub const DISPLAY_COLUMNS: [&str; 8] = [
    "序号", "类别", "指数名称", "基金温度", "今年涨跌", "昨涨跌", "关注度", "投资建议",
];

/// Attention above this is flagged as hot.
pub const HOT_ATTENTION: f64 = 10_000.0;

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardRow {
    pub name: String,
    pub category: Category,
    pub temperature: f64,
    pub advice: Advice,
    pub ytd_change: String,
    pub daily_change: String,
    pub attention: String,
    pub attention_value: f64,
}

/// Colour band of a temperature/advice cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Cold,
    Mild,
    Warm,
    Hot,
}

impl From<Advice> for Tone {
    fn from(a: Advice) -> Self {
        match a {
            Advice::Undervalued => Tone::Cold,
            Advice::NormalLow => Tone::Mild,
            Advice::NormalHigh => Tone::Warm,
            Advice::Overvalued => Tone::Hot,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeTone {
    Up,
    Down,
    Flat,
}

/// `-1.23%` → Down, `0.50%` → Up. Unreadable text → Flat.
pub fn change_tone(display: &str) -> ChangeTone {
    match display.trim().trim_end_matches('%').trim().parse::<f64>() {
        Ok(v) if v < 0.0 => ChangeTone::Down,
        Ok(_) => ChangeTone::Up,
        Err(_) => ChangeTone::Flat,
    }
}

impl DashboardRow {
    pub fn tone(&self) -> Tone { Tone::from(self.advice) }
    pub fn is_hot(&self) -> bool { self.attention_value > HOT_ATTENTION }

    pub fn temperature_text(&self) -> String {
        format!("{:.1}°C", self.temperature)
    }

    /// Cells in `DISPLAY_COLUMNS` order.
    pub fn display_cells(&self, serial: usize) -> [String; 8] {
        [
            serial.to_string(),
            s!(self.category.label()),
            self.name.clone(),
            self.temperature_text(),
            self.ytd_change.clone(),
            self.daily_change.clone(),
            self.attention.clone(),
            s!(self.advice.label()),
        ]
    }
}

#[derive(Clone, Debug, Default)]
pub struct Dashboard {
    pub rows: Vec<DashboardRow>,
}

impl Dashboard {
    pub fn from_table(table: &Table) -> Dashboard {
        let cols = columns::normalize(&table.headers);
        let Some(name_col) = cols.get(Canonical::Name) else {
            loge!("Dashboard: snapshot has no index name column");
            return Dashboard::default();
        };

        let recompute = cols.has_percentiles();
        let temp_col = table.headers.iter().position(|h| columns::clean_header(h) == COL_TEMPERATURE);
        let numeric_pct = pipeline::percentile_columns_numeric(table, &cols);

        let mut rows = Vec::with_capacity(table.len());
        for ri in 0..table.len() {
            let name = table.cell(ri, name_col).to_field().trim().to_string();
            if name.is_empty() {
                continue;
            }

            let ytd = coerce_percentage_display(&display_cell(table, &cols, Canonical::YtdChange, ri));
            let daily = coerce_percentage_display(&display_cell(table, &cols, Canonical::DailyChange, ri));
            let attention = display_cell(table, &cols, Canonical::Attention, ri);
            if ytd == "-" || daily == "-" || attention.as_text() == Some("-") {
                continue;
            }

            let temperature = if recompute {
                let (pe_ci, pb_ci) = match (cols.get(Canonical::PePercentile), cols.get(Canonical::PbPercentile)) {
                    (Some(a), Some(b)) => (a, b),
                    _ => continue,
                };
                let pe = table.cell(ri, pe_ci);
                let pb = table.cell(ri, pb_ci);
                if !pipeline::percentiles_usable(pe, pb, numeric_pct) {
                    continue;
                }
                percentile_temperature(coerce_percentile(pe), coerce_percentile(pb), is_industry(&name))
            } else {
                match temp_col.and_then(|ci| coerce_ratio(table.cell(ri, ci))) {
                    Some(t) => t,
                    None => continue,
                }
            };
            if temperature == 0.0 || !temperature.is_finite() {
                continue;
            }

            rows.push(DashboardRow {
                category: classify(&name),
                advice: Advice::from_temperature(temperature),
                attention_value: coerce_attention(&attention),
                attention: match attention {
                    Cell::Missing => s!("-"),
                    other => other.to_field(),
                },
                ytd_change: ytd,
                daily_change: daily,
                temperature,
                name,
            });
        }

        sort_rows(&mut rows);
        logd!("Dashboard: {} of {} snapshot rows shown", rows.len(), table.len());
        Dashboard { rows }
    }

    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Rows whose name contains `keyword`, case-insensitive. Blank keyword keeps all.
    pub fn search(&self, keyword: &str) -> SearchView<'_> {
        let kw = keyword.trim().to_lowercase();
        if kw.is_empty() {
            return SearchView::all(&self.rows);
        }
        let ix = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.name.to_lowercase().contains(&kw))
            .map(|(i, _)| i)
            .collect();
        SearchView::from_indices(&self.rows, ix)
    }
}

/// Change/attention cell with `=` removed; an absent column reads as `"-"`.
fn display_cell(table: &Table, cols: &ColumnMap, c: Canonical, row: usize) -> Cell {
    match cols.get(c) {
        Some(ci) => strip_equals(table.cell(row, ci)),
        None => Cell::Text(s!("-")),
    }
}

fn sort_rows(rows: &mut [DashboardRow]) {
    rows.sort_by(|a, b| {
        b.attention_value
            .partial_cmp(&a.attention_value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.category.rank().cmp(&b.category.rank()))
            .then_with(|| b.temperature.partial_cmp(&a.temperature).unwrap_or(Ordering::Equal))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = "\u{feff}指数名称,PE分位点,PB分位点,关注度,今年以来涨跌幅,涨跌幅,基金温度\n\
        中证白酒,40%,60%,\"=12,000\",0.1015,-0.012,99.0\n\
        沪深300,20%,40%,900,5.5%,=0.003,30.0\n\
        中证500,30%,30%,800,-,0.01,30.0\n";

    fn dash() -> Dashboard {
        Dashboard::from_table(&Table::from_text(SNAPSHOT).unwrap())
    }

    #[test]
    fn recomputes_and_filters() {
        let d = dash();
        assert_eq!(d.len(), 2);

        let baijiu = &d.rows[0];
        assert_eq!(baijiu.name, "中证白酒");
        assert_eq!(baijiu.temperature, 60.0); // recomputed, not the stored 99.0
        assert_eq!(baijiu.ytd_change, "10.15%");
        assert_eq!(baijiu.daily_change, "-1.20%");
        assert_eq!(baijiu.attention, "12,000");
        assert!(baijiu.is_hot());
        assert_eq!(baijiu.tone(), Tone::Warm);

        let hs = &d.rows[1];
        assert_eq!(hs.ytd_change, "5.5%");
        assert_eq!(hs.daily_change, "0.30%");
        assert_eq!(hs.temperature_text(), "30.0°C");
        assert_eq!(hs.advice, Advice::NormalLow);
    }

    #[test]
    fn stored_temperature_used_without_percentiles() {
        let t = Table::from_text("指数名称,关注度,今年以来涨跌幅,涨跌幅,基金温度\nA股指数,=5,1%,2%,42.0\nB,=5,1%,2%,\n").unwrap();
        let d = Dashboard::from_table(&t);
        assert_eq!(d.len(), 1);
        assert_eq!(d.rows[0].temperature, 42.0);
    }

    #[test]
    fn missing_display_columns_drop_everything() {
        let t = Table::from_text("指数名称,PE分位点,PB分位点\n沪深300,20%,40%\n").unwrap();
        assert!(Dashboard::from_table(&t).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_and_numbered() {
        let d = dash();
        let v = d.search("  白酒 ");
        assert_eq!(v.len(), 1);
        assert_eq!(v.numbered_cells()[0][0], "1");
        assert_eq!(v.numbered_cells()[0][2], "中证白酒");
        assert_eq!(d.search("").len(), 2);
        assert!(d.search("nasdaq").is_empty());
    }

    #[test]
    fn change_tones() {
        assert_eq!(change_tone("-1.20%"), ChangeTone::Down);
        assert_eq!(change_tone("0.00%"), ChangeTone::Up);
        assert_eq!(change_tone("n/a"), ChangeTone::Flat);
    }
}
