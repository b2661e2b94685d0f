// tests/dashboard_view.rs
use fund_temp::core::{Advice, Category};
use fund_temp::dashboard::{Dashboard, Tone, DISPLAY_COLUMNS};
use fund_temp::table::Table;

// A snapshot as written by the ingest stage (already has derived columns).
const SNAPSHOT: &str = "\u{feff}指数名称,PE,PE分位点,PB,PB分位点,关注度,今年以来涨跌幅,涨跌幅,基金温度,投资建议,类别
中证银行,5.0,10.00%,0.6,15.00%,=100,=0.0500,=0.0010,15.0,低估区域，可考虑定投,行业
沪深300,12.5,20.00%,1.4,40.00%,=100,0.0550,-0.0030,30.0,正常偏低，可继续持有,大盘
中证500,25.0,50.00%,1.9,50.00%,=50,0.0800,0.0100,50.0,正常偏高，注意风险,小盘
纳斯达克100,30.0,90.00%,8.0,90.00%,-,0.2000,0.0100,90.0,高估区域，考虑减仓,海外
";

#[test]
fn ranks_by_attention_then_category() {
    let d = Dashboard::from_table(&Table::from_text(SNAPSHOT).unwrap());
    let names: Vec<&str> = d.rows.iter().map(|r| r.name.as_str()).collect();
    // attention "-" row is hidden; ties on attention broken by category rank
    assert_eq!(names, vec!["沪深300", "中证银行", "中证500"]);

    assert_eq!(d.rows[0].category, Category::Broad);
    assert_eq!(d.rows[1].category, Category::Industry);
    assert_eq!(d.rows[1].temperature, 15.0);
    assert_eq!(d.rows[1].advice, Advice::Undervalued);
    assert_eq!(d.rows[1].tone(), Tone::Cold);
    assert_eq!(d.rows[1].ytd_change, "5.00%");
    assert_eq!(d.rows[1].daily_change, "0.10%");
}

#[test]
fn search_numbers_rows_in_view_order() {
    let d = Dashboard::from_table(&Table::from_text(SNAPSHOT).unwrap());
    let view = d.search("中证");
    let cells = view.numbered_cells();
    assert_eq!(cells.len(), 2);
    assert_eq!(cells[0][0], "1");
    assert_eq!(cells[0][2], "中证银行");
    assert_eq!(cells[1][0], "2");
    assert_eq!(cells[1][3], "50.0°C");
    assert_eq!(cells[1].len(), DISPLAY_COLUMNS.len());
}

#[test]
fn equal_attention_and_category_ranks_hotter_first() {
    let t = Table::from_text(
        "指数名称,PE分位点,PB分位点,关注度,今年以来涨跌幅,涨跌幅\n\
         沪深300,20%,20%,=100,0.01,0.01\n\
         上证50,60%,60%,=100,0.01,0.01\n",
    )
    .unwrap();
    let d = Dashboard::from_table(&t);
    assert_eq!(d.rows[0].category, d.rows[1].category);
    let ranked: Vec<(&str, f64)> = d.rows.iter().map(|r| (r.name.as_str(), r.temperature)).collect();
    assert_eq!(ranked, vec![("上证50", 60.0), ("沪深300", 20.0)]);
}
