// benches/pipeline.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use chrono::NaiveDate;
use fund_temp::{dashboard::Dashboard, pipeline, table::Table};

const NAMES: &[&str] = &[
    "沪深300", "中证500", "中证1000", "中证红利", "中证白酒", "中证医疗", "中证银行",
    "光伏产业", "恒生科技", "纳斯达克100", "上证50", "创业板指", "全指证券公司",
];

/// Synthetic vendor export, `n` rows.
fn sample(n: usize) -> String {
    let mut s = String::from("指数名称,PE-TTM(当前值),PE-TTM(分位点%),PB(当前值),PB(分位点%),关注度,今年以来涨跌幅,涨跌幅\n");
    for i in 0..n {
        let name = NAMES[i % NAMES.len()];
        s.push_str(&format!(
            "{}{},{:.2},{:.2}%,{:.2},{:.2}%,\"={},{:03}\",{:.4},{:.4}\n",
            name, i,
            10.0 + (i % 40) as f64,
            1.0 + (i * 7 % 99) as f64,
            1.0 + (i % 5) as f64 * 0.3,
            1.0 + (i * 13 % 99) as f64,
            i % 50, i % 1000,
            (i % 21) as f64 / 100.0 - 0.1,
            (i % 7) as f64 / 1000.0 - 0.003,
        ));
    }
    s
}

fn bench_pipeline(c: &mut Criterion) {
    let text = sample(2_000);
    let stamp = NaiveDate::from_ymd_opt(2025, 12, 24)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid stamp");

    c.bench_function("table_from_bytes", |b| {
        b.iter(|| {
            let t = Table::from_bytes(black_box(text.as_bytes()));
            black_box(t.map(|(_, t)| t.len()))
        })
    });

    let table = Table::from_text(&text).expect("sample parses");

    c.bench_function("process_and_render", |b| {
        b.iter(|| {
            let ds = pipeline::process_table(black_box(&table), stamp).expect("rows survive");
            black_box(pipeline::render_snapshot(&ds).len())
        })
    });

    let snapshot = {
        let ds = pipeline::process_table(&table, stamp).expect("rows survive");
        Table::from_text(&pipeline::render_snapshot(&ds)).expect("snapshot parses")
    };

    c.bench_function("dashboard_and_search", |b| {
        b.iter(|| {
            let d = Dashboard::from_table(black_box(&snapshot));
            black_box(d.search("中证").len())
        })
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
