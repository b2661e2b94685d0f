// src/gui/components/dashboard_table.rs
//
// Draws the ranked index table. Purely a view over `app.row_ix`.

use eframe::egui::{self, Align, Color32, Layout, RichText, TextWrapMode};
use egui_extras::{Column, TableBuilder};

use crate::dashboard::{change_tone, ChangeTone, DashboardRow, Tone, DISPLAY_COLUMNS};
use crate::gui::app::App;

const WIDTHS: [f32; 8] = [44.0, 52.0, 180.0, 90.0, 80.0, 80.0, 80.0, 170.0];

// Red for rises, green for falls.
const UP: Color32 = Color32::from_rgb(0xDC, 0x35, 0x45);
const DOWN: Color32 = Color32::from_rgb(0x19, 0x87, 0x54);

fn tone_color(t: Tone) -> Color32 {
    match t {
        Tone::Cold => Color32::from_rgb(0x19, 0x87, 0x54),
        Tone::Mild => Color32::from_rgb(0x0D, 0xCA, 0xF0),
        Tone::Warm => Color32::from_rgb(0xFF, 0xC1, 0x07),
        Tone::Hot  => Color32::from_rgb(0xDC, 0x35, 0x45),
    }
}

fn styled(row: &DashboardRow, col: usize, text: String) -> RichText {
    let rt = RichText::new(text);
    match col {
        3 => rt.color(tone_color(row.tone())).strong(),
        4 | 5 => {
            let src = if col == 4 { &row.ytd_change } else { &row.daily_change };
            match change_tone(src) {
                ChangeTone::Up => rt.color(UP),
                ChangeTone::Down => rt.color(DOWN),
                ChangeTone::Flat => rt,
            }
        }
        6 if row.is_hot() => rt.color(UP).strong(),
        7 => rt.color(tone_color(row.tone())),
        _ => rt,
    }
}

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    if app.snapshot.is_none() {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading("数据正在初始化中...");
            ui.label("欢迎访问！本页面展示主要指数的估值温度。");
        });
        return;
    }

    if app.row_ix.is_empty() {
        let kw = app.state.gui.search.trim();
        if kw.is_empty() {
            ui.label("No rows to show.");
        } else {
            ui.label(format!("未找到包含 \"{}\" 的指数。", kw));
        }
        return;
    }

    let mut table = TableBuilder::new(ui)
        .striped(true)
        .min_scrolled_height(0.0);
    for w in WIDTHS {
        table = table.column(Column::initial(w).resizable(true).clip(true).at_least(20.0));
    }

    let rows = &app.dashboard.rows;
    let row_ix = &app.row_ix;

    table
        .header(24.0, |mut header| {
            for title in DISPLAY_COLUMNS {
                header.col(|ui| {
                    ui.add(egui::Label::new(RichText::new(title).strong()).selectable(false));
                });
            }
        })
        .body(|body| {
            body.rows(20.0, row_ix.len(), |mut row| {
                let view_idx = row.index();
                let Some(data) = row_ix.get(view_idx).and_then(|&ix| rows.get(ix)) else { return };

                for (ci, text) in data.display_cells(view_idx + 1).into_iter().enumerate() {
                    let rt = styled(data, ci, text);
                    row.col(|ui| {
                        ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                        if ci == 2 || ci == 7 {
                            ui.with_layout(Layout::left_to_right(Align::Center), |ui| { ui.label(rt); });
                        } else {
                            ui.centered_and_justified(|ui| { ui.label(rt); });
                        }
                    });
                }
            });
        });
}
