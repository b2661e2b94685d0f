// src/gui/components/search_bar.rs
use eframe::egui;
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        ui.label("搜索指数:");
        let resp = ui.add(
            egui::TextEdit::singleline(&mut app.state.gui.search)
                .hint_text("输入指数名称")
                .desired_width(220.0),
        );
        if resp.changed() {
            app.rebuild_view();
            logd!("UI: search {:?} → {} rows", app.state.gui.search, app.row_ix.len());
        }
        if !app.state.gui.search.is_empty() && ui.button("Clear").clicked() {
            app.state.gui.search.clear();
            app.rebuild_view();
        }

        ui.label(format!("{} / {}", app.row_ix.len(), app.dashboard.len()));
    });
}
