// src/gui/components/history_panel.rs
use eframe::egui::{self, RichText};
use crate::{gui::{actions, app::App}, store::HistoryEntry};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let header = egui::CollapsingHeader::new("历史数据")
        .default_open(app.state.gui.show_history)
        .show(ui, |ui| {
            if app.history.is_none() {
                actions::load_history(app);
            }
            let Some(h) = app.history.as_ref() else { return };

            egui::ScrollArea::vertical()
                .id_salt("history_scroll")
                .show(ui, |ui| {
                    section(ui, "上传的文件", &h.uploaded);
                    ui.add_space(6.0);
                    section(ui, "处理后的文件", &h.processed);
                });
        });
    app.state.gui.show_history = header.body_returned.is_some();
}

fn section(ui: &mut egui::Ui, title: &str, entries: &[HistoryEntry]) {
    ui.label(RichText::new(title).strong());
    if entries.is_empty() {
        ui.label(RichText::new("(none)").weak());
        return;
    }
    for e in entries {
        ui.label(&e.name);
        ui.label(RichText::new(format!("{}  {}", e.modified, e.size)).small().weak());
    }
}
