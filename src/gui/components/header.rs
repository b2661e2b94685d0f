// src/gui/components/header.rs
use eframe::egui::{self, RichText};
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        ui.heading("📊 基金温度看板");
        ui.separator();
        ui.label(format!("数据日期: {}", app.data_date));
        ui.separator();
        ui.label(RichText::new(format!("最后更新: {}", app.last_updated)).weak());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Refresh").clicked() {
                logf!("UI: Refresh clicked");
                crate::gui::actions::refresh(app);
            }
        });
    });
}
