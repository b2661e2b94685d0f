// src/gui/components/upload_panel.rs
//
// Login gate + CSV import. Everything here needs the upload password.

use eframe::egui;
use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading("数据上传");

    if !app.state.session.is_logged_in() {
        ui.label("Password:");
        let resp = ui.add(
            egui::TextEdit::singleline(&mut app.state.gui.password_input).password(true),
        );
        let submit = ui.button("Login").clicked()
            || (resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)));

        if submit {
            let input = std::mem::take(&mut app.state.gui.password_input);
            let expected = app.state.config.upload_password.clone();
            if app.state.session.login(&input, &expected) {
                app.status("登录成功！");
            } else {
                app.status("密码错误，请重试");
            }
        }
        return;
    }

    ui.label("CSV file:");
    ui.add(
        egui::TextEdit::singleline(&mut app.state.gui.import_path)
            .hint_text("path/to/export_2025-12-24.csv")
            .font(egui::TextStyle::Monospace),
    );

    ui.horizontal(|ui| {
        if ui.button("Import").clicked() {
            actions::import(app);
        }
        if ui.button("Logout").clicked() {
            app.state.session.logout();
            app.history = None;
            app.status("已退出登录");
        }
    });
}
