// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use fund_temp::{config::{state::GuiState, AppConfig}, gui, log};
use eframe::egui::{ IconData, ViewportBuilder };

/// 32×32 thermometer: cold-to-hot gradient bulb and stem on transparency.
fn app_icon() -> IconData {
    const N: u32 = 32;
    let mut rgba = vec![0u8; (N * N * 4) as usize];
    for y in 0..N {
        for x in 0..N {
            let (fx, fy) = (x as f32 + 0.5, y as f32 + 0.5);
            let stem = (fx - 16.0).abs() <= 3.5 && (3.0..=22.0).contains(&fy);
            let bulb = (fx - 16.0).powi(2) + (fy - 24.0).powi(2) <= 36.0;
            if !(stem || bulb) { continue; }

            // Blue at the top, red at the bulb.
            let t = (fy / N as f32).clamp(0.0, 1.0);
            let i = ((y * N + x) * 4) as usize;
            rgba[i] = (60.0 + 180.0 * t) as u8;
            rgba[i + 1] = 80;
            rgba[i + 2] = (220.0 - 170.0 * t) as u8;
            rgba[i + 3] = 255;
        }
    }
    IconData { rgba, width: N, height: N }
}

fn main() {
    let config = AppConfig::detect();
    log::set_log_file(config.paths.log_file());

    let gs = GuiState::default();
    let options = eframe::NativeOptions {
        // eframe 0.32: icon set via viewport builder
        viewport: ViewportBuilder::default()
            .with_icon(app_icon())
            .with_inner_size([gs.window_w as f32, gs.window_h as f32]),
        ..Default::default()
    };

    if let Err(e) = gui::run(options, config) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
