// src/gui/app.rs
use std::{
    error::Error,
    sync::{Arc, Mutex},
};

use eframe::egui;

use crate::{
    config::{options::AppConfig, state::AppState},
    dashboard::Dashboard,
    data::Snapshot,
    store::{History, Store, UNKNOWN_DATE},
};

use super::{actions, components, fonts};

pub fn run(options: eframe::NativeOptions, config: AppConfig) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "基金温度看板",
        options,
        Box::new(|cc| {
            fonts::install_cjk_font(&cc.egui_ctx);
            Ok(Box::new(App::new(AppState::new(config))))
        }),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,
    pub store: Store,

    // canonical snapshot + derived display rows
    pub snapshot: Option<Snapshot>,
    pub dashboard: Dashboard,

    // rows of `dashboard` currently shown (search applied)
    pub row_ix: Vec<usize>,

    pub data_date: String,
    pub last_updated: String,

    // loaded on demand, dropped after each import
    pub history: Option<History>,

    // status/progress (import writes here)
    pub status: Arc<Mutex<String>>,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let store = match Store::open(&state.config) {
            Ok(s) => s,
            Err(e) => {
                loge!("Init: cannot prepare data dir: {}", e);
                Store::new(&state.config)
            }
        };

        let mut app = Self {
            state,
            store,
            snapshot: None,
            dashboard: Dashboard::default(),
            row_ix: Vec::new(),
            data_date: s!(UNKNOWN_DATE),
            last_updated: s!(),
            history: None,
            status: Arc::new(Mutex::new(s!("Idle"))),
        };

        actions::refresh(&mut app);
        logf!("Init: {} rows on dashboard, data date {}", app.dashboard.len(), app.data_date);
        app
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    pub fn status_text(&self) -> String {
        self.status.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Load `latest_data.csv` from disk and rebuild everything derived from it.
    pub fn reload(&mut self) {
        match self.store.load_latest() {
            Ok(Some(snap)) => {
                self.dashboard = snap.dashboard();
                self.data_date = snap.data_date.clone().unwrap_or_else(|| s!(UNKNOWN_DATE));
                self.snapshot = Some(snap);
            }
            Ok(None) => {
                logd!("Snapshot: none published yet");
                self.dashboard = Dashboard::default();
                self.snapshot = None;
            }
            Err(e) => {
                loge!("Snapshot: {}", e);
                self.dashboard = Dashboard::default();
                self.snapshot = None;
                self.status("数据错误");
            }
        }
        self.last_updated = self.store.last_updated().unwrap_or_else(|| s!("等待数据更新"));
        self.rebuild_view();
    }

    /// Apply the search box to the dashboard rows.
    pub fn rebuild_view(&mut self) {
        self.row_ix = self.dashboard.search(&self.state.gui.search).row_ix;
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            components::header::draw(ui, self);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status_text());
        });

        egui::SidePanel::left("admin")
            .resizable(false)
            .default_width(240.0)
            .show(ctx, |ui| {
                components::upload_panel::draw(ui, self);
                if self.state.session.is_logged_in() {
                    ui.separator();
                    components::history_panel::draw(ui, self);
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            components::search_bar::draw(ui, self);

            ui.separator();

            components::dashboard_table::draw(ui, self);
        });
    }
}
