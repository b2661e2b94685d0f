// src/config/state.rs
use super::options::AppConfig;
use crate::auth::Session;

#[derive(Clone, Debug)]
pub struct GuiState {
    pub window_w: u32,
    pub window_h: u32,

    /// Search box text (index name substring)
    pub search: String,

    /// Password field in the login panel; cleared after each attempt
    pub password_input: String,

    /// Path of the CSV to import
    pub import_path: String,

    /// History panel expanded
    pub show_history: bool,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            window_w: 1100,
            window_h: 700,
            search: s!(),
            password_input: s!(),
            import_path: s!(),
            show_history: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub config: AppConfig,
    pub session: Session,
    pub gui: GuiState,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self { config, ..Self::default() }
    }
}
