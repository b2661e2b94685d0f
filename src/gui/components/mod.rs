// src/gui/components/mod.rs
pub mod dashboard_table;
pub mod header;
pub mod history_panel;
pub mod search_bar;
pub mod upload_panel;
