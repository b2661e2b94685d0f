// src/lib.rs
// #![allow(dead_code)]
// #![allow(unused)]

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod auth;
pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod dashboard;
pub mod data;
pub mod pipeline;
pub mod table;

pub mod file;
pub mod gui;
pub mod progress;
pub mod store;
