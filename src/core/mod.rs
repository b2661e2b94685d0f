// src/core/mod.rs
//
// Pure building blocks of the scoring pipeline. Nothing in here touches the
// filesystem, the environment or the clock.

pub mod cell;
pub mod classify;
pub mod coerce;
pub mod columns;
pub mod dates;
pub mod sanitize;
pub mod temperature;

pub use cell::Cell;
pub use classify::{Category, classify, is_industry};
pub use columns::{Canonical, ColumnMap};
pub use temperature::Advice;
