//! Data model and pure logic shared by every platform shell.

pub mod align;
pub mod comparison;
pub mod config;
pub mod features;
pub mod format;
pub mod loader;
pub mod platform;
pub mod predictor;
pub mod scale;
pub mod series;
pub mod table;
