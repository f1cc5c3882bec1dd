//! Shared UI crate for examtrace: data loading, chart geometry, the
//! predictor model and the routed views used by every launcher.

use dioxus::prelude::*;

pub mod charts;
pub mod core;
pub mod export;
pub mod i18n;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}

/// Shared stylesheet; desktop builds embed the same file with `include_str!`.
pub const THEME_CSS: Asset = asset!("/assets/theme/main.css");
