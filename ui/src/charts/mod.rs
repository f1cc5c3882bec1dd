//! SVG charts: pure geometry plus the Dioxus components that draw it.

pub mod compare;
pub mod layout;
pub mod markup;
pub mod parallel;
pub mod path;

pub use compare::SeriesChart;
pub use parallel::{ParallelBackdrop, ParallelLayout, PredictionOverlay};
