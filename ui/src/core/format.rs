//! Formatting helpers for presenting chart values.

use super::series::Grade;

/// Fixed-point text with halves rounded away from zero, so `71.125` reads
/// `71.13` rather than the ties-to-even `71.12`.
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    let shown = if rounded.is_finite() { rounded } else { value };
    format!("{shown:.decimals$}")
}

/// Averages are always shown with two decimals.
pub fn format_average(value: f64) -> String {
    format_number(value, 2)
}

pub fn format_with_unit(value: f64, unit: &str) -> String {
    format!("{} {unit}", format_number(value, 2))
}

pub fn format_minute(minute: usize) -> String {
    format!("{minute} min")
}

pub fn format_grade(grade: &Grade) -> String {
    match grade {
        Grade::Score(score) if score.fract() == 0.0 => format!("{score:.0}"),
        Grade::Score(score) => format_number(*score, 1),
        Grade::Unknown => "Unknown".to_string(),
    }
}
