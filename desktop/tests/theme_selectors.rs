#![cfg(test)]
/*!
Theme selector lint for the desktop build.

The desktop binary embeds `ui/assets/theme/main.css`, so a dropped or renamed
class only shows up as unstyled charts at runtime. These checks look for the
selectors the shared components rely on. When a component class is renamed,
update REQUIRED_SELECTORS alongside it.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

/// Core selectors / tokens that must exist in the shared theme for desktop.
const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".page {",
    ".visually-hidden",
    // Buttons
    ".button {",
    ".button--primary",
    ".button--accent",
    ".button--ghost",
    // Comparison page
    ".compare__controls",
    ".compare__select",
    ".compare__error",
    ".compare__charts",
    // Subject charts
    ".series-chart {",
    ".series-chart__title",
    ".series-chart__line",
    ".series-chart__tooltip",
    // Predictor
    ".predictor__controls",
    ".predictor__slider",
    ".predictor__score",
    ".parallel-chart {",
    ".parallel-chart__overlay",
    ".parallel-chart__legend",
    // Export panel
    ".export-panel {",
    ".export-panel__actions",
    ".export-panel__status--success",
    ".export-panel__status--error",
    // Responsive block
    "@media (max-width: 720px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let mut missing = Vec::new();
    for sel in REQUIRED_SELECTORS {
        if !THEME_CSS.contains(sel) {
            missing.push(*sel);
        }
    }

    if !missing.is_empty() {
        panic!(
            "Missing {} required CSS selectors/tokens in unified theme:\n{}",
            missing.len(),
            missing.join("\n")
        );
    }
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 4_000,
        "Embedded theme appears unexpectedly small ({} non-whitespace chars) – \
         did the file get truncated or path change?",
        non_ws_len
    );
}

#[test]
fn animated_paths_declare_transitions() {
    let line = THEME_CSS.contains(".series-chart__line {\n    transition: d");
    let overlay = THEME_CSS.contains(".parallel-chart__overlay path {\n    transition: d");
    assert!(
        line && overlay,
        "Path transitions missing (series line: {line}, prediction overlay: {overlay})"
    );
}
