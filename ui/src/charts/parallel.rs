//! Parallel-coordinates chart of the observation table with the predictor's
//! what-if line drawn on top.

use dioxus::prelude::*;

use crate::core::{
    format::format_number,
    predictor::rescale_for,
    scale::{LinearScale, PointScale},
    table::ObservationTable,
};

use super::layout::{Frame, Margin, Tick};
use super::path::polyline_path;

/// Known grade buckets and their colours, in legend order.
pub const CATEGORY_COLORS: [(&str, &str); 4] = [
    ("High", "#d45050"),
    ("Medium", "#FADADD"),
    ("Low", "#ADD8E6"),
    ("Very Low", "#3186d5"),
];

pub const PREDICTION_COLOR: &str = "green";
pub const PREDICTION_SHADOW: &str = "rgb(213, 235, 193)";

const AXIS_TICKS: usize = 6;

/// Assigns colours to categories; unseen categories reuse the palette in
/// order of first appearance.
#[derive(Debug, Clone)]
pub struct CategoryPalette {
    seen: Vec<String>,
}

impl Default for CategoryPalette {
    fn default() -> Self {
        Self {
            seen: CATEGORY_COLORS
                .iter()
                .map(|(name, _)| name.to_string())
                .collect(),
        }
    }
}

impl CategoryPalette {
    pub fn color(&mut self, category: &str) -> &'static str {
        let index = match self.seen.iter().position(|name| name == category) {
            Some(index) => index,
            None => {
                self.seen.push(category.to_string());
                self.seen.len() - 1
            }
        };
        CATEGORY_COLORS[index % CATEGORY_COLORS.len()].1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayout {
    pub name: String,
    pub x: f64,
    pub ticks: Vec<Tick>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObservationLine {
    pub color: &'static str,
    pub d: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParallelLayout {
    pub frame: Frame,
    pub y: LinearScale,
    pub axes: Vec<AxisLayout>,
    pub lines: Vec<ObservationLine>,
}

impl ParallelLayout {
    pub const FRAME: Frame = Frame {
        width: 1110.0,
        height: 660.0,
        margin: Margin {
            top: 50.0,
            right: 60.0,
            bottom: 110.0,
            left: 50.0,
        },
    };

    pub fn new(table: &ObservationTable, frame: Frame) -> Self {
        let y = LinearScale::new(shared_domain(table), (frame.inner_height(), 0.0));
        let x = PointScale::new(table.dimensions.len(), (0.0, frame.inner_width()));

        let tick_values = y.ticks(AXIS_TICKS);
        let axes = table
            .dimensions
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let rescale = rescale_for(name);
                AxisLayout {
                    name: name.clone(),
                    x: x.position(index),
                    ticks: tick_values
                        .iter()
                        .map(|value| Tick {
                            offset: y.map(*value),
                            label: format_number(rescale.apply(*value), 2),
                        })
                        .collect(),
                }
            })
            .collect::<Vec<_>>();

        let mut palette = CategoryPalette::default();
        let lines = table
            .rows
            .iter()
            .map(|row| ObservationLine {
                color: palette.color(&row.category),
                d: polyline_path(
                    row.values
                        .iter()
                        .zip(axes.iter())
                        .filter(|(value, _)| value.is_finite())
                        .map(|(value, axis)| (axis.x, y.map(*value))),
                ),
            })
            .collect();

        Self {
            frame,
            y,
            axes,
            lines,
        }
    }

    /// Path for one value per axis (standardized units).
    pub fn overlay_path(&self, values: &[f64]) -> String {
        polyline_path(
            values
                .iter()
                .zip(self.axes.iter())
                .filter(|(value, _)| value.is_finite())
                .map(|(value, axis)| (axis.x, self.y.map(*value))),
        )
    }
}

/// One domain for every axis: the global extent padded by 10% below and 20%
/// above, always including zero.
pub fn shared_domain(table: &ObservationTable) -> (f64, f64) {
    match table.global_extent() {
        Some((lo, hi)) => {
            let pad = (hi - lo) * 0.1;
            ((lo - pad).min(0.0), (hi + 2.0 * pad).max(0.0))
        }
        None => (0.0, 1.0),
    }
}

/// Axes, observation lines and legend. Static for a given table.
#[component]
pub fn ParallelBackdrop(layout: ParallelLayout) -> Element {
    let inner_height = layout.frame.inner_height();
    let legend_y = inner_height + 50.0;
    let legend_x = layout.frame.inner_width() / 2.0 - 270.0;

    rsx! {
        g { class: "parallel-chart__lines",
            for (index, line) in layout.lines.iter().enumerate() {
                path {
                    key: "{index}",
                    class: "parallel-chart__line",
                    d: "{line.d}",
                    stroke: "{line.color}",
                    fill: "none",
                    stroke_width: "1.5",
                    opacity: "0.7",
                }
            }
        }

        for axis in layout.axes.iter() {
            g {
                key: "{axis.name}",
                class: "parallel-chart__axis",
                transform: "translate({axis.x},0)",
                line { x1: "0", y1: "0", x2: "0", y2: "{inner_height}", stroke: "currentColor" }
                for tick in axis.ticks.iter() {
                    g { transform: "translate(0,{tick.offset})",
                        line { x1: "-6", x2: "0", stroke: "currentColor" }
                        text {
                            x: "-9",
                            dy: "0.32em",
                            text_anchor: "end",
                            font_size: "10",
                            "{tick.label}"
                        }
                    }
                }
                text {
                    class: "parallel-chart__axis-title",
                    y: "-10",
                    text_anchor: "middle",
                    font_size: "12",
                    "{axis.name}"
                }
            }
        }

        g { class: "parallel-chart__legend", transform: "translate({legend_x},{legend_y})",
            rect {
                x: "-25",
                y: "-20",
                width: "600",
                height: "40",
                rx: "10",
                ry: "10",
                fill: "#edecec",
                stroke: "grey",
            }
            for (index, (name, color)) in CATEGORY_COLORS.iter().enumerate() {
                circle { key: "{name}", cx: "{index * 120}", cy: "0", r: "8", fill: "{color}" }
                text { x: "{index * 120 + 15}", y: "5", font_size: "14", "{name}" }
            }
            circle { cx: "{CATEGORY_COLORS.len() * 120}", cy: "0", r: "8", fill: PREDICTION_COLOR }
            text { x: "{CATEGORY_COLORS.len() * 120 + 15}", y: "5", font_size: "14", {crate::t!("predictor-legend-prediction")} }
        }
    }
}

/// The what-if line: a wide light shadow under a bold green stroke.
#[component]
pub fn PredictionOverlay(d: String) -> Element {
    rsx! {
        g { class: "parallel-chart__overlay",
            path {
                class: "parallel-chart__overlay-shadow",
                d: "{d}",
                stroke: PREDICTION_SHADOW,
                stroke_width: "10",
                fill: "none",
            }
            path {
                class: "parallel-chart__overlay-line",
                d: "{d}",
                stroke: PREDICTION_COLOR,
                stroke_width: "3",
                fill: "none",
            }
        }
    }
}
