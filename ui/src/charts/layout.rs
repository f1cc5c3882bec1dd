//! Pixel geometry for a single subject chart.
//!
//! Kept free of any UI types so the live component and the SVG export draw
//! exactly the same picture.

use crate::core::{
    align::YRange,
    comparison::ChartPanel,
    scale::LinearScale,
    series::{LAST_MINUTE, SLOT_COUNT},
};

use super::path::gapped_path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Frame {
    pub const SERIES: Frame = Frame {
        width: 560.0,
        height: 340.0,
        margin: Margin {
            top: 48.0,
            right: 24.0,
            bottom: 48.0,
            left: 56.0,
        },
    };

    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Offset along the axis, in plot coordinates.
    pub offset: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesGeometry {
    pub frame: Frame,
    pub x: LinearScale,
    pub y: LinearScale,
    pub line: String,
    /// Y offset of the average line, if the series has any samples.
    pub average_y: Option<f64>,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
}

const X_TICKS: usize = 6;
const Y_TICKS: usize = 5;

impl SeriesGeometry {
    pub fn new(panel: &ChartPanel, frame: Frame) -> Self {
        let x = LinearScale::new((0.0, LAST_MINUTE as f64), (0.0, frame.inner_width()));
        let domain = visible_domain(&panel.range);
        let y = LinearScale::new(domain, (frame.inner_height(), 0.0));

        let line = gapped_path(
            panel
                .subject
                .series
                .points()
                .map(|(minute, value)| value.map(|v| (x.map(minute as f64), y.map(v)))),
        );

        let summary = &panel.subject.summary;
        let average_y = (summary.count > 0).then(|| y.map(summary.mean));

        let x_ticks = x
            .ticks(X_TICKS)
            .into_iter()
            .map(|minute| Tick {
                offset: x.map(minute),
                label: format!("{minute:.0}"),
            })
            .collect();
        let y_ticks = y
            .ticks(Y_TICKS)
            .into_iter()
            .map(|value| Tick {
                offset: y.map(value),
                label: trim_tick(value),
            })
            .collect();

        Self {
            frame,
            x,
            y,
            line,
            average_y,
            x_ticks,
            y_ticks,
        }
    }

    /// Minute under a horizontal plot offset, clamped to the recording window.
    pub fn minute_at(&self, plot_x: f64) -> usize {
        let minute = self.x.invert(plot_x).round();
        minute.clamp(0.0, (SLOT_COUNT - 1) as f64) as usize
    }
}

/// A flat range still needs some height to draw into.
fn visible_domain(range: &YRange) -> (f64, f64) {
    if range.span() > 0.0 {
        (range.min, range.max)
    } else {
        (range.min - 1.0, range.max + 1.0)
    }
}

fn trim_tick(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
