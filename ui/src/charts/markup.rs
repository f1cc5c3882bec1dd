//! Standalone SVG documents for exporting a comparison.

use std::fmt::Write;

use crate::core::{
    comparison::Comparison,
    format::{format_average, format_grade},
    series::Grade,
};

use super::layout::{Frame, SeriesGeometry};

const GUTTER: f64 = 24.0;
const HEADER: f64 = 56.0;

/// Canvas size of an exported comparison with `panels` charts side by side.
pub fn canvas_size(panels: usize) -> (f64, f64) {
    let frame = Frame::SERIES;
    let count = panels.max(1) as f64;
    (
        count * frame.width + (count - 1.0) * GUTTER,
        frame.height + HEADER,
    )
}

pub fn comparison_svg(comparison: &Comparison) -> String {
    let frame = Frame::SERIES;
    let (width, height) = canvas_size(comparison.panels.len());
    let feature_title = comparison.feature.key().to_uppercase();
    let axis_title = crate::t!("compare-axis-minutes");
    let mut svg = String::new();

    let _ = write!(
        svg,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{width}' height='{height}' viewBox='0 0 {width} {height}' font-family='Inter, sans-serif'>\
<rect width='{width}' height='{height}' fill='#ffffff'/>\
<text x='24' y='36' font-size='22' font-weight='700' fill='#151923'>{}</text>",
        escape(&crate::t!("compare-export-heading", feature = feature_title.clone()))
    );

    for (index, panel) in comparison.panels.iter().enumerate() {
        let geometry = SeriesGeometry::new(panel, frame);
        let left = index as f64 * (frame.width + GUTTER);
        let inner_width = frame.inner_width();
        let inner_height = frame.inner_height();

        let mut title = format!(
            "{} · {}",
            crate::t!("compare-chart-title", feature = feature_title.clone(), label = panel.subject.label.clone()),
            crate::t!("compare-average", value = format_average(panel.subject.summary.mean))
        );
        if let Grade::Score(_) = panel.subject.grade {
            let _ = write!(title, " · {}", crate::t!("compare-grade", value = format_grade(&panel.subject.grade)));
        }

        let _ = write!(
            svg,
            "<g transform='translate({left},{HEADER})'>\
<text x='{}' y='24' font-size='15' font-weight='600' fill='#151923'>{}</text>\
<g transform='translate({},{})' fill='#151923' stroke='none'>",
            frame.margin.left,
            escape(&title),
            frame.margin.left,
            frame.margin.top
        );

        let _ = write!(
            svg,
            "<line x1='0' y1='{inner_height}' x2='{inner_width}' y2='{inner_height}' stroke='#151923'/>\
<line x1='0' y1='0' x2='0' y2='{inner_height}' stroke='#151923'/>"
        );
        for tick in &geometry.x_ticks {
            let _ = write!(
                svg,
                "<text x='{:.2}' y='{:.2}' font-size='10' text-anchor='middle'>{}</text>",
                tick.offset,
                inner_height + 18.0,
                escape(&tick.label)
            );
        }
        for tick in &geometry.y_ticks {
            let _ = write!(
                svg,
                "<text x='-9' y='{:.2}' font-size='10' text-anchor='end' dominant-baseline='middle'>{}</text>",
                tick.offset,
                escape(&tick.label)
            );
        }
        let _ = write!(
            svg,
            "<text x='{:.2}' y='{:.2}' font-size='12' text-anchor='middle'>{}</text>",
            inner_width / 2.0,
            inner_height + 38.0,
            escape(&axis_title)
        );

        let _ = write!(
            svg,
            "<path d='{}' fill='none' stroke='steelblue' stroke-width='2' stroke-linecap='round' stroke-linejoin='round'/>",
            geometry.line
        );
        if let Some(avg_y) = geometry.average_y {
            let _ = write!(
                svg,
                "<line x1='0' x2='{inner_width}' y1='{avg_y:.2}' y2='{avg_y:.2}' stroke='red' stroke-width='2' stroke-dasharray='5,5'/>"
            );
        }

        svg.push_str("</g></g>");
    }

    svg.push_str("</svg>");
    svg
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&apos;")
        .replace('"', "&quot;")
}
