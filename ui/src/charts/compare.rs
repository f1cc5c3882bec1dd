use dioxus::prelude::*;

use crate::core::{
    comparison::ChartPanel,
    features::Feature,
    format::{format_average, format_grade, format_minute, format_with_unit},
    series::Grade,
};

use super::layout::{Frame, SeriesGeometry};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Hover {
    Sample { minute: usize, value: Option<f64> },
    Average,
}

/// One subject's line chart on the pair's shared Y range.
#[component]
pub fn SeriesChart(panel: ChartPanel, feature: Feature) -> Element {
    let mut hover = use_signal(|| Option::<Hover>::None);

    let frame = Frame::SERIES;
    let geometry = SeriesGeometry::new(&panel, frame);
    let summary = panel.subject.summary;
    let average_label = format_average(summary.mean);
    let inner_width = frame.inner_width();
    let inner_height = frame.inner_height();
    let feature_title = feature.key().to_uppercase();
    let label = panel.subject.label.clone();
    let unit = feature.unit();

    let tooltip = hover().map(|state| match state {
        Hover::Sample { minute, value } => {
            let value_text = value
                .map(|v| format_with_unit(v, unit))
                .unwrap_or_else(|| crate::t!("compare-no-data"));
            let anchor_y = value
                .map(|v| geometry.y.map(v))
                .unwrap_or(inner_height / 2.0);
            (
                geometry.x.map(minute as f64),
                anchor_y,
                format!("{} · {value_text}", format_minute(minute)),
            )
        }
        Hover::Average => (
            inner_width - 8.0,
            geometry.average_y.unwrap_or(0.0),
            crate::t!("compare-tooltip-average", value = average_label.clone()),
        ),
    });

    let pointer_geometry = geometry.clone();
    let pointer_series = panel.subject.series.clone();
    let on_move = move |evt: MouseEvent| {
        let point = evt.element_coordinates();
        let minute = pointer_geometry.minute_at(point.x);
        hover.set(Some(Hover::Sample {
            minute,
            value: pointer_series.get(minute),
        }));
    };

    rsx! {
        figure { class: "series-chart",
            figcaption { class: "series-chart__title",
                span { class: "series-chart__heading",
                    {crate::t!("compare-chart-title", feature = feature_title.clone(), label = label.clone())}
                }
                span { class: "series-chart__average",
                    {crate::t!("compare-average", value = average_label.clone())}
                }
                if let Grade::Score(_) = panel.subject.grade {
                    span { class: "series-chart__grade",
                        {crate::t!("compare-grade", value = format_grade(&panel.subject.grade))}
                    }
                }
            }

            svg {
                class: "series-chart__svg",
                width: "{frame.width}",
                height: "{frame.height}",
                view_box: "0 0 {frame.width} {frame.height}",
                g { transform: "translate({frame.margin.left},{frame.margin.top})",
                    g { class: "series-chart__axis series-chart__axis--x",
                        transform: "translate(0,{inner_height})",
                        line { x1: "0", y1: "0", x2: "{inner_width}", y2: "0", stroke: "currentColor" }
                        for tick in geometry.x_ticks.iter() {
                            g { key: "{tick.label}", transform: "translate({tick.offset},0)",
                                line { y1: "0", y2: "6", stroke: "currentColor" }
                                text { y: "18", text_anchor: "middle", font_size: "10", "{tick.label}" }
                            }
                        }
                        text {
                            class: "series-chart__axis-title",
                            x: "{inner_width / 2.0}",
                            y: "38",
                            text_anchor: "middle",
                            font_size: "12",
                            {crate::t!("compare-axis-minutes")}
                        }
                    }

                    g { class: "series-chart__axis series-chart__axis--y",
                        line { x1: "0", y1: "0", x2: "0", y2: "{inner_height}", stroke: "currentColor" }
                        for tick in geometry.y_ticks.iter() {
                            g { key: "{tick.label}", transform: "translate(0,{tick.offset})",
                                line { x1: "-6", x2: "0", stroke: "currentColor" }
                                text { x: "-9", dy: "0.32em", text_anchor: "end", font_size: "10", "{tick.label}" }
                            }
                        }
                    }

                    path {
                        class: "series-chart__line",
                        d: "{geometry.line}",
                        fill: "none",
                        stroke: "steelblue",
                        stroke_width: "2",
                        stroke_linecap: "round",
                        stroke_linejoin: "round",
                    }

                    rect {
                        class: "series-chart__hit-area",
                        width: "{inner_width}",
                        height: "{inner_height}",
                        fill: "transparent",
                        onmousemove: on_move,
                        onmouseleave: move |_| hover.set(None),
                    }

                    if let Some(avg_y) = geometry.average_y {
                        g { class: "series-chart__average-line",
                            line {
                                x1: "0",
                                x2: "{inner_width}",
                                y1: "{avg_y}",
                                y2: "{avg_y}",
                                stroke: "red",
                                stroke_width: "2",
                                stroke_dasharray: "5,5",
                            }
                            line {
                                class: "series-chart__average-hit",
                                x1: "0",
                                x2: "{inner_width}",
                                y1: "{avg_y}",
                                y2: "{avg_y}",
                                stroke: "transparent",
                                stroke_width: "12",
                                onmouseenter: move |_| hover.set(Some(Hover::Average)),
                                onmouseleave: move |_| hover.set(None),
                            }
                        }
                    }

                    if let Some((x, y, text)) = tooltip {
                        g { class: "series-chart__tooltip", transform: "translate({x},{y})",
                            pointer_events: "none",
                            circle { r: "4", fill: "steelblue" }
                            text { x: "8", y: "-8", font_size: "12", text_anchor: tooltip_anchor(x, inner_width), "{text}" }
                        }
                    }
                }
            }
        }
    }
}

/// Keep tooltip text inside the plot near the right edge.
fn tooltip_anchor(x: f64, inner_width: f64) -> &'static str {
    if x > inner_width * 0.7 {
        "end"
    } else {
        "start"
    }
}
