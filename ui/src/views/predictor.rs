use dioxus::prelude::*;

use crate::charts::{ParallelBackdrop, ParallelLayout, PredictionOverlay};
use crate::core::{
    config::DataSource,
    format::format_number,
    loader::load_observations,
    predictor::{
        overlay_values, predict, rescale_for, PredictionInput, SLIDER_DIMENSIONS, SLIDER_MAX,
        SLIDER_MIN, SLIDER_STEP,
    },
};

#[component]
pub fn Predictor() -> Element {
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let lang_marker = lang_code.as_ref().map(|s| s()).unwrap_or_default();

    let table = use_resource(|| async move {
        load_observations(&DataSource::resolve())
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "observation table failed to load");
                err.to_string()
            })
    });

    let mut input = use_signal(PredictionInput::default);
    let output = use_memo(move || predict(&input()));

    let layout = use_memo(move || match &*table.read() {
        Some(Ok(table)) => Some(ParallelLayout::new(table, ParallelLayout::FRAME)),
        _ => None,
    });

    let load_error = match &*table.read() {
        Some(Err(message)) => Some(message.clone()),
        _ => None,
    };

    let overlay = layout.read().as_ref().map(|layout| {
        layout.overlay_path(&overlay_values(layout.axes.len(), &input(), &output()))
    });

    let frame = ParallelLayout::FRAME;
    let score_text = format_number(output().grade_percent, 2);

    rsx! {
        div { style: "display:none", "{lang_marker}" }
        section { class: "page page-predictor",
            h1 { {crate::t!("predictor-title")} }
            p { {crate::t!("predictor-intro")} }

            div { class: "predictor__controls",
                for (index, dimension) in SLIDER_DIMENSIONS.iter().enumerate() {
                    div { key: "{dimension}", class: "predictor__slider",
                        label { r#for: "slider-{index}", "{dimension}" }
                        input {
                            id: "slider-{index}",
                            r#type: "range",
                            min: "{SLIDER_MIN}",
                            max: "{SLIDER_MAX}",
                            step: "{SLIDER_STEP}",
                            value: "{input().values[index]}",
                            oninput: move |evt: FormEvent| {
                                input.with_mut(|current| *current = current.with_value(index, &evt.value()));
                            },
                        }
                        span { class: "predictor__slider-value",
                            {format_number(input().values[index], 2)}
                        }
                        span { class: "predictor__slider-display",
                            {crate::t!("predictor-slider-display", value = display_value(dimension, input().values[index]))}
                        }
                    }
                }
            }

            p { class: "predictor__score",
                {crate::t!("predictor-score", value = score_text)}
            }

            if let Some(message) = load_error {
                p { class: "predictor__error", role: "alert",
                    {crate::t!("predictor-error", reason = message)}
                }
            } else if let Some(layout) = layout() {
                svg {
                    class: "parallel-chart",
                    width: "{frame.width}",
                    height: "{frame.height}",
                    view_box: "0 0 {frame.width} {frame.height}",
                    g { transform: "translate({frame.margin.left},{frame.margin.top})",
                        ParallelBackdrop { layout }
                        if let Some(d) = overlay {
                            PredictionOverlay { d }
                        }
                    }
                }
            } else {
                p { class: "predictor__placeholder", {crate::t!("predictor-loading")} }
            }
        }
    }
}

/// Slider position in the dimension's display units.
fn display_value(dimension: &str, standardized: f64) -> String {
    format_number(rescale_for(dimension).apply(standardized), 2)
}
