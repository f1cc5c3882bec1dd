use dioxus::prelude::*;
use futures_util::StreamExt;

use crate::charts::SeriesChart;
use crate::core::{
    comparison::{Comparison, RequestTracker},
    config::DataSource,
    features::Feature,
    loader::{load_comparison, LoadError},
    platform,
};
use crate::export::ExportPanel;

#[derive(Debug, Clone, PartialEq)]
enum LoadStatus {
    Idle,
    Loading(Feature),
    Ready,
    Failed(String),
}

enum CompareEvent {
    Select(Option<Feature>),
    Loaded {
        request_id: u64,
        feature: Feature,
        result: Result<Comparison, LoadError>,
    },
}

#[component]
pub fn Compare() -> Element {
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let lang_marker = lang_code.as_ref().map(|s| s()).unwrap_or_default();

    let tracker = use_signal(RequestTracker::default);
    let comparison = use_signal(|| Option::<Comparison>::None);
    let status = use_signal(|| LoadStatus::Idle);

    let coroutine = use_coroutine(move |mut rx: UnboundedReceiver<CompareEvent>| {
        let mut tracker = tracker;
        let mut comparison = comparison;
        let mut status = status;

        async move {
            while let Some(event) = rx.next().await {
                match event {
                    CompareEvent::Select(None) => {
                        tracker.with_mut(|t| t.begin());
                        comparison.set(None);
                        status.set(LoadStatus::Idle);
                    }
                    CompareEvent::Select(Some(feature)) => {
                        let request_id = tracker.with_mut(|t| t.begin());
                        tracing::debug!(%feature, request_id, "loading comparison");
                        status.set(LoadStatus::Loading(feature));
                        start_load(request_id, feature);
                    }
                    CompareEvent::Loaded {
                        request_id,
                        feature,
                        result,
                    } => {
                        if !tracker.peek().is_current(request_id) {
                            tracing::debug!(%feature, request_id, "discarding superseded load");
                            continue;
                        }
                        match result {
                            Ok(loaded) => {
                                comparison.set(Some(loaded));
                                status.set(LoadStatus::Ready);
                            }
                            Err(err) => {
                                tracing::warn!(%feature, error = %err, "comparison failed to load");
                                comparison.set(None);
                                status.set(LoadStatus::Failed(err.to_string()));
                            }
                        }
                    }
                }
            }
        }
    });

    let on_select = move |evt: FormEvent| {
        let feature = evt.value().parse::<Feature>().ok();
        coroutine.send(CompareEvent::Select(feature));
    };

    let loading_label = match status() {
        LoadStatus::Loading(feature) => Some(crate::t!("compare-loading", feature = feature_label(feature))),
        _ => None,
    };
    let failure = match status() {
        LoadStatus::Failed(message) => Some(message),
        _ => None,
    };

    rsx! {
        div { style: "display:none", "{lang_marker}" }
        section { class: "page page-compare",
            h1 { {crate::t!("compare-title")} }
            p { {crate::t!("compare-intro")} }

            div { class: "compare__controls",
                label { r#for: "feature-select", {crate::t!("compare-select-label")} }
                select {
                    id: "feature-select",
                    class: "compare__select",
                    onchange: on_select,
                    option { value: "", {crate::t!("compare-select-prompt")} }
                    for feature in Feature::ALL {
                        option { key: "{feature}", value: "{feature}", {feature_label(feature)} }
                    }
                }
                if let Some(label) = loading_label {
                    span { class: "compare__status", "{label}" }
                }
            }

            if let Some(message) = failure {
                p { class: "compare__error", role: "alert",
                    {crate::t!("compare-error", reason = message)}
                }
            } else if let Some(current) = comparison() {
                div { class: "compare__charts",
                    for (index, panel) in current.panels.iter().enumerate() {
                        SeriesChart { key: "{index}", panel: panel.clone(), feature: current.feature }
                    }
                }
                ExportPanel { comparison: current.clone() }
            } else if status() == LoadStatus::Idle {
                p { class: "compare__placeholder", {crate::t!("compare-empty")} }
            }
        }
    }
}

/// Fetch a feature pair in the background and report back to the coroutine.
fn start_load(request_id: u64, feature: Feature) {
    let coroutine = consume_context::<Coroutine<CompareEvent>>();
    platform::spawn_future(async move {
        let result = load_comparison(&DataSource::resolve(), feature).await;
        coroutine.send(CompareEvent::Loaded {
            request_id,
            feature,
            result,
        });
    });
}

fn feature_label(feature: Feature) -> String {
    match feature {
        Feature::Hr => crate::t!("feature-hr"),
        Feature::Temp => crate::t!("feature-temp"),
        Feature::Eda => crate::t!("feature-eda"),
        Feature::Acc => crate::t!("feature-acc"),
    }
}
