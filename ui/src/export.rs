use dioxus::prelude::*;
use serde::Serialize;

use crate::charts::markup::{canvas_size, comparison_svg};
use crate::core::{align::YRange, comparison::Comparison, platform, series::Grade};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unable to serialise summary: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("unable to render chart: {0}")]
    Render(String),
    #[error("unable to encode PNG: {0}")]
    Encode(String),
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("unable to save export: {0}")]
    Save(String),
    #[cfg(not(target_arch = "wasm32"))]
    #[error("unable to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working(String),
    Done(String),
    Error(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ExportKind {
    Svg,
    Png,
    Summary,
}

/// Per-subject figures copied out of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectSummary {
    pub label: String,
    pub grade: Grade,
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub range: YRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSummary {
    pub feature: &'static str,
    pub unit: &'static str,
    pub subjects: Vec<SubjectSummary>,
}

impl ComparisonSummary {
    pub fn from_comparison(comparison: &Comparison) -> Self {
        Self {
            feature: comparison.feature.key(),
            unit: comparison.feature.unit(),
            subjects: comparison
                .panels
                .iter()
                .map(|panel| SubjectSummary {
                    label: panel.subject.label.clone(),
                    grade: panel.subject.grade,
                    count: panel.subject.summary.count,
                    mean: panel.subject.summary.mean,
                    min: panel.subject.summary.min,
                    max: panel.subject.summary.max,
                    range: panel.range,
                })
                .collect(),
        }
    }
}

#[component]
pub fn ExportPanel(comparison: Comparison) -> Element {
    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Working(label) => Some(("export-panel__status".to_string(), format!("{label}…"))),
        ExportStatus::Done(message) => Some((
            "export-panel__status export-panel__status--success".to_string(),
            format!("✅ {message}"),
        )),
        ExportStatus::Error(err) => Some((
            "export-panel__status export-panel__status--error".to_string(),
            format!("⚠️ {err}"),
        )),
    };

    let handler = move |kind: ExportKind| {
        let comparison = comparison.clone();
        let mut status_signal = status;
        let mut busy_signal = busy;
        move |_: MouseEvent| {
            if busy_signal() {
                return;
            }
            busy_signal.set(true);
            status_signal.set(ExportStatus::Working(working_label(kind)));
            let comparison = comparison.clone();
            platform::spawn_future(async move {
                let outcome = perform_export(kind, comparison).await;
                status_signal.set(outcome_status(kind, outcome));
                busy_signal.set(false);
            });
        }
    };

    rsx! {
        section { class: "export-panel",
            h2 { class: "export-panel__title", {crate::t!("export-title")} }
            p { class: "export-panel__lead", {crate::t!("export-lead")} }
            div { class: "export-panel__actions",
                button {
                    r#type: "button",
                    class: "button button--primary",
                    disabled: busy(),
                    onclick: handler(ExportKind::Svg),
                    {crate::t!("export-svg")}
                }
                button {
                    r#type: "button",
                    class: "button",
                    disabled: busy(),
                    onclick: handler(ExportKind::Png),
                    {crate::t!("export-png")}
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    disabled: busy(),
                    onclick: handler(ExportKind::Summary),
                    {crate::t!("export-summary")}
                }
            }
            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", "{message}" }
            }
        }
    }
}

fn working_label(kind: ExportKind) -> String {
    match kind {
        ExportKind::Svg => crate::t!("export-working-svg"),
        ExportKind::Png => crate::t!("export-working-png"),
        ExportKind::Summary => crate::t!("export-working-summary"),
    }
}

fn outcome_status(kind: ExportKind, outcome: Result<Option<String>, ExportError>) -> ExportStatus {
    match outcome {
        Ok(Some(path)) => {
            tracing::info!(?kind, %path, "export saved");
            ExportStatus::Done(crate::t!("export-saved", path = path))
        }
        Ok(None) if kind == ExportKind::Summary => {
            tracing::info!("summary copied to clipboard");
            ExportStatus::Done(crate::t!("export-copied"))
        }
        Ok(None) => {
            tracing::info!(?kind, "export download started");
            ExportStatus::Done(crate::t!("export-downloaded"))
        }
        Err(err) => {
            tracing::warn!(?kind, error = %err, "export failed");
            ExportStatus::Error(err.to_string())
        }
    }
}

/// Runs one export. Returns the saved path when the file landed on disk.
async fn perform_export(
    kind: ExportKind,
    comparison: Comparison,
) -> Result<Option<String>, ExportError> {
    match kind {
        ExportKind::Svg => {
            let svg = comparison_svg(&comparison);
            let filename = export_filename(&comparison, "svg", &timestamp_slug());
            download_bytes(&filename, "image/svg+xml", svg.into_bytes()).await
        }
        ExportKind::Png => {
            let png = build_png(&comparison).await?;
            let filename = export_filename(&comparison, "png", &timestamp_slug());
            download_bytes(&filename, "image/png", png).await
        }
        ExportKind::Summary => {
            let json = summary_json(&comparison)?;
            copy_to_clipboard(json).await?;
            Ok(None)
        }
    }
}

pub fn summary_json(comparison: &Comparison) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(
        &ComparisonSummary::from_comparison(comparison),
    )?)
}

pub fn export_filename(comparison: &Comparison, extension: &str, slug: &str) -> String {
    format!(
        "examtrace-{}-{slug}.{extension}",
        comparison.feature.key()
    )
}

fn timestamp_slug() -> String {
    use time::{macros::format_description, OffsetDateTime};

    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "export".into())
}

async fn copy_to_clipboard(payload: String) -> Result<(), ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let clip = |reason: &str| ExportError::Clipboard(reason.to_string());
        let window = web_sys::window().ok_or_else(|| clip("window unavailable"))?;
        let document = window.document().ok_or_else(|| clip("document unavailable"))?;
        let body = document.body().ok_or_else(|| clip("missing body"))?;

        let textarea = document
            .create_element("textarea")
            .map_err(|_| clip("unable to create textarea"))?
            .dyn_into::<web_sys::HtmlTextAreaElement>()
            .map_err(|_| clip("textarea cast failed"))?;
        textarea.set_value(&payload);
        let style = textarea.style();
        style.set_property("position", "fixed").ok();
        style.set_property("top", "0").ok();
        style.set_property("left", "0").ok();
        style.set_property("opacity", "0").ok();

        body.append_child(&textarea).ok();
        textarea.select();
        let copied = document
            .dyn_ref::<web_sys::HtmlDocument>()
            .map(|html| html.exec_command("copy").unwrap_or(false))
            .unwrap_or(false);
        textarea.remove();
        if copied {
            Ok(())
        } else {
            Err(clip("copy blocked by the browser"))
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use arboard::Clipboard;

        let mut clipboard =
            Clipboard::new().map_err(|err| ExportError::Clipboard(err.to_string()))?;
        clipboard
            .set_text(payload)
            .map_err(|err| ExportError::Clipboard(err.to_string()))
    }
}

async fn download_bytes(
    filename: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<Option<String>, ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let save = |reason: &str| ExportError::Save(reason.to_string());
        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| save("failed to create blob"))?;
        let url =
            Url::create_object_url_with_blob(&blob).map_err(|_| save("unable to create download"))?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| save("document unavailable"))?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| save("unable to create anchor"))?
            .dyn_into()
            .map_err(|_| save("anchor cast failed"))?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or_else(|| save("missing body"))?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = mime;
        let dir = desktop_export_dir()?;
        save_into(&dir, filename, &bytes).map(Some)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn desktop_export_dir() -> Result<std::path::PathBuf, ExportError> {
    let dirs = directories::ProjectDirs::from("com", "Examtrace", "Examtrace")
        .ok_or_else(|| ExportError::Save("unable to determine export directory".into()))?;
    Ok(dirs.data_dir().join("exports"))
}

#[cfg(not(target_arch = "wasm32"))]
fn save_into(dir: &std::path::Path, filename: &str, bytes: &[u8]) -> Result<String, ExportError> {
    use std::fs;

    let io = |path: &std::path::Path| {
        let path = path.display().to_string();
        move |source| ExportError::Io { path, source }
    };
    fs::create_dir_all(dir).map_err(io(dir))?;
    let path = dir.join(filename);
    fs::write(&path, bytes).map_err(io(&path))?;
    Ok(path.to_string_lossy().to_string())
}

async fn build_png(comparison: &Comparison) -> Result<Vec<u8>, ExportError> {
    let svg = comparison_svg(comparison);
    let (width, height) = canvas_size(comparison.panels.len());

    #[cfg(target_arch = "wasm32")]
    {
        build_png_web(&svg, width as u32, height as u32).await
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (width, height);
        render_png(&svg)
    }
}

#[cfg(target_arch = "wasm32")]
async fn build_png_web(svg_markup: &str, width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
    use base64::Engine;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Url,
    };

    let render = |reason: &str| ExportError::Render(reason.to_string());

    let opts = BlobPropertyBag::new();
    opts.set_type("image/svg+xml");
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(svg_markup));
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
        .map_err(|_| render("unable to build SVG blob"))?;
    let url = Url::create_object_url_with_blob(&blob).map_err(|_| render("unable to create SVG URL"))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| render("document unavailable"))?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| render("unable to create canvas"))?
        .dyn_into()
        .map_err(|_| render("canvas cast failed"))?;
    canvas.set_width(width);
    canvas.set_height(height);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| render("canvas context unavailable"))?
        .ok_or_else(|| render("canvas context missing"))?
        .dyn_into()
        .map_err(|_| render("context cast failed"))?;

    let image = HtmlImageElement::new().map_err(|_| render("unable to create image"))?;
    image.set_src(&url);
    JsFuture::from(image.decode())
        .await
        .map_err(|_| render("image decode failed"))?;

    context
        .draw_image_with_html_image_element(&image, 0.0, 0.0)
        .map_err(|_| render("unable to draw image"))?;

    let data_url = canvas
        .to_data_url_with_type("image/png")
        .map_err(|_| render("unable to serialise canvas"))?;
    Url::revoke_object_url(&url).ok();

    let payload = data_url
        .split(',')
        .nth(1)
        .ok_or_else(|| ExportError::Encode("malformed data URL".into()))?;
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|err| ExportError::Encode(err.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
static SYSTEM_FONTS: once_cell::sync::Lazy<std::sync::Arc<usvg::fontdb::Database>> =
    once_cell::sync::Lazy::new(|| {
        let mut fonts = usvg::fontdb::Database::new();
        fonts.load_system_fonts();
        tracing::debug!(faces = fonts.len(), "system fonts loaded");
        std::sync::Arc::new(fonts)
    });

/// System font database, scanned on first use and shared by every render.
#[cfg(not(target_arch = "wasm32"))]
fn font_database() -> std::sync::Arc<usvg::fontdb::Database> {
    std::sync::Arc::clone(&SYSTEM_FONTS)
}

/// Rasterise an SVG document into PNG bytes.
#[cfg(not(target_arch = "wasm32"))]
pub fn render_png(svg_markup: &str) -> Result<Vec<u8>, ExportError> {
    let options = usvg::Options {
        fontdb: font_database(),
        ..usvg::Options::default()
    };

    let tree = usvg::Tree::from_str(svg_markup, &options)
        .map_err(|err| ExportError::Render(err.to_string()))?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| ExportError::Render("empty canvas".into()))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let rgba: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();

    let mut buffer = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buffer, size.width(), size.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .write_header()
            .map_err(|err| ExportError::Encode(err.to_string()))?
            .write_image_data(&rgba)
            .map_err(|err| ExportError::Encode(err.to_string()))?;
    }

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{features::Feature, series::parse_series};

    fn comparison() -> Comparison {
        Comparison::new(
            Feature::Eda,
            vec![
                parse_series("minute,value,grade\n0,0.5,74\n1,1.5\n").with_source("eda/eda_S6_Midterm1.csv"),
                parse_series("minute,value\n0,2.2\n").with_source("eda/eda_S10_Midterm1.csv"),
            ],
        )
    }

    #[test]
    fn summary_lists_every_subject() {
        let json = summary_json(&comparison()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["feature"], "eda");
        assert_eq!(value["unit"], "μS");
        let subjects = value["subjects"].as_array().unwrap();
        assert_eq!(subjects.len(), 2);
        assert_eq!(subjects[0]["label"], "eda S6 Midterm1");
        assert_eq!(subjects[0]["mean"], 1.0);
        assert_eq!(subjects[0]["range"]["min"], 0.0);
        assert_eq!(subjects[0]["range"]["max"], 3.0);
        assert_eq!(subjects[1]["count"], 1);
    }

    #[test]
    fn filenames_carry_feature_and_slug() {
        assert_eq!(
            export_filename(&comparison(), "png", "20240501_120000"),
            "examtrace-eda-20240501_120000.png"
        );
    }

    #[test]
    fn timestamp_slug_has_date_and_time() {
        let slug = timestamp_slug();
        assert_eq!(slug.len(), 15);
        assert_eq!(slug.as_bytes()[8], b'_');
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn desktop_render_produces_png() {
        let bytes = render_png(&comparison_svg(&comparison())).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn font_scan_is_shared_between_renders() {
        render_png(&comparison_svg(&comparison())).unwrap();
        assert!(std::sync::Arc::ptr_eq(&font_database(), &font_database()));
        assert!(std::sync::Arc::ptr_eq(&font_database(), &*SYSTEM_FONTS));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn exports_are_written_under_the_directory() {
        let dir = std::env::temp_dir().join(format!("examtrace-export-{}", std::process::id()));
        let path = save_into(&dir, "chart.svg", b"<svg/>").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"<svg/>");
        std::fs::remove_dir_all(&dir).ok();
    }
}
