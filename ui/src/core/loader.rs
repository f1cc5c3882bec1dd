//! Fetches subject files and the observation table.
//!
//! Web builds go through the browser `fetch` API; desktop builds read the
//! files from the configured data directory. A feature pair is loaded
//! concurrently and only succeeds when every file does.

use futures::future::try_join_all;

use super::comparison::Comparison;
use super::config::{DataSource, InvalidDataPath, OBSERVATION_TABLE};
use super::features::Feature;
use super::series::{parse_series, ParsedSeries};
use super::table::{ObservationTable, TableError};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    InvalidPath(#[from] InvalidDataPath),
    #[error("couldn't read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("request for {path} failed: {reason}")]
    Http { path: String, reason: String },
    #[error("{path} answered with HTTP {status}")]
    Status { path: String, status: u16 },
    #[error("{path} did not return text")]
    Body { path: String },
    #[error("observation table is unusable: {0}")]
    Table(#[from] TableError),
}

/// Raw text of a file under the data root.
pub async fn load_text(source: &DataSource, relative: &str) -> Result<String, LoadError> {
    let location = source.locate(relative)?;
    read_location(&location).await
}

/// Load and parse one subject file.
pub async fn load_subject(source: &DataSource, relative: &str) -> Result<ParsedSeries, LoadError> {
    let text = load_text(source, relative).await?;
    let parsed = parse_series(&text).with_source(relative);
    if parsed.skipped_rows > 0 {
        tracing::debug!(
            file = relative,
            skipped = parsed.skipped_rows,
            "dropped rows that did not fit a minute slot"
        );
    }
    Ok(parsed)
}

/// Load every subject of `feature` concurrently and align them.
pub async fn load_comparison(source: &DataSource, feature: Feature) -> Result<Comparison, LoadError> {
    let loads = feature
        .file_paths()
        .iter()
        .map(|relative| load_subject(source, relative));
    let subjects = try_join_all(loads).await?;
    tracing::info!(%feature, subjects = subjects.len(), "loaded comparison");
    Ok(Comparison::new(feature, subjects))
}

pub async fn load_observations(source: &DataSource) -> Result<ObservationTable, LoadError> {
    let text = load_text(source, OBSERVATION_TABLE).await?;
    let table = ObservationTable::parse(&text)?;
    tracing::info!(
        dimensions = table.dimensions.len(),
        rows = table.rows.len(),
        "loaded observation table"
    );
    Ok(table)
}

#[cfg(not(target_arch = "wasm32"))]
async fn read_location(location: &str) -> Result<String, LoadError> {
    tokio::fs::read_to_string(location)
        .await
        .map_err(|source| LoadError::Io {
            path: location.to_string(),
            source,
        })
}

#[cfg(target_arch = "wasm32")]
async fn read_location(location: &str) -> Result<String, LoadError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let http_error = |reason: String| LoadError::Http {
        path: location.to_string(),
        reason,
    };

    let window = web_sys::window().ok_or_else(|| http_error("window unavailable".into()))?;
    let response = JsFuture::from(window.fetch_with_str(location))
        .await
        .map_err(|err| http_error(format!("{err:?}")))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| http_error("unexpected fetch result".into()))?;

    if !response.ok() {
        return Err(LoadError::Status {
            path: location.to_string(),
            status: response.status(),
        });
    }

    let body = response
        .text()
        .map_err(|err| http_error(format!("{err:?}")))?;
    let text = JsFuture::from(body)
        .await
        .map_err(|err| http_error(format!("{err:?}")))?;

    text.as_string().ok_or_else(|| LoadError::Body {
        path: location.to_string(),
    })
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "examtrace-loader-{name}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(dir.join("hr")).unwrap();
        dir
    }

    #[tokio::test]
    async fn loads_and_aligns_a_feature_pair() {
        let dir = scratch_dir("pair");
        std::fs::write(dir.join("hr/hr_S5_Midterm2.csv"), "minute,value,grade\n0,70,82\n1,72\n").unwrap();
        std::fs::write(dir.join("hr/hr_S7_Midterm2.csv"), "minute,value\n0,90.5\n2,NaN\n").unwrap();

        let source = DataSource::new(dir.to_string_lossy());
        let comparison = load_comparison(&source, Feature::Hr).await.unwrap();

        assert_eq!(comparison.panels.len(), 2);
        assert_eq!(comparison.panels[0].subject.label, "hr S5 Midterm2");
        assert_eq!(comparison.panels[0].subject.summary.mean, 71.0);
        assert_eq!(comparison.panels[1].subject.skipped_rows, 1);
        assert_eq!(comparison.panels[0].range.max, 91.0);

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn one_missing_file_fails_the_whole_pair() {
        let dir = scratch_dir("missing");
        std::fs::write(dir.join("hr/hr_S5_Midterm2.csv"), "minute,value\n0,70\n").unwrap();

        let source = DataSource::new(dir.to_string_lossy());
        let err = load_comparison(&source, Feature::Hr).await.unwrap_err();
        assert!(matches!(err, LoadError::Io { ref path, .. } if path.ends_with("hr_S7_Midterm2.csv")));

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn observation_table_errors_are_typed() {
        let dir = scratch_dir("table");
        std::fs::write(dir.join(OBSERVATION_TABLE), "Label Category\nHigh\n").unwrap();

        let source = DataSource::new(dir.to_string_lossy());
        let err = load_observations(&source).await.unwrap_err();
        assert!(matches!(err, LoadError::Table(TableError::NoDimensions)));

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn escaping_paths_never_touch_the_disk() {
        let source = DataSource::new("data");
        let err = load_text(&source, "../etc/passwd").await.unwrap_err();
        assert!(matches!(err, LoadError::InvalidPath(_)));
    }
}
