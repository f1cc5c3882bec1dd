//! Where subject CSV files are read from.
//!
//! Web builds fetch relative to a URL prefix (`/data` unless
//! `EXAMTRACE_DATA_URL` was set at build time). Desktop builds read from a
//! directory: `EXAMTRACE_DATA_DIR` when set, otherwise the workspace `data/`
//! folder in debug builds and a `data/` folder beside the executable in
//! release builds.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

/// Runtime override for the desktop data directory.
pub const DATA_DIR_ENV: &str = "EXAMTRACE_DATA_DIR";

#[cfg(target_arch = "wasm32")]
const DEFAULT_DATA_URL: &str = "/data";

/// Name of the observation table consumed by the predictor chart.
pub const OBSERVATION_TABLE: &str = "final_plot.csv";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidDataPath {
    #[error("data path is empty")]
    Empty,
    #[error("data path `{0}` escapes the data root")]
    EscapesRoot(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    base: String,
}

impl DataSource {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        let trimmed = base.trim_end_matches('/');
        Self {
            base: if trimmed.is_empty() && base.starts_with('/') {
                "/".to_string()
            } else {
                trimmed.to_string()
            },
        }
    }

    /// Platform default, honouring the environment overrides.
    pub fn resolve() -> Self {
        let source = Self::new(default_base());
        tracing::debug!(base = %source.base, "resolved data source");
        source
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Join `relative` onto the base, rejecting empty paths and `..` segments.
    pub fn locate(&self, relative: &str) -> Result<String, InvalidDataPath> {
        let relative = relative.trim().trim_start_matches('/');
        if relative.is_empty() {
            return Err(InvalidDataPath::Empty);
        }
        if relative.split(['/', '\\']).any(|segment| segment == "..") {
            return Err(InvalidDataPath::EscapesRoot(relative.to_string()));
        }

        Ok(match self.base.as_str() {
            "" => relative.to_string(),
            "/" => format!("/{relative}"),
            base => format!("{base}/{relative}"),
        })
    }
}

impl Default for DataSource {
    fn default() -> Self {
        Self::resolve()
    }
}

#[cfg(target_arch = "wasm32")]
fn default_base() -> String {
    option_env!("EXAMTRACE_DATA_URL")
        .unwrap_or(DEFAULT_DATA_URL)
        .to_string()
}

#[cfg(not(target_arch = "wasm32"))]
fn default_base() -> String {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|dir| !dir.is_empty()) {
        return PathBuf::from(dir).to_string_lossy().into_owned();
    }
    default_data_dir().to_string_lossy().into_owned()
}

#[cfg(not(target_arch = "wasm32"))]
fn default_data_dir() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../data"))
    }

    #[cfg(not(debug_assertions))]
    {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("data")))
            .unwrap_or_else(|| PathBuf::from("data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_relative_paths() {
        let source = DataSource::new("/data/");
        assert_eq!(source.base(), "/data");
        assert_eq!(
            source.locate("hr/hr_S5_Midterm2.csv").unwrap(),
            "/data/hr/hr_S5_Midterm2.csv"
        );
        assert_eq!(source.locate("/final_plot.csv").unwrap(), "/data/final_plot.csv");
    }

    #[test]
    fn root_and_relative_bases() {
        assert_eq!(DataSource::new("/").locate("a.csv").unwrap(), "/a.csv");
        assert_eq!(DataSource::new("").locate("a.csv").unwrap(), "a.csv");
        assert_eq!(
            DataSource::new("https://example.org/set").locate("a.csv").unwrap(),
            "https://example.org/set/a.csv"
        );
    }

    #[test]
    fn rejects_escaping_and_empty_paths() {
        let source = DataSource::new("data");
        assert_eq!(source.locate("  "), Err(InvalidDataPath::Empty));
        assert!(matches!(
            source.locate("../secrets.csv"),
            Err(InvalidDataPath::EscapesRoot(_))
        ));
        assert!(matches!(
            source.locate("hr\\..\\x.csv"),
            Err(InvalidDataPath::EscapesRoot(_))
        ));
    }
}
