//! Localization for `examtrace-ui`.
//!
//! Messages live in `i18n/<lang>/examtrace_ui.ftl` and are embedded at
//! compile time. `en-US` is the fallback and the reference for every other
//! locale; `fl!` checks keys against it during the build.
//!
//! ```ignore
//! crate::i18n::init(); // idempotent
//! let label = crate::t!("nav-compare");
//! let avg = crate::t!("compare-average", value = "71.00");
//! ```
use std::sync::Once;

use i18n_embed::{fluent::FluentLanguageLoader, LanguageLoader};
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl; // Re-export for convenience.

/// Translate a message through the shared loader.
///
/// `t!("nav-home")` or `t!("compare-average", value = text)`.
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fluent "domain": the package name with `-` replaced by `_`, which is the
/// file name `fl!` checks keys against at compile time.
///
/// Fallback file path must be: `i18n/en-US/{DOMAIN}.ftl`
const DOMAIN: &str = "examtrace_ui";

/// Embed all locale folders under `i18n/`.
#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

/// Global language loader used with the `fl!` macro.
pub static LOADER: Lazy<FluentLanguageLoader> =
    Lazy::new(|| FluentLanguageLoader::new(DOMAIN, FALLBACK_LANGUAGE));

const FALLBACK_LANGUAGE: LanguageIdentifier = unic_langid::langid!("en-US");

static INIT: Once = Once::new();

/// Initialize i18n (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        if let Err(err) = select(&requested) {
            tracing::warn!(error = %err, "language selection failed; using fallback");
        } else {
            tracing::debug!(language = %current_language(), "localization ready");
        }
    });
}

/// Switch language at runtime. Unparseable tags are ignored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let lang: LanguageIdentifier = match tag.parse() {
        Ok(l) => l,
        Err(_) => {
            tracing::debug!(%tag, "ignoring unparseable language tag");
            return Ok(());
        }
    };
    select(&[lang])
}

/// Load `requested` (plus the fallback) into the shared loader.
fn select(requested: &[LanguageIdentifier]) -> Result<(), i18n_embed::I18nEmbedError> {
    i18n_embed::select(&*LOADER, &Localizations, requested)?;
    // Bundles are rebuilt on every selection; chart labels and exported SVG
    // text must not carry bidi isolation marks.
    LOADER.set_use_isolating(false);
    Ok(())
}

/// Tag of the language currently served by the loader.
pub fn current_language() -> String {
    LOADER.current_language().to_string()
}

/// List available (embedded) language identifiers.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::fl;

    #[test]
    fn fallback_language_is_present() {
        assert!(available_languages().iter().any(|l| l == "en-US"));
    }

    #[test]
    fn basic_lookup_works() {
        init();
        let s = fl!(&*LOADER, "nav-home");
        assert_eq!(s, "Home");
    }

    #[test]
    fn embedded_files_use_the_loader_domain() {
        for lang in available_languages() {
            let path = format!("{lang}/{DOMAIN}.ftl");
            assert!(Localizations::get(&path).is_some(), "missing {path}");
        }
        assert_eq!(DOMAIN, env!("CARGO_PKG_NAME").replace('-', "_"));
    }

    #[test]
    fn current_language_reports_fallback_after_unknown_request() {
        init();
        let _ = set_language("zz-ZZ");
        assert_eq!(current_language(), "en-US");
    }

    #[test]
    fn arguments_are_inserted_without_isolation_marks() {
        init();
        let _ = set_language("en-US");
        assert_eq!(crate::t!("compare-average", value = "71.13"), "Average: 71.13");
    }

    #[test]
    fn spanish_is_embedded() {
        assert!(available_languages().iter().any(|l| l == "es-ES"));
    }

    #[test]
    fn dynamic_language_switch_reverts_on_failure() {
        init();
        let before = fl!(&*LOADER, "nav-home");
        let _ = set_language("zz-ZZ");
        let after = fl!(&*LOADER, "nav-home");
        assert_eq!(before, after);
    }
}
