//! Translation coverage: keys passed to `t!` exist in the fallback locale,
//! and every locale defines each fallback key exactly once.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

const FTL_FILE: &str = "examtrace_ui.ftl";
const FALLBACK: &str = "en-US";

fn crate_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Message ids in file order, duplicates included. Ids start in column 0;
/// indented lines continue the previous message.
fn message_ids(ftl: &str) -> Vec<String> {
    ftl.lines()
        .filter(|line| !line.starts_with([' ', '\t', '#', '-', '.']))
        .filter_map(|line| line.split_once('='))
        .map(|(id, _)| id.trim())
        .filter(|id| {
            !id.is_empty()
                && id
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        })
        .map(str::to_string)
        .collect()
}

/// Locale tag to FTL text for every folder under `i18n/`.
fn locales() -> BTreeMap<String, String> {
    let root = crate_dir().join("i18n");
    fs::read_dir(&root)
        .unwrap_or_else(|err| panic!("{}: {err}", root.display()))
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .map(|entry| {
            let tag = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path().join(FTL_FILE);
            let text = fs::read_to_string(&path)
                .unwrap_or_else(|err| panic!("{}: {err}", path.display()));
            (tag, text)
        })
        .collect()
}

/// String literals passed first to a standalone `t!(` invocation. Names that
/// merely end in `t`, such as `assert!` or `format!`, are skipped.
fn referenced_keys(source: &str) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    let mut rest = source;
    while let Some(pos) = rest.find("t!(") {
        let standalone = rest[..pos]
            .chars()
            .next_back()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '_'));
        rest = &rest[pos + 3..];
        if !standalone {
            continue;
        }
        let Some(literal) = rest.trim_start().strip_prefix('"') else {
            continue;
        };
        if let Some(end) = literal.find('"') {
            keys.insert(literal[..end].to_string());
        }
    }
    keys
}

fn rust_sources(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = fs::read_dir(dir).unwrap_or_else(|err| panic!("{}: {err}", dir.display()));
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            rust_sources(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
}

#[test]
fn scanner_only_reads_the_translation_macro() {
    let source = r#"
        assert!("bvp".parse::<Feature>().is_err());
        let s = format!("{x}");
        const CSS: Asset = asset!("/assets/theme/main.css");
        let a = crate::t!("nav-home");
        let b = t!(
            "compare-average", value = text
        );
    "#;
    let keys: Vec<_> = referenced_keys(source).into_iter().collect();
    assert_eq!(keys, ["compare-average", "nav-home"]);
}

#[test]
fn referenced_keys_exist_in_fallback() {
    let locales = locales();
    let fallback: BTreeSet<_> = message_ids(&locales[FALLBACK]).into_iter().collect();
    assert!(!fallback.is_empty(), "{FALLBACK} defines no messages");

    let mut files = Vec::new();
    rust_sources(&crate_dir().join("src"), &mut files);
    let mut missing = BTreeSet::new();
    for file in &files {
        let source = fs::read_to_string(file).unwrap_or_default();
        for key in referenced_keys(&source) {
            if !fallback.contains(&key) {
                missing.insert(format!("{key} ({})", file.display()));
            }
        }
    }

    assert!(
        missing.is_empty(),
        "keys missing from {FALLBACK}:\n  {}",
        missing.into_iter().collect::<Vec<_>>().join("\n  ")
    );
}

#[test]
fn every_locale_defines_each_fallback_key_once() {
    let locales = locales();
    assert!(locales.contains_key("es-ES"));
    let fallback: BTreeSet<_> = message_ids(&locales[FALLBACK]).into_iter().collect();

    let mut failures = Vec::new();
    for (tag, text) in &locales {
        let ids = message_ids(text);
        let mut seen = BTreeSet::new();
        let duplicates: Vec<_> = ids.iter().filter(|id| !seen.insert(id.as_str())).collect();
        let missing: Vec<_> = fallback.iter().filter(|id| !seen.contains(id.as_str())).collect();
        if !duplicates.is_empty() {
            failures.push(format!("{tag} repeats {duplicates:?}"));
        }
        if !missing.is_empty() {
            failures.push(format!("{tag} lacks {missing:?}"));
        }
    }

    assert!(failures.is_empty(), "{}", failures.join("\n"));
}
