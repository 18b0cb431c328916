//! Translation key extraction from source files.
//!
//! Keys are discovered with a fixed pattern, `t("<key>")`, accepting single,
//! double or back-quoted literals. Only literal keys are collected; template
//! literals with `${...}` interpolation are dynamic and are ignored.
//!
//! ## Module Structure
//!
//! - `file_scanner`: Walks the source tree and filters files by include/ignore/extension

mod file_scanner;

pub use file_scanner::*;

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use rayon::prelude::*;
use regex::Regex;
use tracing::{debug, warn};

use crate::core::catalog::is_valid_key;

// Capture groups 1/2/3: double-quoted, single-quoted, back-quoted key
static TRANSLATION_CALL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bt\s*\(\s*(?:"([^"\n]+)"|'([^'\n]+)'|`([^`]+)`)\s*\)"#).unwrap()
});

/// A source file that could not be read. The scan continues without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanWarning {
    pub file_path: String,
    pub error: String,
}

/// Keys referenced from source code.
#[derive(Debug, Default)]
pub struct ExtractResult {
    pub keys: BTreeSet<String>,
    pub files_scanned: usize,
    pub warnings: Vec<ScanWarning>,
}

/// Extract literal keys from one file's content, in order of appearance.
///
/// # Examples
///
/// ```
/// use glot_sync::core::extract::extract_keys_from_source;
///
/// let keys = extract_keys_from_source(r#"<h1>{t("Home.title")}</h1>{t('Home.cta')}"#);
/// assert_eq!(keys, vec!["Home.title", "Home.cta"]);
/// ```
pub fn extract_keys_from_source(content: &str) -> Vec<String> {
    TRANSLATION_CALL_REGEX
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
        .map(|m| m.as_str())
        .filter(|literal| !literal.contains("${"))
        .map(str::trim)
        .filter(|key| is_valid_key(key))
        .map(str::to_string)
        .collect()
}

/// Read every file in parallel and union their keys.
///
/// Unreadable files produce a [`ScanWarning`] and are otherwise ignored.
pub fn extract_keys<'a, I>(files: I) -> ExtractResult
where
    I: IntoParallelIterator<Item = &'a PathBuf>,
{
    let per_file: Vec<(&PathBuf, Result<Vec<String>, String>)> = files
        .into_par_iter()
        .map(|path| {
            let keys = fs::read_to_string(path)
                .map(|content| extract_keys_from_source(&content))
                .map_err(|e| e.to_string());
            (path, keys)
        })
        .collect();

    let mut result = ExtractResult::default();
    for (path, keys) in per_file {
        match keys {
            Ok(keys) => {
                debug!(file = %path.display(), count = keys.len(), "extracted keys");
                result.files_scanned += 1;
                result.keys.extend(keys);
            }
            Err(error) => {
                warn!(file = %path.display(), %error, "skipping unreadable source file");
                result.warnings.push(ScanWarning {
                    file_path: path.to_string_lossy().to_string(),
                    error,
                });
            }
        }
    }
    result
}

/// Scan `source_root` and extract every referenced key.
pub fn scan_source_keys(source_root: &Path, options: &ScanOptions<'_>) -> ExtractResult {
    let scan = scan_files(source_root, options);
    if scan.skipped_count > 0 {
        warn!(
            count = scan.skipped_count,
            "path(s) skipped due to access errors"
        );
    }
    extract_keys(&scan.files)
}
