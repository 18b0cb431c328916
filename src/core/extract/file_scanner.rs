use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::TEST_FILE_PATTERNS;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Which files under the source root are scanned for translation calls.
#[derive(Debug, Clone)]
pub struct ScanOptions<'a> {
    pub includes: &'a [String],
    pub ignores: &'a [String],
    pub extensions: &'a [String],
    pub ignore_test_files: bool,
}

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub files: BTreeSet<PathBuf>,
    pub skipped_count: usize,
}

/// Collect source files under `base_dir`.
///
/// Directories are walked iteratively by walkdir, so deep trees do not grow the
/// call stack. Unreadable entries are counted and skipped.
pub fn scan_files(base_dir: &Path, options: &ScanOptions<'_>) -> ScanResult {
    let mut result = ScanResult::default();

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in options.ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => warn!(pattern = %p, error = %e, "invalid ignore pattern"),
            }
        } else {
            literal_ignore_paths.push(base_dir.join(p));
        }
    }

    if options.ignore_test_files {
        glob_patterns.extend(TEST_FILE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
    }

    for dir in dirs_to_scan(base_dir, options.includes) {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    result.skipped_count += 1;
                    warn!(error = %e, "cannot access path");
                    continue;
                }
            };
            let path = entry.path();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }

            let path_str = path.to_string_lossy();
            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if entry.file_type().is_file() && has_extension(path, options.extensions) {
                result.files.insert(path.to_path_buf());
            }
        }
    }

    result
}

fn dirs_to_scan(base_dir: &Path, includes: &[String]) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![base_dir.to_path_buf()];
    }

    let mut paths = Vec::new();
    for inc in includes {
        if is_glob_pattern(inc) {
            let full_pattern = base_dir.join(inc);
            match glob(&full_pattern.to_string_lossy()) {
                Ok(entries) => paths.extend(entries.flatten().filter(|entry| entry.is_dir())),
                Err(e) => warn!(pattern = %inc, error = %e, "invalid include pattern"),
            }
        } else {
            let path = base_dir.join(inc);
            if path.exists() {
                paths.push(path);
            } else {
                debug!(path = %path.display(), "include path does not exist");
            }
        }
    }
    paths
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
}
