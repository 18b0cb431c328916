//! Report formatting and printing utilities.
//!
//! Summaries go to stdout; warnings go to stderr. Every printer has a `_to`
//! variant taking a writer, which is what the tests use.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CheckSummary, CommandResult, CommandSummary, InitSummary};
use crate::core::{LocaleReport, ScanWarning, SyncReport};
use crate::translate::DirectionReport;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Maximum number of keys listed per direction before eliding.
const MAX_KEYS_DISPLAY: usize = 10;

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(result, &mut io::stdout().lock());
    print_scan_warning_to(&result.scan_warnings, verbose, &mut io::stderr().lock());
}

pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    match &result.summary {
        CommandSummary::Sync(report) => print_sync_to(report, writer),
        CommandSummary::Check(summary) => print_check_to(
            summary,
            result.source_files_checked,
            result.locale_files_checked,
            writer,
        ),
        CommandSummary::Init(summary) => print_init_to(summary, writer),
    }
}

/// Print a warning about source files that could not be read.
pub fn print_scan_warning_to<W: Write>(warnings: &[ScanWarning], verbose: bool, writer: &mut W) {
    if !warnings.is_empty() && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be read (use {} for details)",
            "warning:".bold().yellow(),
            warnings.len(),
            "-v".cyan()
        );
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

// ============================================================
// check
// ============================================================

pub fn print_check_to<W: Write>(
    summary: &CheckSummary,
    source_files: usize,
    locale_files: usize,
    writer: &mut W,
) {
    let base = &summary.base_locale;

    for key in &summary.conflicts {
        let _ = writeln!(
            writer,
            "{}: \"{}\"  {}",
            "error".bold().red(),
            key,
            "namespace-conflict".dimmed().cyan()
        );
        let _ = writeln!(
            writer,
            "  {} used in code, but names an object in {}.json",
            "=".blue(),
            base
        );
    }

    for key in &summary.missing_from_code {
        print_missing_key(writer, key, base, "source code", "missing-in-base");
    }

    for (locale, reconciliation) in &summary.locales {
        for key in &reconciliation.missing_in_compare {
            print_missing_key(writer, key, locale, base, "missing-in-compare");
        }
        for key in &reconciliation.missing_in_base {
            print_missing_key(writer, key, base, locale, "missing-in-base");
        }
        for key in &reconciliation.stale_sentinels {
            let _ = writeln!(
                writer,
                "{}: \"{}\"  {}",
                "missing".bold().yellow(),
                key,
                "stale-sentinel".dimmed().cyan()
            );
            let _ = writeln!(
                writer,
                "  {} failed translation left in {} or {}, with no text to translate from",
                "=".blue(),
                base,
                locale
            );
        }
    }

    let problems = summary.problem_count();
    if problems == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} source {}, {} locale {} - all keys in sync",
                source_files,
                plural(source_files, "file", "files"),
                locale_files,
                plural(locale_files, "file", "files"),
            )
            .green()
        );
    } else {
        let missing = summary.missing_count();
        let conflicts = summary.conflicts.len();
        let _ = writeln!(
            writer,
            "\n{} {} {} ({} missing {}, {} {})",
            FAILURE_MARK.red(),
            problems,
            plural(problems, "problem", "problems"),
            missing,
            plural(missing, "key", "keys"),
            conflicts,
            plural(conflicts, "conflict", "conflicts"),
        );
    }
}

fn print_missing_key<W: Write>(
    writer: &mut W,
    key: &str,
    missing_in: &str,
    found_in: &str,
    rule: &str,
) {
    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        "missing".bold().yellow(),
        key,
        rule.dimmed().cyan()
    );
    let _ = writeln!(
        writer,
        "  {} absent from {}, present in {}",
        "=".blue(),
        missing_in,
        found_in
    );
}

// ============================================================
// sync
// ============================================================

pub fn print_sync_to<W: Write>(report: &SyncReport, writer: &mut W) {
    if !report.placeholders.is_empty() {
        let count = report.placeholders.len();
        let _ = writeln!(
            writer,
            "{} {} {} for keys used in code to {}",
            "Added".green().bold(),
            count,
            plural(count, "placeholder", "placeholders"),
            report.base_locale
        );
        print_keys(writer, &report.placeholders);
    }

    for key in &report.conflicts {
        let _ = writeln!(
            writer,
            "{}: \"{}\" is used in code but names an object in {}, left unchanged",
            "conflict".bold().red(),
            key,
            report.base_locale
        );
    }

    for locale in &report.locales {
        print_locale_report(writer, locale);
    }

    let missing = report.missing_before();
    let unresolved = report.unresolved();
    if unresolved == 0 && missing == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "All keys already in sync".green()
        );
        return;
    }

    let counts = format!(
        "{} missing, {} translated, {} skipped, {} failed",
        missing,
        report.translated(),
        report.skipped(),
        report.failed()
    );
    if unresolved == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Synchronized: {}", counts).green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} {} could not be synchronized: {}, {} {}",
            FAILURE_MARK.red(),
            unresolved,
            plural(unresolved, "key", "keys"),
            counts,
            report.conflicts.len(),
            plural(report.conflicts.len(), "conflict", "conflicts"),
        );
    }
}

fn print_locale_report<W: Write>(writer: &mut W, locale: &LocaleReport) {
    print_direction(writer, &locale.to_compare);
    match &locale.to_base {
        Some(direction) => print_direction(writer, direction),
        None if locale.missing_in_base > 0 => {
            let _ = writeln!(
                writer,
                "  {} {} {} only in {}, not translated back (--no-translate-back)",
                "~".yellow(),
                locale.missing_in_base,
                plural(locale.missing_in_base, "key", "keys"),
                locale.locale
            );
        }
        None => {}
    }

    if !locale.stale_sentinels.is_empty() {
        let count = locale.stale_sentinels.len();
        let _ = writeln!(
            writer,
            "  {} {} failed {} for {} with no source text left, remove or rewrite {}",
            "~".yellow(),
            count,
            plural(count, "translation", "translations"),
            locale.locale,
            plural(count, "it", "them")
        );
        print_keys(writer, &locale.stale_sentinels);
    }
}

fn print_direction<W: Write>(writer: &mut W, direction: &DirectionReport) {
    if direction.requested() == 0 {
        return;
    }

    let mark = if direction.failed.is_empty() && direction.skipped.is_empty() {
        SUCCESS_MARK.green()
    } else {
        FAILURE_MARK.red()
    };
    let _ = writeln!(
        writer,
        "  {} {} -> {}: {} translated, {} skipped, {} failed",
        mark,
        direction.source_locale,
        direction.target_locale,
        direction.translated.len(),
        direction.skipped.len(),
        direction.failed.len()
    );

    if !direction.failed.is_empty() {
        let _ = writeln!(writer, "    {}", "failed:".bold().red());
        print_keys(writer, &direction.failed);
    }
    if !direction.skipped.is_empty() {
        let _ = writeln!(writer, "    {}", "skipped (no source text):".bold().yellow());
        print_keys(writer, &direction.skipped);
    }
}

fn print_keys<W: Write>(writer: &mut W, keys: &[String]) {
    for key in keys.iter().take(MAX_KEYS_DISPLAY) {
        let _ = writeln!(writer, "      {}", key);
    }
    if keys.len() > MAX_KEYS_DISPLAY {
        let _ = writeln!(
            writer,
            "      {}",
            format!("(and {} more)", keys.len() - MAX_KEYS_DISPLAY).dimmed()
        );
    }
}

// ============================================================
// init
// ============================================================

pub fn print_init_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", summary.config_file).green()
    );
}
