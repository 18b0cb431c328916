//! Key reconciliation between source code, the base catalog and compare catalogs.
//!
//! Nothing here touches the network. Keys referenced from code but absent from
//! the base catalog get a humanized placeholder; everything else is set
//! differences over flattened keys.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::catalog::{Catalog, KEY_SEPARATOR, is_message};

/// How a placeholder for a key found only in code is derived from the key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaceholderStyle {
    /// Every segment humanized and joined: `greeting.morning` -> `Greeting Morning`.
    #[default]
    FullPath,
    /// Only the last segment: `greeting.morning` -> `Morning`.
    Leaf,
}

/// Outcome of comparing one compare catalog with the base catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Referenced in code, absent from base. Already materialized as placeholders.
    pub missing_in_base_from_code: Vec<String>,
    /// Present in base, absent from the compare catalog.
    pub missing_in_compare: Vec<String>,
    /// Present in the compare catalog, absent from base.
    pub missing_in_base: Vec<String>,
    /// Referenced in code but naming an existing namespace object in base.
    pub conflicts: Vec<String>,
    /// Failure sentinels with no source text on the other side.
    pub stale_sentinels: Vec<String>,
}

impl Reconciliation {
    pub fn missing_count(&self) -> usize {
        self.missing_in_base_from_code.len()
            + self.missing_in_compare.len()
            + self.missing_in_base.len()
            + self.stale_sentinels.len()
    }

    pub fn is_synchronized(&self) -> bool {
        self.missing_count() == 0 && self.conflicts.is_empty()
    }
}

/// Keys written into the base catalog for code references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Materialized {
    pub added: Vec<String>,
    pub conflicts: Vec<String>,
}

/// Turn a dotted key into a readable default message.
///
/// Underscores and hyphens become spaces and the first letter of every word is
/// capitalized.
///
/// # Examples
///
/// ```
/// use glot_sync::core::reconcile::{PlaceholderStyle, humanize_key};
///
/// assert_eq!(humanize_key("auth.sign_in-button", PlaceholderStyle::FullPath), "Auth Sign In Button");
/// assert_eq!(humanize_key("greeting.morning", PlaceholderStyle::Leaf), "Morning");
/// ```
pub fn humanize_key(key: &str, style: PlaceholderStyle) -> String {
    match style {
        PlaceholderStyle::FullPath => key
            .split(KEY_SEPARATOR)
            .map(humanize_segment)
            .collect::<Vec<_>>()
            .join(" "),
        PlaceholderStyle::Leaf => {
            let leaf = key.rsplit(KEY_SEPARATOR).next().unwrap_or(key);
            humanize_segment(leaf)
        }
    }
}

fn humanize_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut at_word_start = true;
    for c in segment.chars() {
        let c = if c == '_' || c == '-' { ' ' } else { c };
        if at_word_start && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !c.is_alphanumeric();
    }
    out
}

/// Write a placeholder into `base` for every extracted key it does not define.
///
/// A key that resolves to an object in `base` is a namespace, not a message;
/// it is reported as a conflict and left untouched.
pub fn materialize_code_keys(
    extracted: &BTreeSet<String>,
    base: &mut Catalog,
    style: PlaceholderStyle,
) -> Materialized {
    let mut materialized = Materialized::default();

    for key in extracted {
        match base.get(key) {
            Some(Value::Object(_)) => {
                warn!(%key, "key used in code names a namespace in the base catalog");
                materialized.conflicts.push(key.clone());
            }
            Some(_) => {}
            None => {
                let placeholder = humanize_key(key, style);
                debug!(%key, %placeholder, "adding placeholder to base catalog");
                base.set(key, placeholder);
                materialized.added.push(key.clone());
            }
        }
    }

    materialized
}

/// Keys with a usable value. Leaves holding the failure sentinel count as absent
/// so that a later run retries them. Empty objects are not messages.
fn present_keys(catalog: &Catalog, failure_sentinel: &str) -> Vec<String> {
    catalog
        .flatten()
        .into_iter()
        .filter(|(_, value)| is_message(value) && value.as_str() != Some(failure_sentinel))
        .map(|(key, _)| key)
        .collect()
}

fn sentinel_keys(catalog: &Catalog, failure_sentinel: &str) -> Vec<String> {
    catalog
        .flatten()
        .into_iter()
        .filter(|(_, value)| value.as_str() == Some(failure_sentinel))
        .map(|(key, _)| key)
        .collect()
}

/// Keys holding the failure sentinel in `base` or `compare` while the other
/// catalog has no value for them. No translation job can fill these, so they
/// stay on disk until someone removes or rewrites them.
pub fn stale_sentinels(base: &Catalog, compare: &Catalog, failure_sentinel: &str) -> Vec<String> {
    let base_keys: HashSet<String> = present_keys(base, failure_sentinel).into_iter().collect();
    let compare_keys: HashSet<String> =
        present_keys(compare, failure_sentinel).into_iter().collect();

    let mut seen = HashSet::new();
    sentinel_keys(base, failure_sentinel)
        .into_iter()
        .filter(|key| !compare_keys.contains(key))
        .chain(
            sentinel_keys(compare, failure_sentinel)
                .into_iter()
                .filter(|key| !base_keys.contains(key)),
        )
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

/// Two-way difference between `base` and `compare`.
///
/// Returns `(missing_in_compare, missing_in_base)`, each in the traversal order
/// of the catalog the keys come from.
pub fn diff_catalogs(
    base: &Catalog,
    compare: &Catalog,
    failure_sentinel: &str,
) -> (Vec<String>, Vec<String>) {
    let base_keys = present_keys(base, failure_sentinel);
    let compare_keys = present_keys(compare, failure_sentinel);

    let base_set: HashSet<&str> = base_keys.iter().map(String::as_str).collect();
    let compare_set: HashSet<&str> = compare_keys.iter().map(String::as_str).collect();

    let missing_in_compare = base_keys
        .iter()
        .filter(|key| !compare_set.contains(key.as_str()))
        .cloned()
        .collect();
    let missing_in_base = compare_keys
        .iter()
        .filter(|key| !base_set.contains(key.as_str()))
        .cloned()
        .collect();

    (missing_in_compare, missing_in_base)
}

/// Reconcile code keys, the base catalog and one compare catalog.
///
/// Placeholders for code-only keys are written into `base` before diffing, so
/// `missing_in_compare` already includes them.
pub fn reconcile(
    extracted: &BTreeSet<String>,
    base: &mut Catalog,
    compare: &Catalog,
    style: PlaceholderStyle,
    failure_sentinel: &str,
) -> Reconciliation {
    let materialized = materialize_code_keys(extracted, base, style);
    let (missing_in_compare, missing_in_base) = diff_catalogs(base, compare, failure_sentinel);

    Reconciliation {
        missing_in_base_from_code: materialized.added,
        missing_in_compare,
        missing_in_base,
        conflicts: materialized.conflicts,
        stale_sentinels: stale_sentinels(base, compare, failure_sentinel),
    }
}
