//! In-memory message catalogs.
//!
//! A catalog is a JSON object tree: intermediate nodes are objects, leaves are
//! (normally) strings. Leaves are addressed by dotted keys such as `Common.submit`.
//!
//! ## Module Structure
//!
//! - `store`: Loading and saving `<locale>.json` files

mod store;

pub use store::*;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Separator between segments of a dotted key.
pub const KEY_SEPARATOR: char = '.';

/// A language's message tree.
///
/// Key order is the order keys were first seen (serde_json `preserve_order`),
/// so a load/save cycle keeps the file layout and new keys are appended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    root: Map<String, Value>,
}

/// Flattened view of a catalog: dotted key -> leaf value, in traversal order.
pub type FlatCatalog = Map<String, Value>;

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Flatten the tree into dotted keys, depth-first in key order.
    ///
    /// Any value that is not an object is a leaf (strings, and also arrays or
    /// numbers found in hand-edited files). An empty object is kept as a `{}`
    /// leaf so [`Catalog::unflatten`] can restore it; see [`is_message`] for
    /// telling the two apart.
    pub fn flatten(&self) -> FlatCatalog {
        let mut flat = Map::new();
        let mut stack = vec![(String::new(), self.root.iter())];

        while let Some((prefix, entries)) = stack.last_mut() {
            let Some((key, value)) = entries.next() else {
                stack.pop();
                continue;
            };
            let path = join_key(prefix, key);
            match value {
                Value::Object(children) if !children.is_empty() => {
                    stack.push((path, children.iter()))
                }
                leaf => {
                    flat.insert(path, leaf.clone());
                }
            }
        }

        flat
    }

    /// Rebuild a tree from flattened entries. Inverse of [`Catalog::flatten`].
    pub fn unflatten(flat: &FlatCatalog) -> Self {
        let mut catalog = Self::new();
        for (key, value) in flat {
            catalog.set(key, value.clone());
        }
        catalog
    }

    /// Dotted keys of all messages, in traversal order. Empty objects are skipped.
    pub fn keys(&self) -> Vec<String> {
        self.flatten()
            .into_iter()
            .filter(|(_, value)| is_message(value))
            .map(|(key, _)| key)
            .collect()
    }

    /// Look up the node at `key`. Returns `None` as soon as a segment is absent
    /// or an intermediate node is not an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split(KEY_SEPARATOR);
        let first = segments.next()?;
        let mut current = self.root.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Look up a leaf that holds a non-empty (after trimming) string.
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Write `value` at `key`, creating intermediate objects as needed.
    ///
    /// A non-object value sitting on an intermediate segment is replaced by an
    /// empty object so the write always succeeds.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let (parents, leaf) = match key.rsplit_once(KEY_SEPARATOR) {
            Some((parents, leaf)) => (Some(parents), leaf),
            None => (None, key),
        };

        let mut current = &mut self.root;
        if let Some(parents) = parents {
            for segment in parents.split(KEY_SEPARATOR) {
                current = child_object(current, segment);
            }
        }
        current.insert(leaf.to_string(), value.into());
    }
}

impl TryFrom<Value> for Catalog {
    type Error = Value;

    /// Only JSON objects are catalogs; anything else is handed back.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(other),
        }
    }
}

/// Whether a flattened entry is a message rather than an empty namespace.
pub fn is_message(value: &Value) -> bool {
    !matches!(value, Value::Object(children) if children.is_empty())
}

/// Returns true if every segment of `key` is non-empty.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && key.split(KEY_SEPARATOR).all(|segment| !segment.is_empty())
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}{}{}", prefix, KEY_SEPARATOR, key)
    }
}

fn child_object<'a>(map: &'a mut Map<String, Value>, segment: &str) -> &'a mut Map<String, Value> {
    let slot = map
        .entry(segment)
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(child) => child,
        _ => unreachable!("slot was replaced with an object above"),
    }
}
