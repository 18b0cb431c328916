use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use super::Catalog;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to parse catalog {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize catalog {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Path of the catalog file for `locale` (`<messages_root>/<locale>.json`).
pub fn catalog_path(messages_root: &Path, locale: &str) -> PathBuf {
    messages_root.join(format!("{}.json", locale))
}

/// Read and parse a catalog file.
///
/// The file must contain a JSON object; any other JSON document is reported
/// as a parse error rather than silently treated as empty.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            CatalogError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            CatalogError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    serde_json::from_str(&content).map_err(|e| CatalogError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Serialize with 2-space indentation and a trailing newline, overwriting `path`.
pub fn save_catalog(path: &Path, catalog: &Catalog) -> Result<(), CatalogError> {
    let mut content =
        serde_json::to_string_pretty(catalog).map_err(|source| CatalogError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
    content.push('\n');

    fs::write(path, content).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Extracts locale from filename.
///
/// Examples:
/// - "en.json" -> Some("en")
/// - "zh-CN.json" -> Some("zh-CN")
/// - "/path/to/messages/ja.json" -> Some("ja")
pub fn extract_locale(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        return None;
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// List every locale that has a `<locale>.json` file in `messages_root`, sorted.
pub fn discover_locales(messages_root: &Path) -> Result<Vec<String>, CatalogError> {
    if !messages_root.is_dir() {
        return Err(CatalogError::NotFound {
            path: messages_root.to_path_buf(),
        });
    }

    let io_error = |source| CatalogError::Io {
        path: messages_root.to_path_buf(),
        source,
    };

    let mut locales = Vec::new();
    for entry in fs::read_dir(messages_root).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file()
            && let Some(locale) = extract_locale(&path)
        {
            locales.push(locale);
        }
    }
    locales.sort();
    Ok(locales)
}

/// A catalog together with the locale and file it belongs to.
///
/// The sync session owns these for the whole run; all mutations go through
/// [`Catalog::set`].
#[derive(Debug, Clone)]
pub struct LocaleCatalog {
    pub locale: String,
    pub path: PathBuf,
    pub catalog: Catalog,
}

impl LocaleCatalog {
    pub fn load(messages_root: &Path, locale: &str) -> Result<Self, CatalogError> {
        let path = catalog_path(messages_root, locale);
        let catalog = load_catalog(&path)?;
        Ok(Self {
            locale: locale.to_string(),
            path,
            catalog,
        })
    }

    pub fn save(&self) -> Result<(), CatalogError> {
        save_catalog(&self.path, &self.catalog)
    }
}
