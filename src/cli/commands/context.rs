use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};
use tracing::{debug, info};

use super::super::args::CommonArgs;
use crate::{
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        ExtractResult, LocaleCatalog, SyncOptions, SyncSession,
        catalog::discover_locales,
        extract::{ScanOptions, scan_source_keys},
    },
};

/// Resolved configuration and paths for one command invocation.
///
/// Paths from the config file are relative to the directory holding it;
/// paths given on the command line are relative to the working directory.
pub struct ProjectContext {
    pub config: Config,
    pub source_root: PathBuf,
    pub messages_root: PathBuf,
    pub verbose: bool,
}

impl ProjectContext {
    pub fn new(args: &CommonArgs) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to determine working directory")?;
        Self::from_dir(&cwd, args)
    }

    pub fn from_dir(cwd: &Path, args: &CommonArgs) -> Result<Self> {
        let loaded = load_config(cwd)?;
        if !loaded.from_file {
            debug!("no {} found, using default configuration", CONFIG_FILE_NAME);
        }

        let mut config = loaded.config;
        if let Some(locale) = &args.primary_locale {
            config.primary_locale = locale.clone();
        }
        if !args.compare_locales.is_empty() {
            config.compare_locales = args.compare_locales.clone();
        }
        config.validate()?;

        let source_root = match &args.source_root {
            Some(path) => cwd.join(path),
            None => loaded.root.join(&config.source_root),
        };
        let messages_root = match &args.messages_root {
            Some(path) => cwd.join(path),
            None => loaded.root.join(&config.messages_root),
        };

        Ok(Self {
            config,
            source_root,
            messages_root,
            verbose: args.verbose,
        })
    }

    /// Scan the source tree for translation keys.
    pub fn extract(&self) -> ExtractResult {
        let options = ScanOptions {
            includes: &self.config.includes,
            ignores: &self.config.ignores,
            extensions: &self.config.extensions,
            ignore_test_files: self.config.ignore_test_files,
        };
        let result = scan_source_keys(&self.source_root, &options);
        info!(
            files = result.files_scanned,
            keys = result.keys.len(),
            "scanned source files"
        );
        result
    }

    /// Configured compare locales, or every other catalog in `messages_root`.
    pub fn compare_locales(&self) -> Result<Vec<String>> {
        if !self.config.compare_locales.is_empty() {
            return Ok(self.config.compare_locales.clone());
        }

        let locales = discover_locales(&self.messages_root)?;
        Ok(locales
            .into_iter()
            .filter(|locale| *locale != self.config.primary_locale)
            .collect())
    }

    /// Load the base catalog and every compare catalog.
    ///
    /// A missing or malformed catalog is fatal: nothing has been written yet.
    pub fn open_session(&self, options: SyncOptions) -> Result<SyncSession> {
        let base = LocaleCatalog::load(&self.messages_root, &self.config.primary_locale)
            .context("Failed to load primary locale catalog")?;

        let compares = self
            .compare_locales()?
            .iter()
            .map(|locale| LocaleCatalog::load(&self.messages_root, locale))
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to load compare locale catalog")?;

        debug!(
            base = %base.locale,
            compares = ?compares.iter().map(|c| c.locale.as_str()).collect::<Vec<_>>(),
            "loaded catalogs"
        );

        Ok(SyncSession::new(base, compares, options))
    }
}
