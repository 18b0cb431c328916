use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::{
    core::reconcile::PlaceholderStyle,
    translate::{
        DEFAULT_FAILURE_SENTINEL, DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL, PipelineSettings,
        RetryPolicy,
    },
};

pub const CONFIG_FILE_NAME: &str = ".glotsyncrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_messages_root")]
    pub messages_root: String,
    #[serde(default = "default_primary_locale")]
    pub primary_locale: String,
    /// Empty means every other locale file found in `messages_root`.
    #[serde(default)]
    pub compare_locales: Vec<String>,
    #[serde(default)]
    pub placeholder_style: PlaceholderStyle,
    #[serde(default)]
    pub translation: TranslationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationConfig {
    pub model: String,
    pub endpoint: String,
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub max_jitter_ms: u64,
    pub request_delay_ms: u64,
    pub timeout_secs: u64,
    pub failure_sentinel: String,
    pub translate_back: bool,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_GEMINI_MODEL.to_string(),
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            max_attempts: 3,
            base_delay_ms: 1000,
            max_delay_ms: 10_000,
            max_jitter_ms: 500,
            request_delay_ms: 1000,
            timeout_secs: 30,
            failure_sentinel: DEFAULT_FAILURE_SENTINEL.to_string(),
            translate_back: true,
        }
    }
}

impl TranslationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            retry: RetryPolicy {
                max_attempts: self.max_attempts,
                base_delay: Duration::from_millis(self.base_delay_ms),
                max_delay: Duration::from_millis(self.max_delay_ms),
                max_jitter: Duration::from_millis(self.max_jitter_ms),
            },
            request_delay: Duration::from_millis(self.request_delay_ms),
        }
    }
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_includes() -> Vec<String> {
    let root_dirs = ["src", ""];
    let sub_dirs = ["app", "components"];

    root_dirs
        .iter()
        .flat_map(|root| {
            sub_dirs.iter().map(move |sub| {
                if root.is_empty() {
                    sub.to_string()
                } else {
                    format!("{}/{}", root, sub)
                }
            })
        })
        .collect()
}

fn default_ignore_test_files() -> bool {
    true
}

fn default_extensions() -> Vec<String> {
    ["ts", "tsx"].map(String::from).to_vec()
}

fn default_messages_root() -> String {
    "./messages".to_string()
}

fn default_primary_locale() -> String {
    "en".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            includes: default_includes(),
            ignores: Vec::new(),
            ignore_test_files: default_ignore_test_files(),
            extensions: default_extensions(),
            messages_root: default_messages_root(),
            primary_locale: default_primary_locale(),
            compare_locales: Vec::new(),
            placeholder_style: PlaceholderStyle::default(),
            translation: TranslationConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Includes without wildcards are literal directories
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.extensions.iter().all(|ext| ext.trim().is_empty()) {
            bail!("'extensions' must list at least one file extension");
        }

        if self.primary_locale.trim().is_empty() {
            bail!("'primaryLocale' must not be empty");
        }

        if self.compare_locales.contains(&self.primary_locale) {
            bail!(
                "'compareLocales' must not contain the primary locale \"{}\"",
                self.primary_locale
            );
        }

        if self.translation.max_attempts == 0 {
            bail!("'translation.maxAttempts' must be at least 1");
        }

        if self.translation.failure_sentinel.trim().is_empty() {
            bail!("'translation.failureSentinel' must not be empty");
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory the config file was found in, or the start directory for defaults.
    pub root: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config
                .validate()
                .with_context(|| format!("Invalid config file: {:?}", path))?;
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                root,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            root: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
