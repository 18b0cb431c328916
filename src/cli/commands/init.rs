use std::{fs, path::Path};

use anyhow::{Context as _, Result, bail};

use super::{CommandResult, InitSummary};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn init() -> Result<CommandResult> {
    init_in(Path::new("."))
}

/// Write the default config into `dir`, refusing to overwrite an existing one.
pub fn init_in(dir: &Path) -> Result<CommandResult> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(&config_path, default_config_json()? + "\n")
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(CommandResult::init(InitSummary {
        config_file: CONFIG_FILE_NAME.to_string(),
    }))
}
