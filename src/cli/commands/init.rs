use std::{fs, path::Path};

use anyhow::{Context, Result, bail};

use super::{CommandKind, CommandResult};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

/// Write the default configuration into `dir`.
pub fn init_in(dir: &Path) -> Result<CommandResult> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(&config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(CommandResult::from_issues(CommandKind::Init, Vec::new(), 0))
}

pub fn init() -> Result<CommandResult> {
    init_in(Path::new("."))
}
