//! Settings file location.

use anyhow::Result;
use directories::ProjectDirs;
use std::path::PathBuf;

/// File name inside the per-user config directory
pub const SETTINGS_FILE: &str = "settings.toml";

/// Resolve the settings path: an explicit override wins, otherwise the
/// platform config directory (`~/.config/lookout/settings.toml` on Linux).
pub fn settings_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }

    let dirs = ProjectDirs::from("", "", "lookout")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    Ok(dirs.config_dir().join(SETTINGS_FILE))
}
