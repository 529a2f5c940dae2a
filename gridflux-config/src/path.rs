//! Resolves the on-disk config path (`spec.md` §6.4):
//! `$XDG_CONFIG_HOME/gridflux/config.json` on Unix,
//! `%APPDATA%\gridflux\config.json` on Windows.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::ConfigError;

/// Returns the config file path, creating its parent directory.
///
/// Delegates XDG/AppData resolution to [`directories`] rather than
/// hand-rolling the `getenv("XDG_CONFIG_HOME")`/`getenv("HOME")` fallback
/// chain `gf_config_get_path` used in C.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dirs = ProjectDirs::from("", "", "gridflux").ok_or(ConfigError::NoConfigDir)?;
    let dir = dirs.config_dir();
    std::fs::create_dir_all(dir).map_err(|source| ConfigError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(dir.join("config.json"))
}
