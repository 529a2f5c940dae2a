//! Configuration snapshot and on-disk JSON format for GridFlux.
//!
//! The core (in the `gridflux` crate) treats a [`Config`] as an immutable
//! value it re-reads once per tick (`spec.md` §4.E.1, §4.H) and writes
//! through a handful of dedicated mutators that also persist to disk.
//! This crate owns the file format, defaulting, and path resolution; it
//! does not know anything about windows or layout.

mod defaults;
mod path;
mod rules;

pub use path::config_path;
pub use rules::{WindowRule, RuleError, RulesTable, RULE_CLASS_MAX, RULES_CAPACITY};

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_BORDER_COLOR, DEFAULT_ENABLE_BORDERS, DEFAULT_MAX_WINDOWS_PER_WORKSPACE,
    DEFAULT_MAX_WORKSPACES, DEFAULT_MIN_WINDOW_SIZE, DEFAULT_PADDING,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine a config directory (XDG_CONFIG_HOME/HOME/APPDATA unset)")]
    NoConfigDir,
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The config snapshot the core consults every tick, per `spec.md` §3.
///
/// Deserialization is intentionally permissive: any field missing from the
/// on-disk JSON is filled with its default and the file is rewritten
/// (`spec.md` §6.4), mirroring `load_or_create_config` in the original
/// implementation rather than rejecting the file outright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::max_windows_per_workspace")]
    pub max_windows_per_workspace: u32,
    #[serde(default = "defaults::max_workspaces")]
    pub max_workspaces: u32,
    #[serde(default = "defaults::default_padding")]
    pub default_padding: u32,
    #[serde(default = "defaults::min_window_size")]
    pub min_window_size: u32,
    #[serde(default = "defaults::border_color")]
    pub border_color: u32,
    #[serde(default = "defaults::enable_borders")]
    pub enable_borders: bool,
    #[serde(default)]
    pub locked_workspaces: BTreeSet<i32>,
    #[serde(default)]
    pub rules: RulesTable,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_windows_per_workspace: DEFAULT_MAX_WINDOWS_PER_WORKSPACE,
            max_workspaces: DEFAULT_MAX_WORKSPACES,
            default_padding: DEFAULT_PADDING,
            min_window_size: DEFAULT_MIN_WINDOW_SIZE,
            border_color: DEFAULT_BORDER_COLOR,
            enable_borders: DEFAULT_ENABLE_BORDERS,
            locked_workspaces: BTreeSet::new(),
            rules: RulesTable::default(),
        }
    }
}

impl Config {
    /// Loads the config at `path`, creating it with defaults if absent,
    /// and rewriting it if any field was missing (`spec.md` §6.4).
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let config = Config::default();
                config.save(path)?;
                return Ok(config);
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        // `serde_json::Value` round trip lets us detect "file parsed but a
        // key was absent" distinctly from "file failed to parse at all",
        // matching the original's per-field `set_if_missing_int`.
        let raw: serde_json::Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(_) => {
                let config = Config::default();
                config.save(path)?;
                return Ok(config);
            }
        };

        let had_all_fields = [
            "max_windows_per_workspace",
            "max_workspaces",
            "default_padding",
            "min_window_size",
            "border_color",
            "enable_borders",
            "locked_workspaces",
            "rules",
        ]
        .iter()
        .all(|key| raw.get(key).is_some());

        let config: Config = serde_json::from_value(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if !had_all_fields {
            config.save(path)?;
        }

        Ok(config)
    }

    /// Writes this config to `path` as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        let text = serde_json::to_string_pretty(self).expect("Config always serializes");
        fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Field-by-field comparison, used by the core's reload probe
    /// (`spec.md` §4.E.1) to decide whether downstream state needs to
    /// react to a config change.
    pub fn differs_from(&self, other: &Config) -> bool {
        self != other
    }

    pub fn add_locked_workspace(&mut self, id: i32) -> bool {
        self.locked_workspaces.insert(id)
    }

    pub fn remove_locked_workspace(&mut self, id: i32) -> bool {
        self.locked_workspaces.remove(&id)
    }
}

/// A config file together with the mtime it was last loaded at, so the
/// core can cheaply probe for changes without re-parsing every tick
/// (`spec.md` §4.E.1: "stat the config path... if mtime exceeds the
/// snapshot's last_modified, reparse").
#[derive(Debug)]
pub struct ConfigFile {
    path: PathBuf,
    last_modified: SystemTime,
    config: Config,
}

impl ConfigFile {
    pub fn open(path: PathBuf) -> Result<Self, ConfigError> {
        let config = Config::load_or_create(&path)?;
        let last_modified = mtime_of(&path).unwrap_or(SystemTime::UNIX_EPOCH);
        Ok(ConfigFile {
            path,
            last_modified,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-stats the file; if its mtime is newer than the last load,
    /// reparses and returns `Some(&Config)` with the freshly loaded value.
    /// Returns `None` if the file is unchanged (a no-op on state, per
    /// `spec.md` §7 scenario 8) or couldn't be stat'd.
    pub fn reload_if_changed(&mut self) -> Result<Option<&Config>, ConfigError> {
        let Some(mtime) = mtime_of(&self.path) else {
            return Ok(None);
        };
        if mtime <= self.last_modified {
            return Ok(None);
        }
        let config = Config::load_or_create(&self.path)?;
        self.last_modified = mtime;
        self.config = config;
        Ok(Some(&self.config))
    }

    /// Persists `config` as the new state and updates the in-memory snapshot,
    /// used by write-through mutators (`lock`/`unlock`/rule add/remove/
    /// toggle-borders).
    pub fn persist(&mut self, config: Config) -> Result<(), ConfigError> {
        config.save(&self.path)?;
        self.last_modified = mtime_of(&self.path).unwrap_or(SystemTime::now());
        self.config = config;
        Ok(())
    }
}

fn mtime_of(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|meta| meta.modified()).ok()
}
