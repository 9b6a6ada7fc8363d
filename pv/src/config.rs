//! Configuration for promptvault

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::filter::ALL_CATEGORIES;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory export files are written to
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(default)]
    pub log_level: Option<String>,

    /// Category selected when a session starts
    #[serde(default = "default_category")]
    pub default_category: String,
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_category() -> String {
    ALL_CATEGORIES.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir(),
            log_level: None,
            default_category: default_category(),
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            return Self::load_from(config_path);
        }

        // Try default locations
        let default_paths = [Self::default_path(), Some(PathBuf::from("promptvault.yml"))];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                return Self::load_from(path);
            }
        }

        debug!("Config::load: no config file found, using defaults");
        Ok(Config::default())
    }

    /// Per-user config location: `~/.config/promptvault/config.yml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("promptvault").join("config.yml"))
    }

    /// Read only the log level, ignoring any other problems with the file
    ///
    /// Logging is set up before the full config load, so this never fails.
    pub fn load_log_level(path: Option<&PathBuf>) -> Option<String> {
        Self::load(path).ok().and_then(|c| c.log_level)
    }

    fn load_from(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).context(format!("Failed to read config file: {}", path.display()))?;
        let config: Config =
            serde_yaml::from_str(&content).context(format!("Failed to parse config file: {}", path.display()))?;
        debug!(path = %path.display(), "Config::load: loaded");
        Ok(config)
    }

    /// Save config to file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create config directory: {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content).context(format!("Failed to write config file: {}", path.display()))?;
        debug!(path = %path.display(), "Config::save: written");
        Ok(())
    }

    /// Write the default config to `path`
    ///
    /// An existing file is left alone unless `force` is set.
    pub fn write_default(path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            return Err(eyre::eyre!(
                "Config file already exists: {} (use --force to overwrite)",
                path.display()
            ));
        }
        Config::default().save(path)
    }
}
