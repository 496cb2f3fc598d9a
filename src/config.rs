//! The bentoo home directory (`~/.bentoo`) and its `config.json`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::ConfigError;

/// Environment variable overriding the bentoo home directory.
pub const HOME_ENV_VAR: &str = "BENTOO_HOME";

const DEFAULT_DIR_NAME: &str = ".bentoo";
const CONFIG_FILE: &str = "config.json";
const LOG_DIR: &str = "log";
const LOG_FILE: &str = "overlay.log";

/// Contents of `config.json`. Unknown keys survive a load/save cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BentooConfig {
    #[serde(default)]
    pub overlay: OverlaySection,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlaySection {
    /// Local checkout of the overlay repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,
    #[serde(default)]
    pub repo: RepoSection,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Committer identity used when `~/.gitconfig` does not exist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepoSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BentooConfig {
    /// The configured overlay path, if set to something non-empty.
    pub fn overlay_path(&self) -> Option<PathBuf> {
        self.overlay
            .local
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }
}

/// Locates and manages files under the bentoo home directory.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    home: PathBuf,
}

impl ConfigStore {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Use `$BENTOO_HOME`, falling back to `~/.bentoo`.
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(home) = std::env::var_os(HOME_ENV_VAR).filter(|v| !v.is_empty()) {
            return Ok(Self::new(home));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
        Ok(Self::new(home.join(DEFAULT_DIR_NAME)))
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn config_path(&self) -> PathBuf {
        self.home.join(CONFIG_FILE)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.home.join(LOG_DIR)
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir().join(LOG_FILE)
    }

    /// Create the home directory, `log/` and an empty `config.json` if missing.
    pub fn ensure_structure(&self) -> Result<(), ConfigError> {
        for dir in [self.home.clone(), self.log_dir()] {
            fs::create_dir_all(&dir).map_err(|source| ConfigError::CreateFailed {
                path: dir.clone(),
                source,
            })?;
        }

        let config_path = self.config_path();
        if !config_path.exists() {
            fs::write(&config_path, "{}\n").map_err(|source| ConfigError::CreateFailed {
                path: config_path.clone(),
                source,
            })?;
        }

        Ok(())
    }

    /// Load `config.json`. A missing file reads as an empty config.
    pub fn load(&self) -> Result<BentooConfig, ConfigError> {
        let path = self.config_path();
        debug!("Looking for config file at: {}", path.display());

        if !path.exists() {
            return Ok(BentooConfig::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::ReadFailed {
            path: path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(BentooConfig::default());
        }

        let config = serde_json::from_str(&content)
            .map_err(|source| ConfigError::ParseFailed { path, source })?;
        debug!("Config file loaded successfully");
        Ok(config)
    }

    /// Write `config.json` atomically via a temp file in the same directory.
    pub fn save(&self, config: &BentooConfig) -> Result<(), ConfigError> {
        let path = self.config_path();
        let write_err = |source| ConfigError::WriteFailed {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.home).map_err(|source| ConfigError::CreateFailed {
            path: self.home.clone(),
            source,
        })?;

        let json = to_json(&path, config)?;

        let mut tmp = NamedTempFile::new_in(&self.home).map_err(write_err)?;
        tmp.write_all(json.as_bytes()).map_err(write_err)?;
        tmp.persist(&path).map_err(|e| write_err(e.error))?;

        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Resolve the overlay root, requiring it to be configured and present on disk.
    pub fn overlay_root(&self, config: &BentooConfig) -> Result<PathBuf, ConfigError> {
        let path = config
            .overlay_path()
            .ok_or_else(|| ConfigError::OverlayNotConfigured {
                path: self.config_path(),
            })?;

        if !path.exists() {
            return Err(ConfigError::OverlayMissing { path });
        }

        debug!("Using overlay path: {}", path.display());
        Ok(path)
    }
}

/// Pretty-printed JSON with a trailing newline.
fn to_json<T: Serialize>(path: &Path, value: &T) -> Result<String, ConfigError> {
    let mut json =
        serde_json::to_string_pretty(value).map_err(|source| ConfigError::SerializeFailed {
            path: path.to_path_buf(),
            source,
        })?;
    json.push('\n');
    Ok(json)
}
