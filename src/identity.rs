//! Committer identity resolution.
//!
//! The global git config file wins when it names both a user and an email;
//! otherwise the `overlay.repo` section of the bentoo config is used.

use std::fmt;
use std::path::{Path, PathBuf};

use git2::{Config, ErrorCode};
use tracing::{debug, info};

use crate::config::ConfigStore;
use crate::error::IdentityError;

const GITCONFIG_FILE: &str = ".gitconfig";

/// Name and email recorded on commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// Where an identity was read from or written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySource {
    GitConfig(PathBuf),
    BentooConfig(PathBuf),
}

impl fmt::Display for IdentitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentitySource::GitConfig(path) | IdentitySource::BentooConfig(path) => {
                write!(f, "{}", path.display())
            }
        }
    }
}

pub struct IdentityResolver {
    store: ConfigStore,
    gitconfig: Option<PathBuf>,
}

impl IdentityResolver {
    pub fn new(store: ConfigStore, gitconfig: Option<PathBuf>) -> Self {
        Self { store, gitconfig }
    }

    /// Resolve against `~/.gitconfig` and the given store.
    pub fn discover(store: ConfigStore) -> Self {
        let gitconfig = dirs::home_dir().map(|home| home.join(GITCONFIG_FILE));
        Self::new(store, gitconfig)
    }

    fn existing_gitconfig(&self) -> Option<&Path> {
        self.gitconfig.as_deref().filter(|path| path.is_file())
    }

    pub fn resolve(&self) -> Result<(Identity, IdentitySource), IdentityError> {
        if let Some(path) = self.existing_gitconfig() {
            let config = open_gitconfig(path)?;
            let name = read_entry(&config, path, "user.name")?;
            let email = read_entry(&config, path, "user.email")?;
            debug!("Git user found in {}: user={:?}, email={:?}", path.display(), name, email);

            if let (Some(name), Some(email)) = (name, email) {
                return Ok((
                    Identity { name, email },
                    IdentitySource::GitConfig(path.to_path_buf()),
                ));
            }
        }

        let config = self.store.load()?;
        let repo = config.overlay.repo;
        debug!(
            "Git user configuration from bentoo config: user={:?}, email={:?}",
            repo.user, repo.email
        );

        match (non_empty(repo.user), non_empty(repo.email)) {
            (Some(name), Some(email)) => Ok((
                Identity { name, email },
                IdentitySource::BentooConfig(self.store.config_path()),
            )),
            _ => Err(IdentityError::Missing),
        }
    }

    /// Store an identity in `~/.gitconfig` when it exists, else in the bentoo config.
    pub fn store_identity(&self, identity: &Identity) -> Result<IdentitySource, IdentityError> {
        let source = match self.existing_gitconfig() {
            Some(path) => {
                let mut config = open_gitconfig(path)?;
                for (key, value) in [("user.name", &identity.name), ("user.email", &identity.email)]
                {
                    config
                        .set_str(key, value)
                        .map_err(|source| IdentityError::GitConfig {
                            path: path.to_path_buf(),
                            source,
                        })?;
                }
                IdentitySource::GitConfig(path.to_path_buf())
            }
            None => {
                let mut config = self.store.load()?;
                config.overlay.repo.user = Some(identity.name.clone());
                config.overlay.repo.email = Some(identity.email.clone());
                self.store.save(&config)?;
                IdentitySource::BentooConfig(self.store.config_path())
            }
        };

        info!("Git user set to: {} (stored in {})", identity, source);
        Ok(source)
    }
}

fn open_gitconfig(path: &Path) -> Result<Config, IdentityError> {
    Config::open(path).map_err(|source| IdentityError::GitConfig {
        path: path.to_path_buf(),
        source,
    })
}

fn read_entry(config: &Config, path: &Path, key: &str) -> Result<Option<String>, IdentityError> {
    match config.get_string(key) {
        Ok(value) => Ok(non_empty(Some(value))),
        Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
        Err(source) => Err(IdentityError::GitConfig {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
