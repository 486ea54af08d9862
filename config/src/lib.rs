//! Configuration for upshot.
//!
//! The file is optional. When present it selects how captured faults are logged:
//!
//! ```toml
//! [faults]
//! log = "warn"        # off | trace | debug | info | warn
//! message_limit = 120
//! ```
//!
//! The file is read from `$UPSHOT_CONFIG` when set, otherwise `~/.upshot/config.toml`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;
use thiserror::Error;
use upshot_types::FaultPolicy;
use upshot_types::capture::install_policy;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "UPSHOT_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpshotConfig {
    pub faults: FaultPolicy,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

/// A fault policy was already installed for this process.
#[derive(Debug, Error)]
#[error("a fault policy is already installed")]
pub struct AlreadyInstalled {
    /// The policy that was not installed.
    pub rejected: FaultPolicy,
}

impl UpshotConfig {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load the config file at its default location.
    ///
    /// Returns `Ok(None)` when no location can be resolved or the file does not exist.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file");
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| {
            tracing::warn!(path = %path.display(), error = %source, "Failed to read config");
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::parse(&content).map_err(|source| {
            tracing::warn!(path = %path.display(), error = %source, "Failed to parse config");
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    /// Install this config's fault policy for the whole process.
    ///
    /// Succeeds at most once per process, and only if nothing has logged a fault yet: the first
    /// recorded fault fixes the default policy in place.
    pub fn install(self) -> Result<(), AlreadyInstalled> {
        let log = self.faults.log;
        let message_limit = self.faults.message_limit;
        install_policy(self.faults).map_err(|rejected| AlreadyInstalled { rejected })?;
        tracing::debug!(log = ?log, message_limit, "Installed fault policy");
        Ok(())
    }
}

/// Where [`UpshotConfig::load`] looks for the config file.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    resolve_path(env::var_os(CONFIG_ENV), dirs::home_dir())
}

fn resolve_path(overridden: Option<OsString>, home: Option<PathBuf>) -> Option<PathBuf> {
    match overridden {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => home.map(|home| home.join(".upshot").join("config.toml")),
    }
}
