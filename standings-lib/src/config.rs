use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use getset::{CopyGetters, Getters, Setters};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::{fs::config_dir, ranking::Scoring};

const CURRENT_CONFIG_VERSION: u16 = 1;
const FILE_NAME: &str = "config.toml";

pub const DEFAULT_STORAGE_KEY: &str = "placar-standings";
pub const DEFAULT_ROSTER_FILE: &str = "participants.json";

/// Handle to the core configuration
pub type Cfg = Arc<RwLock<CoreConfig>>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// The core configuration, serialized to TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, CopyGetters, Setters)]
#[serde(default)]
pub struct CoreConfig {
    #[getset(get_copy = "pub")]
    version: u16,
    /// Points per win and per draw
    #[getset(get_copy = "pub", set = "pub")]
    scoring: Scoring,
    /// Key the table is stored under
    #[getset(get = "pub", set = "pub")]
    storage_key: String,
    /// File name of the roster snapshot in the data directory
    #[getset(get = "pub", set = "pub")]
    roster_file: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            scoring: Scoring::default(),
            storage_key: DEFAULT_STORAGE_KEY.into(),
            roster_file: DEFAULT_ROSTER_FILE.into(),
        }
    }
}

impl CoreConfig {
    /// Loads the configuration file, writing the defaults out first if there is none.
    pub fn load() -> Self {
        let path = match Self::path() {
            Ok(path) => path,
            Err(err) => {
                warn!("No configuration directory, using defaults: {err}");
                return Self::default();
            }
        };

        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            if let Err(err) = cfg.save_to(&path) {
                warn!("Failed to write default configuration: {err}");
            }
            cfg
        }
    }

    /// Reads the configuration at `path`. Unreadable files and files from a newer version fall
    /// back to the defaults.
    pub fn load_from(path: &Path) -> Self {
        let cfg = match fs::read_to_string(path) {
            Ok(contents) => toml::from_str::<Self>(&contents).unwrap_or_else(|err| {
                warn!("Ignoring malformed {}: {err}", path.display());
                Self::default()
            }),
            Err(err) => {
                warn!("Failed to read {}: {err}", path.display());
                Self::default()
            }
        };

        if cfg.version > CURRENT_CONFIG_VERSION {
            warn!(
                "{} is version {}, newer than supported {CURRENT_CONFIG_VERSION}",
                path.display(),
                cfg.version
            );
            return Self::default();
        }

        cfg
    }

    pub fn save(&self) -> Result<(), Error> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Error> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, contents)?;

        Ok(())
    }

    pub fn path() -> io::Result<PathBuf> {
        Ok(config_dir()?.join(FILE_NAME))
    }

    /// Wraps the configuration in a shared handle.
    pub fn into_handle(self) -> Cfg {
        Arc::new(RwLock::new(self))
    }

    /// Configuration for tests, never read from or written to disk
    #[cfg(test)]
    pub(crate) fn mock() -> Self {
        Self {
            storage_key: "test-standings".into(),
            ..Self::default()
        }
    }
}
