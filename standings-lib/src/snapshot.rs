//! Roster snapshot file.
//!
//! A plain JSON array of teams kept outside the main store, used to hand a roster to other
//! tools or take one from them. Reading returns the whole roster and replacing overwrites it
//! wholesale. There is no merging and no validation; the last writer wins.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

use crate::{fs::data_dir, model::Team};

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed roster: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct RosterSnapshot {
    path: PathBuf,
}

impl RosterSnapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A snapshot named `file_name` in the standings data directory.
    pub fn open_default(file_name: &str) -> io::Result<Self> {
        Ok(Self::new(data_dir()?.join(file_name)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored roster. A missing file is an empty roster.
    pub fn read(&self) -> Result<Vec<Team>, Error> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_str(&raw)?)
    }

    pub fn replace(&self, teams: &[Team]) -> Result<(), Error> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(serde_json::to_string_pretty(teams)?.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!("Wrote {} teams to {}", teams.len(), self.path.display());

        Ok(())
    }
}
