use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::{
    fs::state_dir,
    storage::{Error, Result, Storage},
};

/// Storage backed by a directory, one JSON file per key.
///
/// Writes go to a temporary file in the same directory which is then renamed over the target, so
/// a crash mid-write leaves either the old value or the new one, never a torn file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage rooted in the standings state directory.
    pub fn open_default() -> io::Result<Self> {
        Ok(Self::new(state_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

        if valid {
            Ok(self.dir.join(format!("{key}.json")))
        } else {
            Err(Error::InvalidKey(key.to_string()))
        }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path(key)?;

        fs::create_dir_all(&self.dir)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;

        debug!("Wrote {} bytes to {}", value.len(), path.display());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod test {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_get_set_remove() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert_eq!(storage.get("placar-standings").unwrap(), None);

        storage.set("placar-standings", "{\"a\":1}").unwrap();
        assert_eq!(
            storage.get("placar-standings").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert!(dir.path().join("placar-standings.json").exists());

        storage.remove("placar-standings").unwrap();
        storage.remove("placar-standings").unwrap();
        assert_eq!(storage.get("placar-standings").unwrap(), None);
    }

    #[test]
    fn test_overwrite() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set("k", "old").unwrap();
        storage.set("k", "new").unwrap();

        assert_eq!(storage.get("k").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_creates_missing_dir() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("state"));

        storage.set("k", "v").unwrap();

        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(
                matches!(storage.set(key, "v"), Err(Error::InvalidKey(_))),
                "{key:?} should be rejected"
            );
        }
    }
}
