//! A value that hydrates itself from durable storage.
//!
//! A [`StateCell`] starts out holding a default value and immediately kicks off a single
//! background load of whatever was previously saved under its key. Reads and writes are
//! synchronous the whole time; [`StateCell::is_hydrated`] tells a consumer whether the load has
//! finished and the value can be treated as authoritative.
//!
//! Writes made before the load finishes win. The load result is dropped when it arrives after
//! an edit, so an early edit is never clobbered by older stored data.

use std::{convert::Infallible, fmt, sync::Arc};

use parking_lot::RwLock;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tokio::{runtime::Handle, sync::watch};
use tracing::{debug, warn};

use crate::storage::{self, StorageHandle};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] storage::Error),
}

struct Inner<T> {
    value: T,
    /// Set by the first write. Once set, a late load is discarded.
    edited: bool,
}

/// Shared, persisted value of type `T`.
///
/// Clones are cheap and refer to the same value.
pub struct StateCell<T> {
    key: Arc<str>,
    inner: Arc<RwLock<Inner<T>>>,
    storage: StorageHandle,
    ready: watch::Receiver<bool>,
}

/// Publishes `true` when dropped, so the ready signal fires even if the load panics.
struct ReadyOnDrop(watch::Sender<bool>);

impl Drop for ReadyOnDrop {
    fn drop(&mut self) {
        self.0.send_replace(true);
    }
}

impl<T> StateCell<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Creates a cell holding `default` and starts loading the value stored under `key`.
    ///
    /// The load runs on the Tokio blocking pool when called from inside a runtime, otherwise on
    /// a dedicated thread. It happens exactly once per cell.
    pub fn create(key: impl Into<String>, default: T, storage: StorageHandle) -> Self {
        let key: Arc<str> = key.into().into();
        let inner = Arc::new(RwLock::new(Inner {
            value: default,
            edited: false,
        }));
        let (tx, ready) = watch::channel(false);

        let load = {
            let key = key.clone();
            let inner = inner.clone();
            let storage = storage.clone();
            move || {
                let _ready = ReadyOnDrop(tx);
                hydrate(&key, &inner, &storage);
            }
        };

        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(load);
            }
            Err(_) => {
                std::thread::spawn(load);
            }
        }

        Self {
            key,
            inner,
            storage,
            ready,
        }
    }

    /// Replaces the value and persists it.
    pub fn set(&self, value: T) {
        self.update(|_| value);
    }

    /// Replaces the value with `f(previous)` and persists it.
    ///
    /// `f` sees the latest value, not whatever the caller read earlier.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let Ok(()) = self.try_update(|prev| Ok::<T, Infallible>(f(prev)));
    }

    /// Like [`StateCell::update`], but `f` may refuse the change. On `Err` nothing is written.
    pub fn try_update<F, E>(&self, f: F) -> Result<(), E>
    where
        F: FnOnce(&T) -> Result<T, E>,
    {
        let mut inner = self.inner.write();
        let next = f(&inner.value)?;

        // Best effort: the in-memory value is updated whether or not this succeeds
        if let Err(err) = self.persist(&next) {
            warn!("Keeping {:?} in memory only: {err}", self.key);
        }

        inner.value = next;
        inner.edited = true;

        Ok(())
    }

    fn persist(&self, value: &T) -> Result<(), Error> {
        let raw = serde_json::to_string(value)?;
        self.storage.set(&self.key, &raw)?;

        Ok(())
    }
}

impl<T> StateCell<T> {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the initial load has finished. Never goes back to `false`.
    pub fn is_hydrated(&self) -> bool {
        *self.ready.borrow()
    }

    /// Waits until the initial load has finished.
    pub async fn hydrated(&self) {
        let mut ready = self.ready.clone();
        // The sender always publishes `true` before it goes away
        let _ = ready.wait_for(|ready| *ready).await;
    }

    /// Runs `f` against the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.read().value)
    }
}

impl<T: Clone> StateCell<T> {
    pub fn get(&self) -> T {
        self.inner.read().value.clone()
    }
}

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            inner: self.inner.clone(),
            storage: self.storage.clone(),
            ready: self.ready.clone(),
        }
    }
}

impl<T> fmt::Debug for StateCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCell")
            .field("key", &self.key)
            .field("hydrated", &self.is_hydrated())
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}

fn hydrate<T>(key: &str, inner: &RwLock<Inner<T>>, storage: &StorageHandle)
where
    T: DeserializeOwned,
{
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("Nothing stored under {key:?}, keeping default");
            return;
        }
        Err(err) => {
            warn!("Failed to read {key:?}, keeping default: {err}");
            return;
        }
    };

    let loaded = match serde_json::from_str::<T>(&raw) {
        Ok(loaded) => loaded,
        Err(err) => {
            warn!("Discarding unreadable value under {key:?}: {err}");
            return;
        }
    };

    let mut inner = inner.write();
    if inner.edited {
        debug!("{key:?} was edited before loading finished, keeping the edit");
    } else {
        inner.value = loaded;
        debug!("Loaded {key:?} from storage");
    }
}
