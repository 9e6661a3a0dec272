//! Durable string key-value storage.
//!
//! The [`Storage`] trait is the only thing the state cell knows about persistence. Every
//! operation returns a [`Result`]; it is up to the caller to decide whether a failure matters.

use std::{fmt::Debug, io, sync::Arc};

use thiserror::Error;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

pub type Result<T> = std::result::Result<T, Error>;

/// Shared handle to a storage backend
pub type StorageHandle = Arc<dyn Storage>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Storage quota of {quota} bytes exceeded while writing {key:?}")]
    QuotaExceeded { key: String, quota: usize },
    #[error("Invalid storage key {0:?}")]
    InvalidKey(String),
}

pub trait Storage: Debug + Send + Sync {
    /// Returns the value stored under `key`, or `None` if there is none.
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
