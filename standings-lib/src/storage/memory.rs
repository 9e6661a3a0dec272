use std::collections::HashMap;

use parking_lot::RwLock;

use crate::storage::{Error, Result, Storage};

/// Process-local storage kept in a map.
///
/// An optional quota bounds the total size of keys plus values, the way a browser caps its local
/// store. Writes that would exceed it fail and leave the previous value in place.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: RwLock::default(),
            quota: Some(quota),
        }
    }

    /// Total bytes currently used by keys and values
    pub fn used(&self) -> usize {
        self.entries
            .read()
            .iter()
            .map(|(k, v)| k.len().saturating_add(v.len()))
            .sum()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write();

        if let Some(quota) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len().saturating_add(v.len()))
                .sum();
            let needed = others.saturating_add(key.len()).saturating_add(value.len());

            if needed > quota {
                return Err(Error::QuotaExceeded {
                    key: key.to_string(),
                    quota,
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);

        Ok(())
    }
}
