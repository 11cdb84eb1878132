//! In-process key-value store.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::KeyValueStore;
use crate::error::{Error, Result};

/// A [`KeyValueStore`] that keeps everything in memory.
///
/// An unavailable store rejects every read and write, which is how hosts
/// without persistent storage behave.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, (String, DateTime<Utc>)>,
    available: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty, available store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            available: true,
        }
    }

    /// Create a store that fails every operation.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            entries: HashMap::new(),
            available: false,
        }
    }

    /// Create a store pre-populated with a single entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store
            .entries
            .insert(key.to_string(), (value.to_string(), Utc::now()));
        store
    }

    /// Make the store available or unavailable from now on.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Read the raw value under `key` without the availability check.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|(value, _)| value.as_str())
    }

    fn check_available(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(Error::storage_unavailable("in-memory store is disabled"))
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_available()?;
        Ok(self.entries.get(key).map(|(value, _)| value.clone()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.check_available()?;
        self.entries
            .insert(key.to_string(), (value.to_string(), Utc::now()));
        Ok(())
    }

    fn updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        self.check_available()?;
        Ok(self.entries.get(key).map(|(_, at)| *at))
    }
}
