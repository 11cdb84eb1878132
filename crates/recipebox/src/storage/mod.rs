//! Key-value persistence for recipebox.
//!
//! The recipe collection is stored as one serialized value under a single key.
//! This module defines the [`KeyValueStore`] contract and its two backends:
//! a durable `SQLite` store and an in-process store.

mod memory;
pub mod schema;
mod sqlite;

use chrono::{DateTime, Utc};

use crate::error::Result;

pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, StorageStats};

/// A synchronous string key-value store.
///
/// Every call completes before it returns; a successful `set` is durable as
/// far as the backend guarantees durability.
pub trait KeyValueStore: std::fmt::Debug {
    /// Read the value stored under `key`, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// When the value under `key` was last written, if known.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        let _ = key;
        Ok(None)
    }
}
