//! `recipebox` - A small, persistent recipe list
//!
//! This library provides the recipe store, its key-value persistence, the
//! list renderer and the controller that ties user actions to all of them.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod filter;
pub mod logging;
pub mod recipe;
pub mod render;
pub mod storage;
pub mod store;

pub use config::Config;
pub use controller::{Controller, Notification, NotificationLevel};
pub use error::{Error, Result};
pub use export::{DirectoryDownloader, Downloader, MemoryDownloader};
pub use filter::Filter;
pub use logging::init_logging;
pub use recipe::{Recipe, RecipeForm};
pub use render::{Action, EntryView, ListView, Renderer};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageStats};
pub use store::{RecipeStore, StoreOptions};
