//! List store interface and its backends.
//!
//! The store is an opaque async key-value service: [`KeyValueStore::get`]
//! returns whichever of the requested keys exist, and [`KeyValueStore::set`]
//! merges a patch at the top level (each key replaced wholesale, never
//! deep-merged). [`ListStore`] layers the typed view the rest of the crate
//! uses on top of it.
//!
//! Writers do read-modify-write without concurrency control; concurrent
//! writers to the same key can lose updates.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::Result;

pub mod list_store;
pub mod memory;
pub mod sqlite;

pub use list_store::{ListState, ListStore, MAX_PAST_QUERIES};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Recognized top-level keys.
pub mod keys {
    pub const TODO_DATA: &str = "todoData";
    pub const TODO_FAVORITES: &str = "todoFavorites";
    pub const TODO_TIMESTAMPS: &str = "todoTimestamps";
    pub const PAST_FIVE_QUERIES: &str = "pastFiveQueries";
    pub const API_KEY: &str = "apiKey";
    pub const DARK_MODE: &str = "darkMode";
    pub const PREFERENCES_SET: &str = "preferencesSet";
}

/// Async key-value storage of JSON values.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetches the given keys; absent keys are missing from the result.
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>>;

    /// Replaces each key of `patch` with its value, leaving other keys alone.
    async fn set(&self, patch: Map<String, Value>) -> Result<()>;
}
