//! Typed view over a [`KeyValueStore`].

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use jiff::Timestamp;
use serde_json::{json, Map, Value};

use super::{keys, KeyValueStore, MemoryStore};
use crate::{
    error::Result,
    models::{Category, Preferences},
};

/// Maximum number of raw queries kept in the history.
pub const MAX_PAST_QUERIES: usize = 5;

/// Lists together with their favorite flags and modification times.
///
/// Loaded and saved as one unit so list-level edits (rename, delete) keep the
/// three collections consistent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListState {
    pub lists: BTreeMap<String, Vec<Category>>,
    pub favorites: BTreeSet<String>,
    /// List name to epoch milliseconds of the last modification
    pub timestamps: BTreeMap<String, i64>,
}

impl ListState {
    /// Records a modification of `name` at `now_ms`.
    pub fn touch(&mut self, name: &str, now_ms: i64) {
        self.timestamps.insert(name.to_string(), now_ms);
    }

    /// Last modification of `name` as a timestamp.
    pub fn updated_at(&self, name: &str) -> Option<Timestamp> {
        self.timestamps
            .get(name)
            .and_then(|ms| Timestamp::from_millisecond(*ms).ok())
    }

    /// Drops favorites and timestamps whose list no longer exists.
    pub fn prune(&mut self) {
        let lists = &self.lists;
        self.favorites.retain(|name| lists.contains_key(name));
        self.timestamps.retain(|name, _| lists.contains_key(name));
    }
}

/// Store handle used by the pipeline, the merge engine and list management.
#[derive(Clone)]
pub struct ListStore {
    inner: Arc<dyn KeyValueStore>,
}

impl ListStore {
    pub fn new(inner: Arc<dyn KeyValueStore>) -> Self {
        Self { inner }
    }

    /// Store backed by a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Current time in epoch milliseconds, as stored in `todoTimestamps`.
    pub fn now_millis() -> i64 {
        Timestamp::now().as_millisecond()
    }

    /// Loads lists, favorites and timestamps.
    pub async fn load(&self) -> Result<ListState> {
        let mut values = self
            .inner
            .get(&[keys::TODO_DATA, keys::TODO_FAVORITES, keys::TODO_TIMESTAMPS])
            .await?;

        // Stored lists were validated or normalized on the way in; read them back as-is.
        let lists = match values.remove(keys::TODO_DATA) {
            Some(Value::Null) | None => BTreeMap::new(),
            Some(data) => serde_json::from_value(data)?,
        };

        let favorites = match values.remove(keys::TODO_FAVORITES) {
            Some(Value::Array(names)) => names
                .iter()
                .filter_map(|n| n.as_str().map(String::from))
                .collect(),
            _ => BTreeSet::new(),
        };

        let timestamps = match values.remove(keys::TODO_TIMESTAMPS) {
            Some(Value::Object(times)) => times
                .iter()
                .filter_map(|(name, ms)| ms.as_i64().map(|ms| (name.clone(), ms)))
                .collect(),
            _ => BTreeMap::new(),
        };

        Ok(ListState {
            lists,
            favorites,
            timestamps,
        })
    }

    /// Writes lists, favorites and timestamps in a single patch.
    pub async fn save(&self, state: &ListState) -> Result<()> {
        let mut patch = Map::new();
        patch.insert(keys::TODO_DATA.to_string(), serde_json::to_value(&state.lists)?);
        patch.insert(
            keys::TODO_FAVORITES.to_string(),
            serde_json::to_value(&state.favorites)?,
        );
        patch.insert(
            keys::TODO_TIMESTAMPS.to_string(),
            serde_json::to_value(&state.timestamps)?,
        );
        self.inner.set(patch).await
    }

    /// Categories of a single list.
    pub async fn list(&self, name: &str) -> Result<Option<Vec<Category>>> {
        Ok(self.load().await?.lists.remove(name))
    }

    /// Query history, most recent first.
    pub async fn past_queries(&self) -> Result<Vec<String>> {
        let values = self.inner.get(&[keys::PAST_FIVE_QUERIES]).await?;
        Ok(values
            .get(keys::PAST_FIVE_QUERIES)
            .and_then(Value::as_array)
            .map(|queries| {
                queries
                    .iter()
                    .filter_map(|q| q.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Pushes `query` to the front of the history, keeping the newest five.
    pub async fn record_query(&self, query: &str) -> Result<Vec<String>> {
        let mut queries = self.past_queries().await?;
        queries.insert(0, query.to_string());
        queries.truncate(MAX_PAST_QUERIES);

        let mut patch = Map::new();
        patch.insert(keys::PAST_FIVE_QUERIES.to_string(), json!(queries));
        self.inner.set(patch).await?;
        Ok(queries)
    }

    /// Configured API key, ignoring blank values.
    pub async fn api_key(&self) -> Result<Option<String>> {
        let values = self.inner.get(&[keys::API_KEY]).await?;
        Ok(values
            .get(keys::API_KEY)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from))
    }

    /// Saves the API key and marks first-time setup as complete.
    pub async fn set_api_key(&self, key: &str) -> Result<()> {
        let mut patch = Map::new();
        patch.insert(keys::API_KEY.to_string(), json!(key.trim()));
        patch.insert(keys::PREFERENCES_SET.to_string(), json!(true));
        self.inner.set(patch).await
    }

    pub async fn preferences(&self) -> Result<Preferences> {
        let values = self
            .inner
            .get(&[keys::DARK_MODE, keys::PREFERENCES_SET])
            .await?;
        Ok(Preferences {
            dark_mode: values.get(keys::DARK_MODE).and_then(Value::as_bool),
            preferences_set: values
                .get(keys::PREFERENCES_SET)
                .and_then(Value::as_bool)
                .unwrap_or(false),
            has_api_key: self.api_key().await?.is_some(),
        })
    }

    pub async fn set_dark_mode(&self, enabled: bool) -> Result<()> {
        let mut patch = Map::new();
        patch.insert(keys::DARK_MODE.to_string(), json!(enabled));
        self.inner.set(patch).await
    }
}
