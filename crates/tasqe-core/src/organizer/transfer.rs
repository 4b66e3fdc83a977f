//! Export and import of all lists as one JSON document.
//!
//! The document is the persisted `todoData` shape: an object mapping list
//! names to category arrays.

use std::collections::BTreeMap;

use log::info;
use serde_json::Value;

use super::Organizer;
use crate::{
    error::{Result, TasqeError},
    models::{normalize_categories, Category},
    store::ListStore,
};

impl Organizer {
    /// Every list as pretty-printed JSON.
    pub async fn export_json(&self) -> Result<String> {
        let state = self.store.load().await?;
        Ok(serde_json::to_string_pretty(&state.lists)?)
    }

    /// Replaces all lists with the contents of `json`, returning how many
    /// lists were imported.
    ///
    /// Lists are normalized leniently; favorites and timestamps of lists that
    /// no longer exist are dropped and every imported list is stamped now.
    ///
    /// # Errors
    ///
    /// `Serialization` when `json` does not parse, `InvalidInput` when it is
    /// not an object.
    pub async fn import_json(&self, json: &str) -> Result<usize> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(data) = value else {
            return Err(TasqeError::invalid_input("todoData")
                .with_reason("expected an object mapping list names to categories"));
        };

        let lists: BTreeMap<String, Vec<Category>> = data
            .iter()
            .map(|(name, categories)| (name.clone(), normalize_categories(categories)))
            .collect();

        let mut state = self.store.load().await?;
        state.lists = lists;
        state.prune();
        let now = ListStore::now_millis();
        let names: Vec<String> = state.lists.keys().cloned().collect();
        for name in &names {
            state.touch(name, now);
        }

        self.store.save(&state).await?;
        info!("Imported {} lists", names.len());
        Ok(names.len())
    }
}
