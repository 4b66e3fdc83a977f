//! In-memory key-value store.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use super::KeyValueStore;
use crate::error::Result;

/// Key-value store held in process memory; contents die with the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Map<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
        let entries = self.entries.lock().await;
        Ok(keys
            .iter()
            .filter_map(|key| entries.get(*key).map(|v| (key.to_string(), v.clone())))
            .collect())
    }

    async fn set(&self, patch: Map<String, Value>) -> Result<()> {
        self.entries.lock().await.extend(patch);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_get_omits_absent_keys() {
        let store = MemoryStore::new();
        let mut patch = Map::new();
        patch.insert("apiKey".to_string(), json!("sk-test"));
        store.set(patch).await.unwrap();

        let result = store.get(&["apiKey", "darkMode"]).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result["apiKey"], json!("sk-test"));
    }

    #[tokio::test]
    async fn test_set_replaces_top_level_keys_only() {
        let store = MemoryStore::new();
        let mut initial = Map::new();
        initial.insert("todoData".to_string(), json!({ "A": [], "B": [] }));
        initial.insert("darkMode".to_string(), json!(true));
        store.set(initial).await.unwrap();

        let mut patch = Map::new();
        patch.insert("todoData".to_string(), json!({ "C": [] }));
        store.set(patch).await.unwrap();

        let result = store.get(&["todoData", "darkMode"]).await.unwrap();
        assert_eq!(result["todoData"], json!({ "C": [] }));
        assert_eq!(result["darkMode"], json!(true));
    }
}
