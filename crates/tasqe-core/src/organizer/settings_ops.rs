//! Credential, preferences and query history.

use super::Organizer;
use crate::{
    display::QueryHistory,
    error::{Result, TasqeError},
    models::Preferences,
};

impl Organizer {
    /// The last five submitted queries, most recent first.
    pub async fn history(&self) -> Result<QueryHistory> {
        Ok(QueryHistory(self.store.past_queries().await?))
    }

    /// Saves the provider API key and marks setup as complete.
    pub async fn set_api_key(&self, key: &str) -> Result<()> {
        if key.trim().is_empty() {
            return Err(TasqeError::invalid_input("api_key").with_reason("key must not be empty"));
        }
        self.store.set_api_key(key).await
    }

    pub async fn preferences(&self) -> Result<Preferences> {
        self.store.preferences().await
    }

    pub async fn set_dark_mode(&self, enabled: bool) -> Result<()> {
        self.store.set_dark_mode(enabled).await
    }
}
