//! List-level operations: summaries, show, rename, delete and favorites.

use std::cmp::Ordering;

use log::info;

use super::Organizer;
use crate::{
    display::ListSummaries,
    error::{Result, TasqeError},
    models::{ListSummary, TodoList},
    params::{ListName, RenameList},
};

impl Organizer {
    /// Summaries of every list: favorites first, then most recently modified,
    /// then by name.
    pub async fn list_summaries(&self) -> Result<ListSummaries> {
        let state = self.store.load().await?;
        let mut summaries: Vec<ListSummary> = state
            .lists
            .iter()
            .map(|(name, categories)| {
                ListSummary::new(
                    name.clone(),
                    categories,
                    state.favorites.contains(name),
                    state.updated_at(name),
                )
            })
            .collect();

        summaries.sort_by(sidebar_order);
        Ok(ListSummaries(summaries))
    }

    /// A list with its favorite flag and modification time.
    pub async fn show_list(&self, params: &ListName) -> Result<Option<TodoList>> {
        let mut state = self.store.load().await?;
        Ok(state.lists.remove(&params.name).map(|categories| TodoList {
            favorite: state.favorites.contains(&params.name),
            updated_at: state.updated_at(&params.name),
            name: params.name.clone(),
            categories,
        }))
    }

    /// Renames a list, moving its favorite flag and timestamp along.
    ///
    /// # Errors
    ///
    /// `ListNotFound` when `from` does not exist, `ListExists` when `to` is
    /// taken, `InvalidInput` when `to` is blank.
    pub async fn rename_list(&self, params: &RenameList) -> Result<()> {
        let to = params.to.trim();
        if to.is_empty() {
            return Err(TasqeError::invalid_input("to").with_reason("list name must not be empty"));
        }

        let mut state = self.store.load().await?;
        if !state.lists.contains_key(&params.from) {
            return Err(TasqeError::ListNotFound {
                name: params.from.clone(),
            });
        }
        if to == params.from {
            return Ok(());
        }
        if state.lists.contains_key(to) {
            return Err(TasqeError::ListExists {
                name: to.to_string(),
            });
        }
        let categories = state
            .lists
            .remove(&params.from)
            .ok_or_else(|| TasqeError::ListNotFound {
                name: params.from.clone(),
            })?;

        state.lists.insert(to.to_string(), categories);
        if state.favorites.remove(&params.from) {
            state.favorites.insert(to.to_string());
        }
        if let Some(ms) = state.timestamps.remove(&params.from) {
            state.timestamps.insert(to.to_string(), ms);
        }

        self.store.save(&state).await?;
        info!("Renamed list '{}' to '{to}'", params.from);
        Ok(())
    }

    /// Deletes a list with its metadata, returning what was removed.
    pub async fn delete_list(&self, params: &ListName) -> Result<Option<TodoList>> {
        let mut state = self.store.load().await?;
        let Some(categories) = state.lists.remove(&params.name) else {
            return Ok(None);
        };

        let removed = TodoList {
            name: params.name.clone(),
            favorite: state.favorites.remove(&params.name),
            updated_at: state.updated_at(&params.name),
            categories,
        };
        state.timestamps.remove(&params.name);

        self.store.save(&state).await?;
        info!("Deleted list '{}'", params.name);
        Ok(Some(removed))
    }

    /// Flips the favorite flag of a list, returning the new value.
    pub async fn toggle_favorite(&self, params: &ListName) -> Result<bool> {
        let mut state = self.store.load().await?;
        if !state.lists.contains_key(&params.name) {
            return Err(TasqeError::ListNotFound {
                name: params.name.clone(),
            });
        }

        let favorite = if state.favorites.remove(&params.name) {
            false
        } else {
            state.favorites.insert(params.name.clone());
            true
        };

        self.store.save(&state).await?;
        Ok(favorite)
    }
}

fn sidebar_order(a: &ListSummary, b: &ListSummary) -> Ordering {
    b.favorite
        .cmp(&a.favorite)
        .then_with(|| b.updated_at.cmp(&a.updated_at))
        .then_with(|| a.name.cmp(&b.name))
}
