//! High-level API tying the pipeline, the merge engine and the list store
//! together.
//!
//! [`Organizer`] is what front ends talk to. It is built with
//! [`OrganizerBuilder`] and its operations are grouped by concern:
//!
//! ```text
//! ┌──────────────────┐    ┌──────────────────┐    ┌──────────────────┐
//! │  generate_ops    │    │ list_ops         │    │                  │
//! │  (pipeline +     │───▶│ task_ops         │───▶│    ListStore     │
//! │   merge engine)  │    │ upcoming,transfer│    │ (KeyValueStore)  │
//! └──────────────────┘    └──────────────────┘    └──────────────────┘
//! ```
//!
//! - [`builder`]: store, transport and client configuration
//! - [`generate_ops`]: query to validated document to merged list
//! - [`list_ops`]: summaries, show, rename, delete, favorite
//! - [`task_ops`]: add, toggle and remove tasks, subtasks and categories
//! - [`upcoming`]: dated tasks across all lists up to a cutoff
//! - [`transfer`]: JSON export and import of `todoData`
//! - [`settings_ops`]: credential, preferences and query history
//!
//! # Examples
//!
//! ```rust
//! use tasqe_core::{params::AddTask, OrganizerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let organizer = OrganizerBuilder::new().in_memory().build().await?;
//!
//! organizer
//!     .add_task(&AddTask {
//!         category: "Health".to_string(),
//!         name: "Run".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let lists = organizer.list_summaries().await?;
//! assert_eq!(lists[0].name, "To Do List");
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::{
    client::{ClientConfig, ModelClient, ModelTransport},
    error::{Result, TasqeError},
    merge::MergeEngine,
    models::Category,
    pipeline::{Pipeline, StateObserver},
    store::ListStore,
};

pub mod builder;
pub mod generate_ops;
pub mod list_ops;
pub mod settings_ops;
pub mod task_ops;
pub mod transfer;
pub mod upcoming;


pub use builder::OrganizerBuilder;
pub use generate_ops::GenerateOutcome;
pub use upcoming::collect_upcoming;

/// Main interface for generating and managing to-do lists.
#[derive(Clone)]
pub struct Organizer {
    pub(crate) store: ListStore,
    pub(crate) pipeline: Pipeline,
    pub(crate) merger: MergeEngine,
    pub(crate) config: ClientConfig,
}

impl Organizer {
    pub(crate) fn new(
        store: ListStore,
        transport: Arc<dyn ModelTransport>,
        config: ClientConfig,
    ) -> Self {
        let client = ModelClient::new(store.clone(), transport, config.clone());
        Self {
            pipeline: Pipeline::new(client, store.clone()),
            merger: MergeEngine::new(store.clone()),
            store,
            config,
        }
    }

    /// Typed store handle.
    pub fn store(&self) -> &ListStore {
        &self.store
    }

    pub fn client_config(&self) -> &ClientConfig {
        &self.config
    }

    /// Reports pipeline state transitions to `observer`.
    pub fn with_observer(mut self, observer: StateObserver) -> Self {
        self.pipeline = self.pipeline.with_observer(observer);
        self
    }

    /// Applies `edit` to the categories of an existing list, then stamps and
    /// saves it.
    pub(crate) async fn modify_list<T, F>(&self, name: &str, edit: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Category>) -> Result<T>,
    {
        let mut state = self.store.load().await?;
        let categories = state
            .lists
            .get_mut(name)
            .ok_or_else(|| TasqeError::ListNotFound {
                name: name.to_string(),
            })?;

        let value = edit(categories)?;
        state.touch(name, ListStore::now_millis());
        self.store.save(&state).await?;
        Ok(value)
    }
}
