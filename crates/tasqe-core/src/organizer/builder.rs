//! Builder for creating and configuring Organizer instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::debug;

use super::Organizer;
use crate::{
    client::{ClientConfig, HttpTransport, ModelTransport},
    error::{Result, TasqeError},
    store::{KeyValueStore, ListStore, MemoryStore, SqliteStore},
};

/// Builder for creating and configuring Organizer instances.
#[derive(Clone, Default)]
pub struct OrganizerBuilder {
    database_path: Option<PathBuf>,
    store: Option<Arc<dyn KeyValueStore>>,
    transport: Option<Arc<dyn ModelTransport>>,
    config: ClientConfig,
}

impl OrganizerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/tasqe/tasqe.db` or `~/.local/share/tasqe/tasqe.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Uses an already constructed key-value store instead of SQLite.
    pub fn with_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Keeps everything in memory; nothing is written to disk.
    pub fn in_memory(self) -> Self {
        self.with_store(Arc::new(MemoryStore::new()))
    }

    /// Replaces the HTTP transport, e.g. with a scripted fake in tests.
    pub fn with_transport(mut self, transport: Arc<dyn ModelTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_client_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the configured organizer instance.
    ///
    /// # Errors
    ///
    /// Returns `TasqeError::XdgDirectory` if no default path can be resolved,
    /// `TasqeError::FileSystem` or `TasqeError::Database` if the SQLite store
    /// cannot be opened, and `TasqeError::Configuration` if the HTTP client
    /// cannot be built.
    pub async fn build(self) -> Result<Organizer> {
        let store: Arc<dyn KeyValueStore> = match self.store {
            Some(store) => store,
            None => {
                let db_path = match self.database_path {
                    Some(path) => path,
                    None => Self::default_database_path()?,
                };
                debug!("Opening store at {}", db_path.display());
                Arc::new(SqliteStore::open(db_path).await?)
            }
        };

        let transport: Arc<dyn ModelTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&self.config)?),
        };

        Ok(Organizer::new(ListStore::new(store), transport, self.config))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("tasqe")
            .place_data_file("tasqe.db")
            .map_err(|e| TasqeError::XdgDirectory(e.to_string()))
    }
}
