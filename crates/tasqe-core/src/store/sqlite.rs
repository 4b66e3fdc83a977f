//! SQLite-backed key-value store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::{Map, Value};
use tokio::task;

use super::KeyValueStore;
use crate::error::{DatabaseResultExt, Result, TasqeError};

const SELECT_VALUE_SQL: &str = "SELECT value FROM kv WHERE key = ?1";
const UPSERT_VALUE_SQL: &str = "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";

/// SQLite connection wrapper holding the `kv` table.
struct Database {
    connection: Connection,
}

impl Database {
    /// Opens the database file and initializes the schema.
    fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    fn initialize_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")
    }

    fn get(&self, keys: &[String]) -> Result<Map<String, Value>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_VALUE_SQL)
            .db_context("Failed to prepare query")?;

        let mut found = Map::new();
        for key in keys {
            let raw: Option<String> = stmt
                .query_row(params![key], |row| row.get(0))
                .optional()
                .db_context("Failed to read key")?;
            if let Some(raw) = raw {
                found.insert(key.clone(), serde_json::from_str(&raw)?);
            }
        }
        Ok(found)
    }

    fn set(&mut self, patch: &Map<String, Value>) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();
        for (key, value) in patch {
            let raw = serde_json::to_string(value)?;
            tx.execute(UPSERT_VALUE_SQL, params![key, raw, &now])
                .db_context("Failed to write key")?;
        }

        tx.commit().db_context("Failed to commit transaction")
    }
}

/// Key-value store persisted to a single SQLite file.
///
/// Each call opens its own connection on the blocking thread pool, so the
/// store is cheap to share and never holds a connection across awaits.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    /// Opens (creating when needed) the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns `TasqeError::FileSystem` if the parent directory cannot be
    /// created, `TasqeError::Database` if schema initialization fails.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TasqeError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let init_path = db_path.clone();
        run_blocking(move || Database::new(&init_path).map(drop)).await?;

        Ok(Self { db_path })
    }

    /// Location of the database file.
    pub fn path(&self) -> &Path {
        &self.db_path
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
        let db_path = self.db_path.clone();
        let keys: Vec<String> = keys.iter().map(|k| k.to_string()).collect();

        run_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get(&keys)
        })
        .await
    }

    async fn set(&self, patch: Map<String, Value>) -> Result<()> {
        let db_path = self.db_path.clone();

        run_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.set(&patch)
        })
        .await
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(f)
        .await
        .map_err(|e| TasqeError::Store {
            message: format!("blocking task failed: {e}"),
        })?
}
