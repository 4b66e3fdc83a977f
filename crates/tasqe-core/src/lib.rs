//! Core library for tasqe: natural-language week descriptions in, structured
//! to-do lists out.
//!
//! A query flows through the injection [`filter`], then the two-stage
//! [`pipeline`] (prose to markdown outline, outline to schema-validated JSON)
//! driven through the [`client`], and the accepted document is reconciled
//! with a stored list by the [`merge`] engine. Lists live in a [`store`]
//! behind an async key-value interface.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tasqe_core::{params::GenerateTodo, GenerateOutcome, OrganizerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let organizer = OrganizerBuilder::new()
//!     .with_database_path(Some("tasqe.db"))
//!     .build()
//!     .await?;
//!
//! organizer.set_api_key("sk-...").await?;
//!
//! let outcome = organizer
//!     .generate_todo(&GenerateTodo {
//!         text: "Gym Monday and Thursday, physics exam Friday".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! if let GenerateOutcome::Merged { report, .. } = &outcome {
//!     println!("Saved to {}", report.list_name);
//! }
//! println!("{}", organizer.list_summaries().await?);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod display;
pub mod error;
pub mod filter;
pub mod merge;
pub mod models;
pub mod organizer;
pub mod params;
pub mod pipeline;
pub mod prompts;
pub mod schema;
pub mod store;

// Re-export commonly used types
pub use client::{ClientConfig, HttpTransport, ModelClient, ModelTransport};
pub use display::{ListSummaries, OperationStatus, QueryHistory, UpcomingTasks};
pub use error::{Result, TasqeError};
pub use filter::is_injection_like;
pub use merge::{MergeEngine, MergeReport};
pub use models::{
    Category, ListSummary, MergeMode, Subtask, Task, TaskPath, TodoDocument, TodoList,
    DEFAULT_LIST_NAME,
};
pub use organizer::{GenerateOutcome, Organizer, OrganizerBuilder};
pub use pipeline::{Pipeline, PipelineOutcome, PipelineState, Rejection};
pub use schema::validate;
pub use store::{KeyValueStore, ListStore, MemoryStore, SqliteStore};
