//! Data models for to-do documents and stored lists.
//!
//! A list is a named, ordered sequence of [`Category`] values; each category
//! owns its [`Task`]s and each task owns its [`Subtask`]s. Only tasks carry due
//! dates. Display implementations live in [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use tasqe_core::models::{Category, Task, TodoDocument};
//!
//! let doc = TodoDocument::from(vec![Category::new(
//!     "Health",
//!     vec![Task::named("Run")],
//! )]);
//! assert_eq!(doc.task_count(), 1);
//! ```

pub mod list;
pub mod normalize;
pub mod todo;

#[cfg(test)]
mod tests;

pub use list::{
    ListSummary, MergeMode, Preferences, TaskPath, TodoList, UpcomingGroup, DEFAULT_LIST_NAME,
};
pub use normalize::normalize_categories;
pub use todo::{Category, Subtask, Task, TodoDocument};
