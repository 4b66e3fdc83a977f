//! List-level models: summaries, merge policy and task addressing.

use std::str::FromStr;

use jiff::{civil::Date, Timestamp};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Category, Task};

/// Name used when a result is accepted without choosing a target list.
pub const DEFAULT_LIST_NAME: &str = "To Do List";

/// Policy for reconciling incoming categories with an existing list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// Overwrite the list's categories wholesale
    #[default]
    Replace,

    /// Union categories by case-insensitive name, appending tasks
    Append,
}

impl FromStr for MergeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "replace" => Ok(MergeMode::Replace),
            "append" => Ok(MergeMode::Append),
            _ => Err(format!("Invalid merge mode: {s}")),
        }
    }
}

impl MergeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeMode::Replace => "replace",
            MergeMode::Append => "append",
        }
    }
}

/// Compact view of a stored list for sidebar-style listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListSummary {
    pub name: String,
    pub favorite: bool,

    /// Last modification, absent for lists that predate timestamping
    pub updated_at: Option<Timestamp>,

    pub category_count: usize,
    pub task_count: usize,
    pub done_count: usize,
}

impl ListSummary {
    /// Summarizes a list's categories.
    pub fn new(
        name: impl Into<String>,
        categories: &[Category],
        favorite: bool,
        updated_at: Option<Timestamp>,
    ) -> Self {
        Self {
            name: name.into(),
            favorite,
            updated_at,
            category_count: categories.len(),
            task_count: categories.iter().map(|c| c.items.len()).sum(),
            done_count: categories.iter().map(Category::done_count).sum(),
        }
    }
}

/// A stored list with its metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TodoList {
    pub name: String,
    pub favorite: bool,
    pub updated_at: Option<Timestamp>,
    pub categories: Vec<Category>,
}

impl TodoList {
    pub fn summary(&self) -> ListSummary {
        ListSummary::new(
            self.name.clone(),
            &self.categories,
            self.favorite,
            self.updated_at,
        )
    }
}

/// Zero-based position of a task (and optionally one of its subtasks) in a list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskPath {
    pub category: usize,
    pub task: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtask: Option<usize>,
}

impl TaskPath {
    pub fn task(category: usize, task: usize) -> Self {
        Self {
            category,
            task,
            subtask: None,
        }
    }

    pub fn subtask(category: usize, task: usize, subtask: usize) -> Self {
        Self {
            category,
            task,
            subtask: Some(subtask),
        }
    }
}

/// Dated tasks of one category of one list, as shown by the upcoming view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpcomingGroup {
    pub list_name: String,
    pub category_name: String,
    pub items: Vec<Task>,
}

impl UpcomingGroup {
    /// Earliest due date among the group's tasks.
    pub fn earliest(&self) -> Option<Date> {
        self.items.iter().filter_map(|t| t.date).min()
    }
}

/// User preferences kept next to the lists.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Preferences {
    /// Explicit theme choice; `None` follows the system
    pub dark_mode: Option<bool>,

    /// First-time setup has been completed
    pub preferences_set: bool,

    pub has_api_key: bool,
}
