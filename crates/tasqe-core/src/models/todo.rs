//! To-do document model: categories, tasks and subtasks.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Undated sub-step of a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subtask {
    /// Short name of the subtask
    pub name: String,

    /// Free-form time estimate ("15 mins")
    pub time: String,

    /// Completion flag
    pub done: bool,
}

/// Schedulable item with optional due date, estimate and subtasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Short name of the task
    pub name: String,

    /// Optional longer description
    pub descr: Option<String>,

    /// Free-form time estimate ("2 hrs")
    pub time: String,

    /// Due date, serialized as `YYYY-MM-DD`
    pub date: Option<Date>,

    /// Completion flag
    pub done: bool,

    /// Ordered subtasks, `None` when the task has none
    pub subtasks: Option<Vec<Subtask>>,
}

impl Task {
    /// Creates an open task with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descr: None,
            time: String::new(),
            date: None,
            done: false,
            subtasks: None,
        }
    }

    /// Subtasks as a slice, empty when none are present.
    pub fn subtasks(&self) -> &[Subtask] {
        self.subtasks.as_deref().unwrap_or(&[])
    }
}

/// Broad grouping label ("Health", "Academics") holding tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Display name of the category
    pub name: String,

    /// Tasks in display order
    pub items: Vec<Task>,
}

impl Category {
    /// Creates a category with the given tasks.
    pub fn new(name: impl Into<String>, items: Vec<Task>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }

    /// Number of tasks marked done.
    pub fn done_count(&self) -> usize {
        self.items.iter().filter(|t| t.done).count()
    }
}

/// Validated root structure produced by the structuring stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TodoDocument {
    pub todo: Vec<Category>,
}

impl TodoDocument {
    /// Total number of tasks across all categories.
    pub fn task_count(&self) -> usize {
        self.todo.iter().map(|c| c.items.len()).sum()
    }

    /// Consumes the document, returning its categories.
    pub fn into_categories(self) -> Vec<Category> {
        self.todo
    }
}

impl From<Vec<Category>> for TodoDocument {
    fn from(todo: Vec<Category>) -> Self {
        Self { todo }
    }
}
