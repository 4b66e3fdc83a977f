//! Parameter structures shared by the CLI and the MCP server.
//!
//! These carry plain strings and numbers so each interface can wrap them with
//! its own derives (`clap::Args` in the CLI, `schemars::JsonSchema` through the
//! `schema` feature for MCP) and convert with `.into()`.
//!
//! Positions are 1-based, as printed by the list view; [`TaskLocation::path`]
//! converts them to a zero-based [`TaskPath`].

use jiff::civil::Date;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TasqeError},
    models::{MergeMode, TaskPath, DEFAULT_LIST_NAME},
};

/// Parameters for turning a week description into a list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct GenerateTodo {
    /// Free-form description of the week
    pub text: String,
    /// Target list; defaults to "To Do List"
    pub list: Option<String>,
    /// How to reconcile with an existing list
    #[serde(default)]
    pub mode: MergeMode,
}

/// Parameters naming a single list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListName {
    /// Name of the list
    pub name: String,
}

/// Parameters for renaming a list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RenameList {
    /// Current name
    pub from: String,
    /// New name; must not be taken by another list
    pub to: String,
}

/// Parameters for adding a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddTask {
    /// Target list; defaults to "To Do List"
    pub list: Option<String>,
    /// Category name, matched ignoring case and created when missing
    pub category: String,
    pub name: String,
    pub descr: Option<String>,
    /// Time estimate, e.g. "30 mins"
    pub time: Option<String>,
    /// Due date as YYYY-MM-DD
    pub date: Option<String>,
}

/// Parameters for adding a subtask to an existing task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddSubtask {
    pub list: String,
    /// 1-based category position
    pub category: usize,
    /// 1-based task position within the category
    pub task: usize,
    pub name: String,
    pub time: Option<String>,
}

/// Location of a task, or of a subtask when `subtask` is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TaskLocation {
    pub list: String,
    /// 1-based category position
    pub category: usize,
    /// 1-based task position within the category
    pub task: usize,
    /// 1-based subtask position within the task
    pub subtask: Option<usize>,
}

impl TaskLocation {
    /// Zero-based path for the location.
    ///
    /// # Errors
    ///
    /// Returns `TasqeError::InvalidInput` for a position of 0.
    pub fn path(&self) -> Result<TaskPath> {
        Ok(TaskPath {
            category: zero_based("category", self.category)?,
            task: zero_based("task", self.task)?,
            subtask: self
                .subtask
                .map(|s| zero_based("subtask", s))
                .transpose()?,
        })
    }
}

/// Location of a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CategoryLocation {
    pub list: String,
    /// 1-based category position
    pub category: usize,
}

/// Parameters for the upcoming-tasks view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Upcoming {
    /// Selected day as YYYY-MM-DD; today when omitted
    pub day: Option<String>,
}

/// Resolves an optional list name, falling back to the default list.
pub fn list_or_default(list: Option<&str>) -> String {
    list.map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_LIST_NAME)
        .to_string()
}

/// Converts a 1-based position to an index.
pub(crate) fn zero_based(field: &str, position: usize) -> Result<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| TasqeError::invalid_input(field).with_reason("positions start at 1"))
}

/// Parses an optional `YYYY-MM-DD` string.
pub(crate) fn parse_date(field: &str, raw: Option<&str>) -> Result<Option<Date>> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Date>().map_err(|e| {
                TasqeError::invalid_input(field).with_reason(format!("'{s}' is not a date: {e}"))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_task_location_path() {
        let location = TaskLocation {
            list: "Week".to_string(),
            category: 2,
            task: 1,
            subtask: Some(3),
        };
        assert_eq!(location.path().unwrap(), TaskPath::subtask(1, 0, 2));

        let zero = TaskLocation {
            category: 0,
            task: 1,
            ..location
        };
        assert!(matches!(
            zero.path(),
            Err(TasqeError::InvalidInput { field, .. }) if field == "category"
        ));
    }

    #[test]
    fn test_list_or_default() {
        assert_eq!(list_or_default(None), "To Do List");
        assert_eq!(list_or_default(Some("   ")), "To Do List");
        assert_eq!(list_or_default(Some(" Week 3 ")), "Week 3");
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("date", Some("2025-09-12")).unwrap(),
            Some(date(2025, 9, 12))
        );
        assert_eq!(parse_date("date", None).unwrap(), None);
        assert_eq!(parse_date("date", Some("")).unwrap(), None);
        assert!(parse_date("date", Some("2025-02-30")).is_err());
        assert!(parse_date("date", Some("next friday")).is_err());
    }
}
