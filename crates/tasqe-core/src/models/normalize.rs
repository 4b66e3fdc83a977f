//! Lenient conversion of loosely shaped JSON into categories.
//!
//! Used only for imported files. Model output goes through
//! [`crate::schema::validate`] and stored lists are read back strictly.

use jiff::civil::Date;
use serde_json::Value;

use super::{Category, Subtask, Task};

/// Normalizes an arbitrary JSON value into a list of categories.
///
/// Non-array input yields no categories. Categories without a non-blank name
/// are dropped and names are trimmed. Missing task and subtask fields take
/// defaults, a `done` that is not a boolean becomes `false`, and a `date` that
/// is not a valid `YYYY-MM-DD` string is discarded.
pub fn normalize_categories(raw: &Value) -> Vec<Category> {
    let Some(categories) = raw.as_array() else {
        return Vec::new();
    };

    categories
        .iter()
        .filter_map(|cat| {
            let name = cat.get("name")?.as_str()?.trim();
            if name.is_empty() {
                return None;
            }
            let items = cat
                .get("items")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(normalize_task).collect())
                .unwrap_or_default();
            Some(Category::new(name, items))
        })
        .collect()
}

fn normalize_task(raw: &Value) -> Task {
    Task {
        name: string_field(raw, "name"),
        descr: raw
            .get("descr")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(String::from),
        time: string_field(raw, "time"),
        date: raw
            .get("date")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<Date>().ok()),
        done: bool_field(raw, "done"),
        subtasks: raw
            .get("subtasks")
            .and_then(Value::as_array)
            .map(|subs| subs.iter().map(normalize_subtask).collect()),
    }
}

fn normalize_subtask(raw: &Value) -> Subtask {
    Subtask {
        name: string_field(raw, "name"),
        time: string_field(raw, "time"),
        done: bool_field(raw, "done"),
    }
}

fn string_field(raw: &Value, key: &str) -> String {
    raw.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn bool_field(raw: &Value, key: &str) -> bool {
    raw.get(key).and_then(Value::as_bool).unwrap_or(false)
}
