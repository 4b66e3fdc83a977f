//! Task-level edits inside a list. Every edit stamps the list as modified.

use log::debug;

use super::Organizer;
use crate::{
    error::{Result, TasqeError},
    models::{Category, Subtask, Task, TaskPath},
    params::{list_or_default, parse_date, zero_based, AddSubtask, AddTask, CategoryLocation, TaskLocation},
    store::ListStore,
};

impl Organizer {
    /// Adds a task, creating the list and the category when missing.
    ///
    /// The category is matched ignoring case, like an append merge.
    pub async fn add_task(&self, params: &AddTask) -> Result<TaskPath> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(TasqeError::invalid_input("name").with_reason("task name must not be empty"));
        }
        let category_name = params.category.trim();
        if category_name.is_empty() {
            return Err(
                TasqeError::invalid_input("category").with_reason("category name must not be empty")
            );
        }

        let task = Task {
            name: name.to_string(),
            descr: params
                .descr
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(String::from),
            time: params.time.as_deref().unwrap_or_default().trim().to_string(),
            date: parse_date("date", params.date.as_deref())?,
            done: false,
            subtasks: None,
        };

        let list_name = list_or_default(params.list.as_deref());
        let mut state = self.store.load().await?;
        let categories = state.lists.entry(list_name.clone()).or_default();

        let key = category_name.to_lowercase();
        let category = match categories.iter().position(|c| c.name.to_lowercase() == key) {
            Some(index) => index,
            None => {
                categories.push(Category::new(category_name, Vec::new()));
                categories.len() - 1
            }
        };
        categories[category].items.push(task);
        let path = TaskPath::task(category, categories[category].items.len() - 1);

        state.touch(&list_name, ListStore::now_millis());
        self.store.save(&state).await?;
        debug!("Added task to '{list_name}' at {path:?}");
        Ok(path)
    }

    /// Appends a subtask to an existing task.
    pub async fn add_subtask(&self, params: &AddSubtask) -> Result<TaskPath> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(
                TasqeError::invalid_input("name").with_reason("subtask name must not be empty")
            );
        }
        let category = zero_based("category", params.category)?;
        let task = zero_based("task", params.task)?;
        let subtask = Subtask {
            name: name.to_string(),
            time: params.time.as_deref().unwrap_or_default().trim().to_string(),
            done: false,
        };

        self.modify_list(&params.list, |categories| {
            let target = task_mut(&params.list, categories, TaskPath::task(category, task))?;
            let subtasks = target.subtasks.get_or_insert_with(Vec::new);
            subtasks.push(subtask);
            Ok(TaskPath::subtask(category, task, subtasks.len() - 1))
        })
        .await
    }

    /// Flips the done flag of a task or subtask, returning the new value.
    pub async fn toggle_done(&self, params: &TaskLocation) -> Result<bool> {
        let path = params.path()?;
        self.modify_list(&params.list, |categories| {
            let task = task_mut(&params.list, categories, path)?;
            match path.subtask {
                None => {
                    task.done = !task.done;
                    Ok(task.done)
                }
                Some(index) => {
                    let subtask = task
                        .subtasks
                        .as_mut()
                        .and_then(|s| s.get_mut(index))
                        .ok_or_else(|| not_found(&params.list, path))?;
                    subtask.done = !subtask.done;
                    Ok(subtask.done)
                }
            }
        })
        .await
    }

    /// Removes a task, or one of its subtasks, returning the removed name.
    pub async fn remove_task(&self, params: &TaskLocation) -> Result<String> {
        let path = params.path()?;
        self.modify_list(&params.list, |categories| match path.subtask {
            None => {
                let category = category_mut(&params.list, categories, path.category)?;
                if path.task >= category.items.len() {
                    return Err(not_found(&params.list, path));
                }
                Ok(category.items.remove(path.task).name)
            }
            Some(index) => {
                let task = task_mut(&params.list, categories, path)?;
                let subtasks = task
                    .subtasks
                    .as_mut()
                    .filter(|s| index < s.len())
                    .ok_or_else(|| not_found(&params.list, path))?;
                let removed = subtasks.remove(index);
                if subtasks.is_empty() {
                    task.subtasks = None;
                }
                Ok(removed.name)
            }
        })
        .await
    }

    /// Removes a category together with its tasks.
    pub async fn remove_category(&self, params: &CategoryLocation) -> Result<Category> {
        let index = zero_based("category", params.category)?;
        self.modify_list(&params.list, |categories| {
            category_mut(&params.list, categories, index)?;
            Ok(categories.remove(index))
        })
        .await
    }
}

fn category_mut<'a>(
    list: &str,
    categories: &'a mut [Category],
    index: usize,
) -> Result<&'a mut Category> {
    categories
        .get_mut(index)
        .ok_or_else(|| TasqeError::CategoryNotFound {
            list: list.to_string(),
            category: format!("#{}", index + 1),
        })
}

fn task_mut<'a>(list: &str, categories: &'a mut [Category], path: TaskPath) -> Result<&'a mut Task> {
    category_mut(list, categories, path.category)?
        .items
        .get_mut(path.task)
        .ok_or_else(|| not_found(list, path))
}

fn not_found(list: &str, path: TaskPath) -> TasqeError {
    let position = match path.subtask {
        Some(subtask) => format!("{}.{}.{}", path.category + 1, path.task + 1, subtask + 1),
        None => format!("{}.{}", path.category + 1, path.task + 1),
    };
    TasqeError::TaskNotFound {
        list: list.to_string(),
        position,
    }
}
