//! Merge engine: reconciles accepted categories with a stored list.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    models::{Category, MergeMode},
    store::ListStore,
};

/// What a [`MergeEngine::apply`] call changed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MergeReport {
    pub list_name: String,
    pub mode: MergeMode,

    /// The list did not exist before this merge
    pub created: bool,

    /// Categories added as new entries (all of them in replace mode)
    pub categories_added: usize,

    /// Tasks appended into categories that already existed
    pub tasks_appended: usize,
}

/// Applies accepted results to lists in a [`ListStore`].
///
/// Each apply is a read-modify-write of the whole list collection with no
/// concurrency control.
#[derive(Clone)]
pub struct MergeEngine {
    store: ListStore,
}

impl MergeEngine {
    pub fn new(store: ListStore) -> Self {
        Self { store }
    }

    /// Merges `incoming` into `list_name` and stamps the list as modified.
    ///
    /// A list that does not exist yet is created in either mode, without a
    /// favorite flag.
    pub async fn apply(
        &self,
        list_name: &str,
        incoming: Vec<Category>,
        mode: MergeMode,
    ) -> Result<MergeReport> {
        let mut state = self.store.load().await?;
        let existing = state.lists.remove(list_name);
        let created = existing.is_none();

        let (merged, categories_added, tasks_appended) = match mode {
            MergeMode::Replace => {
                let added = incoming.len();
                (incoming, added, 0)
            }
            MergeMode::Append => {
                let mut categories = existing.unwrap_or_default();
                let (added, appended) = merge_categories(&mut categories, incoming);
                (categories, added, appended)
            }
        };

        state.lists.insert(list_name.to_string(), merged);
        state.touch(list_name, ListStore::now_millis());
        self.store.save(&state).await?;

        info!(
            "Merged into list '{list_name}' ({}): {categories_added} new categories, {tasks_appended} appended tasks",
            mode.as_str()
        );

        Ok(MergeReport {
            list_name: list_name.to_string(),
            mode,
            created,
            categories_added,
            tasks_appended,
        })
    }
}

/// Append-merges `incoming` into `existing` in place.
///
/// Each incoming category joins the first existing category with the same
/// name ignoring case; its tasks go after the existing ones. Unmatched
/// categories are pushed at the end. Tasks are never deduplicated.
///
/// Returns `(categories_added, tasks_appended)`.
pub fn merge_categories(existing: &mut Vec<Category>, incoming: Vec<Category>) -> (usize, usize) {
    let mut categories_added = 0;
    let mut tasks_appended = 0;

    for category in incoming {
        let key = category.name.to_lowercase();
        match existing.iter_mut().find(|c| c.name.to_lowercase() == key) {
            Some(target) => {
                debug!(
                    "Appending {} tasks into category '{}'",
                    category.items.len(),
                    target.name
                );
                tasks_appended += category.items.len();
                target.items.extend(category.items);
            }
            None => {
                categories_added += 1;
                existing.push(category);
            }
        }
    }

    (categories_added, tasks_appended)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{models::Task, schema::validate};

    fn names(category: &Category) -> Vec<&str> {
        category.items.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_append_matches_category_ignoring_case() {
        let mut existing = vec![Category::new("Fitness", vec![Task::named("Run")])];
        let incoming = vec![Category::new("fitness", vec![Task::named("Stretch")])];

        assert_eq!(merge_categories(&mut existing, incoming), (0, 1));
        assert_eq!(existing.len(), 1);
        assert_eq!(existing[0].name, "Fitness");
        assert_eq!(names(&existing[0]), vec!["Run", "Stretch"]);
    }

    #[test]
    fn test_append_uses_first_match_and_pushes_unknown() {
        let mut existing = vec![
            Category::new("work", vec![Task::named("Email")]),
            Category::new("WORK", vec![]),
        ];
        let incoming = vec![
            Category::new("Work", vec![Task::named("Report")]),
            Category::new("Errands", vec![Task::named("Groceries")]),
        ];

        assert_eq!(merge_categories(&mut existing, incoming), (1, 1));
        assert_eq!(names(&existing[0]), vec!["Email", "Report"]);
        assert!(existing[1].items.is_empty());
        assert_eq!(existing[2].name, "Errands");
    }

    #[test]
    fn test_append_keeps_duplicate_tasks() {
        let mut existing = vec![Category::new("Chores", vec![Task::named("Laundry")])];
        merge_categories(
            &mut existing,
            vec![Category::new("Chores", vec![Task::named("Laundry")])],
        );
        assert_eq!(names(&existing[0]), vec!["Laundry", "Laundry"]);
    }

    #[tokio::test]
    async fn test_replace_creates_new_list_with_timestamp() {
        let store = ListStore::in_memory();
        let engine = MergeEngine::new(store.clone());
        let incoming = vec![Category::new("Academics", vec![Task::named("Essay")])];

        let report = engine
            .apply("Week 3", incoming.clone(), MergeMode::Replace)
            .await
            .unwrap();
        assert!(report.created);
        assert_eq!(report.categories_added, 1);

        let state = store.load().await.unwrap();
        assert_eq!(state.lists["Week 3"], incoming);
        assert!(state.updated_at("Week 3").is_some());
        assert!(!state.favorites.contains("Week 3"));
    }

    #[tokio::test]
    async fn test_replace_overwrites_and_append_extends() {
        let store = ListStore::in_memory();
        let engine = MergeEngine::new(store.clone());
        engine
            .apply(
                "Health",
                vec![Category::new("Fitness", vec![Task::named("Run")])],
                MergeMode::Replace,
            )
            .await
            .unwrap();

        let report = engine
            .apply(
                "Health",
                vec![Category::new("fitness", vec![Task::named("Stretch")])],
                MergeMode::Append,
            )
            .await
            .unwrap();
        assert!(!report.created);
        assert_eq!(report.tasks_appended, 1);
        let list = store.list("Health").await.unwrap().unwrap();
        assert_eq!(names(&list[0]), vec!["Run", "Stretch"]);

        engine
            .apply(
                "Health",
                vec![Category::new("Sleep", vec![])],
                MergeMode::Replace,
            )
            .await
            .unwrap();
        let list = store.list("Health").await.unwrap().unwrap();
        assert_eq!(list, vec![Category::new("Sleep", vec![])]);
    }

    #[tokio::test]
    async fn test_replace_stores_validated_document_unchanged() {
        let task = |name: &str| {
            json!({
                "name": name,
                "descr": "",
                "time": "10 mins",
                "date": null,
                "done": false,
                "subtasks": null
            })
        };
        let doc = validate(&json!({
            "todo": [
                { "name": "", "items": [task("Call mom")] },
                { "name": " Work ", "items": [task("Report")] }
            ]
        }))
        .unwrap();

        let store = ListStore::in_memory();
        MergeEngine::new(store.clone())
            .apply("L", doc.todo.clone(), MergeMode::Replace)
            .await
            .unwrap();

        let stored = store.list("L").await.unwrap().unwrap();
        assert_eq!(stored, doc.todo);
        assert_eq!(stored[0].name, "");
        assert_eq!(stored[1].name, " Work ");
        assert_eq!(stored[1].items[0].descr.as_deref(), Some(""));
    }
}
