use jiff::civil::date;
use serde_json::json;

use super::*;

fn sample_task() -> Task {
    Task {
        name: "Doctor's Visit".to_string(),
        descr: Some("Go to SHCC".to_string()),
        time: "15 mins".to_string(),
        date: Some(date(2025, 9, 12)),
        done: false,
        subtasks: Some(vec![Subtask {
            name: "Drive to doctor's".to_string(),
            time: "5 mins".to_string(),
            done: true,
        }]),
    }
}

#[test]
fn test_task_serializes_canonical_shape() {
    let value = serde_json::to_value(sample_task()).unwrap();
    assert_eq!(value["date"], json!("2025-09-12"));
    assert_eq!(value["subtasks"][0]["done"], json!(true));

    let bare = serde_json::to_value(Task::named("Run")).unwrap();
    assert!(bare["descr"].is_null());
    assert!(bare["date"].is_null());
    assert!(bare["subtasks"].is_null());
}

#[test]
fn test_merge_mode_from_str() {
    assert_eq!("append".parse::<MergeMode>().unwrap(), MergeMode::Append);
    assert_eq!("REPLACE".parse::<MergeMode>().unwrap(), MergeMode::Replace);
    assert!("merge".parse::<MergeMode>().is_err());
    assert_eq!(MergeMode::default(), MergeMode::Replace);
}

#[test]
fn test_list_summary_counts() {
    let mut done = Task::named("Stretch");
    done.done = true;
    let categories = vec![
        Category::new("Health", vec![sample_task(), done]),
        Category::new("Work", vec![Task::named("Email")]),
    ];
    let summary = ListSummary::new("Week", &categories, true, None);
    assert_eq!(summary.category_count, 2);
    assert_eq!(summary.task_count, 3);
    assert_eq!(summary.done_count, 1);
    assert!(summary.favorite);
}

#[test]
fn test_upcoming_group_earliest() {
    let mut later = Task::named("Later");
    later.date = Some(date(2025, 9, 20));
    let group = UpcomingGroup {
        list_name: "Week".to_string(),
        category_name: "Health".to_string(),
        items: vec![later, sample_task(), Task::named("Undated")],
    };
    assert_eq!(group.earliest(), Some(date(2025, 9, 12)));
}

#[test]
fn test_normalize_fills_defaults_and_drops_nameless() {
    let raw = json!([
        { "name": "  Health ", "items": [
            { "name": "Workout", "descr": "Get swole", "time": "45 mins", "done": "False" },
            { "name": "Checkup", "date": "2025-10-01", "done": true,
              "subtasks": [ { "name": "Call", "done": "True" } ] }
        ] },
        { "name": "   ", "items": [] },
        { "items": [] },
        { "name": "Empty" }
    ]);

    let categories = normalize_categories(&raw);
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "Health");
    assert_eq!(categories[1].name, "Empty");
    assert!(categories[1].items.is_empty());

    let workout = &categories[0].items[0];
    assert!(!workout.done);
    assert_eq!(workout.descr.as_deref(), Some("Get swole"));
    assert_eq!(workout.date, None);
    assert_eq!(workout.subtasks, None);

    let checkup = &categories[0].items[1];
    assert!(checkup.done);
    assert_eq!(checkup.date, Some(date(2025, 10, 1)));
    assert_eq!(checkup.time, "");
    let subtask = &checkup.subtasks()[0];
    assert_eq!(subtask.name, "Call");
    assert!(!subtask.done);
}

#[test]
fn test_normalize_non_array_is_empty() {
    assert!(normalize_categories(&json!({ "todo": [] })).is_empty());
    assert!(normalize_categories(&json!(null)).is_empty());
}
