use super::*;
use serde_json::json;

#[test]
fn profile_without_tasks_gets_starter_tasks() {
    let profile: Profile = serde_json::from_value(json!({"id": "u1", "fullname": "Ann"})).unwrap();
    let tasks = profile.tasks_or_starter();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].task, "Complete profile update");
    assert!(profile.notes_or_empty().is_empty());
}

#[test]
fn stored_empty_task_list_is_kept() {
    let profile: Profile = serde_json::from_value(json!({"id": "u1", "tasks": []})).unwrap();
    assert!(profile.tasks_or_starter().is_empty());
}

#[test]
fn archive_view_splits_entries() {
    let notes = vec![
        Note { id: 1, note: "a".into(), archived: false },
        Note { id: 2, note: "b".into(), archived: true },
    ];
    let active: Vec<i64> = ArchiveView::Active.filter(&notes).iter().map(|n| n.id).collect();
    let archived: Vec<i64> = ArchiveView::Archived.filter(&notes).iter().map(|n| n.id).collect();
    assert_eq!(active, vec![1]);
    assert_eq!(archived, vec![2]);
}

#[test]
fn task_round_trips_json_column_shape() {
    let task: Task = serde_json::from_value(json!({"id": 3, "task": "Call", "completed": true})).unwrap();
    assert!(task.completed);
    assert!(!task.archived);
    assert_eq!(serde_json::to_value(&task).unwrap()["task"], json!("Call"));
}
