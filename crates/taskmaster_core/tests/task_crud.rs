use std::collections::HashSet;
use taskmaster_core::{
    LocalStore, NotifyState, Priority, SortOrder, SqliteLocalStore, Task, TaskDraft, TaskPatch,
    TaskStore, TaskStoreError,
};
use uuid::Uuid;

const EMAIL: &str = "a@x.com";

fn open_store() -> TaskStore<SqliteLocalStore> {
    TaskStore::open(SqliteLocalStore::open_in_memory().unwrap(), EMAIL).unwrap()
}

fn draft(detail: &str, reminder_date: i64, priority: Priority) -> TaskDraft {
    TaskDraft {
        detail: detail.to_string(),
        event_date: reminder_date,
        reminder_date,
        priority,
    }
}

#[test]
fn add_produces_unique_ids_and_fresh_flags() {
    let mut store = open_store();

    let mut ids = HashSet::new();
    for index in 0..5 {
        let task = store
            .add(draft(&format!("task {index}"), 1_000, Priority::Medium))
            .unwrap();
        assert!(!task.is_completed);
        assert_eq!(task.notify_state, NotifyState::Pending);
        assert!(ids.insert(task.id), "id reused: {}", task.id);
    }
}

#[test]
fn add_prepends_newest_first() {
    let mut store = open_store();

    let first = store.add(draft("first", 1_000, Priority::Low)).unwrap();
    let second = store.add(draft("second", 1_000, Priority::Low)).unwrap();

    let ids: Vec<_> = store.tasks().iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[test]
fn add_rejects_blank_detail_without_storing() {
    let mut store = open_store();

    let err = store.add(draft("   ", 1_000, Priority::High)).unwrap_err();
    assert!(matches!(err, TaskStoreError::Validation(_)));
    assert!(store.tasks().is_empty());
}

#[test]
fn empty_patch_is_a_no_op() {
    let mut store = open_store();
    let task = store.add(draft("stable", 1_000, Priority::High)).unwrap();

    store.update(task.id, &TaskPatch::default()).unwrap();

    assert_eq!(store.tasks(), &[task]);
}

#[test]
fn update_merges_fields() {
    let mut store = open_store();
    let task = store.add(draft("old text", 1_000, Priority::Low)).unwrap();

    let patch = TaskPatch {
        detail: Some("new text".to_string()),
        priority: Some(Priority::High),
        ..TaskPatch::default()
    };
    store.update(task.id, &patch).unwrap();

    let updated = &store.tasks()[0];
    assert_eq!(updated.detail, "new text");
    assert_eq!(updated.priority, Priority::High);
    assert_eq!(updated.reminder_date, 1_000);
    assert_eq!(updated.id, task.id);
}

#[test]
fn update_unknown_id_is_a_silent_no_op() {
    let mut store = open_store();
    let task = store.add(draft("kept", 1_000, Priority::Low)).unwrap();

    let patch = TaskPatch {
        detail: Some("ignored".to_string()),
        ..TaskPatch::default()
    };
    store.update(Uuid::new_v4(), &patch).unwrap();

    assert_eq!(store.tasks(), &[task]);
}

#[test]
fn invalid_merge_is_rolled_back() {
    let mut store = open_store();
    let task = store.add(draft("ranged", 1_000, Priority::Low)).unwrap();

    // Reminder pushed past the event time.
    let patch = TaskPatch {
        reminder_date: Some(9_000),
        ..TaskPatch::default()
    };
    let err = store.update(task.id, &patch).unwrap_err();
    assert!(matches!(err, TaskStoreError::Validation(_)));
    assert_eq!(store.tasks(), &[task]);
}

#[test]
fn delete_removes_only_the_matching_task() {
    let mut store = open_store();
    let keep = store.add(draft("keep", 1_000, Priority::Low)).unwrap();
    let remove = store.add(draft("remove", 1_000, Priority::Low)).unwrap();

    store.delete(remove.id).unwrap();

    assert_eq!(store.tasks(), &[keep]);
}

#[test]
fn delete_unknown_id_leaves_collection_unchanged() {
    let mut store = open_store();
    let task = store.add(draft("kept", 1_000, Priority::Low)).unwrap();

    store.delete(Uuid::new_v4()).unwrap();

    assert_eq!(store.tasks(), &[task]);
}

#[test]
fn replace_all_overwrites_the_collection() {
    let mut store = open_store();
    store.add(draft("old", 1_000, Priority::Low)).unwrap();

    let imported = vec![
        Task::from_draft(draft("imported a", 1_000, Priority::High)).unwrap(),
        Task::from_draft(draft("imported b", 2_000, Priority::Low)).unwrap(),
    ];
    store.replace_all(imported.clone()).unwrap();

    assert_eq!(store.tasks(), imported.as_slice());
}

#[test]
fn toggle_completed_flips_without_resetting_notify_state() {
    let store_backend = SqliteLocalStore::open_in_memory().unwrap();
    let mut store = TaskStore::open(store_backend, EMAIL).unwrap();

    let task = store.add(draft("flip me", 1_000, Priority::Low)).unwrap();
    store.mark_notified(task.id).unwrap();

    store.toggle_completed(task.id).unwrap();
    assert!(store.tasks()[0].is_completed);
    assert_eq!(store.tasks()[0].notify_state, NotifyState::Notified);

    store.toggle_completed(task.id).unwrap();
    assert!(!store.tasks()[0].is_completed);
    assert_eq!(store.tasks()[0].notify_state, NotifyState::Notified);
}

#[test]
fn collection_round_trips_across_reopen() {
    let backend = SqliteLocalStore::open_in_memory().unwrap();

    let mut store = TaskStore::open(backend.clone(), EMAIL).unwrap();
    let a = store.add(draft("first", 1_000, Priority::High)).unwrap();
    let b = store.add(draft("second", 2_000, Priority::Low)).unwrap();

    let reopened = TaskStore::open(backend, EMAIL).unwrap();
    assert_eq!(reopened.tasks(), &[b, a]);
}

#[test]
fn legacy_records_gain_event_date_on_load() {
    let backend = SqliteLocalStore::open_in_memory().unwrap();
    backend
        .write(
            "tasks_a@x.com",
            r#"[{
                "id": "7f8f2f9e-54f3-4f22-9a53-0d8f17a3f3a1",
                "detail": "legacy",
                "reminderDate": 1700000000000,
                "priority": "Medium",
                "isCompleted": false,
                "notified": false
            }]"#,
        )
        .unwrap();

    let store = TaskStore::open(backend, EMAIL).unwrap();
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].event_date, 1_700_000_000_000);
    assert_eq!(store.tasks()[0].reminder_date, 1_700_000_000_000);
}

#[test]
fn corrupt_stored_collection_degrades_to_empty() {
    let backend = SqliteLocalStore::open_in_memory().unwrap();
    backend.write("tasks_a@x.com", "{definitely not json").unwrap();

    let store = TaskStore::open(backend, EMAIL).unwrap();
    assert!(store.tasks().is_empty());
}

#[test]
fn task_collections_are_partitioned_by_email() {
    let backend = SqliteLocalStore::open_in_memory().unwrap();

    let mut store_a = TaskStore::open(backend.clone(), "a@x.com").unwrap();
    store_a.add(draft("mine", 1_000, Priority::Low)).unwrap();

    let store_b = TaskStore::open(backend, "b@x.com").unwrap();
    assert!(store_b.tasks().is_empty());
}

#[test]
fn priority_sort_is_stable_high_medium_low() {
    let mut store = open_store();

    // Insertion order (collection is newest-first, so listed reversed).
    let low_a = store.add(draft("low a", 1_000, Priority::Low)).unwrap();
    let high_a = store.add(draft("high a", 1_000, Priority::High)).unwrap();
    let medium = store.add(draft("medium", 1_000, Priority::Medium)).unwrap();
    let high_b = store.add(draft("high b", 1_000, Priority::High)).unwrap();

    let sorted = store.sorted(SortOrder::Priority);
    let ids: Vec<_> = sorted.iter().map(|task| task.id).collect();
    // Newest-first order within each priority bucket is preserved.
    assert_eq!(ids, vec![high_b.id, high_a.id, medium.id, low_a.id]);
}

#[test]
fn date_sorts_order_by_reminder_time() {
    let mut store = open_store();

    let late = store.add(draft("late", 3_000, Priority::Low)).unwrap();
    let early = store.add(draft("early", 1_000, Priority::Low)).unwrap();
    let middle = store.add(draft("middle", 2_000, Priority::Low)).unwrap();

    let asc: Vec<_> = store
        .sorted(SortOrder::DateAsc)
        .iter()
        .map(|task| task.id)
        .collect();
    assert_eq!(asc, vec![early.id, middle.id, late.id]);

    let desc: Vec<_> = store
        .sorted(SortOrder::DateDesc)
        .iter()
        .map(|task| task.id)
        .collect();
    assert_eq!(desc, vec![late.id, middle.id, early.id]);
}

#[test]
fn status_sort_puts_open_tasks_first() {
    let mut store = open_store();

    let done = store.add(draft("done", 1_000, Priority::Low)).unwrap();
    let open = store.add(draft("open", 1_000, Priority::Low)).unwrap();
    store.toggle_completed(done.id).unwrap();

    let ids: Vec<_> = store
        .sorted(SortOrder::Status)
        .iter()
        .map(|task| task.id)
        .collect();
    assert_eq!(ids, vec![open.id, done.id]);
}
