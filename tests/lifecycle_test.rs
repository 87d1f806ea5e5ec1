use chrono::NaiveDate;

use tasklist::{CreateTaskRequest, Error, Priority, TaskStore};

#[test]
fn write_report_lifecycle() {
    let store = TaskStore::open_memory().unwrap();

    let task = store
        .create(
            &CreateTaskRequest::new("Write report")
                .priority(Priority::High)
                .due_date(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()),
        )
        .unwrap();
    assert!(!task.completed);

    let pending = store.list(false).unwrap();
    assert_eq!(pending, vec![task.clone()], "new task should be pending");
    assert!(store.list(true).unwrap().is_empty());

    let done = store.mark_completed(task.id).unwrap();
    assert!(done.completed);
    assert_eq!(done.id, task.id);
    assert_eq!(done.title, task.title);
    assert_eq!(done.description, task.description);
    assert_eq!(done.priority, task.priority);
    assert_eq!(done.due_date, task.due_date);
    assert_eq!(done.created_at, task.created_at);

    assert!(store.list(false).unwrap().is_empty());
    assert_eq!(store.list(true).unwrap(), vec![done]);

    assert!(matches!(
        store.mark_completed(task.id),
        Err(Error::NotFound(id)) if id == task.id
    ));

    store.delete(task.id).unwrap();
    assert!(store.list(false).unwrap().is_empty());
    assert!(store.list(true).unwrap().is_empty());
    assert!(matches!(store.delete(task.id), Err(Error::NotFound(_))));
}

#[test]
fn tasks_survive_reopen_and_ids_stay_unique() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");

    let (kept, deleted) = {
        let store = TaskStore::open(&path).unwrap();
        let kept = store
            .create(&CreateTaskRequest::new("Buy milk").description("two pints"))
            .unwrap();
        let deleted = store.create(&CreateTaskRequest::new("Scratch")).unwrap();
        store.delete(deleted.id).unwrap();
        (kept, deleted)
    };

    let store = TaskStore::open(&path).unwrap();
    assert_eq!(store.list(false).unwrap(), vec![kept.clone()]);

    let next = store.create(&CreateTaskRequest::new("Another")).unwrap();
    assert!(next.id > deleted.id, "deleted ids must not be reused");
    assert_ne!(next.id, kept.id);
}

#[test]
fn rejected_create_leaves_store_untouched() {
    let store = TaskStore::open_memory().unwrap();
    store.create(&CreateTaskRequest::new("keep")).unwrap();

    let err = store.create(&CreateTaskRequest::new("")).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    assert_eq!(store.list(false).unwrap().len(), 1);
    assert!(store.list(true).unwrap().is_empty());
}

#[test]
fn partitions_never_overlap() {
    let store = TaskStore::open_memory().unwrap();
    let ids: Vec<i64> = (0..5)
        .map(|i| {
            store
                .create(&CreateTaskRequest::new(format!("task {i}")))
                .unwrap()
                .id
        })
        .collect();
    store.mark_completed(ids[1]).unwrap();
    store.mark_completed(ids[3]).unwrap();

    let pending: Vec<i64> = store.list(false).unwrap().iter().map(|t| t.id).collect();
    let completed: Vec<i64> = store.list(true).unwrap().iter().map(|t| t.id).collect();
    assert_eq!(pending, vec![ids[0], ids[2], ids[4]]);
    assert_eq!(completed, vec![ids[1], ids[3]]);
}
