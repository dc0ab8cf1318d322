use tasktrack_core::{Subtask, Task, TaskStatus, TaskValidationError};
use uuid::Uuid;

#[test]
fn task_new_sets_defaults() {
    let owner = Uuid::new_v4();
    let task = Task::new(owner, "write report", "quarterly numbers");

    assert!(!task.uuid.is_nil());
    assert_eq!(task.owner_uuid, owner);
    assert_eq!(task.title, "write report");
    assert_eq!(task.description, "quarterly numbers");
    assert_eq!(task.status, TaskStatus::Pending);
    assert!(task.subtasks.is_empty());
    assert!(task.created_at > 0);
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let task_uuid = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let owner_uuid = Uuid::parse_str("99999999-8888-4777-8666-555555555555").unwrap();
    let subtask_uuid = Uuid::parse_str("aaaaaaaa-bbbb-4ccc-8ddd-eeeeeeeeeeee").unwrap();

    let task = Task {
        uuid: task_uuid,
        owner_uuid,
        title: "ship release".to_string(),
        description: "cut the 0.1 tag".to_string(),
        status: TaskStatus::InProgress,
        subtasks: vec![Subtask {
            uuid: subtask_uuid,
            text: "update changelog".to_string(),
            completed: true,
        }],
        created_at: 1_700_000_000_000,
    };

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["uuid"], task_uuid.to_string());
    assert_eq!(json["owner_uuid"], owner_uuid.to_string());
    assert_eq!(json["status"], "in-progress");
    assert_eq!(json["created_at"], 1_700_000_000_000_i64);
    assert_eq!(json["subtasks"][0]["uuid"], subtask_uuid.to_string());
    assert_eq!(json["subtasks"][0]["text"], "update changelog");
    assert_eq!(json["subtasks"][0]["completed"], true);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn validate_rejects_nil_identifiers() {
    let mut task = Task::new(Uuid::new_v4(), "valid", "");
    task.uuid = Uuid::nil();
    assert_eq!(task.validate(), Err(TaskValidationError::NilUuid));

    let mut task = Task::new(Uuid::nil(), "valid", "");
    task.uuid = Uuid::new_v4();
    assert_eq!(task.validate(), Err(TaskValidationError::NilUuid));
}

#[test]
fn validate_rejects_blank_subtask_text() {
    let mut task = Task::new(Uuid::new_v4(), "valid", "");
    let subtask = Subtask::new("   ");
    let subtask_uuid = subtask.uuid;
    task.subtasks.push(subtask);

    assert_eq!(
        task.validate(),
        Err(TaskValidationError::BlankSubtaskText(subtask_uuid))
    );
}

#[test]
fn validate_rejects_duplicate_subtask_ids() {
    let mut task = Task::new(Uuid::new_v4(), "valid", "");
    let first = Subtask::new("once");
    let mut second = Subtask::new("twice");
    second.uuid = first.uuid;
    task.subtasks = vec![first.clone(), second];

    assert_eq!(
        task.validate(),
        Err(TaskValidationError::DuplicateSubtaskId(first.uuid))
    );
}

#[test]
fn subtask_counts_track_completion() {
    let mut task = Task::new(Uuid::new_v4(), "checklisted", "");
    task.subtasks = vec![
        Subtask {
            completed: true,
            ..Subtask::new("done")
        },
        Subtask::new("open"),
        Subtask::new("also open"),
    ];

    assert_eq!(task.subtask_counts(), (1, 3));
}
