use tasktrack_core::{BoardError, Subtask, TaskBoard, TaskStatus, TaskValidationError};
use uuid::Uuid;

fn board() -> TaskBoard {
    TaskBoard::new(Uuid::new_v4())
}

fn texts(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn create_task_starts_pending_with_normalized_checklist() {
    let mut board = board();
    let task = board
        .create_task(
            "plan launch",
            Some("marketing push"),
            &texts(&["  draft copy ", "", "book venue"]),
        )
        .unwrap()
        .clone();

    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.owner_uuid, board.owner_uuid());
    assert_eq!(task.subtasks.len(), 2);
    assert_eq!(task.subtasks[0].text, "draft copy");
    assert_eq!(task.subtasks[1].text, "book venue");
    assert!(task.subtasks.iter().all(|subtask| !subtask.completed));
}

#[test]
fn create_task_inserts_at_the_head() {
    let mut board = board();
    let first = board.create_task("first", None, &[]).unwrap().uuid;
    let second = board.create_task("second", None, &[]).unwrap().uuid;

    let order: Vec<_> = board.tasks().iter().map(|task| task.uuid).collect();
    assert_eq!(order, vec![second, first]);
}

#[test]
fn create_task_with_empty_title_fails_regardless_of_other_fields() {
    let mut board = board();
    for (description, subtasks) in [
        (None, texts(&[])),
        (Some("described"), texts(&[])),
        (None, texts(&["a"])),
        (Some("described"), texts(&["a", "b"])),
    ] {
        let err = board.create_task("", description, &subtasks).unwrap_err();
        assert_eq!(
            err,
            BoardError::Validation(TaskValidationError::EmptyTitle)
        );
    }
    assert!(board.is_empty());
}

#[test]
fn toggle_subtask_changes_only_the_target() {
    let mut board = board();
    let task = board
        .create_task("two steps", None, &texts(&["s1", "s2"]))
        .unwrap();
    let task_uuid = task.uuid;
    let first = task.subtasks[0].uuid;
    let second = task.subtasks[1].uuid;

    let updated = board.toggle_subtask(task_uuid, first, true).unwrap();

    assert!(updated.subtasks[0].completed);
    assert!(!updated.subtasks[1].completed);
    assert_eq!(updated.subtasks[0].uuid, first);
    assert_eq!(updated.subtasks[1].uuid, second);
    assert_eq!(updated.status, TaskStatus::Pending);
}

#[test]
fn toggle_subtask_is_independent_of_task_status() {
    let mut board = board();
    let task = board.create_task("closed", None, &texts(&["left open"])).unwrap();
    let task_uuid = task.uuid;
    let subtask_uuid = task.subtasks[0].uuid;

    board
        .change_status(task_uuid, TaskStatus::Completed)
        .unwrap();
    let updated = board.toggle_subtask(task_uuid, subtask_uuid, true).unwrap();

    // Completing a task never forces its checklist; the stored flag only
    // moves when toggled explicitly.
    assert_eq!(updated.status, TaskStatus::Completed);
    assert!(updated.subtasks[0].completed);
}

#[test]
fn toggle_unknown_subtask_fails_with_subtask_not_found() {
    let mut board = board();
    let task_uuid = board.create_task("bare", None, &[]).unwrap().uuid;
    let missing = Uuid::new_v4();

    let err = board.toggle_subtask(task_uuid, missing, true).unwrap_err();
    assert_eq!(
        err,
        BoardError::SubtaskNotFound {
            task_uuid,
            subtask_uuid: missing,
        }
    );
}

#[test]
fn append_subtasks_normalizes_and_preserves_existing_entries() {
    let mut board = board();
    let task = board
        .create_task("grows", None, &texts(&["original"]))
        .unwrap();
    let task_uuid = task.uuid;
    let original_uuid = task.subtasks[0].uuid;
    board.toggle_subtask(task_uuid, original_uuid, true).unwrap();

    let updated = board
        .append_subtasks(task_uuid, &texts(&["a", "", "  b  "]))
        .unwrap();

    assert_eq!(updated.subtasks.len(), 3);
    assert_eq!(updated.subtasks[0].uuid, original_uuid);
    assert!(updated.subtasks[0].completed);
    assert_eq!(updated.subtasks[1].text, "a");
    assert_eq!(updated.subtasks[2].text, "b");
    assert!(!updated.subtasks[1].completed);
    assert!(!updated.subtasks[2].completed);
}

#[test]
fn append_to_unknown_task_fails_with_task_not_found() {
    let mut board = board();
    let missing = Uuid::new_v4();
    let err = board.append_subtasks(missing, &texts(&["a"])).unwrap_err();
    assert_eq!(err, BoardError::TaskNotFound(missing));
}

#[test]
fn change_status_round_trip_leaves_subtasks_untouched() {
    let mut board = board();
    let task = board
        .create_task("reopenable", None, &texts(&["step one", "step two"]))
        .unwrap();
    let task_uuid = task.uuid;
    let before = task.subtasks.clone();
    let created_at = task.created_at;

    board
        .change_status(task_uuid, TaskStatus::Completed)
        .unwrap();
    let reopened = board.change_status(task_uuid, TaskStatus::Pending).unwrap();

    assert_eq!(reopened.status, TaskStatus::Pending);
    assert_eq!(reopened.subtasks, before);
    assert_eq!(reopened.created_at, created_at);
}

#[test]
fn any_status_is_reachable_from_any_other() {
    let mut board = board();
    let task_uuid = board.create_task("free", None, &[]).unwrap().uuid;

    for status in [
        TaskStatus::Completed,
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::InProgress,
    ] {
        let updated = board.change_status(task_uuid, status).unwrap();
        assert_eq!(updated.status, status);
    }
}

#[test]
fn edit_task_replaces_the_whole_checklist() {
    let mut board = board();
    let task = board
        .create_task("had three", None, &texts(&["one", "two", "three"]))
        .unwrap();
    let task_uuid = task.uuid;

    let updated = board
        .edit_task(task_uuid, "has none", Some("emptied"), Vec::new())
        .unwrap();

    assert_eq!(updated.title, "has none");
    assert_eq!(updated.description, "emptied");
    assert!(updated.subtasks.is_empty());
}

#[test]
fn edit_task_preserves_passed_back_completion_state() {
    let mut board = board();
    let task = board
        .create_task("kept", None, &texts(&["keep me"]))
        .unwrap();
    let task_uuid = task.uuid;
    let subtask_uuid = task.subtasks[0].uuid;
    board.toggle_subtask(task_uuid, subtask_uuid, true).unwrap();

    let current = board.get(task_uuid).unwrap().subtasks.clone();
    let updated = board
        .edit_task(task_uuid, "kept, renamed", None, current)
        .unwrap();

    assert_eq!(updated.subtasks.len(), 1);
    assert_eq!(updated.subtasks[0].uuid, subtask_uuid);
    assert!(updated.subtasks[0].completed);
}

#[test]
fn edit_task_does_not_touch_immutable_fields_or_status() {
    let mut board = board();
    let task = board.create_task("original", Some("desc"), &[]).unwrap();
    let task_uuid = task.uuid;
    let owner_uuid = task.owner_uuid;
    let created_at = task.created_at;
    board
        .change_status(task_uuid, TaskStatus::InProgress)
        .unwrap();

    let updated = board
        .edit_task(task_uuid, "renamed", Some("new desc"), Vec::new())
        .unwrap();

    assert_eq!(updated.uuid, task_uuid);
    assert_eq!(updated.owner_uuid, owner_uuid);
    assert_eq!(updated.created_at, created_at);
    assert_eq!(updated.status, TaskStatus::InProgress);
}

#[test]
fn edit_unknown_task_fails_with_task_not_found() {
    let mut board = board();
    let missing = Uuid::new_v4();
    let err = board
        .edit_task(missing, "title", None, Vec::new())
        .unwrap_err();
    assert_eq!(err, BoardError::TaskNotFound(missing));
}

#[test]
fn edit_task_validates_replacement_checklist() {
    let mut board = board();
    let task_uuid = board.create_task("strict", None, &[]).unwrap().uuid;

    let blank = Subtask::new("  ");
    let blank_uuid = blank.uuid;
    let err = board
        .edit_task(task_uuid, "strict", None, vec![blank])
        .unwrap_err();
    assert_eq!(
        err,
        BoardError::Validation(TaskValidationError::BlankSubtaskText(blank_uuid))
    );
}

#[test]
fn delete_task_twice_fails_the_second_time() {
    let mut board = board();
    let task_uuid = board.create_task("short lived", None, &[]).unwrap().uuid;

    board.delete_task(task_uuid).unwrap();
    let err = board.delete_task(task_uuid).unwrap_err();
    assert_eq!(err, BoardError::TaskNotFound(task_uuid));
}

#[test]
fn failed_mutation_leaves_the_board_unchanged() {
    let mut board = board();
    let task = board
        .create_task("stable", Some("before"), &texts(&["step"]))
        .unwrap();
    let task_uuid = task.uuid;
    let snapshot = board.tasks().to_vec();

    let long_title = "t".repeat(101);
    assert!(board
        .edit_task(task_uuid, &long_title, None, Vec::new())
        .is_err());
    assert!(board.toggle_subtask(task_uuid, Uuid::new_v4(), true).is_err());
    assert!(board.delete_task(Uuid::new_v4()).is_err());

    assert_eq!(board.tasks(), snapshot.as_slice());
}
