use tasktrack_core::{project, Task, TaskFilter, TaskStatus};
use uuid::Uuid;

fn task_with_status(title: &str, status: TaskStatus) -> Task {
    let mut task = Task::new(Uuid::new_v4(), title, "");
    task.status = status;
    task
}

fn snapshot() -> Vec<Task> {
    // Newest first, the order a loaded board carries.
    vec![
        task_with_status("newest done", TaskStatus::Completed),
        task_with_status("active one", TaskStatus::InProgress),
        task_with_status("waiting", TaskStatus::Pending),
        task_with_status("active two", TaskStatus::InProgress),
        task_with_status("oldest done", TaskStatus::Completed),
    ]
}

fn titles(tasks: &[&Task]) -> Vec<String> {
    tasks.iter().map(|task| task.title.clone()).collect()
}

#[test]
fn active_selects_in_progress_preserving_input_order() {
    let tasks = snapshot();
    let projected = project(&tasks, TaskFilter::Active);
    assert_eq!(titles(&projected), vec!["active one", "active two"]);
}

#[test]
fn completed_selects_completed_preserving_input_order() {
    let tasks = snapshot();
    let projected = project(&tasks, TaskFilter::Completed);
    assert_eq!(titles(&projected), vec!["newest done", "oldest done"]);
}

#[test]
fn pending_selects_pending_only() {
    let tasks = snapshot();
    let projected = project(&tasks, TaskFilter::Pending);
    assert_eq!(titles(&projected), vec!["waiting"]);
}

#[test]
fn all_shows_every_status_with_completed_last() {
    let tasks = snapshot();
    let projected = project(&tasks, TaskFilter::All);
    assert_eq!(
        titles(&projected),
        vec![
            "active one",
            "waiting",
            "active two",
            "newest done",
            "oldest done",
        ]
    );
}

#[test]
fn projection_is_idempotent() {
    let tasks = snapshot();
    for filter in [
        TaskFilter::All,
        TaskFilter::Active,
        TaskFilter::Completed,
        TaskFilter::Pending,
    ] {
        let first = project(&tasks, filter);
        let second = project(&tasks, filter);
        assert_eq!(first, second);
    }
}

#[test]
fn projection_of_empty_input_is_empty() {
    for filter in [
        TaskFilter::All,
        TaskFilter::Active,
        TaskFilter::Completed,
        TaskFilter::Pending,
    ] {
        assert!(project(&[], filter).is_empty());
    }
}

#[test]
fn projection_does_not_mutate_its_input() {
    let tasks = snapshot();
    let before = tasks.clone();
    let _ = project(&tasks, TaskFilter::All);
    assert_eq!(tasks, before);
}
