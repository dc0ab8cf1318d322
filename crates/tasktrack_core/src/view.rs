//! Derived task list views.
//!
//! # Responsibility
//! - Filter and order a task snapshot for display.
//! - Derive per-task subtask progress counts.
//!
//! # Invariants
//! - Projection never mutates its input; the same input and filter always
//!   produce the same output.
//! - Filtered output keeps the relative order of the input, except that the
//!   `All` view stable-sorts completed tasks to the end.

use crate::model::task::{Task, TaskStatus};

/// Filter applied when projecting the task list for display.
///
/// `All` follows the card presentation: every status is shown, with
/// completed tasks sinking to the bottom of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    /// Every status; completed tasks ordered last.
    #[default]
    All,
    /// Tasks currently in progress.
    Active,
    /// Completed tasks only.
    Completed,
    /// Pending tasks only.
    Pending,
}

impl TaskFilter {
    /// Returns the canonical literal for this filter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Pending => "pending",
        }
    }

    /// Parses a filter literal.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }
}

/// Subtask completion counts for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubtaskProgress {
    /// Number of completed subtasks.
    pub completed: usize,
    /// Total number of subtasks.
    pub total: usize,
}

impl SubtaskProgress {
    /// Whether the task has any subtasks at all.
    ///
    /// Presentation layers suppress the checklist section when this is
    /// false rather than rendering `0/0`.
    pub fn has_subtasks(self) -> bool {
        self.total > 0
    }
}

/// Projects a task snapshot into the filtered, display-ordered list.
///
/// The input is expected newest-first (`created_at` descending); relative
/// input order is preserved within the selection.
pub fn project(tasks: &[Task], filter: TaskFilter) -> Vec<&Task> {
    match filter {
        TaskFilter::All => {
            let mut open: Vec<&Task> = tasks
                .iter()
                .filter(|task| task.status != TaskStatus::Completed)
                .collect();
            open.extend(
                tasks
                    .iter()
                    .filter(|task| task.status == TaskStatus::Completed),
            );
            open
        }
        TaskFilter::Active => select(tasks, TaskStatus::InProgress),
        TaskFilter::Completed => select(tasks, TaskStatus::Completed),
        TaskFilter::Pending => select(tasks, TaskStatus::Pending),
    }
}

/// Returns completed/total subtask counts for one task; `(0, 0)` when the
/// checklist is empty.
pub fn progress_of(task: &Task) -> SubtaskProgress {
    let (completed, total) = task.subtask_counts();
    SubtaskProgress { completed, total }
}

fn select(tasks: &[Task], status: TaskStatus) -> Vec<&Task> {
    tasks.iter().filter(|task| task.status == status).collect()
}
