//! In-memory mutation engine over one owner's task collection.
//!
//! # Responsibility
//! - Hold the owned, newest-first snapshot of one owner's tasks.
//! - Implement create/edit/status/toggle/append/delete with invariant checks.
//! - Expose stage/commit primitives so callers can persist a computed value
//!   before applying it to the snapshot.
//!
//! # Invariants
//! - Every task on the board belongs to the board's owner.
//! - New tasks start `pending` and are inserted at the head.
//! - Each operation applies all of its field changes to one task or none.

use crate::model::task::{
    normalize_subtask_input, validate_subtasks, validate_task_fields, OwnerId, Subtask, SubtaskId,
    Task, TaskId, TaskStatus, TaskValidationError,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from mutation engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Input violated a model invariant.
    Validation(TaskValidationError),
    /// Target task is not on the board.
    TaskNotFound(TaskId),
    /// Target subtask is not on the target task.
    SubtaskNotFound {
        task_uuid: TaskId,
        subtask_uuid: SubtaskId,
    },
    /// Task belongs to a different owner than the board.
    ForeignOwner {
        task_uuid: TaskId,
        owner_uuid: OwnerId,
    },
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::SubtaskNotFound {
                task_uuid,
                subtask_uuid,
            } => write!(f, "subtask {subtask_uuid} not found on task {task_uuid}"),
            Self::ForeignOwner {
                task_uuid,
                owner_uuid,
            } => write!(f, "task {task_uuid} belongs to another owner ({owner_uuid})"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for BoardError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Owned in-memory collection of one owner's tasks, newest first.
///
/// The board holds no state beyond what is passed in; callers load it from
/// the persistence port and drive it for the lifetime of a session.
#[derive(Debug, Clone)]
pub struct TaskBoard {
    owner_uuid: OwnerId,
    tasks: Vec<Task>,
}

impl TaskBoard {
    /// Creates an empty board for one owner.
    pub fn new(owner_uuid: OwnerId) -> Self {
        Self {
            owner_uuid,
            tasks: Vec::new(),
        }
    }

    /// Creates a board from a loaded snapshot.
    ///
    /// The snapshot order is kept as-is; the persistence port contract
    /// already orders by `created_at` descending.
    ///
    /// # Errors
    /// - `ForeignOwner` when any task belongs to a different owner.
    pub fn with_tasks(owner_uuid: OwnerId, tasks: Vec<Task>) -> Result<Self, BoardError> {
        for task in &tasks {
            if task.owner_uuid != owner_uuid {
                return Err(BoardError::ForeignOwner {
                    task_uuid: task.uuid,
                    owner_uuid: task.owner_uuid,
                });
            }
        }
        Ok(Self { owner_uuid, tasks })
    }

    /// Returns the owner this board is scoped to.
    pub fn owner_uuid(&self) -> OwnerId {
        self.owner_uuid
    }

    /// Returns the snapshot, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns one task by id.
    pub fn get(&self, task_uuid: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.uuid == task_uuid)
    }

    /// Builds a new pending task from raw input without inserting it.
    ///
    /// Validates fields, normalizes the initial checklist, and stamps a
    /// fresh id and creation time. The caller persists the value and then
    /// applies it with [`TaskBoard::commit`].
    pub fn stage_create(
        &self,
        title: &str,
        description: Option<&str>,
        subtask_texts: &[String],
    ) -> Result<Task, BoardError> {
        let description = description.unwrap_or("");
        validate_task_fields(title, description)?;
        let mut task = Task::new(self.owner_uuid, title, description);
        task.subtasks = normalize_subtask_input(subtask_texts);
        Ok(task)
    }

    /// Computes the edited value of a task without applying it.
    ///
    /// Replaces title, description, and the entire subtask list; `status`,
    /// `uuid`, `owner_uuid`, and `created_at` stay untouched. Callers that
    /// want to preserve existing completion state pass the current list
    /// back with their edits applied.
    pub fn stage_edit(
        &self,
        task_uuid: TaskId,
        title: &str,
        description: Option<&str>,
        subtasks: Vec<Subtask>,
    ) -> Result<Task, BoardError> {
        let task = self.require(task_uuid)?;
        let description = description.unwrap_or("");
        validate_task_fields(title, description)?;
        validate_subtasks(&subtasks)?;
        let mut updated = task.clone();
        updated.title = title.to_string();
        updated.description = description.to_string();
        updated.subtasks = subtasks;
        Ok(updated)
    }

    /// Computes the task with its status replaced, without applying it.
    ///
    /// The transition is unconditional and leaves every subtask flag alone.
    pub fn stage_status(
        &self,
        task_uuid: TaskId,
        status: TaskStatus,
    ) -> Result<Task, BoardError> {
        let task = self.require(task_uuid)?;
        let mut updated = task.clone();
        updated.status = status;
        Ok(updated)
    }

    /// Computes the task with exactly one subtask flag set, without applying.
    ///
    /// Sibling subtasks and the task status are never touched; task
    /// completion is not derived from subtask completion.
    pub fn stage_subtask_toggle(
        &self,
        task_uuid: TaskId,
        subtask_uuid: SubtaskId,
        completed: bool,
    ) -> Result<Task, BoardError> {
        let task = self.require(task_uuid)?;
        let mut updated = task.clone();
        let subtask = updated
            .subtasks
            .iter_mut()
            .find(|subtask| subtask.uuid == subtask_uuid)
            .ok_or(BoardError::SubtaskNotFound {
                task_uuid,
                subtask_uuid,
            })?;
        subtask.completed = completed;
        Ok(updated)
    }

    /// Computes the task with normalized entries appended, without applying.
    ///
    /// Existing subtasks keep their ids and completion flags; new entries
    /// go to the end of the list in input order.
    pub fn stage_append(
        &self,
        task_uuid: TaskId,
        texts: &[String],
    ) -> Result<Task, BoardError> {
        let task = self.require(task_uuid)?;
        let mut updated = task.clone();
        updated.subtasks.extend(normalize_subtask_input(texts));
        Ok(updated)
    }

    /// Applies a staged task value to the board.
    ///
    /// A known id replaces the existing entry in place; an unknown id is
    /// inserted at the head, preserving newest-first order for creations.
    pub fn commit(&mut self, task: Task) -> Result<(), BoardError> {
        if task.owner_uuid != self.owner_uuid {
            return Err(BoardError::ForeignOwner {
                task_uuid: task.uuid,
                owner_uuid: task.owner_uuid,
            });
        }
        match self.tasks.iter_mut().find(|entry| entry.uuid == task.uuid) {
            Some(entry) => *entry = task,
            None => self.tasks.insert(0, task),
        }
        Ok(())
    }

    /// Removes one task from the board, returning it.
    ///
    /// A second removal of the same id fails with `TaskNotFound`; removal
    /// is deliberately not idempotent so callers can tell "already gone"
    /// from "removed now".
    pub fn remove(&mut self, task_uuid: TaskId) -> Result<Task, BoardError> {
        let index = self
            .tasks
            .iter()
            .position(|task| task.uuid == task_uuid)
            .ok_or(BoardError::TaskNotFound(task_uuid))?;
        Ok(self.tasks.remove(index))
    }

    /// Creates a task and inserts it at the head of the board.
    pub fn create_task(
        &mut self,
        title: &str,
        description: Option<&str>,
        subtask_texts: &[String],
    ) -> Result<&Task, BoardError> {
        let task = self.stage_create(title, description, subtask_texts)?;
        let task_uuid = task.uuid;
        self.commit(task)?;
        self.require(task_uuid)
    }

    /// Replaces title, description, and the whole subtask list of a task.
    pub fn edit_task(
        &mut self,
        task_uuid: TaskId,
        title: &str,
        description: Option<&str>,
        subtasks: Vec<Subtask>,
    ) -> Result<&Task, BoardError> {
        let updated = self.stage_edit(task_uuid, title, description, subtasks)?;
        self.commit(updated)?;
        self.require(task_uuid)
    }

    /// Sets a task's status unconditionally.
    pub fn change_status(
        &mut self,
        task_uuid: TaskId,
        status: TaskStatus,
    ) -> Result<&Task, BoardError> {
        let updated = self.stage_status(task_uuid, status)?;
        self.commit(updated)?;
        self.require(task_uuid)
    }

    /// Sets one subtask's completion flag.
    pub fn toggle_subtask(
        &mut self,
        task_uuid: TaskId,
        subtask_uuid: SubtaskId,
        completed: bool,
    ) -> Result<&Task, BoardError> {
        let updated = self.stage_subtask_toggle(task_uuid, subtask_uuid, completed)?;
        self.commit(updated)?;
        self.require(task_uuid)
    }

    /// Appends normalized checklist entries to the end of a task's list.
    pub fn append_subtasks(
        &mut self,
        task_uuid: TaskId,
        texts: &[String],
    ) -> Result<&Task, BoardError> {
        let updated = self.stage_append(task_uuid, texts)?;
        self.commit(updated)?;
        self.require(task_uuid)
    }

    /// Deletes one task from the board.
    pub fn delete_task(&mut self, task_uuid: TaskId) -> Result<(), BoardError> {
        self.remove(task_uuid).map(|_| ())
    }

    fn require(&self, task_uuid: TaskId) -> Result<&Task, BoardError> {
        self.get(task_uuid)
            .ok_or(BoardError::TaskNotFound(task_uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::{BoardError, TaskBoard};
    use crate::model::task::{Task, TaskValidationError};
    use uuid::Uuid;

    #[test]
    fn with_tasks_rejects_foreign_owner() {
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let foreign = Task::new(stranger, "not yours", "");

        let err = TaskBoard::with_tasks(owner, vec![foreign.clone()]).unwrap_err();
        assert_eq!(
            err,
            BoardError::ForeignOwner {
                task_uuid: foreign.uuid,
                owner_uuid: stranger,
            }
        );
    }

    #[test]
    fn stage_create_does_not_touch_the_board() {
        let board = TaskBoard::new(Uuid::new_v4());
        let staged = board.stage_create("draft", None, &[]).unwrap();
        assert_eq!(staged.owner_uuid, board.owner_uuid());
        assert!(board.is_empty());
    }

    #[test]
    fn stage_create_rejects_empty_title() {
        let board = TaskBoard::new(Uuid::new_v4());
        let err = board.stage_create("", Some("details"), &[]).unwrap_err();
        assert_eq!(
            err,
            BoardError::Validation(TaskValidationError::EmptyTitle)
        );
    }
}
