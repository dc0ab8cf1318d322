//! Task use-case service.
//!
//! # Responsibility
//! - Drive one owner's session: load a snapshot, mutate it, project it.
//! - Enforce the two-phase mutation contract against the persistence port.
//!
//! # Invariants
//! - The in-memory board changes only after the port call has succeeded;
//!   a failed mutation leaves the previously observed list unchanged.
//! - Error variants stay distinct enough for callers to render
//!   "validation failed", "not found", and "save failed" differently.

use crate::board::{BoardError, TaskBoard};
use crate::model::task::{
    OwnerId, Subtask, SubtaskId, Task, TaskId, TaskStatus, TaskValidationError,
};
use crate::repo::task_repo::{RepoError, TaskPatch, TaskRepository};
use crate::suggest::{SuggestionError, SubtaskSuggester};
use crate::view::{project, TaskFilter};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    /// Input violated a field or checklist constraint.
    Validation(TaskValidationError),
    /// Target task does not exist in this session.
    TaskNotFound(TaskId),
    /// Target subtask does not exist on the target task.
    SubtaskNotFound {
        task_uuid: TaskId,
        subtask_uuid: SubtaskId,
    },
    /// Persistence port failure; the in-memory snapshot was not changed.
    Store(RepoError),
    /// Suggestion port failure; engine state is unaffected.
    SuggestionUnavailable(SuggestionError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::SubtaskNotFound {
                task_uuid,
                subtask_uuid,
            } => write!(f, "subtask {subtask_uuid} not found on task {task_uuid}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::SuggestionUnavailable(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::SuggestionUnavailable(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BoardError> for TaskServiceError {
    fn from(value: BoardError) -> Self {
        match value {
            BoardError::Validation(err) => Self::Validation(err),
            BoardError::TaskNotFound(id) => Self::TaskNotFound(id),
            BoardError::SubtaskNotFound {
                task_uuid,
                subtask_uuid,
            } => Self::SubtaskNotFound {
                task_uuid,
                subtask_uuid,
            },
            BoardError::ForeignOwner { task_uuid, .. } => Self::Store(RepoError::InvalidData(
                format!("task {task_uuid} belongs to another owner"),
            )),
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound(id) => Self::TaskNotFound(id),
            other => Self::Store(other),
        }
    }
}

/// One owner's interactive task session over a persistence port.
///
/// Every mutation stages the new entity value first, persists it through
/// the port, and applies it to the in-memory board only on success.
pub struct TaskService<R: TaskRepository> {
    repo: R,
    board: TaskBoard,
}

impl<R: TaskRepository> TaskService<R> {
    /// Loads the owner's snapshot from the port and starts a session.
    pub fn load(mut repo: R, owner_uuid: OwnerId) -> Result<Self, TaskServiceError> {
        let tasks = repo.load_tasks(owner_uuid)?;
        let board = TaskBoard::with_tasks(owner_uuid, tasks)?;
        Ok(Self { repo, board })
    }

    /// Returns the owner this session is scoped to.
    pub fn owner_uuid(&self) -> OwnerId {
        self.board.owner_uuid()
    }

    /// Returns the current snapshot, newest first.
    pub fn tasks(&self) -> &[Task] {
        self.board.tasks()
    }

    /// Returns one task by id.
    pub fn get(&self, task_uuid: TaskId) -> Option<&Task> {
        self.board.get(task_uuid)
    }

    /// Projects the current snapshot for display.
    pub fn project(&self, filter: TaskFilter) -> Vec<&Task> {
        project(self.board.tasks(), filter)
    }

    /// Creates a task, persists it, and inserts the stored value at the
    /// head of the snapshot.
    pub fn create_task(
        &mut self,
        title: &str,
        description: Option<&str>,
        subtask_texts: &[String],
    ) -> Result<Task, TaskServiceError> {
        let staged = self.board.stage_create(title, description, subtask_texts)?;
        let stored = self.repo.create_task(&staged)?;
        self.board.commit(stored.clone())?;
        Ok(stored)
    }

    /// Replaces a task's title, description, and whole checklist.
    pub fn edit_task(
        &mut self,
        task_uuid: TaskId,
        title: &str,
        description: Option<&str>,
        subtasks: Vec<Subtask>,
    ) -> Result<Task, TaskServiceError> {
        let staged = self.board.stage_edit(task_uuid, title, description, subtasks)?;
        let patch = TaskPatch::edit(
            staged.title.clone(),
            staged.description.clone(),
            staged.subtasks.clone(),
        );
        self.repo.update_task(task_uuid, &patch)?;
        self.board.commit(staged.clone())?;
        Ok(staged)
    }

    /// Sets a task's status unconditionally.
    pub fn change_status(
        &mut self,
        task_uuid: TaskId,
        status: TaskStatus,
    ) -> Result<Task, TaskServiceError> {
        let staged = self.board.stage_status(task_uuid, status)?;
        self.repo
            .update_task(task_uuid, &TaskPatch::status(status))?;
        self.board.commit(staged.clone())?;
        Ok(staged)
    }

    /// Sets one subtask's completion flag.
    ///
    /// The stored checklist is written as a whole; the port owns no
    /// per-subtask update surface.
    pub fn toggle_subtask(
        &mut self,
        task_uuid: TaskId,
        subtask_uuid: SubtaskId,
        completed: bool,
    ) -> Result<Task, TaskServiceError> {
        let staged = self
            .board
            .stage_subtask_toggle(task_uuid, subtask_uuid, completed)?;
        self.repo
            .update_task(task_uuid, &TaskPatch::subtasks(staged.subtasks.clone()))?;
        self.board.commit(staged.clone())?;
        Ok(staged)
    }

    /// Appends normalized checklist entries to the end of a task's list.
    pub fn append_subtasks(
        &mut self,
        task_uuid: TaskId,
        texts: &[String],
    ) -> Result<Task, TaskServiceError> {
        let staged = self.board.stage_append(task_uuid, texts)?;
        self.repo
            .update_task(task_uuid, &TaskPatch::subtasks(staged.subtasks.clone()))?;
        self.board.commit(staged.clone())?;
        Ok(staged)
    }

    /// Deletes one task.
    ///
    /// A second delete of the same id fails with `TaskNotFound` so callers
    /// can tell "already gone" from "deleted now".
    pub fn delete_task(&mut self, task_uuid: TaskId) -> Result<(), TaskServiceError> {
        if self.board.get(task_uuid).is_none() {
            return Err(TaskServiceError::TaskNotFound(task_uuid));
        }
        self.repo.remove_task(task_uuid)?;
        self.board.remove(task_uuid)?;
        Ok(())
    }

    /// Fetches candidate subtask texts for one task from a suggester.
    ///
    /// The suggestion source is the task description, falling back to the
    /// title when the description is empty. Nothing is appended until the
    /// caller accepts candidates via [`TaskService::append_subtasks`].
    pub fn suggest_subtasks<S: SubtaskSuggester>(
        &self,
        task_uuid: TaskId,
        suggester: &S,
    ) -> Result<Vec<String>, TaskServiceError> {
        let task = self
            .board
            .get(task_uuid)
            .ok_or(TaskServiceError::TaskNotFound(task_uuid))?;
        let source = if task.description.is_empty() {
            task.title.as_str()
        } else {
            task.description.as_str()
        };
        suggester
            .suggest(source)
            .map_err(TaskServiceError::SuggestionUnavailable)
    }
}
