//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical `Task`/`Subtask` records and their status enum.
//! - Provide field validation and subtask input normalization.
//!
//! # Invariants
//! - `uuid`, `owner_uuid` and `created_at` are immutable after creation.
//! - Subtask ids are unique within their parent task's list.
//! - Subtask `completed` is never derived from the parent task's status.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Stable identifier for a subtask within one task.
pub type SubtaskId = Uuid;

/// Identifier of the authenticated owner a task belongs to.
pub type OwnerId = Uuid;

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 100;

/// Maximum description length in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Task lifecycle state.
///
/// Transitions are unconstrained: any state is reachable from any other,
/// so a completed task can be reopened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Created but not started.
    Pending,
    /// Work is underway.
    InProgress,
    /// Finished; subtasks become read-only in presentation layers.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical wire/storage literal for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    /// Parses a status literal, rejecting anything outside the enumerated set.
    pub fn parse(value: &str) -> Result<Self, TaskValidationError> {
        match value {
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(TaskValidationError::UnknownStatus(other.to_string())),
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for task field input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is the empty string.
    EmptyTitle,
    /// Title exceeds [`TITLE_MAX_CHARS`].
    TitleTooLong { chars: usize },
    /// Description exceeds [`DESCRIPTION_MAX_CHARS`].
    DescriptionTooLong { chars: usize },
    /// Status literal is outside the enumerated set.
    UnknownStatus(String),
    /// Task or subtask carries the nil UUID.
    NilUuid,
    /// Subtask text is blank after trimming.
    BlankSubtaskText(SubtaskId),
    /// Two subtasks in one task share the same id.
    DuplicateSubtaskId(SubtaskId),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { chars } => write!(
                f,
                "title is {chars} characters; maximum is {TITLE_MAX_CHARS}"
            ),
            Self::DescriptionTooLong { chars } => write!(
                f,
                "description is {chars} characters; maximum is {DESCRIPTION_MAX_CHARS}"
            ),
            Self::UnknownStatus(value) => write!(
                f,
                "unknown status `{value}`; expected pending|in-progress|completed"
            ),
            Self::NilUuid => write!(f, "nil uuid is not a valid identifier"),
            Self::BlankSubtaskText(id) => write!(f, "subtask {id} has blank text"),
            Self::DuplicateSubtaskId(id) => write!(f, "duplicate subtask id {id}"),
        }
    }
}

impl Error for TaskValidationError {}

/// Leaf checklist item belonging to exactly one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    /// Stable id, unique within the parent task.
    pub uuid: SubtaskId,
    /// Display text, trimmed and non-blank.
    pub text: String,
    /// Completion flag, independent of the parent task's status.
    pub completed: bool,
}

impl Subtask {
    /// Creates an open subtask with a fresh id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            text: text.into(),
            completed: false,
        }
    }
}

/// Top-level trackable unit with a status and an ordered subtask list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable id assigned at creation.
    pub uuid: TaskId,
    /// Owner this task belongs to; scopes every query and mutation.
    pub owner_uuid: OwnerId,
    /// Short label, non-empty, at most [`TITLE_MAX_CHARS`] characters.
    pub title: String,
    /// Free-form detail text, possibly empty.
    pub description: String,
    /// Current lifecycle state.
    pub status: TaskStatus,
    /// Checklist in insertion order; order is meaningful for display.
    pub subtasks: Vec<Subtask>,
    /// Creation time in epoch milliseconds; default sort key, newest first.
    pub created_at: i64,
}

impl Task {
    /// Creates a pending task with a fresh id and current timestamp.
    ///
    /// Field validation is a separate step (`validate`); persistence and
    /// engine entry points must call it before accepting the value.
    pub fn new(
        owner_uuid: OwnerId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            owner_uuid,
            title: title.into(),
            description: description.into(),
            status: TaskStatus::Pending,
            subtasks: Vec::new(),
            created_at: now_epoch_ms(),
        }
    }

    /// Checks every model invariant on this task.
    ///
    /// # Errors
    /// - Field constraint violations from [`validate_task_fields`].
    /// - `NilUuid` when the task, owner, or any subtask id is nil.
    /// - `BlankSubtaskText`/`DuplicateSubtaskId` for malformed checklists.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.uuid.is_nil() || self.owner_uuid.is_nil() {
            return Err(TaskValidationError::NilUuid);
        }
        validate_task_fields(&self.title, &self.description)?;
        validate_subtasks(&self.subtasks)
    }

    /// Returns how many subtasks are completed out of the total.
    pub fn subtask_counts(&self) -> (usize, usize) {
        let completed = self
            .subtasks
            .iter()
            .filter(|subtask| subtask.completed)
            .count();
        (completed, self.subtasks.len())
    }
}

/// Validates title and description against the field constraints.
pub fn validate_task_fields(title: &str, description: &str) -> Result<(), TaskValidationError> {
    validate_title(title)?;
    validate_description(description)
}

/// Validates the title constraint: non-empty, at most [`TITLE_MAX_CHARS`]
/// characters.
pub fn validate_title(title: &str) -> Result<(), TaskValidationError> {
    if title.is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    let chars = title.chars().count();
    if chars > TITLE_MAX_CHARS {
        return Err(TaskValidationError::TitleTooLong { chars });
    }
    Ok(())
}

/// Validates the description constraint: at most
/// [`DESCRIPTION_MAX_CHARS`] characters.
pub fn validate_description(description: &str) -> Result<(), TaskValidationError> {
    let chars = description.chars().count();
    if chars > DESCRIPTION_MAX_CHARS {
        return Err(TaskValidationError::DescriptionTooLong { chars });
    }
    Ok(())
}

/// Validates a subtask list against the checklist invariants.
pub fn validate_subtasks(subtasks: &[Subtask]) -> Result<(), TaskValidationError> {
    let mut seen = std::collections::HashSet::with_capacity(subtasks.len());
    for subtask in subtasks {
        if subtask.uuid.is_nil() {
            return Err(TaskValidationError::NilUuid);
        }
        if subtask.text.trim().is_empty() {
            return Err(TaskValidationError::BlankSubtaskText(subtask.uuid));
        }
        if !seen.insert(subtask.uuid) {
            return Err(TaskValidationError::DuplicateSubtaskId(subtask.uuid));
        }
    }
    Ok(())
}

/// Turns raw checklist input into well-formed subtasks.
///
/// Trims each entry, drops blank ones, assigns fresh ids, starts every
/// subtask open, and preserves the input order of the surviving entries.
pub fn normalize_subtask_input(texts: &[String]) -> Vec<Subtask> {
    texts
        .iter()
        .filter_map(|text| {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(Subtask::new(trimmed))
            }
        })
        .collect()
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
