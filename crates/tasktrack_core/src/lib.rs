//! Core domain logic for TaskTrack.
//! This crate is the single source of truth for business invariants.

pub mod auth;
pub mod board;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod suggest;
pub mod view;

pub use auth::{AuthProvider, StaticAuthProvider};
pub use board::{BoardError, TaskBoard};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{
    normalize_subtask_input, validate_task_fields, OwnerId, Subtask, SubtaskId, Task, TaskId,
    TaskStatus, TaskValidationError, DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS,
};
pub use repo::task_repo::{
    RepoError, RepoResult, SqliteTaskRepository, TaskPatch, TaskRepository,
};
pub use service::task_service::{TaskService, TaskServiceError};
pub use suggest::{SubtaskSuggester, SuggestionError};
pub use view::{progress_of, project, SubtaskProgress, TaskFilter};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
