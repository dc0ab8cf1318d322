//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the persistence port: load/create/update/remove for one
//!   owner's tasks.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `load_tasks` returns tasks ordered by `created_at` descending.
//! - Subtask rows are stored and reloaded in list position order.
//! - Multi-row writes (task + checklist) happen in one transaction.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::task::{
    validate_description, validate_subtasks, validate_title, OwnerId, Subtask, Task, TaskId,
    TaskStatus, TaskValidationError,
};
use rusqlite::{params, Connection, Row, TransactionBehavior};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for task persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Db(DbError),
    NotFound(TaskId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl std::fmt::Display for RepoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl std::error::Error for RepoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Partial field update for one task.
///
/// `None` fields are left untouched by the store; `subtasks` replaces the
/// whole checklist when present. Immutable fields (`uuid`, `owner_uuid`,
/// `created_at`) have no patch slot at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub subtasks: Option<Vec<Subtask>>,
}

impl TaskPatch {
    /// Patch carrying only a status change.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Patch carrying only a full checklist replacement.
    pub fn subtasks(subtasks: Vec<Subtask>) -> Self {
        Self {
            subtasks: Some(subtasks),
            ..Self::default()
        }
    }

    /// Patch carrying the edit-operation field set.
    pub fn edit(title: String, description: String, subtasks: Vec<Subtask>) -> Self {
        Self {
            title: Some(title),
            description: Some(description),
            status: None,
            subtasks: Some(subtasks),
        }
    }

    /// Checks the present fields against the model constraints.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        if let Some(subtasks) = &self.subtasks {
            validate_subtasks(subtasks)?;
        }
        Ok(())
    }
}

/// Persistence port for one owner's tasks.
pub trait TaskRepository {
    /// Loads every task belonging to `owner_uuid`, newest first.
    fn load_tasks(&mut self, owner_uuid: OwnerId) -> RepoResult<Vec<Task>>;
    /// Persists a new task and returns the stored representation, which
    /// carries the store-assigned creation timestamp.
    fn create_task(&mut self, task: &Task) -> RepoResult<Task>;
    /// Applies a partial field update to one task.
    fn update_task(&mut self, task_uuid: TaskId, patch: &TaskPatch) -> RepoResult<()>;
    /// Deletes one task and its checklist.
    fn remove_task(&mut self, task_uuid: TaskId) -> RepoResult<()>;
}

const TASKS_REQUIRED_COLUMNS: &[&str] = &[
    "uuid",
    "owner_uuid",
    "title",
    "description",
    "status",
    "created_at",
];
const SUBTASKS_REQUIRED_COLUMNS: &[&str] = &["uuid", "task_uuid", "text", "completed", "position"];

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a repository from a migrated, ready connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` does not
    ///   match the latest migration known by this binary.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the schema
    ///   lacks the storage this repository depends on.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn load_tasks(&mut self, owner_uuid: OwnerId) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, owner_uuid, title, description, status, created_at
             FROM tasks
             WHERE owner_uuid = ?1
             ORDER BY created_at DESC, uuid ASC;",
        )?;

        let mut rows = stmt.query([owner_uuid.to_string()])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            let mut task = parse_task_row(row)?;
            task.subtasks = load_subtasks(self.conn, task.uuid)?;
            task.validate()?;
            tasks.push(task);
        }

        Ok(tasks)
    }

    fn create_task(&mut self, task: &Task) -> RepoResult<Task> {
        task.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        // created_at is intentionally omitted so the store assigns it.
        tx.execute(
            "INSERT INTO tasks (uuid, owner_uuid, title, description, status)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                task.uuid.to_string(),
                task.owner_uuid.to_string(),
                task.title.as_str(),
                task.description.as_str(),
                task.status.as_str(),
            ],
        )?;
        insert_subtasks(&tx, task.uuid, &task.subtasks)?;

        let mut stored = fetch_task(&tx, task.uuid)?.ok_or_else(|| {
            RepoError::InvalidData(format!("created task {} not found in read-back", task.uuid))
        })?;
        stored.subtasks = load_subtasks(&tx, task.uuid)?;
        stored.validate()?;

        tx.commit()?;
        Ok(stored)
    }

    fn update_task(&mut self, task_uuid: TaskId, patch: &TaskPatch) -> RepoResult<()> {
        patch.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if fetch_task(&tx, task_uuid)?.is_none() {
            return Err(RepoError::NotFound(task_uuid));
        }

        let uuid_text = task_uuid.to_string();
        if let Some(title) = &patch.title {
            tx.execute(
                "UPDATE tasks SET title = ?2 WHERE uuid = ?1;",
                params![uuid_text.as_str(), title.as_str()],
            )?;
        }
        if let Some(description) = &patch.description {
            tx.execute(
                "UPDATE tasks SET description = ?2 WHERE uuid = ?1;",
                params![uuid_text.as_str(), description.as_str()],
            )?;
        }
        if let Some(status) = patch.status {
            tx.execute(
                "UPDATE tasks SET status = ?2 WHERE uuid = ?1;",
                params![uuid_text.as_str(), status.as_str()],
            )?;
        }
        if let Some(subtasks) = &patch.subtasks {
            tx.execute(
                "DELETE FROM subtasks WHERE task_uuid = ?1;",
                [uuid_text.as_str()],
            )?;
            insert_subtasks(&tx, task_uuid, subtasks)?;
        }

        tx.commit()?;
        Ok(())
    }

    fn remove_task(&mut self, task_uuid: TaskId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM tasks WHERE uuid = ?1;",
            [task_uuid.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task_uuid));
        }

        Ok(())
    }
}

fn insert_subtasks(conn: &Connection, task_uuid: TaskId, subtasks: &[Subtask]) -> RepoResult<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO subtasks (uuid, task_uuid, text, completed, position)
         VALUES (?1, ?2, ?3, ?4, ?5);",
    )?;
    for (position, subtask) in subtasks.iter().enumerate() {
        stmt.execute(params![
            subtask.uuid.to_string(),
            task_uuid.to_string(),
            subtask.text.as_str(),
            i64::from(subtask.completed),
            position as i64,
        ])?;
    }
    Ok(())
}

fn fetch_task(conn: &Connection, task_uuid: TaskId) -> RepoResult<Option<Task>> {
    let mut stmt = conn.prepare(
        "SELECT uuid, owner_uuid, title, description, status, created_at
         FROM tasks
         WHERE uuid = ?1;",
    )?;

    let mut rows = stmt.query([task_uuid.to_string()])?;
    match rows.next()? {
        Some(row) => Ok(Some(parse_task_row(row)?)),
        None => Ok(None),
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let uuid_text: String = row.get("uuid")?;
    let owner_text: String = row.get("owner_uuid")?;
    let status_text: String = row.get("status")?;

    Ok(Task {
        uuid: parse_uuid(&uuid_text, "tasks.uuid")?,
        owner_uuid: parse_uuid(&owner_text, "tasks.owner_uuid")?,
        title: row.get("title")?,
        description: row.get("description")?,
        status: parse_status(&status_text)?,
        subtasks: Vec::new(),
        created_at: row.get("created_at")?,
    })
}

fn load_subtasks(conn: &Connection, task_uuid: TaskId) -> RepoResult<Vec<Subtask>> {
    let mut stmt = conn.prepare(
        "SELECT uuid, text, completed
         FROM subtasks
         WHERE task_uuid = ?1
         ORDER BY position ASC;",
    )?;

    let mut rows = stmt.query([task_uuid.to_string()])?;
    let mut subtasks = Vec::new();
    while let Some(row) = rows.next()? {
        let uuid_text: String = row.get("uuid")?;
        let completed = match row.get::<_, i64>("completed")? {
            0 => false,
            1 => true,
            other => {
                return Err(RepoError::InvalidData(format!(
                    "invalid completed value `{other}` in subtasks.completed"
                )));
            }
        };
        subtasks.push(Subtask {
            uuid: parse_uuid(&uuid_text, "subtasks.uuid")?,
            text: row.get("text")?,
            completed,
        });
    }

    Ok(subtasks)
}

fn parse_uuid(value: &str, source: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {source}")))
}

fn parse_status(value: &str) -> RepoResult<TaskStatus> {
    TaskStatus::parse(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid status `{value}` in tasks.status")))
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for (table, columns) in [
        ("tasks", TASKS_REQUIRED_COLUMNS),
        ("subtasks", SUBTASKS_REQUIRED_COLUMNS),
    ] {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
