//! Command-line client for the TaskTrack core.
//!
//! # Responsibility
//! - Drive one owner's task session against a local SQLite file.
//! - Render mutation failures distinctly: validation vs not-found vs save
//!   failures.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tasktrack_core::db::open_db;
use tasktrack_core::{
    default_log_level, init_logging, progress_of, AuthProvider, OwnerId, SqliteTaskRepository,
    StaticAuthProvider, Task, TaskFilter, TaskService, TaskServiceError, TaskStatus,
};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(
    name = "tasktrack",
    version = tasktrack_core::core_version(),
    about = "Owner-scoped task tracking over a local SQLite file"
)]
struct Cli {
    /// SQLite database file.
    #[arg(long, default_value = "tasktrack.db")]
    db: PathBuf,

    /// Owner identity to act as.
    #[arg(long, env = "TASKTRACK_OWNER")]
    owner: Option<Uuid>,

    /// Absolute directory for rolling log files; logging is off without it.
    #[arg(long)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a task with an optional checklist.
    Add {
        title: String,
        #[arg(long, short)]
        description: Option<String>,
        /// Initial checklist entry; repeat for more. Blank entries are dropped.
        #[arg(long = "subtask", value_name = "TEXT")]
        subtasks: Vec<String>,
    },
    /// Show tasks through a filter: all, active, completed, or pending.
    List {
        #[arg(long, default_value = "all")]
        filter: String,
    },
    /// Replace a task's title and description.
    ///
    /// The existing checklist is passed back unchanged unless
    /// `--clear-subtasks` is set; an omitted description clears it.
    Edit {
        task: Uuid,
        #[arg(long)]
        title: String,
        #[arg(long, short)]
        description: Option<String>,
        #[arg(long)]
        clear_subtasks: bool,
    },
    /// Change a task's status to pending, in-progress, or completed.
    Status { task: Uuid, status: String },
    /// Mark one subtask completed.
    Check { task: Uuid, subtask: Uuid },
    /// Mark one subtask open again.
    Uncheck { task: Uuid, subtask: Uuid },
    /// Append checklist entries to the end of a task's list.
    AddSubtasks {
        task: Uuid,
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// Delete a task and its checklist.
    Delete { task: Uuid },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        if let Err(message) = init_logging(default_log_level(), log_dir) {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    }

    let auth = match cli.owner {
        Some(owner) => StaticAuthProvider::signed_in(owner),
        None => StaticAuthProvider::signed_out(),
    };
    let Some(owner) = auth.current_owner() else {
        eprintln!("not signed in: pass --owner or set TASKTRACK_OWNER");
        return ExitCode::from(2);
    };

    match run(cli, owner) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, owner: OwnerId) -> Result<(), String> {
    let mut conn = open_db(&cli.db).map_err(|err| format!("open failed: {err}"))?;
    let repo =
        SqliteTaskRepository::try_new(&mut conn).map_err(|err| format!("open failed: {err}"))?;
    let mut service = TaskService::load(repo, owner).map_err(render_service_error)?;

    match cli.command {
        Command::Add {
            title,
            description,
            subtasks,
        } => {
            let task = service
                .create_task(&title, description.as_deref(), &subtasks)
                .map_err(render_service_error)?;
            println!("created {}", task.uuid);
            print_task(&task);
        }
        Command::List { filter } => {
            let filter = TaskFilter::parse(&filter)
                .ok_or_else(|| format!("validation failed: unknown filter `{filter}`"))?;
            let tasks = service.project(filter);
            if tasks.is_empty() {
                println!("no tasks to show");
            }
            for task in tasks {
                print_task(task);
            }
        }
        Command::Edit {
            task,
            title,
            description,
            clear_subtasks,
        } => {
            let subtasks = if clear_subtasks {
                Vec::new()
            } else {
                service
                    .get(task)
                    .ok_or_else(|| format!("not found: task {task}"))?
                    .subtasks
                    .clone()
            };
            let updated = service
                .edit_task(task, &title, description.as_deref(), subtasks)
                .map_err(render_service_error)?;
            print_task(&updated);
        }
        Command::Status { task, status } => {
            let status = TaskStatus::parse(&status)
                .map_err(|err| format!("validation failed: {err}"))?;
            let updated = service
                .change_status(task, status)
                .map_err(render_service_error)?;
            print_task(&updated);
        }
        Command::Check { task, subtask } => {
            let updated = toggle(&mut service, task, subtask, true)?;
            print_task(&updated);
        }
        Command::Uncheck { task, subtask } => {
            let updated = toggle(&mut service, task, subtask, false)?;
            print_task(&updated);
        }
        Command::AddSubtasks { task, texts } => {
            let updated = service
                .append_subtasks(task, &texts)
                .map_err(render_service_error)?;
            print_task(&updated);
        }
        Command::Delete { task } => {
            service.delete_task(task).map_err(render_service_error)?;
            println!("deleted {task}");
        }
    }

    Ok(())
}

fn toggle(
    service: &mut TaskService<SqliteTaskRepository<'_>>,
    task: Uuid,
    subtask: Uuid,
    completed: bool,
) -> Result<Task, String> {
    let current = service
        .get(task)
        .ok_or_else(|| format!("not found: task {task}"))?;
    // Presentation rule: a completed task's checklist is read-only.
    if current.status == TaskStatus::Completed {
        return Err("subtasks are read-only on a completed task".to_string());
    }
    service
        .toggle_subtask(task, subtask, completed)
        .map_err(render_service_error)
}

fn render_service_error(err: TaskServiceError) -> String {
    match &err {
        TaskServiceError::Validation(_) => format!("validation failed: {err}"),
        TaskServiceError::TaskNotFound(_) | TaskServiceError::SubtaskNotFound { .. } => {
            format!("not found: {err}")
        }
        TaskServiceError::Store(_) => format!("save failed: {err}"),
        TaskServiceError::SuggestionUnavailable(_) => format!("{err}"),
    }
}

fn print_task(task: &Task) {
    let progress = progress_of(task);
    if progress.has_subtasks() {
        println!(
            "{}  [{}]  {}  ({}/{})",
            task.uuid, task.status, task.title, progress.completed, progress.total
        );
    } else {
        println!("{}  [{}]  {}", task.uuid, task.status, task.title);
    }
    if !task.description.is_empty() {
        println!("    {}", task.description);
    }
    for subtask in &task.subtasks {
        let mark = if subtask.completed { "x" } else { " " };
        println!("    [{mark}] {}  {}", subtask.uuid, subtask.text);
    }
}
