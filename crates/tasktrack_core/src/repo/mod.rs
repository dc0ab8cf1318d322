//! Persistence port contracts and storage implementations.
//!
//! # Responsibility
//! - Define the task persistence contract consumed by the service layer.
//! - Isolate SQLite query details from engine/business orchestration.
//!
//! # Invariants
//! - Write paths must enforce `Task::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod task_repo;
