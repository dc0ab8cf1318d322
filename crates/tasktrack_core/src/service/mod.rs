//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate the mutation engine against the persistence port.
//! - Keep UI/CLI layers decoupled from storage details.

pub mod task_service;
