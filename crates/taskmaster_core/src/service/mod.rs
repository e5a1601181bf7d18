//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep callers (CLI, UI shells) decoupled from storage details.

pub mod auth_service;
pub mod task_service;
