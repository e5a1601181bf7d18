//! Domain model for the to-do/reminder core.
//!
//! # Responsibility
//! - Define the canonical task and user records shared by all layers.
//! - Keep wire-format concerns (field names, flag encoding) next to the types.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Notification lifecycle is a tagged state, never a loose boolean in core.

pub mod task;
pub mod user;
