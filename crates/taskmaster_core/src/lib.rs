//! Core domain logic for TaskMaster, a local to-do/reminder application.
//! This crate is the single source of truth for business invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod scheduler;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{
    NotifyState, Priority, Task, TaskDraft, TaskId, TaskValidationError,
};
pub use model::user::{Credentials, User};
pub use repo::{RepoError, RepoResult};
pub use scheduler::{
    due_task_ids, now_epoch_millis, run_tick, LogNotifier, Notifier, NotifyError,
    ReminderNotification, ReminderPoller, DEFAULT_POLL_INTERVAL, REMINDER_TITLE,
};
pub use service::auth_service::{AuthError, AuthService};
pub use service::task_service::{SortOrder, TaskPatch, TaskStore, TaskStoreError};
pub use store::{LocalStore, SqliteLocalStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
