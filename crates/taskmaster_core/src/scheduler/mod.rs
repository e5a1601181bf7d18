//! Reminder scheduling.
//!
//! # Responsibility
//! - Scan the task collection for due, uncompleted, not-yet-notified tasks.
//! - Deliver at most one notification per task and commit the `Notified`
//!   transition immediately, before any further tick can observe the task.
//!
//! # Invariants
//! - Due check is inclusive: `now_ms >= reminder_date`.
//! - The `Notified` transition is committed whether or not delivery
//!   succeeded; a failed delivery is logged and never retried.
//! - No task ever transitions back to `Pending`.

use crate::model::task::{Task, TaskId};
use crate::repo::RepoResult;
use crate::service::task_service::TaskStore;
use crate::store::LocalStore;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

mod poller;

pub use poller::{ReminderPoller, DEFAULT_POLL_INTERVAL};

/// Title line used for every reminder notification.
pub const REMINDER_TITLE: &str = "TaskMaster Reminder";

/// Delivery failure reported by a notification surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// Platform delivery failed (permission revoked, surface unavailable).
    Delivery(String),
}

impl Display for NotifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Delivery(reason) => write!(f, "notification delivery failed: {reason}"),
        }
    }
}

impl Error for NotifyError {}

/// The `(title, body, tag)` triple handed to a delivery surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderNotification {
    pub title: String,
    /// Task detail text.
    pub body: String,
    /// Task id, usable for platform-level notification dedup.
    pub tag: TaskId,
}

/// Best-effort notification delivery surface.
///
/// Implementations live at the platform edge (system toast, audio cue); the
/// core ships `LogNotifier` as the always-available fallback.
pub trait Notifier {
    fn notify(&self, notification: &ReminderNotification) -> Result<(), NotifyError>;
}

/// Delivery surface that writes the reminder to the log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &ReminderNotification) -> Result<(), NotifyError> {
        // Body is user text; keep the log line single-line.
        let body = notification.body.replace(['\n', '\r'], " ");
        info!(
            "event=reminder module=scheduler status=delivered tag={} title={} body={body}",
            notification.tag, notification.title
        );
        Ok(())
    }
}

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

/// Returns ids of tasks eligible for their one notification at `now_ms`.
pub fn due_task_ids(tasks: &[Task], now_ms: i64) -> Vec<TaskId> {
    tasks
        .iter()
        .filter(|task| task.is_due(now_ms))
        .map(|task| task.id)
        .collect()
}

/// Runs one scheduler tick against the store.
///
/// For every due task: deliver through `notifier`, then commit
/// `Pending -> Notified` regardless of the delivery outcome. Returns the
/// number of transitions committed.
///
/// # Errors
/// - Persistence failures from committing the transition; delivery failures
///   never propagate.
pub fn run_tick<S: LocalStore>(
    store: &mut TaskStore<S>,
    notifier: &dyn Notifier,
    now_ms: i64,
) -> RepoResult<usize> {
    let due: Vec<(TaskId, String)> = store
        .tasks()
        .iter()
        .filter(|task| task.is_due(now_ms))
        .map(|task| (task.id, task.detail.clone()))
        .collect();

    for (id, detail) in &due {
        let notification = ReminderNotification {
            title: REMINDER_TITLE.to_string(),
            body: detail.clone(),
            tag: *id,
        };
        if let Err(err) = notifier.notify(&notification) {
            warn!(
                "event=reminder module=scheduler status=delivery_failed tag={id} error={err}"
            );
        }
        // Committed even on failed delivery: lossy at-most-once, no retries.
        store.mark_notified(*id)?;
    }

    Ok(due.len())
}
