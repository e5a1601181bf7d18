//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record persisted per user.
//! - Encode the notification lifecycle as an explicit tagged state.
//! - Validate task field invariants before they reach persistence.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `detail` is non-empty for every validated task.
//! - `reminder_date <= event_date` for every validated task.
//! - `NotifyState` never transitions from `Notified` back to `Pending`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Task urgency bucket.
///
/// Serialized capitalized (`"High"`) to match the persisted wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: `High` first, then `Medium`, then `Low`.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

/// Notification lifecycle for one task.
///
/// Modeled as a tagged state rather than a bare flag so the at-most-once
/// delivery guarantee is visible in the type. Persisted as the boolean
/// `notified` field for compatibility with existing stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotifyState {
    /// Eligible for one future notification once the reminder time passes.
    #[default]
    Pending,
    /// A delivery was attempted; the task is never notified again.
    Notified,
}

/// Serde adapter mapping `NotifyState` onto the wire-level `notified` bool.
mod notified_flag {
    use super::NotifyState;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(state: &NotifyState, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(matches!(state, NotifyState::Notified))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NotifyState, D::Error> {
        Ok(if bool::deserialize(deserializer)? {
            NotifyState::Notified
        } else {
            NotifyState::Pending
        })
    }
}

/// Validation failures for task input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// `detail` is empty or whitespace-only.
    EmptyDetail,
    /// `reminder_date` is later than `event_date`.
    ReminderAfterEvent {
        reminder_date: i64,
        event_date: i64,
    },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDetail => write!(f, "task detail cannot be empty"),
            Self::ReminderAfterEvent {
                reminder_date,
                event_date,
            } => write!(
                f,
                "reminder time {reminder_date} is after event time {event_date}"
            ),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record.
///
/// Field names serialize camelCase to keep the persisted JSON layout stable
/// across reimplementations of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable global ID, also used as the notification tag.
    pub id: TaskId,
    /// Free-form task text shown in notifications.
    pub detail: String,
    /// When the task itself happens. Unix epoch milliseconds.
    pub event_date: i64,
    /// When the reminder becomes due. Unix epoch milliseconds.
    /// Expected to be `<= event_date`.
    pub reminder_date: i64,
    pub priority: Priority,
    pub is_completed: bool,
    /// Persisted as the `notified` boolean.
    #[serde(rename = "notified", with = "notified_flag")]
    pub notify_state: NotifyState,
}

/// Caller-supplied fields for creating a task.
///
/// Kept separate from `Task` so construction always passes through
/// validation and flag initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub detail: String,
    pub event_date: i64,
    pub reminder_date: i64,
    pub priority: Priority,
}

impl Task {
    /// Creates a validated task from draft input with a generated stable ID.
    ///
    /// # Invariants
    /// - `is_completed` starts as `false`.
    /// - `notify_state` starts as `Pending`.
    ///
    /// # Errors
    /// - `EmptyDetail` when the detail is blank.
    /// - `ReminderAfterEvent` when the reminder is later than the event.
    pub fn from_draft(draft: TaskDraft) -> Result<Self, TaskValidationError> {
        let task = Self {
            id: Uuid::new_v4(),
            detail: draft.detail,
            event_date: draft.event_date,
            reminder_date: draft.reminder_date,
            priority: draft.priority,
            is_completed: false,
            notify_state: NotifyState::Pending,
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks field invariants. Called on creation and after patch merges.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.detail.trim().is_empty() {
            return Err(TaskValidationError::EmptyDetail);
        }
        if self.reminder_date > self.event_date {
            return Err(TaskValidationError::ReminderAfterEvent {
                reminder_date: self.reminder_date,
                event_date: self.event_date,
            });
        }
        Ok(())
    }

    /// Returns whether the reminder is due at `now_ms` (inclusive) and the
    /// task is still eligible for its one notification.
    pub fn is_due(&self, now_ms: i64) -> bool {
        !self.is_completed
            && self.notify_state == NotifyState::Pending
            && now_ms >= self.reminder_date
    }

    /// Commits the one-way `Pending -> Notified` transition.
    ///
    /// Idempotent: marking an already-notified task has no effect.
    pub fn mark_notified(&mut self) {
        self.notify_state = NotifyState::Notified;
    }
}

#[cfg(test)]
mod tests {
    use super::{NotifyState, Priority, Task, TaskDraft, TaskValidationError};

    fn draft() -> TaskDraft {
        TaskDraft {
            detail: "water the plants".to_string(),
            event_date: 2_000,
            reminder_date: 1_000,
            priority: Priority::Medium,
        }
    }

    #[test]
    fn from_draft_initializes_flags() {
        let task = Task::from_draft(draft()).unwrap();
        assert!(!task.is_completed);
        assert_eq!(task.notify_state, NotifyState::Pending);
    }

    #[test]
    fn blank_detail_is_rejected() {
        let mut input = draft();
        input.detail = "   ".to_string();
        assert_eq!(
            Task::from_draft(input).unwrap_err(),
            TaskValidationError::EmptyDetail
        );
    }

    #[test]
    fn reminder_after_event_is_rejected() {
        let mut input = draft();
        input.reminder_date = 3_000;
        assert!(matches!(
            Task::from_draft(input).unwrap_err(),
            TaskValidationError::ReminderAfterEvent { .. }
        ));
    }

    #[test]
    fn due_check_is_inclusive_at_reminder_time() {
        let task = Task::from_draft(draft()).unwrap();
        assert!(!task.is_due(999));
        assert!(task.is_due(1_000));
        assert!(task.is_due(5_000));
    }

    #[test]
    fn completed_or_notified_tasks_are_never_due() {
        let mut task = Task::from_draft(draft()).unwrap();
        task.is_completed = true;
        assert!(!task.is_due(5_000));

        let mut task = Task::from_draft(draft()).unwrap();
        task.mark_notified();
        assert!(!task.is_due(5_000));
    }

    #[test]
    fn notified_flag_round_trips_as_bool() {
        let mut task = Task::from_draft(draft()).unwrap();
        task.mark_notified();

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["notified"], serde_json::Value::Bool(true));
        assert_eq!(json["isCompleted"], serde_json::Value::Bool(false));
        assert_eq!(json["priority"], "Medium");

        let back: Task = serde_json::from_value(json).unwrap();
        assert_eq!(back, task);
    }
}
