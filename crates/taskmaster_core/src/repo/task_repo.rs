//! Per-user task collection persistence.
//!
//! # Responsibility
//! - Read/write one user's ordered task list under `tasks_<email>`.
//! - Upgrade legacy records on read: a task stored without `eventDate`
//!   gains `eventDate = reminderDate`.
//!
//! # Invariants
//! - A corrupt stored collection reads as empty, never as an error.
//! - Records that fail to decode individually are dropped with a warning
//!   rather than poisoning the rest of the collection.

use crate::model::task::Task;
use crate::repo::{RepoError, RepoResult};
use crate::store::{keys, LocalStore};
use log::warn;
use serde_json::Value;

/// Repository for one-user-at-a-time task collections.
pub struct TaskRepository<S: LocalStore> {
    store: S,
}

impl<S: LocalStore> TaskRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads the task collection for `email`.
    ///
    /// Missing key or corrupt JSON both yield an empty collection. Legacy
    /// records missing `eventDate` are upgraded in place on read.
    pub fn load_tasks(&self, email: &str) -> RepoResult<Vec<Task>> {
        let key = keys::tasks(email);
        let Some(raw) = self.store.read(&key)? else {
            return Ok(Vec::new());
        };

        let records: Vec<Value> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    "event=tasks_decode module=repo status=recovered key={key} error={err} fallback=empty_list"
                );
                return Ok(Vec::new());
            }
        };

        let mut tasks = Vec::with_capacity(records.len());
        for record in records {
            match decode_record(record) {
                Ok(task) => tasks.push(task),
                Err(err) => {
                    warn!(
                        "event=task_decode module=repo status=recovered key={key} error={err} fallback=drop_record"
                    );
                }
            }
        }
        Ok(tasks)
    }

    /// Persists the full task collection for `email`.
    pub fn save_tasks(&self, email: &str, tasks: &[Task]) -> RepoResult<()> {
        let raw = serde_json::to_string(tasks).map_err(RepoError::Encode)?;
        self.store.write(&keys::tasks(email), &raw)?;
        Ok(())
    }
}

/// Decodes one stored record, applying the legacy `eventDate` fill first.
fn decode_record(mut record: Value) -> Result<Task, serde_json::Error> {
    if let Some(object) = record.as_object_mut() {
        if !object.contains_key("eventDate") {
            if let Some(reminder) = object.get("reminderDate").cloned() {
                object.insert("eventDate".to_string(), reminder);
            }
        }
    }
    serde_json::from_value(record)
}
