//! Task collection use-cases.
//!
//! # Responsibility
//! - Hold one user's in-memory task collection, newest-first.
//! - Re-persist the full collection through `TaskRepository` on every
//!   mutation, making persistence an explicit boundary call.
//! - Provide stable sorted views for list presentation.
//!
//! # Invariants
//! - Every mutation that returns `Ok` has already been persisted.
//! - `update`/`delete` on an unknown id are silent no-ops.
//! - Patch merges are re-validated; an invalid merge leaves the stored task
//!   unchanged.

use crate::model::task::{NotifyState, Priority, Task, TaskDraft, TaskId, TaskValidationError};
use crate::repo::task_repo::TaskRepository;
use crate::repo::{RepoError, RepoResult};
use crate::store::LocalStore;
use log::info;
use std::cmp::Reverse;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Task store failures.
#[derive(Debug)]
pub enum TaskStoreError {
    /// Draft or patched task failed field validation.
    Validation(TaskValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for TaskStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for TaskStoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for TaskStoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Partial update applied to one task. Unset fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub detail: Option<String>,
    pub event_date: Option<i64>,
    pub reminder_date: Option<i64>,
    pub priority: Option<Priority>,
    pub is_completed: Option<bool>,
}

impl TaskPatch {
    fn apply(&self, task: &mut Task) {
        if let Some(detail) = &self.detail {
            task.detail = detail.clone();
        }
        if let Some(event_date) = self.event_date {
            task.event_date = event_date;
        }
        if let Some(reminder_date) = self.reminder_date {
            task.reminder_date = reminder_date;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(is_completed) = self.is_completed {
            task.is_completed = is_completed;
        }
    }
}

/// List orderings offered to presentation callers.
///
/// All sorts are stable: ties keep the collection's newest-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// High, then Medium, then Low.
    Priority,
    /// Earliest reminder first.
    DateAsc,
    /// Latest reminder first.
    DateDesc,
    /// Open tasks before completed ones.
    Status,
}

/// One user's task collection, synchronized to the store on every mutation.
pub struct TaskStore<S: LocalStore> {
    repo: TaskRepository<S>,
    email: String,
    tasks: Vec<Task>,
}

impl<S: LocalStore> TaskStore<S> {
    /// Opens the task store for `email`, loading the persisted collection.
    ///
    /// Legacy records are upgraded and corrupt data degrades to an empty
    /// collection inside the repository load.
    pub fn open(store: S, email: impl Into<String>) -> RepoResult<Self> {
        let repo = TaskRepository::new(store);
        let email = email.into();
        let tasks = repo.load_tasks(&email)?;
        info!(
            "event=tasks_open module=tasks status=ok email={email} count={}",
            tasks.len()
        );
        Ok(Self { repo, email, tasks })
    }

    /// Current collection, newest-first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Creates a task from the draft and prepends it to the collection.
    ///
    /// # Errors
    /// - `Validation` when the draft fails field checks; nothing is stored.
    pub fn add(&mut self, draft: TaskDraft) -> Result<Task, TaskStoreError> {
        let task = Task::from_draft(draft)?;
        self.tasks.insert(0, task.clone());
        self.persist()?;
        info!(
            "event=task_add module=tasks status=ok id={} priority={:?}",
            task.id, task.priority
        );
        Ok(task)
    }

    /// Merges `patch` into the task with `id` and persists.
    ///
    /// Silent no-op when the id is unknown. An empty patch persists the
    /// collection unchanged. A merge that breaks field invariants is rolled
    /// back and reported without persisting.
    pub fn update(&mut self, id: TaskId, patch: &TaskPatch) -> Result<(), TaskStoreError> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(());
        };

        let previous = task.clone();
        patch.apply(task);
        if let Err(err) = task.validate() {
            *task = previous;
            return Err(err.into());
        }

        self.persist()?;
        Ok(())
    }

    /// Removes the task with `id` and persists. Silent no-op when unknown.
    pub fn delete(&mut self, id: TaskId) -> RepoResult<()> {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            return Ok(());
        }

        self.persist()?;
        info!("event=task_delete module=tasks status=ok id={id}");
        Ok(())
    }

    /// Bulk-overwrites the collection, for import/migration callers.
    pub fn replace_all(&mut self, tasks: Vec<Task>) -> RepoResult<()> {
        self.tasks = tasks;
        self.persist()?;
        info!(
            "event=tasks_replace module=tasks status=ok count={}",
            self.tasks.len()
        );
        Ok(())
    }

    /// Flips `is_completed` on the task with `id`. Completion never resets
    /// the notification state.
    pub fn toggle_completed(&mut self, id: TaskId) -> Result<(), TaskStoreError> {
        let Some(task) = self.tasks.iter().find(|task| task.id == id) else {
            return Ok(());
        };
        let patch = TaskPatch {
            is_completed: Some(!task.is_completed),
            ..TaskPatch::default()
        };
        self.update(id, &patch)
    }

    /// Commits the one-way `Pending -> Notified` transition and persists.
    ///
    /// Called by the reminder scheduler; silent no-op when the id is unknown
    /// or the task was already notified.
    pub fn mark_notified(&mut self, id: TaskId) -> RepoResult<()> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(());
        };
        if task.notify_state == NotifyState::Notified {
            return Ok(());
        }

        task.mark_notified();
        self.persist()?;
        Ok(())
    }

    /// Returns a sorted copy of the collection. Stable in all orderings.
    pub fn sorted(&self, order: SortOrder) -> Vec<Task> {
        let mut tasks = self.tasks.clone();
        match order {
            SortOrder::Priority => tasks.sort_by_key(|task| task.priority.rank()),
            SortOrder::DateAsc => tasks.sort_by_key(|task| task.reminder_date),
            SortOrder::DateDesc => tasks.sort_by_key(|task| Reverse(task.reminder_date)),
            SortOrder::Status => tasks.sort_by_key(|task| task.is_completed),
        }
        tasks
    }

    fn persist(&self) -> RepoResult<()> {
        self.repo.save_tasks(&self.email, &self.tasks)
    }
}
