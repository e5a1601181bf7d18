//! Local persistent key-value store.
//!
//! # Responsibility
//! - Define the `LocalStore` contract used by every repository.
//! - Keep the key layout (`users`, `session`, `tasks_<email>`) in one place.
//!
//! # Invariants
//! - Values are opaque JSON text at this layer; decoding and corrupt-data
//!   fallback happen in `repo`.
//! - Store contents survive process restarts for file-backed stores.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod sqlite;

pub use sqlite::SqliteLocalStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "store schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Persistent string key -> JSON text store.
///
/// Mirrors a browser-local storage contract: read returns the stored value
/// when present, write upserts, remove is idempotent.
pub trait LocalStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// Well-known store keys.
pub mod keys {
    /// Ordered list of all registered users.
    pub const USERS: &str = "users";
    /// The currently authenticated user; absent means logged out.
    pub const SESSION: &str = "session";

    /// Per-user task collection key.
    pub fn tasks(email: &str) -> String {
        format!("tasks_{email}")
    }
}

#[cfg(test)]
mod tests {
    use super::keys;

    #[test]
    fn task_key_is_partitioned_by_email() {
        assert_eq!(keys::tasks("a@x.com"), "tasks_a@x.com");
        assert_ne!(keys::tasks("a@x.com"), keys::tasks("b@x.com"));
    }
}
