//! User list and session persistence.
//!
//! # Responsibility
//! - Read/write the ordered registered-user list under the `users` key.
//! - Read/write/clear the current-session record under the `session` key.
//!
//! # Invariants
//! - A corrupt `users` value reads as an empty list.
//! - A corrupt `session` value reads as logged out.

use crate::model::user::User;
use crate::repo::{RepoError, RepoResult};
use crate::store::{keys, LocalStore};
use log::warn;

/// Repository for registered users and the session marker.
pub struct UserRepository<S: LocalStore> {
    store: S,
}

impl<S: LocalStore> UserRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads the ordered user list, treating missing or corrupt data as empty.
    pub fn load_users(&self) -> RepoResult<Vec<User>> {
        let Some(raw) = self.store.read(keys::USERS)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(users) => Ok(users),
            Err(err) => {
                warn!(
                    "event=users_decode module=repo status=recovered error={err} fallback=empty_list"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Persists the full user list.
    pub fn save_users(&self, users: &[User]) -> RepoResult<()> {
        let raw = serde_json::to_string(users).map_err(RepoError::Encode)?;
        self.store.write(keys::USERS, &raw)?;
        Ok(())
    }

    /// Loads the current session, treating missing or corrupt data as logged out.
    pub fn load_session(&self) -> RepoResult<Option<User>> {
        let Some(raw) = self.store.read(keys::SESSION)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(err) => {
                warn!(
                    "event=session_decode module=repo status=recovered error={err} fallback=logged_out"
                );
                Ok(None)
            }
        }
    }

    /// Persists `user` as the current session.
    pub fn save_session(&self, user: &User) -> RepoResult<()> {
        let raw = serde_json::to_string(user).map_err(RepoError::Encode)?;
        self.store.write(keys::SESSION, &raw)?;
        Ok(())
    }

    /// Removes the session marker. Idempotent; task data is untouched.
    pub fn clear_session(&self) -> RepoResult<()> {
        self.store.remove(keys::SESSION)?;
        Ok(())
    }
}
