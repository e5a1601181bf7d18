//! Session and authentication use-cases.
//!
//! # Responsibility
//! - Register users against the persisted user list.
//! - Establish and clear the current session.
//!
//! # Invariants
//! - Email uniqueness is enforced at registration by a scan of the stored
//!   list; registered users are never modified or deleted afterwards.
//! - `logout` touches only the session marker, never task data.
//!
//! Credential matching is exact-text comparison; there is no hashing or
//! token issuance in this local-only model.

use crate::model::user::{Credentials, User};
use crate::repo::user_repo::UserRepository;
use crate::repo::{RepoError, RepoResult};
use crate::store::LocalStore;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Authentication failures.
#[derive(Debug)]
pub enum AuthError {
    /// Email/password pair matched no registered user. Deliberately a single
    /// message with no field-level detail.
    InvalidCredentials,
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid email or password"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::InvalidCredentials => None,
        }
    }
}

impl From<RepoError> for AuthError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service for register/login/logout.
pub struct AuthService<S: LocalStore> {
    repo: UserRepository<S>,
}

impl<S: LocalStore> AuthService<S> {
    pub fn new(store: S) -> Self {
        Self {
            repo: UserRepository::new(store),
        }
    }

    /// Registers a new user.
    ///
    /// Returns `Ok(false)` when the email is already taken, leaving the
    /// stored list unchanged. No password strength or format checks.
    pub fn register(&self, candidate: User) -> RepoResult<bool> {
        let mut users = self.repo.load_users()?;
        if users.iter().any(|user| user.email == candidate.email) {
            info!(
                "event=register module=auth status=rejected reason=duplicate_email email={}",
                candidate.email
            );
            return Ok(false);
        }

        info!(
            "event=register module=auth status=ok email={}",
            candidate.email
        );
        users.push(candidate);
        self.repo.save_users(&users)?;
        Ok(true)
    }

    /// Logs in with exact credential matching.
    ///
    /// On success the matched user is persisted as the current session and
    /// returned. On mismatch the session is left untouched.
    ///
    /// # Errors
    /// - `InvalidCredentials` when no stored user matches both fields.
    pub fn login(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let users = self.repo.load_users()?;
        let Some(user) = users.iter().find(|user| user.matches(credentials)) else {
            info!(
                "event=login module=auth status=rejected reason=credential_mismatch email={}",
                credentials.email
            );
            return Err(AuthError::InvalidCredentials);
        };

        self.repo.save_session(user)?;
        info!("event=login module=auth status=ok email={}", user.email);
        Ok(user.clone())
    }

    /// Clears the session marker. Idempotent; never touches task data.
    pub fn logout(&self) -> RepoResult<()> {
        self.repo.clear_session()?;
        info!("event=logout module=auth status=ok");
        Ok(())
    }

    /// Returns the persisted session user, or `None` when logged out.
    pub fn current_session(&self) -> RepoResult<Option<User>> {
        self.repo.load_session()
    }
}
