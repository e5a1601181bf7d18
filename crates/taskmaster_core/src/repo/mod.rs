//! Repository layer: typed codecs over the local store.
//!
//! # Responsibility
//! - Translate between domain records and the JSON text held by `LocalStore`.
//! - Apply the best-effort read policy: corrupt stored data degrades to an
//!   empty collection (or absent session) with a warning, never a hard error.
//!
//! # Invariants
//! - Write paths always persist the full collection for their key.
//! - Read paths never panic on malformed stored text.

use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod task_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence errors surfaced by repositories.
///
/// Decode failures are deliberately absent: stored corruption is recovered
/// by falling back to empty data, so only transport and encode failures
/// propagate.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode store value: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
