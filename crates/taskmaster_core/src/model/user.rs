//! User and credential records.
//!
//! # Responsibility
//! - Define the registered-user record and the login credential shape.
//!
//! # Invariants
//! - `email` is the unique key of a user within the stored user list.

use serde::{Deserialize, Serialize};

/// A registered user.
///
/// The password is stored in plaintext because this models a local,
/// single-machine store with no server. That is insecure by construction and
/// must not be reused for anything beyond local convenience data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub password: String,
}

/// Login input, matched exactly against a stored `User`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl User {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns whether the given credentials match this user exactly.
    pub fn matches(&self, credentials: &Credentials) -> bool {
        self.email == credentials.email && self.password == credentials.password
    }
}
