//! Explicit user identity for user-scoped operations.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Users.
///
/// Also serves as the document key of the user's cart: one cart per user,
/// looked up by this id directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The authenticated user on whose behalf an operation runs.
///
/// There is no ambient current-user state anywhere in the crate. Every
/// user-scoped repository method takes a `&Session`, so ownership checks and
/// cart lookups always name their user explicitly. Authentication itself
/// happens upstream; tests construct sessions directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: UserId,
}

impl Session {
    /// Creates a session for the given user.
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}
