use serde::{Deserialize, Serialize};

/// Identifier issued by the user store, starting at 1
pub type UserId = u32;

/// User record held in the user store
///
/// The store treats `password` as an opaque string; the service layer
/// writes a keyed hash into it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password: String,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: 0,
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Partial update for a user; `None` or empty fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl UserPatch {
    /// Build a patch from raw form input, treating blank fields as "keep"
    pub fn from_input(username: &str, password: &str) -> Self {
        Self {
            username: non_empty(username),
            password: non_empty(password),
        }
    }

    pub(crate) fn apply(self, user: &mut User) {
        if let Some(username) = self.username.filter(|s| !s.is_empty()) {
            user.username = username;
        }
        if let Some(password) = self.password.filter(|s| !s.is_empty()) {
            user.password = password;
        }
    }
}

pub(crate) fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
