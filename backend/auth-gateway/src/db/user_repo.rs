//! Credential directory
//!
//! The gateway authenticates against a fixed list of users loaded at startup.
//! The store is handed to [`AuthService`](crate::services::AuthService)
//! explicitly, so tests can substitute their own directory.

use crate::models::UserRecord;

/// Read-only lookup of users by credentials
pub trait CredentialStore: Send + Sync {
    /// Exact, case-sensitive match on both username and password
    fn find_user(&self, username: &str, password: &str) -> Option<UserRecord>;
}

/// Immutable in-memory directory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    users: Vec<UserRecord>,
}

impl InMemoryCredentialStore {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }

    /// Directory shipped with the gateway
    pub fn with_default_users() -> Self {
        Self::new(vec![
            UserRecord::new("fast", "campus", true),
            UserRecord::new("foo", "bar", false),
        ])
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn find_user(&self, username: &str, password: &str) -> Option<UserRecord> {
        self.users
            .iter()
            .find(|user| user.username == username && user.password == password)
            .cloned()
    }
}
