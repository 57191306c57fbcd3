/// User model
use crypto_core::Claims;
use serde::{Deserialize, Serialize};

/// One entry of the credential directory
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    pub username: String,
    /// Compared verbatim, never hashed
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl UserRecord {
    pub fn new(username: impl Into<String>, password: impl Into<String>, is_admin: bool) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            is_admin,
        }
    }

    /// Identity to embed in a token for this user
    pub fn claims(&self) -> Claims {
        Claims::new(self.username.clone(), self.is_admin)
    }
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("is_admin", &self.is_admin)
            .finish()
    }
}

/// Login request body
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub ok: bool,
    pub token: String,
}
