/// Login: credential check followed by token issuance
use std::sync::Arc;

use crypto_core::JwtCodec;

use crate::db::CredentialStore;
use crate::error::{AppError, Result};

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn CredentialStore>,
    codec: Arc<JwtCodec>,
}

impl AuthService {
    pub fn new(users: Arc<dyn CredentialStore>, codec: Arc<JwtCodec>) -> Self {
        Self { users, codec }
    }

    /// Issue a token for `username` if the credentials match a known user
    pub fn login(&self, username: &str, password: &str) -> Result<String> {
        let Some(user) = self.users.find_user(username, password) else {
            tracing::warn!(username = %username, "login rejected: no matched user");
            return Err(AppError::CredentialMismatch);
        };

        let token = self.codec.encode(&user.claims())?;
        tracing::info!(username = %user.username, is_admin = user.is_admin, "token issued");

        Ok(token)
    }
}
