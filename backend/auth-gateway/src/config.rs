/// Configuration management
///
/// Loaded from environment variables (a `.env` file is honoured by the binary).
use std::time::Duration;

use crypto_core::{JwtCodec, Secret};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid environment: {0}")]
    Env(#[from] envy::Error),

    #[error("JWT_SECRET must not be empty")]
    EmptySecret,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub server_host: String,
    #[serde(default = "default_port")]
    pub server_port: u16,
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Token lifetime; tokens never expire when unset
    #[serde(default)]
    pub jwt_ttl_secs: Option<u64>,
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default = "default_env")]
    pub app_env: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_env() -> String {
    "development".to_string()
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        envy::from_env::<Self>()?.validated()
    }

    /// Same as [`from_env`](Self::from_env) but reads from an explicit list
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Self>(vars)?.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.secret().is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        Ok(self)
    }

    pub fn secret(&self) -> Secret {
        Secret::from(self.jwt_secret.as_str())
    }

    pub fn jwt_ttl(&self) -> Option<Duration> {
        self.jwt_ttl_secs.map(Duration::from_secs)
    }

    pub fn codec(&self) -> JwtCodec {
        let secret = self.secret();
        match self.jwt_ttl() {
            Some(ttl) => JwtCodec::with_ttl(&secret, ttl),
            None => JwtCodec::new(&secret),
        }
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.server_host.clone(), self.server_port)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_ttl_secs", &self.jwt_ttl_secs)
            .field("log_format", &self.log_format)
            .field("app_env", &self.app_env)
            .finish()
    }
}
