//! Configuration model loaded from external sources.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crypto::TokenCipher;

/// Minimum length of the cookie signing secret.
pub const MIN_SECRET_LENGTH: usize = 64;

/// Where the dashboard reads and writes its data.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// In-memory demo data with simulated latency.
    #[default]
    Fixture,
    /// SQLite database through Diesel.
    Database,
}

/// Static theme settings exposed to every template.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ThemeConfig {
    #[serde(default)]
    pub dark_mode: bool,
}

/// Simulated latencies of the fixture backend, in milliseconds.
#[derive(Clone, Debug, Deserialize)]
pub struct FixtureConfig {
    #[serde(default = "default_managers_latency")]
    pub managers_latency_ms: u64,
    #[serde(default = "default_profile_latency")]
    pub profile_latency_ms: u64,
    #[serde(default = "default_submit_latency")]
    pub submit_latency_ms: u64,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            managers_latency_ms: default_managers_latency(),
            profile_latency_ms: default_profile_latency(),
            submit_latency_ms: default_submit_latency(),
        }
    }
}

fn default_managers_latency() -> u64 {
    1000
}

fn default_profile_latency() -> u64 {
    1200
}

fn default_submit_latency() -> u64 {
    1500
}

fn default_store_id() -> i32 {
    1
}

fn default_manager_cap() -> usize {
    5
}

fn default_public_url() -> String {
    "https://example.com".to_string()
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    pub secret: String,
    #[serde(default = "default_public_url")]
    pub public_url: String,
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default)]
    pub database_url: String,
    /// Fernet key encrypting marketplace tokens in the database.
    #[serde(default)]
    pub token_key: String,
    #[serde(default = "default_store_id")]
    pub store_id: i32,
    #[serde(default = "default_manager_cap")]
    pub manager_cap: usize,
    #[serde(default)]
    pub allowed_origin: Option<String>,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub fixture: FixtureConfig,
}

/// Reasons a configuration is refused at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("secret must be at least {MIN_SECRET_LENGTH} bytes long")]
    SecretTooShort,
    #[error("public_url must start with http:// or https://")]
    InvalidPublicUrl,
    #[error("store_id must be greater than zero")]
    InvalidStoreId,
    #[error("database_url is required for the database backend")]
    MissingDatabaseUrl,
    #[error("token_key must be a url-safe base64 encoded 32-byte key")]
    InvalidTokenKey,
}

impl ServerConfig {
    /// Checks the values that cannot be expressed through deserialization.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::SecretTooShort);
        }
        if !(self.public_url.starts_with("http://") || self.public_url.starts_with("https://")) {
            return Err(ConfigError::InvalidPublicUrl);
        }
        if self.store_id <= 0 {
            return Err(ConfigError::InvalidStoreId);
        }
        if self.backend == BackendKind::Database && self.database_url.trim().is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        if self.backend == BackendKind::Database && TokenCipher::new(&self.token_key).is_err() {
            return Err(ConfigError::InvalidTokenKey);
        }
        Ok(())
    }

    /// Public URL without a trailing slash.
    pub fn public_base(&self) -> &str {
        self.public_url.trim_end_matches('/')
    }
}
