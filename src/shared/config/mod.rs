//! Application configuration module
//!
//! Configuration is read from the environment (after loading a `.env` file),
//! optionally layered over a TOML file named by `AMITY_CONFIG`. Tests build
//! it programmatically through [`AppConfig::builder`].

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Application configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite connection string
    pub database_url: String,
    /// Upper bound on pooled connections
    pub database_max_connections: u32,
    /// Timeout applied to every storage operation
    pub store_timeout_secs: u64,
    /// HMAC secret used to sign session tokens
    pub jwt_secret: String,
    /// Session token lifetime
    pub token_ttl_secs: u64,
    /// bcrypt work factor for stored credentials
    pub bcrypt_cost: u32,
    /// Object-store bucket receiving uploads
    pub blob_bucket: String,
    /// Object-store endpoint; uploads go to the local directory when unset
    pub blob_endpoint: Option<String>,
    /// Public base URL for uploaded objects
    pub blob_public_url: Option<String>,
    /// Directory used by the local blob store
    pub upload_dir: String,
    /// HTTP listen port
    pub server_port: u16,
    /// Usernames promoted to admin at startup
    pub admins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:amity.db?mode=rwc".to_string(),
            database_max_connections: 5,
            store_timeout_secs: 5,
            jwt_secret: String::new(),
            token_ttl_secs: 24 * 60 * 60,
            bcrypt_cost: 12,
            blob_bucket: "amity-uploads".to_string(),
            blob_endpoint: None,
            blob_public_url: None,
            upload_dir: "uploads".to_string(),
            server_port: 8080,
            admins: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment
    ///
    /// When `AMITY_CONFIG` names a TOML file, it is read first and
    /// environment variables override its values.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("AMITY_CONFIG") {
            Ok(path) => Self::from_toml_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(v) = env_var("DATABASE_URL") {
            self.database_url = v;
        }
        if let Some(v) = env_parse("DATABASE_MAX_CONNECTIONS")? {
            self.database_max_connections = v;
        }
        if let Some(v) = env_parse("STORE_TIMEOUT_SECS")? {
            self.store_timeout_secs = v;
        }
        if let Some(v) = env_var("JWT_SECRET") {
            self.jwt_secret = v;
        }
        if let Some(v) = env_parse("TOKEN_TTL_SECS")? {
            self.token_ttl_secs = v;
        }
        if let Some(v) = env_parse("BCRYPT_COST")? {
            self.bcrypt_cost = v;
        }
        if let Some(v) = env_var("BLOB_BUCKET") {
            self.blob_bucket = v;
        }
        if let Some(v) = env_var("BLOB_ENDPOINT") {
            self.blob_endpoint = Some(v);
        }
        if let Some(v) = env_var("BLOB_PUBLIC_URL") {
            self.blob_public_url = Some(v);
        }
        if let Some(v) = env_var("UPLOAD_DIR") {
            self.upload_dir = v;
        }
        if let Some(v) = env_parse("SERVER_PORT")? {
            self.server_port = v;
        }
        if let Some(v) = env_var("AMITY_ADMINS") {
            self.admins = v
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if self.database_max_connections == 0 {
            return Err(ConfigError::invalid("DATABASE_MAX_CONNECTIONS", "must be at least 1"));
        }
        if self.store_timeout_secs == 0 {
            return Err(ConfigError::invalid("STORE_TIMEOUT_SECS", "must be at least 1"));
        }
        if self.token_ttl_secs == 0 {
            return Err(ConfigError::invalid("TOKEN_TTL_SECS", "must be at least 1"));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::invalid("BCRYPT_COST", "must be between 4 and 31"));
        }
        Ok(())
    }

    /// Storage operation timeout
    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }

    /// Session token lifetime
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T>(key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::invalid(key, e.to_string())),
        None => Ok(None),
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = url.into();
        self
    }

    /// Set the maximum number of pooled connections
    pub fn database_max_connections(mut self, max: u32) -> Self {
        self.config.database_max_connections = max;
        self
    }

    /// Set the storage operation timeout
    pub fn store_timeout_secs(mut self, secs: u64) -> Self {
        self.config.store_timeout_secs = secs;
        self
    }

    /// Set the token signing secret
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.jwt_secret = secret.into();
        self
    }

    /// Set the token lifetime
    pub fn token_ttl_secs(mut self, secs: u64) -> Self {
        self.config.token_ttl_secs = secs;
        self
    }

    /// Set the bcrypt work factor
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.bcrypt_cost = cost;
        self
    }

    /// Set the object-store bucket
    pub fn blob_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.config.blob_bucket = bucket.into();
        self
    }

    /// Route uploads to an HTTP object store
    pub fn blob_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.blob_endpoint = Some(endpoint.into());
        self
    }

    /// Set the local upload directory
    pub fn upload_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.upload_dir = dir.into();
        self
    }

    /// Add a username promoted to admin at startup
    pub fn admin(mut self, username: impl Into<String>) -> Self {
        self.config.admins.push(username.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            message: message.into(),
        }
    }
}
