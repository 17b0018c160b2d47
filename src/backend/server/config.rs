/**
 * Server Configuration
 *
 * Configuration is assembled in three layers:
 * 1. built-in defaults
 * 2. an optional TOML file named by `ACCOUNT_SERVICE_CONFIG`
 * 3. environment variables
 *
 * # Environment Variables
 *
 * | Variable | Field |
 * |---|---|
 * | `SERVER_HOST` | `host` |
 * | `SERVER_PORT` | `port` |
 * | `COOKIE_SECRET` | `cookie_secret` |
 * | `AUTH_COOKIE_TTL_SECS` | `auth_cookie_ttl_secs` |
 * | `SESSION_IDLE_TIMEOUT_SECS` | `session_idle_timeout_secs` |
 * | `SESSION_CLEANUP_INTERVAL_SECS` | `session_cleanup_interval_secs` |
 * | `BCRYPT_COST` | `bcrypt_cost` |
 * | `LOGOUT_CLEARS_SESSION` | `logout_clears_session` |
 * | `SECURE_COOKIES` | `secure_cookies` |
 * | `DATABASE_URL` | `database_url` |
 */

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming the TOML config file
pub const CONFIG_FILE_ENV: &str = "ACCOUNT_SERVICE_CONFIG";

/// Upper bound for cookie and session lifetimes (400 days)
pub const MAX_LIFETIME_SECS: u64 = 400 * 24 * 60 * 60;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Secret for signing auth cookies; a random one is generated when unset
    pub cookie_secret: Option<String>,
    /// Lifetime of the auth cookies and of a login, in seconds
    pub auth_cookie_ttl_secs: u64,
    /// Sessions unused for this long expire
    pub session_idle_timeout_secs: u64,
    /// How often expired sessions are deleted from the store
    pub session_cleanup_interval_secs: u64,
    pub bcrypt_cost: u32,
    /// Also reset the server-side session on logout
    pub logout_clears_session: bool,
    /// Add `Secure` to every cookie (only when served over HTTPS)
    pub secure_cookies: bool,
    /// SQLite URL; the in-memory store is used when unset
    pub database_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cookie_secret: None,
            auth_cookie_ttl_secs: 3 * 60,
            session_idle_timeout_secs: 30 * 60,
            session_cleanup_interval_secs: 5 * 60,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            logout_clears_session: false,
            secure_cookies: false,
            database_url: None,
        }
    }
}

fn parse_env<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

fn parse_bool(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue { key, value }),
    }
}

impl ServerConfig {
    /// Load from defaults, the optional config file and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Overlay values found through `lookup` (normally `std::env::var`)
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SERVER_HOST") {
            self.host = v;
        }
        if let Some(v) = lookup("SERVER_PORT") {
            self.port = parse_env("SERVER_PORT", v)?;
        }
        if let Some(v) = lookup("COOKIE_SECRET") {
            self.cookie_secret = Some(v);
        }
        if let Some(v) = lookup("AUTH_COOKIE_TTL_SECS") {
            self.auth_cookie_ttl_secs = parse_env("AUTH_COOKIE_TTL_SECS", v)?;
        }
        if let Some(v) = lookup("SESSION_IDLE_TIMEOUT_SECS") {
            self.session_idle_timeout_secs = parse_env("SESSION_IDLE_TIMEOUT_SECS", v)?;
        }
        if let Some(v) = lookup("SESSION_CLEANUP_INTERVAL_SECS") {
            self.session_cleanup_interval_secs = parse_env("SESSION_CLEANUP_INTERVAL_SECS", v)?;
        }
        if let Some(v) = lookup("BCRYPT_COST") {
            self.bcrypt_cost = parse_env("BCRYPT_COST", v)?;
        }
        if let Some(v) = lookup("LOGOUT_CLEARS_SESSION") {
            self.logout_clears_session = parse_bool("LOGOUT_CLEARS_SESSION", v)?;
        }
        if let Some(v) = lookup("SECURE_COOKIES") {
            self.secure_cookies = parse_bool("SECURE_COOKIES", v)?;
        }
        if let Some(v) = lookup("DATABASE_URL") {
            self.database_url = Some(v).filter(|url| !url.trim().is_empty());
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::Invalid(format!(
                "bcrypt_cost must be between 4 and 31, got {}",
                self.bcrypt_cost
            )));
        }
        if self.auth_cookie_ttl_secs == 0 {
            return Err(ConfigError::Invalid("auth_cookie_ttl_secs must be positive".to_string()));
        }
        if self.auth_cookie_ttl_secs > MAX_LIFETIME_SECS
            || self.session_idle_timeout_secs > MAX_LIFETIME_SECS
        {
            return Err(ConfigError::Invalid(format!(
                "cookie and session lifetimes must not exceed {MAX_LIFETIME_SECS} seconds"
            )));
        }
        if self.session_idle_timeout_secs == 0 || self.session_cleanup_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "session timeouts must be positive".to_string(),
            ));
        }
        if matches!(&self.cookie_secret, Some(secret) if secret.is_empty()) {
            return Err(ConfigError::Invalid("cookie_secret must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn auth_cookie_ttl(&self) -> Duration {
        Duration::from_secs(self.auth_cookie_ttl_secs)
    }

    pub fn session_cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.session_cleanup_interval_secs)
    }
}
