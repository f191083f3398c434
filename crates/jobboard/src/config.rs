//! Configuration loading

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Secret shipped in the sample configuration; never fit for production
pub const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

/// Longest accepted token lifetime: one year
const MAX_TOKEN_EXPIRY_HOURS: i64 = 24 * 365;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Built UI, served with an `index.html` fallback
    #[serde(default)]
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            static_dir: None,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl DatabaseConfig {
    /// sqlx connection string; the file is created when missing
    pub fn url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "default_token_expiry_hours")]
    pub token_expiry_hours: i64,
    /// Admin created at startup when the users table is empty
    #[serde(default)]
    pub admin_email: Option<String>,
    #[serde(default)]
    pub admin_password: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_expiry_hours: default_token_expiry_hours(),
            admin_email: None,
            admin_password: None,
        }
    }
}

impl AuthConfig {
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }

    /// Bootstrap admin credentials, when both halves are configured
    pub fn bootstrap_admin(&self) -> Option<(&str, &str)> {
        match (self.admin_email.as_deref(), self.admin_password.as_deref()) {
            (Some(email), Some(password)) => Some((email, password)),
            _ => None,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
        }
    }
}

// Default value functions
fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_db_path() -> String {
    "./data/jobboard.db".to_string()
}

fn default_jwt_secret() -> String {
    DEFAULT_JWT_SECRET.to_string()
}

fn default_token_expiry_hours() -> i64 {
    24
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_metrics_enabled() -> bool {
    true
}

impl Config {
    /// Load configuration from a file, falling back to defaults when it is absent
    pub fn load(path: &str) -> Result<Self> {
        let config_path = Path::new(path);

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path))?;
            info!("Loaded configuration from {}", path);
            config
        } else {
            info!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.trim().is_empty() {
            bail!("auth.jwt_secret must not be empty");
        }
        if !(1..=MAX_TOKEN_EXPIRY_HOURS).contains(&self.auth.token_expiry_hours) {
            bail!(
                "auth.token_expiry_hours must be between 1 and {}, got {}",
                MAX_TOKEN_EXPIRY_HOURS,
                self.auth.token_expiry_hours
            );
        }
        if self.database.path.trim().is_empty() {
            bail!("database.path must not be empty");
        }
        if self.auth.admin_email.is_some() != self.auth.admin_password.is_some() {
            bail!("auth.admin_email and auth.admin_password must be set together");
        }
        Ok(())
    }
}
