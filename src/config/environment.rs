// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, store selection, and bulk delete tuning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

/// Environment variable names read by [`ServerConfig::from_env`]
pub mod env_vars {
    /// HTTP listening port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Store backend URL
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Table holding workout log rows
    pub const TABLE_NAME: &str = "TABLE_NAME";
    /// Upper bound on concurrent deletes during a bulk delete
    pub const BULK_DELETE_MAX_CONCURRENCY: &str = "BULK_DELETE_MAX_CONCURRENCY";
    /// Aggregation policy for per-row bulk delete failures
    pub const BULK_DELETE_FAILURE_POLICY: &str = "BULK_DELETE_FAILURE_POLICY";
}

/// Default values used when a variable is unset
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8081;
    /// Default store backend
    pub const DATABASE_URL: &str = "sqlite:./data/workouts.db";
    /// Default table name
    pub const TABLE_NAME: &str = "workout_logs";
}

/// Environment type for logging and other configurations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            // Default fallback for unrecognized values
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe store location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// SQLite database with file path
    SQLite {
        /// Database file
        path: PathBuf,
    },
    /// In-memory SQLite (for testing)
    SqliteMemory,
    /// Process-local table without persistence
    InProcess,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for schemes other than `sqlite:` and `memory://`.
    pub fn parse_url(s: &str) -> AppResult<Self> {
        if let Some(path) = s.strip_prefix("sqlite:") {
            if path == ":memory:" {
                Ok(Self::SqliteMemory)
            } else if path.is_empty() {
                Err(AppError::config_invalid("sqlite: URL is missing a file path"))
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path.trim_start_matches("//")),
                })
            }
        } else if s == "memory://" || s == "memory" {
            Ok(Self::InProcess)
        } else {
            Err(AppError::config_invalid(format!(
                "Unsupported database URL '{s}': expected sqlite:<path>, sqlite::memory: or memory://"
            )))
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::SqliteMemory => "sqlite::memory:".to_owned(),
            Self::InProcess => "memory://".to_owned(),
        }
    }

    /// Check if this is a SQLite database
    #[must_use]
    pub const fn is_sqlite(&self) -> bool {
        matches!(self, Self::SQLite { .. } | Self::SqliteMemory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/workouts.db"),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Store location
    pub url: DatabaseUrl,
    /// Table holding workout log rows
    pub table_name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DatabaseUrl::default(),
            table_name: defaults::TABLE_NAME.to_owned(),
        }
    }
}

/// How per-row failures of a bulk delete affect the overall result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Delete what can be reached; report success unless nothing was found
    #[default]
    BestEffort,
    /// Any failed row delete fails the whole operation
    FailOnAnyError,
}

impl FromStr for FailurePolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "best_effort" | "best-effort" => Ok(Self::BestEffort),
            "fail_on_any_error" | "fail-on-any-error" | "strict" => Ok(Self::FailOnAnyError),
            other => Err(AppError::config_invalid(format!(
                "Invalid {}: '{other}' (expected best_effort or fail_on_any_error)",
                env_vars::BULK_DELETE_FAILURE_POLICY
            ))),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BestEffort => write!(f, "best_effort"),
            Self::FailOnAnyError => write!(f, "fail_on_any_error"),
        }
    }
}

/// Tuning of the delete-all-rows-for-a-user fan-out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BulkDeleteConfig {
    /// Maximum deletes in flight; `None` dispatches every row at once
    pub max_concurrency: Option<NonZeroUsize>,
    /// Aggregation of per-row failures into the overall result
    pub failure_policy: FailurePolicy,
}

/// Complete server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Store configuration
    pub database: DatabaseConfig,
    /// Bulk delete tuning
    pub bulk_delete: BulkDeleteConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: defaults::HTTP_PORT,
            environment: Environment::default(),
            database: DatabaseConfig::default(),
            bulk_delete: BulkDeleteConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` naming the variable when a value cannot be parsed.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        // Load .env file if it exists
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {e}");
        }

        Self::from_process_env()
    }

    /// Load `path` as a dotenv file, then read configuration from the environment
    ///
    /// Variables already set in the process take precedence over the file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed, and
    /// `ConfigInvalid` naming the variable when a value cannot be parsed.
    pub fn from_env_file(path: &Path) -> AppResult<Self> {
        info!("Loading configuration from {}", path.display());
        dotenvy::from_path(path).map_err(|e| {
            AppError::config(format!("Failed to load {}: {e}", path.display())).with_source(e)
        })?;
        Self::from_process_env()
    }

    fn from_process_env() -> AppResult<Self> {
        let http_port = parse_env(env_vars::HTTP_PORT, defaults::HTTP_PORT)?;
        let environment =
            Environment::from_str_or_default(&env_var_or(env_vars::ENVIRONMENT, "development"));
        let url = DatabaseUrl::parse_url(&env_var_or(
            env_vars::DATABASE_URL,
            defaults::DATABASE_URL,
        ))?;
        let table_name = env_var_or(env_vars::TABLE_NAME, defaults::TABLE_NAME);

        let max_concurrency = match env::var(env_vars::BULK_DELETE_MAX_CONCURRENCY) {
            Ok(raw) => Some(raw.trim().parse::<NonZeroUsize>().map_err(|e| {
                AppError::config_invalid(format!(
                    "Invalid {}: '{raw}' ({e})",
                    env_vars::BULK_DELETE_MAX_CONCURRENCY
                ))
            })?),
            Err(_) => None,
        };
        let failure_policy = env::var(env_vars::BULK_DELETE_FAILURE_POLICY)
            .map_or(Ok(FailurePolicy::default()), |raw| raw.parse())?;

        Ok(Self {
            http_port,
            environment,
            database: DatabaseConfig { url, table_name },
            bulk_delete: BulkDeleteConfig {
                max_concurrency,
                failure_policy,
            },
        })
    }

    /// Human-readable configuration summary for start-up logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Workout Log Server Configuration:\n\
             - HTTP Port: {}\n\
             - Environment: {}\n\
             - Database: {}\n\
             - Table: {}\n\
             - Bulk Delete Concurrency: {}\n\
             - Bulk Delete Failure Policy: {}",
            self.http_port,
            self.environment,
            self.database.url,
            self.database.table_name,
            self.bulk_delete
                .max_concurrency
                .map_or_else(|| "unbounded".to_owned(), |n| n.to_string()),
            self.bulk_delete.failure_policy,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_env<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config_invalid(format!("Invalid {key}: '{raw}' ({e})"))),
        Err(_) => Ok(default),
    }
}
