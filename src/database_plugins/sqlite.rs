// ABOUTME: SQLite workout table implementation using sqlx
// ABOUTME: One row per (user_id, log_date) with the plan stored as JSON text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! SQLite table implementation
//!
//! The table name comes from configuration and is interpolated into SQL, so
//! it is restricted to ASCII letters, digits and underscores before any
//! statement is built.

use super::{PartitionRow, TableKey, WorkoutItem, WorkoutTable};
use crate::config::environment::DatabaseUrl;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};
use std::path::Path;
use tracing::{debug, info};
use workout_log_core::constants::limits::DATE_FORMAT;
use workout_log_core::models::WorkoutPlan;

/// SQLite-backed workout table
#[derive(Clone)]
pub struct SqliteTable {
    pool: SqlitePool,
    table: String,
}

impl SqliteTable {
    /// Connect to `url` and create the table if it does not exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for an unusable table name or a non-SQLite URL,
    /// and `DatabaseError` if the connection or migration fails.
    pub async fn connect(url: &DatabaseUrl, table_name: &str) -> AppResult<Self> {
        validate_table_name(table_name)?;

        let pool = match url {
            DatabaseUrl::SQLite { path } => {
                ensure_parent_dir(path)?;
                // Ensure SQLite creates the database file if it doesn't exist
                SqlitePool::connect(&format!("{}?mode=rwc", url.to_connection_string()))
                    .await
                    .map_err(|e| {
                        AppError::database(format!("Failed to open {}: {e}", path.display()))
                    })?
            }
            // Every connection to sqlite::memory: is a separate database, so
            // the single connection must never be reaped or recycled
            DatabaseUrl::SqliteMemory => SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(&url.to_connection_string())
                .await
                .map_err(|e| AppError::database(format!("Failed to open in-memory SQLite: {e}")))?,
            DatabaseUrl::InProcess => {
                return Err(AppError::config_invalid(format!(
                    "{url} is not a SQLite database URL"
                )))
            }
        };

        let table = Self {
            pool,
            table: table_name.to_owned(),
        };
        table.migrate().await?;
        Ok(table)
    }

    /// Create the workout table
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        info!(table = %self.table, "Running workout table migration");
        sqlx::query(&format!(
            r"
            CREATE TABLE IF NOT EXISTS {} (
                user_id TEXT NOT NULL,
                log_date TEXT NOT NULL,
                full_name TEXT,
                gender TEXT,
                date_of_birth TEXT,
                workout_plan TEXT NOT NULL,
                PRIMARY KEY (user_id, log_date)
            )
            ",
            self.table
        ))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create table {}: {e}", self.table)))?;
        Ok(())
    }

    /// Get a reference to the connection pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl WorkoutTable for SqliteTable {
    async fn put_item(&self, item: &WorkoutItem) -> AppResult<()> {
        debug!(db.operation = "put_item", user.id = %item.key.user_id, workout.date = %item.key.date);
        let plan = serde_json::to_string(&item.workout_plan)?;
        let profile = item.profile.as_ref();

        sqlx::query(&format!(
            "INSERT OR REPLACE INTO {} \
             (user_id, log_date, full_name, gender, date_of_birth, workout_plan) \
             VALUES ($1, $2, $3, $4, $5, $6)",
            self.table
        ))
        .bind(&item.key.user_id)
        .bind(&item.key.date)
        .bind(profile.map(|p| p.full_name.as_str()))
        .bind(profile.map(|p| p.gender.as_str()))
        .bind(profile.map(|p| p.date_of_birth.format(DATE_FORMAT).to_string()))
        .bind(plan)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to put item: {e}")))?;
        Ok(())
    }

    async fn update_workout_plan(
        &self,
        key: &TableKey,
        plan: &WorkoutPlan,
    ) -> AppResult<WorkoutPlan> {
        debug!(db.operation = "update_workout_plan", user.id = %key.user_id, workout.date = %key.date);
        let row = sqlx::query(&format!(
            "INSERT INTO {} (user_id, log_date, workout_plan) VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, log_date) DO UPDATE SET workout_plan = excluded.workout_plan \
             RETURNING workout_plan",
            self.table
        ))
        .bind(&key.user_id)
        .bind(&key.date)
        .bind(serde_json::to_string(plan)?)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update workout plan: {e}")))?;

        decode_plan(&row)
    }

    async fn get_workout_plan(&self, key: &TableKey) -> AppResult<Option<WorkoutPlan>> {
        debug!(db.operation = "get_workout_plan", user.id = %key.user_id, workout.date = %key.date);
        let row = sqlx::query(&format!(
            "SELECT workout_plan FROM {} WHERE user_id = $1 AND log_date = $2",
            self.table
        ))
        .bind(&key.user_id)
        .bind(&key.date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get workout plan: {e}")))?;

        row.as_ref().map(decode_plan).transpose()
    }

    async fn delete_item(&self, key: &TableKey) -> AppResult<()> {
        debug!(db.operation = "delete_item", user.id = %key.user_id, workout.date = %key.date);
        sqlx::query(&format!(
            "DELETE FROM {} WHERE user_id = $1 AND log_date = $2",
            self.table
        ))
        .bind(&key.user_id)
        .bind(&key.date)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete item: {e}")))?;
        Ok(())
    }

    async fn query_partition(&self, user_id: &str) -> AppResult<Vec<PartitionRow>> {
        debug!(db.operation = "query_partition", user.id = %user_id);
        let rows = sqlx::query(&format!(
            "SELECT user_id, log_date FROM {} WHERE user_id = $1 ORDER BY log_date",
            self.table
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to query partition: {e}")))?;

        rows.iter()
            .map(|row| {
                Ok(PartitionRow {
                    user_id: row
                        .try_get("user_id")
                        .map_err(|e| AppError::database(format!("Invalid user_id column: {e}")))?,
                    date: row
                        .try_get("log_date")
                        .map_err(|e| AppError::database(format!("Invalid log_date column: {e}")))?,
                })
            })
            .collect()
    }

    fn backend_info(&self) -> &'static str {
        "SQLite (Local Development)"
    }
}

fn decode_plan(row: &sqlx::sqlite::SqliteRow) -> AppResult<WorkoutPlan> {
    let raw: String = row
        .try_get("workout_plan")
        .map_err(|e| AppError::database(format!("Invalid workout_plan column: {e}")))?;
    serde_json::from_str(&raw)
        .map_err(|e| AppError::serialization(format!("Stored workout plan is not valid JSON: {e}")))
}

/// Table names are interpolated into SQL and must be plain identifiers
fn validate_table_name(name: &str) -> AppResult<()> {
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(AppError::config_invalid(format!(
            "Invalid table name '{name}': only ASCII letters, digits and '_' are allowed"
        )))
    }
}

fn ensure_parent_dir(path: &Path) -> AppResult<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir).map_err(|e| {
            AppError::database(format!("Failed to create {}: {e}", dir.display()))
        }),
        _ => Ok(()),
    }
}
