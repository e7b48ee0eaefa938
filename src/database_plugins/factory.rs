// ABOUTME: Store factory selecting the workout table backend from the configured URL
// ABOUTME: Wraps the in-process and SQLite tables in one enum that delegates the table trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Store factory
//!
//! Backend choice follows the URL scheme: `memory://` yields the in-process
//! table and every `sqlite:` URL yields a SQLite table.

use super::memory::MemoryTable;
use super::sqlite::SqliteTable;
use super::{PartitionRow, TableKey, WorkoutItem, WorkoutTable};
use crate::config::environment::{DatabaseConfig, DatabaseUrl};
use crate::errors::AppResult;
use async_trait::async_trait;
use tracing::{debug, info};
use workout_log_core::models::WorkoutPlan;

/// Supported store types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    /// Process-local table
    Memory,
    /// SQLite file or in-memory database
    SQLite,
}

/// Store instance wrapper that delegates to the selected backend
pub enum Database {
    /// In-process table
    Memory(MemoryTable),
    /// SQLite table
    SQLite(SqliteTable),
}

impl Database {
    /// Create the backend described by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the SQLite connection or migration fails or the
    /// table name is invalid.
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        debug!("Detecting database type from URL: {}", config.url);
        let db_type = detect_database_type(&config.url);
        info!("Detected database type: {:?}", db_type);

        match db_type {
            DatabaseType::Memory => {
                info!("Initializing in-process workout table");
                Ok(Self::Memory(MemoryTable::new()))
            }
            DatabaseType::SQLite => {
                info!(table = %config.table_name, "Initializing SQLite workout table");
                let table = SqliteTable::connect(&config.url, &config.table_name).await?;
                info!("SQLite workout table initialized successfully");
                Ok(Self::SQLite(table))
            }
        }
    }

    /// Get the store type
    #[must_use]
    pub const fn database_type(&self) -> DatabaseType {
        match self {
            Self::Memory(_) => DatabaseType::Memory,
            Self::SQLite(_) => DatabaseType::SQLite,
        }
    }

    fn inner(&self) -> &dyn WorkoutTable {
        match self {
            Self::Memory(table) => table,
            Self::SQLite(table) => table,
        }
    }
}

/// Map a parsed store URL to its backend type
#[must_use]
pub const fn detect_database_type(url: &DatabaseUrl) -> DatabaseType {
    if url.is_sqlite() {
        DatabaseType::SQLite
    } else {
        DatabaseType::Memory
    }
}

#[async_trait]
impl WorkoutTable for Database {
    async fn put_item(&self, item: &WorkoutItem) -> AppResult<()> {
        self.inner().put_item(item).await
    }

    async fn update_workout_plan(
        &self,
        key: &TableKey,
        plan: &WorkoutPlan,
    ) -> AppResult<WorkoutPlan> {
        self.inner().update_workout_plan(key, plan).await
    }

    async fn get_workout_plan(&self, key: &TableKey) -> AppResult<Option<WorkoutPlan>> {
        self.inner().get_workout_plan(key).await
    }

    async fn delete_item(&self, key: &TableKey) -> AppResult<()> {
        self.inner().delete_item(key).await
    }

    async fn query_partition(&self, user_id: &str) -> AppResult<Vec<PartitionRow>> {
        self.inner().query_partition(user_id).await
    }

    fn backend_info(&self) -> &'static str {
        self.inner().backend_info()
    }
}
