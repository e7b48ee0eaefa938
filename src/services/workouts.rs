// ABOUTME: Workout log data-access service sitting between handlers and the workout table
// ABOUTME: User creation, plan upsert/read/delete, and the fan-out delete of a user's rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Workout log data access
//!
//! Inputs are typed values the validation layer already produced; nothing
//! here re-validates. Every method maps to one table operation except
//! [`WorkoutService::delete_all_entries_for_user`], which queries a partition
//! and then deletes each row concurrently.

use crate::config::environment::{BulkDeleteConfig, FailurePolicy};
use crate::database_plugins::{PartitionRow, TableKey, WorkoutItem, WorkoutTable};
use crate::errors::{AppError, AppResult};
use crate::services::id_generator::IdGenerator;
use chrono::Utc;
use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{error, info, warn};
use workout_log_core::constants::messages::NO_DATA_PRESENT;
use workout_log_core::models::{UserId, UserProfile, WorkoutKey, WorkoutPlan, WorkoutUpsert};

/// Result of deleting one row during a bulk delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RowDeleteOutcome {
    /// Row was deleted
    Deleted {
        /// Sort key of the row
        date: String,
    },
    /// The delete call failed
    Failed {
        /// Sort key of the row
        date: String,
        /// Store error message
        error: String,
    },
    /// No delete was dispatched for the row
    Skipped {
        /// Why the row was skipped
        reason: String,
    },
}

/// Per-row outcomes of a bulk delete, in partition query order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkDeleteReport {
    /// Partition that was deleted
    pub user_id: UserId,
    /// One outcome per queried row
    pub outcomes: Vec<RowDeleteOutcome>,
}

impl BulkDeleteReport {
    /// Rows deleted
    #[must_use]
    pub fn deleted_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, RowDeleteOutcome::Deleted { .. }))
    }

    /// Rows whose delete failed
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, RowDeleteOutcome::Failed { .. }))
    }

    /// Rows skipped without a delete
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, RowDeleteOutcome::Skipped { .. }))
    }

    /// Every queried row was deleted
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.deleted_count() == self.outcomes.len()
    }

    fn count(&self, predicate: impl Fn(&RowDeleteOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|outcome| predicate(outcome)).count()
    }
}

/// Data-access layer over an injected workout table
#[derive(Clone)]
pub struct WorkoutService {
    table: Arc<dyn WorkoutTable>,
    ids: Arc<dyn IdGenerator>,
    bulk_delete: BulkDeleteConfig,
}

impl WorkoutService {
    /// Create a service over `table`
    #[must_use]
    pub fn new(
        table: Arc<dyn WorkoutTable>,
        ids: Arc<dyn IdGenerator>,
        bulk_delete: BulkDeleteConfig,
    ) -> Self {
        Self {
            table,
            ids,
            bulk_delete,
        }
    }

    /// The underlying table
    #[must_use]
    pub fn table(&self) -> &Arc<dyn WorkoutTable> {
        &self.table
    }

    /// Create a user with a fresh id and today's starter plan
    ///
    /// The row is keyed by today's UTC date and carries the profile.
    ///
    /// # Errors
    ///
    /// Returns the store error if the write fails
    pub async fn create_user_record(&self, profile: UserProfile) -> AppResult<UserId> {
        let user_id = self.ids.generate()?;
        let today = Utc::now().date_naive();
        let item = WorkoutItem {
            key: TableKey::from(&WorkoutKey::new(user_id.clone(), today)),
            profile: Some(profile),
            workout_plan: WorkoutPlan::starter(),
        };

        self.table.put_item(&item).await?;
        info!(operation = "create_user", user.id = %user_id, workout.date = %item.key.date, "User created");
        Ok(user_id)
    }

    /// Replace the plan stored for (id, date), creating the row if absent
    ///
    /// # Errors
    ///
    /// Returns the store error if the write fails
    pub async fn upsert_workout_plan(&self, upsert: WorkoutUpsert) -> AppResult<WorkoutPlan> {
        let key = TableKey::from(&upsert.key);
        let stored = self.table.update_workout_plan(&key, &upsert.plan).await?;
        info!(
            operation = "upsert_workout",
            user.id = %key.user_id,
            workout.date = %key.date,
            exercises = stored.len(),
            "Workout plan stored"
        );
        Ok(stored)
    }

    /// Read the plan stored for (id, date)
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no row exists, or the store error
    pub async fn get_workout_plan(&self, key: &WorkoutKey) -> AppResult<WorkoutPlan> {
        self.table
            .get_workout_plan(&TableKey::from(key))
            .await?
            .ok_or_else(|| AppError::not_found(NO_DATA_PRESENT))
    }

    /// Delete the row for (id, date); deleting a missing row succeeds
    ///
    /// # Errors
    ///
    /// Returns the store error if the delete fails
    pub async fn delete_workout_entry(&self, key: &WorkoutKey) -> AppResult<()> {
        let key = TableKey::from(key);
        self.table.delete_item(&key).await?;
        info!(operation = "delete_workout", user.id = %key.user_id, workout.date = %key.date, "Workout entry deleted");
        Ok(())
    }

    /// Delete every row of a user's partition
    ///
    /// All row deletes are dispatched concurrently, at most
    /// `max_concurrency` at a time, and every one is awaited before
    /// returning. Per-row failures are logged and recorded in the report;
    /// whether they fail the call is decided by the configured
    /// [`FailurePolicy`].
    ///
    /// # Errors
    ///
    /// - `ResourceNotFound` if the partition holds no rows
    /// - `DatabaseError` if the partition query fails
    /// - `StorageError` if a row delete failed under [`FailurePolicy::FailOnAnyError`]
    pub async fn delete_all_entries_for_user(&self, user_id: &UserId) -> AppResult<BulkDeleteReport> {
        let rows = self
            .table
            .query_partition(user_id.as_str())
            .await
            .map_err(|e| {
                AppError::database(format!(
                    "Delete operation failed to delete for userId: {user_id}: {}",
                    e.message
                ))
                .with_source(e)
            })?;

        if rows.is_empty() {
            return Err(AppError::not_found(format!(
                "User with UserId: {user_id} not Found!!"
            )));
        }

        let width = self
            .bulk_delete
            .max_concurrency
            .map_or(rows.len(), NonZeroUsize::get);
        let outcomes: Vec<RowDeleteOutcome> = stream::iter(rows)
            .map(|row| self.delete_row(user_id, row))
            .buffered(width)
            .collect()
            .await;

        let report = BulkDeleteReport {
            user_id: user_id.clone(),
            outcomes,
        };
        info!(
            operation = "delete_all_workouts",
            user.id = %user_id,
            rows.deleted = report.deleted_count(),
            rows.failed = report.failed_count(),
            rows.skipped = report.skipped_count(),
            "Bulk delete completed"
        );

        match self.bulk_delete.failure_policy {
            FailurePolicy::FailOnAnyError if report.failed_count() > 0 => {
                Err(AppError::storage(format!(
                    "Failed to delete {} of {} workout entries for userId: {user_id}",
                    report.failed_count(),
                    report.outcomes.len()
                )))
            }
            _ => Ok(report),
        }
    }

    async fn delete_row(&self, user_id: &UserId, row: PartitionRow) -> RowDeleteOutcome {
        let Some(date) = row.date else {
            warn!(user.id = %user_id, workout.date = "unknown", "Skipping row without a date");
            return RowDeleteOutcome::Skipped {
                reason: "row has no date".to_owned(),
            };
        };

        match self
            .table
            .delete_item(&TableKey::new(user_id.as_str(), date.as_str()))
            .await
        {
            Ok(()) => {
                info!(user.id = %user_id, workout.date = %date, "Deleted workout entry");
                RowDeleteOutcome::Deleted { date }
            }
            Err(e) => {
                error!(user.id = %user_id, workout.date = %date, error = %e, "Failed to delete workout entry");
                RowDeleteOutcome::Failed {
                    date,
                    error: e.message,
                }
            }
        }
    }
}
