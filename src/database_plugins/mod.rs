// ABOUTME: Store abstraction layer for the workout log table
// ABOUTME: Plugin architecture with an in-process table and a SQLite backend behind one trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Table Abstraction
//!
//! The store is a single table addressed by partition key (user id) and sort
//! key (date). It supports point put/update/get/delete and a partition-scoped
//! query. Backends never validate: they receive keys the validation layer
//! already accepted.

use crate::errors::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use workout_log_core::models::{UserProfile, WorkoutKey, WorkoutPlan};

pub mod factory;
pub mod memory;
pub mod sqlite;

/// Storage form of a row key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableKey {
    /// Partition key
    pub user_id: String,
    /// Sort key (`YYYY-MM-DD`)
    pub date: String,
}

impl TableKey {
    /// Create a key from its two parts
    pub fn new(user_id: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            date: date.into(),
        }
    }
}

impl From<&WorkoutKey> for TableKey {
    fn from(key: &WorkoutKey) -> Self {
        Self::new(key.user_id.as_str(), key.date_string())
    }
}

/// A complete row as written by [`WorkoutTable::put_item`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutItem {
    /// Primary key
    pub key: TableKey,
    /// Profile attributes, present on rows written at user creation
    pub profile: Option<UserProfile>,
    /// Workout plan attribute
    pub workout_plan: WorkoutPlan,
}

/// Key projection of a row returned by a partition query
///
/// `date` is optional because the query reads whatever the store holds; a
/// row without a sort key is a data problem the caller has to tolerate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionRow {
    /// Partition key
    pub user_id: String,
    /// Sort key, if the stored row has one
    pub date: Option<String>,
}

/// Core store abstraction trait
///
/// Implementations are constructed once and shared read-only across
/// concurrent requests, so every method takes `&self`.
#[async_trait]
pub trait WorkoutTable: Send + Sync {
    /// Write a whole row, replacing any row with the same key
    async fn put_item(&self, item: &WorkoutItem) -> AppResult<()>;

    /// Set the plan attribute of a row, creating the row if absent
    ///
    /// Returns the plan as stored.
    async fn update_workout_plan(&self, key: &TableKey, plan: &WorkoutPlan)
        -> AppResult<WorkoutPlan>;

    /// Point read projected to the plan attribute
    async fn get_workout_plan(&self, key: &TableKey) -> AppResult<Option<WorkoutPlan>>;

    /// Delete one row; deleting a missing row succeeds
    async fn delete_item(&self, key: &TableKey) -> AppResult<()>;

    /// Every row of a partition, ordered by sort key
    async fn query_partition(&self, user_id: &str) -> AppResult<Vec<PartitionRow>>;

    /// Short description of the backend for start-up logs
    fn backend_info(&self) -> &'static str;
}
