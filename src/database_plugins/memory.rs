// ABOUTME: In-process workout table backed by a concurrent map of partitions
// ABOUTME: Used for local runs and tests; rows live only as long as the process
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! In-process table implementation
//!
//! Partitions are `DashMap` entries keyed by user id; each holds its rows in
//! a `BTreeMap` keyed by date so partition queries come back in sort-key
//! order.

use super::{PartitionRow, TableKey, WorkoutItem, WorkoutTable};
use crate::errors::AppResult;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::BTreeMap;
use workout_log_core::models::{UserProfile, WorkoutPlan};

#[derive(Debug, Clone)]
struct StoredRow {
    profile: Option<UserProfile>,
    workout_plan: WorkoutPlan,
}

/// In-process table
#[derive(Debug, Default)]
pub struct MemoryTable {
    partitions: DashMap<String, BTreeMap<String, StoredRow>>,
}

impl MemoryTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows across all partitions
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.partitions.iter().map(|partition| partition.len()).sum()
    }

    /// Profile stored on a row, if any
    #[must_use]
    pub fn profile(&self, key: &TableKey) -> Option<UserProfile> {
        self.partitions
            .get(&key.user_id)
            .and_then(|partition| partition.get(&key.date).and_then(|row| row.profile.clone()))
    }
}

#[async_trait]
impl WorkoutTable for MemoryTable {
    async fn put_item(&self, item: &WorkoutItem) -> AppResult<()> {
        self.partitions
            .entry(item.key.user_id.clone())
            .or_default()
            .insert(
                item.key.date.clone(),
                StoredRow {
                    profile: item.profile.clone(),
                    workout_plan: item.workout_plan.clone(),
                },
            );
        Ok(())
    }

    async fn update_workout_plan(
        &self,
        key: &TableKey,
        plan: &WorkoutPlan,
    ) -> AppResult<WorkoutPlan> {
        let mut partition = self.partitions.entry(key.user_id.clone()).or_default();
        let row = partition.entry(key.date.clone()).or_insert_with(|| StoredRow {
            profile: None,
            workout_plan: WorkoutPlan::new(),
        });
        row.workout_plan = plan.clone();
        Ok(row.workout_plan.clone())
    }

    async fn get_workout_plan(&self, key: &TableKey) -> AppResult<Option<WorkoutPlan>> {
        Ok(self.partitions.get(&key.user_id).and_then(|partition| {
            partition
                .get(&key.date)
                .map(|row| row.workout_plan.clone())
        }))
    }

    async fn delete_item(&self, key: &TableKey) -> AppResult<()> {
        if let Some(mut partition) = self.partitions.get_mut(&key.user_id) {
            partition.remove(&key.date);
        }
        self.partitions
            .remove_if(&key.user_id, |_, partition| partition.is_empty());
        Ok(())
    }

    async fn query_partition(&self, user_id: &str) -> AppResult<Vec<PartitionRow>> {
        Ok(self
            .partitions
            .get(user_id)
            .map(|partition| {
                partition
                    .keys()
                    .map(|date| PartitionRow {
                        user_id: user_id.to_owned(),
                        date: Some(date.clone()),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    fn backend_info(&self) -> &'static str {
        "In-process table (no persistence)"
    }
}
