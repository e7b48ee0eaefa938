// ABOUTME: Shared server resources constructed once at start-up
// ABOUTME: Bundles configuration and the workout service for route handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::environment::ServerConfig;
use crate::database_plugins::WorkoutTable;
use crate::services::{IdGenerator, RandomIdGenerator, WorkoutService};
use std::sync::Arc;

/// Centralized resource container shared read-only by every request
#[derive(Clone)]
pub struct ServerResources {
    /// Configuration the server was started with
    pub config: Arc<ServerConfig>,
    /// Workout data access
    pub workouts: Arc<WorkoutService>,
}

impl ServerResources {
    /// Build resources over `table` with random user ids
    #[must_use]
    pub fn new(config: ServerConfig, table: Arc<dyn WorkoutTable>) -> Self {
        Self::with_id_generator(config, table, Arc::new(RandomIdGenerator))
    }

    /// Build resources with an explicit id generator
    #[must_use]
    pub fn with_id_generator(
        config: ServerConfig,
        table: Arc<dyn WorkoutTable>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        let workouts = WorkoutService::new(table, ids, config.bulk_delete);
        Self {
            config: Arc::new(config),
            workouts: Arc::new(workouts),
        }
    }
}
