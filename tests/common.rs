// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, in-memory services, fixed ids, and faulty table wrappers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
//! Shared test utilities for `workout_log_server`

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use workout_log_server::{
    config::environment::{BulkDeleteConfig, ServerConfig},
    database_plugins::{memory::MemoryTable, PartitionRow, TableKey, WorkoutItem, WorkoutTable},
    errors::{AppError, AppResult},
    models::{UserId, WorkoutPlan},
    resources::ServerResources,
    services::{IdGenerator, WorkoutService},
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Id used by [`FixedIdGenerator::default`]
pub const FIXED_USER_ID: &str = "user0001";

/// Always hands out the same id
pub struct FixedIdGenerator(pub String);

impl Default for FixedIdGenerator {
    fn default() -> Self {
        Self(FIXED_USER_ID.to_owned())
    }
}

impl IdGenerator for FixedIdGenerator {
    fn generate(&self) -> AppResult<UserId> {
        UserId::new(self.0.clone()).ok_or_else(|| AppError::internal("bad fixed id"))
    }
}

/// How a [`FaultyTable`] misbehaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Every call returns a database error
    Error,
    /// Every call panics
    Panic,
}

/// Table that fails every call
pub struct FaultyTable(pub Fault);

impl FaultyTable {
    fn fail<T>(&self, op: &str) -> AppResult<T> {
        match self.0 {
            Fault::Error => Err(AppError::database(format!("{op} failed: connection reset"))),
            Fault::Panic => panic!("{op} panicked inside the store"),
        }
    }
}

#[async_trait]
impl WorkoutTable for FaultyTable {
    async fn put_item(&self, _item: &WorkoutItem) -> AppResult<()> {
        self.fail("put_item")
    }

    async fn update_workout_plan(
        &self,
        _key: &TableKey,
        _plan: &WorkoutPlan,
    ) -> AppResult<WorkoutPlan> {
        self.fail("update_workout_plan")
    }

    async fn get_workout_plan(&self, _key: &TableKey) -> AppResult<Option<WorkoutPlan>> {
        self.fail("get_workout_plan")
    }

    async fn delete_item(&self, _key: &TableKey) -> AppResult<()> {
        self.fail("delete_item")
    }

    async fn query_partition(&self, _user_id: &str) -> AppResult<Vec<PartitionRow>> {
        self.fail("query_partition")
    }

    fn backend_info(&self) -> &'static str {
        "Faulty table"
    }
}

/// Wraps a real table, failing deletes of chosen dates and injecting rows
/// without a date into partition queries
pub struct FlakyDeleteTable {
    pub inner: MemoryTable,
    pub failing_dates: HashSet<String>,
    pub dateless_rows: usize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    pub delete_calls: Mutex<Vec<String>>,
}

impl FlakyDeleteTable {
    pub fn new(inner: MemoryTable) -> Self {
        Self {
            inner,
            failing_dates: HashSet::new(),
            dateless_rows: 0,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            delete_calls: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn failing_on(mut self, dates: &[&str]) -> Self {
        self.failing_dates = dates.iter().map(|d| (*d).to_owned()).collect();
        self
    }

    #[must_use]
    pub const fn with_dateless_rows(mut self, count: usize) -> Self {
        self.dateless_rows = count;
        self
    }

    /// Highest number of deletes observed running at once
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WorkoutTable for FlakyDeleteTable {
    async fn put_item(&self, item: &WorkoutItem) -> AppResult<()> {
        self.inner.put_item(item).await
    }

    async fn update_workout_plan(
        &self,
        key: &TableKey,
        plan: &WorkoutPlan,
    ) -> AppResult<WorkoutPlan> {
        self.inner.update_workout_plan(key, plan).await
    }

    async fn get_workout_plan(&self, key: &TableKey) -> AppResult<Option<WorkoutPlan>> {
        self.inner.get_workout_plan(key).await
    }

    async fn delete_item(&self, key: &TableKey) -> AppResult<()> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.delete_calls.lock().unwrap().push(key.date.clone());

        // Give other deletes a chance to start while this one is in flight
        tokio::task::yield_now().await;

        let result = if self.failing_dates.contains(&key.date) {
            Err(AppError::database(format!("delete of {} timed out", key.date)))
        } else {
            self.inner.delete_item(key).await
        };
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn query_partition(&self, user_id: &str) -> AppResult<Vec<PartitionRow>> {
        let mut rows = self.inner.query_partition(user_id).await?;
        rows.extend((0..self.dateless_rows).map(|_| PartitionRow {
            user_id: user_id.to_owned(),
            date: None,
        }));
        Ok(rows)
    }

    fn backend_info(&self) -> &'static str {
        "Flaky delete table"
    }
}

/// Service over `table` with fixed ids and the given bulk delete tuning
pub fn service_with(table: Arc<dyn WorkoutTable>, bulk_delete: BulkDeleteConfig) -> WorkoutService {
    init_test_logging();
    WorkoutService::new(table, Arc::new(FixedIdGenerator::default()), bulk_delete)
}

/// Service over a fresh in-memory table with default tuning
pub fn memory_service() -> (Arc<MemoryTable>, WorkoutService) {
    let table = Arc::new(MemoryTable::new());
    let service = service_with(table.clone(), BulkDeleteConfig::default());
    (table, service)
}

/// Server resources over `table` with fixed ids
pub fn test_resources(table: Arc<dyn WorkoutTable>) -> Arc<ServerResources> {
    init_test_logging();
    Arc::new(ServerResources::with_id_generator(
        ServerConfig::default(),
        table,
        Arc::new(FixedIdGenerator::default()),
    ))
}

/// Two-exercise plan in wire form
pub fn sample_plan() -> Value {
    json!({
        "Bench Press": {"weight": 60, "reps": 8, "sets": 3, "metric": "KGS"},
        "Squat": {"weight": 100.5, "reps": 5, "sets": 5, "metric": "KGS"}
    })
}

/// Valid user creation body
pub fn sample_user() -> Value {
    json!({"fullName": "Alice Doe", "gender": "F", "dob": "1990-04-12"})
}
