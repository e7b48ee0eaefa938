// ABOUTME: Service layer between request handlers and the workout table
// ABOUTME: Holds the workout data-access service and user id generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services take validated, typed input and are independent of the HTTP
//! transport, so handlers and tests drive them the same way.

/// User id generation
pub mod id_generator;

/// Workout log data access: user creation, plan CRUD, bulk delete
pub mod workouts;

pub use id_generator::{IdGenerator, RandomIdGenerator};
pub use workouts::{BulkDeleteReport, RowDeleteOutcome, WorkoutService};
