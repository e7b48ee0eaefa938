// ABOUTME: Core data models for users and workout log rows
// ABOUTME: Re-exports the user, workout plan, and row key types used across the service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! A workout log row is addressed by a [`WorkoutKey`]: the user's [`UserId`]
//! as partition key and a calendar date as sort key. The row carries one
//! [`WorkoutPlan`]; rows written at user creation also carry the
//! [`UserProfile`].

/// User identity and profile types
pub mod user;

/// Workout plan, exercise entries, and row keys
pub mod workout;

pub use user::{Gender, UserId, UserProfile};
pub use workout::{ExerciseEntry, Metric, WorkoutKey, WorkoutPlan, WorkoutUpsert};
