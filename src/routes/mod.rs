// ABOUTME: Route module organization for the workout log HTTP endpoints
// ABOUTME: Combines workout log routes and health checks into one router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP routes
//!
//! Each domain module contains only route definitions and thin adapters that
//! delegate to the request handlers.

use crate::resources::ServerResources;
use axum::Router;
use std::sync::Arc;

/// Health check and readiness routes
pub mod health;
/// User and workout log routes
pub mod workouts;

pub use health::HealthRoutes;
pub use workouts::WorkoutRoutes;

/// Full application router
pub fn router(resources: &Arc<ServerResources>) -> Router {
    Router::new()
        .merge(WorkoutRoutes::routes(Arc::clone(resources)))
        .merge(HealthRoutes::routes(Arc::clone(resources)))
}
