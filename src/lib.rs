// ABOUTME: Main library entry point for the workout log API
// ABOUTME: Validated single-record CRUD over a workout table keyed by (user id, date)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Workout Log Server
//!
//! A small HTTP API for users and their daily workout plans. Each request
//! flows one way through the crate:
//!
//! route → handler → validation → data access → response mapping
//!
//! ## Architecture
//!
//! - **Handlers**: parse a request envelope, validate it, call one
//!   data-access operation, and map the outcome to `(statusCode, JSON)`
//! - **Services**: typed data access over the workout table, including the
//!   concurrent delete of every row of a user
//! - **Database plugins**: the workout table trait with in-process and
//!   SQLite backends
//! - **Routes**: axum adapters between HTTP and handler envelopes
//! - **Config**: environment-driven server configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use workout_log_server::config::environment::ServerConfig;
//! use workout_log_server::database_plugins::memory::MemoryTable;
//! use workout_log_server::handlers::{self, HandlerRequest};
//! use workout_log_server::resources::ServerResources;
//!
//! #[tokio::main]
//! async fn main() {
//!     let resources = ServerResources::new(ServerConfig::default(), Arc::new(MemoryTable::new()));
//!     let response = handlers::create_user(
//!         &resources.workouts,
//!         HandlerRequest::with_body(r#"{"fullName":"Alice","gender":"F","dob":"1990-01-01"}"#),
//!     )
//!     .await;
//!     assert_eq!(response.status_code, 200);
//! }
//! ```

/// Configuration management
pub mod config;

/// Workout table abstraction and backends
pub mod database_plugins;

/// Unified error handling
pub mod errors;

/// Request handlers and response mapping
pub mod handlers;

/// Structured logging setup
pub mod logging;

/// Shared server resources
pub mod resources;

/// HTTP routes
pub mod routes;

/// Data-access services
pub mod services;

pub use workout_log_core::{constants, models, validation};
