// ABOUTME: Core types and constants for the workout log service
// ABOUTME: Foundation crate with error handling, domain models, and validation schemas
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Workout Log Core
//!
//! Foundation crate providing shared types for the workout log service. This
//! crate is designed to change infrequently, so the server crate can rebuild
//! its handlers and storage backends without recompiling the domain types.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: User ids, workout plans, and the (user id, date) row key
//! - **validation**: Per-operation schemas that turn untyped JSON into models
//! - **constants**: Response messages and field limits

/// Unified error handling system with standard error codes
pub mod errors;

/// Core data models (user id, profile, workout plan, row key)
pub mod models;

/// Field-level validation of untyped request input
pub mod validation;

/// Application constants organized by domain
pub mod constants;
