// ABOUTME: Unified error types re-exported from workout-log-core
// ABOUTME: Gives server modules a crate-local path to AppError, AppResult, and ErrorCode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use workout_log_core::errors::*;
