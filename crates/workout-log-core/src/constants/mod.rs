// ABOUTME: Application constants for response messages, field names, and limits
// ABOUTME: Keeps user-visible text and schema limits in one place for handlers and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Application-wide constants organized by domain

/// Fixed response messages returned by the request handlers
pub mod messages {
    /// Required body was absent from the request
    pub const NO_BODY_FOUND: &str = "No body found !!";
    /// Required path parameters were absent from the request
    pub const NO_PATH_PARAM_FOUND: &str = "No path param found !!";
    /// Input failed schema validation
    pub const VALIDATION_FAILED: &str = "Validation failed!";
    /// Unrecognized failure; never carries detail
    pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

    /// Successful user creation
    pub const USER_CREATED: &str = "User created successfully!";
    /// Successful workout plan upsert
    pub const WORKOUT_UPDATED: &str = "Workout Updated!";
    /// Successful single workout delete
    pub const WORKOUT_DELETED: &str = "Workout deleted successfully!";
    /// Successful bulk delete of a user's rows
    pub const USER_DATA_DELETED: &str = "User data deleted successfully!";

    /// Failure while creating a user
    pub const CREATE_USER_FAILED: &str = "Error while creating a new user";
    /// Failure while upserting a workout plan
    pub const UPSERT_WORKOUT_FAILED: &str = "Error while updating the workout plan";
    /// Failure while reading a workout plan
    pub const GET_WORKOUT_FAILED: &str = "Error while getting list of workout";
    /// Failure while deleting one workout
    pub const DELETE_WORKOUT_FAILED: &str = "Error while deleting the workout";
    /// Failure while deleting all rows of a user
    pub const DELETE_USER_FAILED: &str = "Error while deleting a user";

    /// Point read found no row
    pub const NO_DATA_PRESENT: &str = "No data present";
}

/// JSON field names accepted on input
pub mod fields {
    /// User id (path parameter)
    pub const ID: &str = "id";
    /// Workout date (path parameter or body)
    pub const DATE: &str = "date";
    /// Full name of a new user
    pub const FULL_NAME: &str = "fullName";
    /// Gender of a new user
    pub const GENDER: &str = "gender";
    /// Date of birth of a new user
    pub const DOB: &str = "dob";
    /// Workout plan mapping
    pub const WORKOUT_PLAN: &str = "workoutPlan";
    /// Exercise weight
    pub const WEIGHT: &str = "weight";
    /// Exercise repetitions
    pub const REPS: &str = "reps";
    /// Exercise sets
    pub const SETS: &str = "sets";
    /// Exercise weight unit
    pub const METRIC: &str = "metric";
}

/// Schema limits
pub mod limits {
    /// Exact length of a user id
    pub const USER_ID_LENGTH: usize = 8;
    /// Minimum length of a full name
    pub const MIN_FULL_NAME_LENGTH: usize = 3;
    /// Minimum length of an exercise name
    pub const MIN_EXERCISE_NAME_LENGTH: usize = 3;
    /// Calendar date wire format
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
}
