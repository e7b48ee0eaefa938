// ABOUTME: Request handler envelope, response mapping, and the shared validate-dispatch-respond routine
// ABOUTME: Classifies data-access failures into 400 (recognized) and 500 (unknown) responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Request Handlers
//!
//! Each handler takes a [`HandlerRequest`] (raw body text plus path
//! parameters) and returns a [`HandlerResponse`] (status code plus JSON
//! text). Handlers are transport-agnostic; `routes` adapts axum requests to
//! this envelope.
//!
//! Status codes:
//! - `200` success
//! - `404` required body or path parameters absent
//! - `400` validation failure, or a recognized data-access failure
//! - `500` unknown failure, including a panic inside the data-access call

use crate::errors::AppError;
use futures_util::FutureExt;
use serde_json::{json, Map, Value};
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tracing::{error, info, warn};
use workout_log_core::constants::messages;
use workout_log_core::validation::ValidationErrors;

/// User creation and delete-all handlers
pub mod users;
/// Workout plan upsert, read, and delete handlers
pub mod workouts;

pub use users::{create_user, delete_all_workouts};
pub use workouts::{delete_workout, get_workout_list, upsert_workout};

/// Inbound request envelope
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerRequest {
    /// Raw body text, absent when the request carried none
    pub body: Option<String>,
    /// Path parameters, absent when the route had none
    pub path_parameters: Option<HashMap<String, String>>,
}

impl HandlerRequest {
    /// Request with a body and no path parameters
    #[must_use]
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            path_parameters: None,
        }
    }

    /// Request with path parameters and no body
    #[must_use]
    pub fn with_path<K, V>(params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            body: None,
            path_parameters: Some(
                params
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

/// Outbound response envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResponse {
    /// HTTP status code
    pub status_code: u16,
    /// JSON body text
    pub body: String,
}

impl HandlerResponse {
    /// Parse the body back into JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Operations exposed as handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Create a user and seed their first workout row
    CreateUser,
    /// Replace the plan for (id, date)
    UpsertWorkout,
    /// Read the plan for (id, date)
    GetWorkoutList,
    /// Delete the row for (id, date)
    DeleteWorkout,
    /// Delete every row of a user
    DeleteAllWorkouts,
}

impl Operation {
    /// Name used in structured logs
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreateUser => "create_user",
            Self::UpsertWorkout => "upsert_workout",
            Self::GetWorkoutList => "get_workout_list",
            Self::DeleteWorkout => "delete_workout",
            Self::DeleteAllWorkouts => "delete_all_workouts",
        }
    }

    /// Message returned with a recognized failure
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::CreateUser => messages::CREATE_USER_FAILED,
            Self::UpsertWorkout => messages::UPSERT_WORKOUT_FAILED,
            Self::GetWorkoutList => messages::GET_WORKOUT_FAILED,
            Self::DeleteWorkout => messages::DELETE_WORKOUT_FAILED,
            Self::DeleteAllWorkouts => messages::DELETE_USER_FAILED,
        }
    }
}

/// Build a response; the status code passes through unchanged
#[must_use]
pub fn response(status_code: u16, payload: &Value) -> HandlerResponse {
    HandlerResponse {
        status_code,
        body: payload.to_string(),
    }
}

/// 404 carrying only a message
#[must_use]
pub fn not_found(message: &str) -> HandlerResponse {
    response(404, &json!({ "message": message }))
}

/// 400 listing every offending field in order
#[must_use]
pub fn validation_failed(errors: &ValidationErrors) -> HandlerResponse {
    response(
        400,
        &json!({ "message": messages::VALIDATION_FAILED, "errors": errors }),
    )
}

/// Map a data-access error to its response
///
/// Errors with a caller-visible code become 400 with the error message;
/// anything else is reported as a bare 500.
#[must_use]
pub fn error_response(operation: Operation, err: &AppError) -> HandlerResponse {
    if err.code.is_caller_visible() {
        warn!(operation = operation.name(), error.code = %err.code, error = %err, "Operation failed");
        response(
            400,
            &json!({ "message": operation.failure_message(), "error": err.message }),
        )
    } else {
        error!(operation = operation.name(), error = %err, "Operation failed with an internal error");
        internal_error()
    }
}

/// 500 with the generic message and no detail
#[must_use]
pub fn internal_error() -> HandlerResponse {
    response(500, &json!({ "message": messages::INTERNAL_SERVER_ERROR }))
}

/// Log the inbound request; every handler calls this first
pub fn log_request(operation: Operation, request: &HandlerRequest) {
    info!(
        operation = operation.name(),
        has_body = request.body.is_some(),
        path_parameters = ?request.path_parameters,
        "Handling request"
    );
}

/// Parse a body; malformed JSON is a validation failure on the root path
///
/// # Errors
///
/// Returns a single-entry [`ValidationErrors`] describing the parse error
pub fn parse_body(raw: &str) -> Result<Value, ValidationErrors> {
    serde_json::from_str(raw).map_err(|e| root_error(format!("Invalid JSON: {e}")))
}

/// 400 for a request the transport could not decode into text
///
/// Reported the same way as a validation failure on the root path.
#[must_use]
pub fn malformed_request(message: impl Into<String>) -> HandlerResponse {
    let errors = root_error(message);
    warn!(errors = %errors, "Rejected undecodable request");
    validation_failed(&errors)
}

fn root_error(message: impl Into<String>) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.push("", message);
    errors
}

/// Path parameters as a JSON object of strings
#[must_use]
pub fn path_object(params: &HashMap<String, String>) -> Value {
    Value::Object(
        params
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect::<Map<String, Value>>(),
    )
}

/// Validate, call one data-access operation, and map the outcome
///
/// A panic raised while the call runs is caught here and reported as a 500.
pub async fn dispatch<T, R, F, Fut>(
    operation: Operation,
    validated: Result<T, ValidationErrors>,
    call: F,
    on_success: impl FnOnce(R) -> Value + Send,
) -> HandlerResponse
where
    F: FnOnce(T) -> Fut + Send,
    Fut: Future<Output = Result<R, AppError>> + Send,
    T: Send,
{
    let input = match validated {
        Ok(input) => input,
        Err(errors) => {
            warn!(operation = operation.name(), errors = %errors, "Validation failed");
            return validation_failed(&errors);
        }
    };

    match AssertUnwindSafe(async move { call(input).await })
        .catch_unwind()
        .await
    {
        Ok(Ok(value)) => response(200, &on_success(value)),
        Ok(Err(err)) => error_response(operation, &err),
        Err(panic) => {
            error!(
                operation = operation.name(),
                panic = panic_message(panic.as_ref()),
                "Data access panicked"
            );
            internal_error()
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
