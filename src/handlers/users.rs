// ABOUTME: User-level handlers: create a user and delete every workout row of a user
// ABOUTME: Parse, validate, call the workout service, and map the result to a response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{
    dispatch, log_request, not_found, parse_body, path_object, HandlerRequest, HandlerResponse,
    Operation,
};
use crate::services::WorkoutService;
use serde_json::json;
use workout_log_core::constants::messages;
use workout_log_core::validation::{validate_new_user, validate_user_id};

/// Create a user from `{fullName, gender, dob}` and seed their first workout row
pub async fn create_user(service: &WorkoutService, request: HandlerRequest) -> HandlerResponse {
    let operation = Operation::CreateUser;
    log_request(operation, &request);
    let Some(body) = request.body.as_deref() else {
        return not_found(messages::NO_BODY_FOUND);
    };

    let validated = parse_body(body).and_then(|input| validate_new_user(&input));
    dispatch(
        operation,
        validated,
        |profile| service.create_user_record(profile),
        |user_id| json!({ "message": messages::USER_CREATED, "userId": user_id }),
    )
    .await
}

/// Delete every workout row of the user named by the `id` path parameter
pub async fn delete_all_workouts(
    service: &WorkoutService,
    request: HandlerRequest,
) -> HandlerResponse {
    let operation = Operation::DeleteAllWorkouts;
    log_request(operation, &request);
    let Some(params) = request.path_parameters.as_ref() else {
        return not_found(messages::NO_PATH_PARAM_FOUND);
    };

    let validated = validate_user_id(&path_object(params));
    dispatch(
        operation,
        validated,
        |user_id| async move { service.delete_all_entries_for_user(&user_id).await },
        |_report| json!({ "message": messages::USER_DATA_DELETED }),
    )
    .await
}
