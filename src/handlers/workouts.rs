// ABOUTME: Workout row handlers: upsert a plan, read a plan, delete one row
// ABOUTME: Rows are addressed by the id and date path parameters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{
    dispatch, log_request, not_found, parse_body, path_object, HandlerRequest, HandlerResponse,
    Operation,
};
use crate::services::WorkoutService;
use serde_json::{json, Value};
use workout_log_core::constants::messages;
use workout_log_core::validation::{validate_workout_key, validate_workout_upsert};

/// Replace the plan for (id, date)
///
/// The body is merged with the path parameters before validation; a path
/// parameter wins over a body field with the same name.
pub async fn upsert_workout(service: &WorkoutService, request: HandlerRequest) -> HandlerResponse {
    let operation = Operation::UpsertWorkout;
    log_request(operation, &request);
    let Some(body) = request.body.as_deref() else {
        return not_found(messages::NO_BODY_FOUND);
    };

    let validated = parse_body(body).and_then(|mut input| {
        if let (Value::Object(record), Some(params)) = (&mut input, &request.path_parameters) {
            for (name, value) in params {
                record.insert(name.clone(), Value::String(value.clone()));
            }
        }
        validate_workout_upsert(&input)
    });

    dispatch(
        operation,
        validated,
        |upsert| service.upsert_workout_plan(upsert),
        |plan| json!({ "message": messages::WORKOUT_UPDATED, "data": plan }),
    )
    .await
}

/// Read the plan for (id, date)
pub async fn get_workout_list(
    service: &WorkoutService,
    request: HandlerRequest,
) -> HandlerResponse {
    let operation = Operation::GetWorkoutList;
    log_request(operation, &request);
    let Some(params) = request.path_parameters.as_ref() else {
        return not_found(messages::NO_PATH_PARAM_FOUND);
    };

    let validated = validate_workout_key(&path_object(params));
    dispatch(
        operation,
        validated,
        |key| async move {
            let plan = service.get_workout_plan(&key).await;
            plan.map(|plan| (key.user_id, plan))
        },
        |(user_id, plan)| json!({ "userId": user_id, "workoutPlan": plan }),
    )
    .await
}

/// Delete the row for (id, date)
pub async fn delete_workout(service: &WorkoutService, request: HandlerRequest) -> HandlerResponse {
    let operation = Operation::DeleteWorkout;
    log_request(operation, &request);
    let Some(params) = request.path_parameters.as_ref() else {
        return not_found(messages::NO_PATH_PARAM_FOUND);
    };

    let validated = validate_workout_key(&path_object(params));
    dispatch(
        operation,
        validated,
        |key| async move { service.delete_workout_entry(&key).await },
        |()| json!({ "message": messages::WORKOUT_DELETED }),
    )
    .await
}
