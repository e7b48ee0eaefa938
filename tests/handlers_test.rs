// ABOUTME: Integration tests for the request handlers over handler envelopes
// ABOUTME: Covers missing input, validation failures, store failures, panics, and success payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use common::{
    memory_service, sample_plan, sample_user, service_with, Fault, FaultyTable, FlakyDeleteTable,
    FIXED_USER_ID,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use workout_log_server::{
    config::environment::{BulkDeleteConfig, FailurePolicy},
    database_plugins::{memory::MemoryTable, TableKey, WorkoutTable},
    handlers::{
        create_user, delete_all_workouts, delete_workout, get_workout_list, upsert_workout,
        HandlerRequest, HandlerResponse,
    },
    models::WorkoutPlan,
};

fn path(params: &[(&str, &str)]) -> HandlerRequest {
    HandlerRequest::with_path(params.iter().copied())
}

fn upsert_request(id: &str, body: &Value) -> HandlerRequest {
    HandlerRequest {
        body: Some(body.to_string()),
        path_parameters: Some(HashMap::from([("id".to_owned(), id.to_owned())])),
    }
}

fn body_of(response: &HandlerResponse) -> Value {
    response.json().expect("handler body is JSON")
}

// ============================================================================
// Missing input
// ============================================================================

#[tokio::test]
async fn test_create_user_without_body_is_404() {
    let (_, service) = memory_service();
    let response = create_user(&service, HandlerRequest::default()).await;

    assert_eq!(response.status_code, 404);
    assert_eq!(body_of(&response), json!({"message": "No body found !!"}));
}

#[tokio::test]
async fn test_upsert_without_body_is_404() {
    let (_, service) = memory_service();
    let response = upsert_workout(&service, path(&[("id", "abcd1234")])).await;

    assert_eq!(response.status_code, 404);
    assert_eq!(body_of(&response), json!({"message": "No body found !!"}));
}

#[tokio::test]
async fn test_path_handlers_without_path_parameters_are_404() {
    let (_, service) = memory_service();
    let expected = json!({"message": "No path param found !!"});

    for response in [
        get_workout_list(&service, HandlerRequest::default()).await,
        delete_workout(&service, HandlerRequest::default()).await,
        delete_all_workouts(&service, HandlerRequest::default()).await,
    ] {
        assert_eq!(response.status_code, 404);
        assert_eq!(body_of(&response), expected);
    }
}

// ============================================================================
// Validation failures
// ============================================================================

#[tokio::test]
async fn test_create_user_with_short_name_lists_the_field() {
    let (table, service) = memory_service();
    let body = json!({"fullName": "Al", "gender": "M", "dob": "1990-01-01"});
    let response = create_user(&service, HandlerRequest::with_body(body.to_string())).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(
        body_of(&response),
        json!({
            "message": "Validation failed!",
            "errors": [{"fullName": "String must contain at least 3 character(s)"}]
        })
    );
    assert_eq!(table.row_count(), 0);
}

#[tokio::test]
async fn test_create_user_reports_every_field_in_order() {
    let (_, service) = memory_service();
    let body = json!({"fullName": 42, "gender": "X", "dob": "1990-13-01"});
    let response = create_user(&service, HandlerRequest::with_body(body.to_string())).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(
        body_of(&response)["errors"],
        json!([
            {"fullName": "Expected string, received number"},
            {"gender": "Invalid enum value. Expected 'M' | 'F' | 'O', received 'X'"},
            {"dob": "Invalid date"}
        ])
    );
}

#[tokio::test]
async fn test_malformed_json_body_is_a_validation_failure() {
    let (_, service) = memory_service();
    let response = create_user(&service, HandlerRequest::with_body("{\"fullName\":")).await;

    assert_eq!(response.status_code, 400);
    let body = body_of(&response);
    assert_eq!(body["message"], "Validation failed!");
    let message = body["errors"][0][""].as_str().unwrap();
    assert!(message.starts_with("Invalid JSON: "), "got {message}");
}

#[tokio::test]
async fn test_short_user_id_is_rejected_before_the_store() {
    let service = service_with(Arc::new(FaultyTable(Fault::Error)), BulkDeleteConfig::default());
    let response = delete_all_workouts(&service, path(&[("id", "abc")])).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(
        body_of(&response)["errors"],
        json!([{"id": "String must contain exactly 8 character(s)"}])
    );
}

#[tokio::test]
async fn test_get_with_missing_date_reports_required() {
    let (_, service) = memory_service();
    let response = get_workout_list(&service, path(&[("id", "abcd1234")])).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(body_of(&response)["errors"], json!([{"date": "Required"}]));
}

#[tokio::test]
async fn test_upsert_reports_nested_plan_errors() {
    let (_, service) = memory_service();
    let body = json!({
        "date": "2025-05-10",
        "workoutPlan": {
            "Sq": {"weight": -5, "reps": 5, "sets": 3, "metric": "STONE"}
        }
    });
    let response = upsert_workout(&service, upsert_request("abcd1234", &body)).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(
        body_of(&response)["errors"],
        json!([
            {"workoutPlan.Sq": "String must contain at least 3 character(s)"},
            {"workoutPlan.Sq.weight": "Number must be greater than 0"},
            {"workoutPlan.Sq.metric": "Invalid enum value. Expected 'KGS' | 'LBS' | 'BODYWEIGHT', received 'STONE'"}
        ])
    );
}

// ============================================================================
// Success paths
// ============================================================================

#[tokio::test]
async fn test_create_user_seeds_a_row_for_today() {
    let (table, service) = memory_service();
    let response = create_user(&service, HandlerRequest::with_body(sample_user().to_string())).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(
        body_of(&response),
        json!({"message": "User created successfully!", "userId": FIXED_USER_ID})
    );

    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let key = TableKey::new(FIXED_USER_ID, today);
    let stored = table.get_workout_plan(&key).await.unwrap();
    assert_eq!(stored, Some(WorkoutPlan::starter()));
    assert_eq!(table.profile(&key).unwrap().full_name, "Alice Doe");
}

#[tokio::test]
async fn test_upsert_echoes_the_plan_and_get_returns_it() {
    let (_, service) = memory_service();
    let body = json!({"date": "2025-05-10", "workoutPlan": sample_plan()});

    let response = upsert_workout(&service, upsert_request("abcd1234", &body)).await;
    assert_eq!(response.status_code, 200);
    assert_eq!(
        body_of(&response),
        json!({"message": "Workout Updated!", "data": sample_plan()})
    );

    let response = get_workout_list(
        &service,
        path(&[("id", "abcd1234"), ("date", "2025-05-10")]),
    )
    .await;
    assert_eq!(response.status_code, 200);
    assert_eq!(
        body_of(&response),
        json!({"userId": "abcd1234", "workoutPlan": sample_plan()})
    );
}

#[tokio::test]
async fn test_upsert_path_id_wins_over_body_id() {
    let (table, service) = memory_service();
    let body = json!({"id": "bodyid00", "date": "2025-05-10", "workoutPlan": sample_plan()});

    let response = upsert_workout(&service, upsert_request("pathid00", &body)).await;
    assert_eq!(response.status_code, 200);

    let stored = table
        .get_workout_plan(&TableKey::new("pathid00", "2025-05-10"))
        .await
        .unwrap();
    assert!(stored.is_some());
    assert!(table.query_partition("bodyid00").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upsert_replaces_the_whole_plan() {
    let (_, service) = memory_service();
    let first = json!({"date": "2025-05-10", "workoutPlan": sample_plan()});
    let second = json!({
        "date": "2025-05-10",
        "workoutPlan": {"Deadlift": {"weight": 140, "reps": 3, "sets": 2, "metric": "LBS"}}
    });
    upsert_workout(&service, upsert_request("abcd1234", &first)).await;
    upsert_workout(&service, upsert_request("abcd1234", &second)).await;

    let response = get_workout_list(
        &service,
        path(&[("id", "abcd1234"), ("date", "2025-05-10")]),
    )
    .await;
    assert_eq!(body_of(&response)["workoutPlan"], second["workoutPlan"]);
}

#[tokio::test]
async fn test_get_missing_row_is_a_recognized_failure() {
    let (_, service) = memory_service();
    let response = get_workout_list(
        &service,
        path(&[("id", "abcd1234"), ("date", "2025-05-10")]),
    )
    .await;

    assert_eq!(response.status_code, 400);
    assert_eq!(
        body_of(&response),
        json!({"message": "Error while getting list of workout", "error": "No data present"})
    );
}

#[tokio::test]
async fn test_delete_workout_is_idempotent() {
    let (_, service) = memory_service();
    let body = json!({"date": "2025-05-10", "workoutPlan": sample_plan()});
    upsert_workout(&service, upsert_request("abcd1234", &body)).await;

    for _ in 0..2 {
        let response = delete_workout(
            &service,
            path(&[("id", "abcd1234"), ("date", "2025-05-10")]),
        )
        .await;
        assert_eq!(response.status_code, 200);
        assert_eq!(
            body_of(&response),
            json!({"message": "Workout deleted successfully!"})
        );
    }
}

#[tokio::test]
async fn test_delete_all_removes_every_row_then_reports_not_found() {
    let (table, service) = memory_service();
    for date in ["2025-05-10", "2025-05-11", "2025-05-12"] {
        let body = json!({"date": date, "workoutPlan": sample_plan()});
        upsert_workout(&service, upsert_request("abcd1234", &body)).await;
    }

    let response = delete_all_workouts(&service, path(&[("id", "abcd1234")])).await;
    assert_eq!(response.status_code, 200);
    assert_eq!(
        body_of(&response),
        json!({"message": "User data deleted successfully!"})
    );
    assert_eq!(table.row_count(), 0);

    let response = delete_all_workouts(&service, path(&[("id", "abcd1234")])).await;
    assert_eq!(response.status_code, 400);
    assert_eq!(
        body_of(&response),
        json!({
            "message": "Error while deleting a user",
            "error": "User with UserId: abcd1234 not Found!!"
        })
    );
}

#[tokio::test]
async fn test_seed_plan_round_trip_then_replacement() {
    let (_, service) = memory_service();
    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let key_path = [("id", FIXED_USER_ID), ("date", today.as_str())];

    let response = create_user(&service, HandlerRequest::with_body(sample_user().to_string())).await;
    assert_eq!(response.status_code, 200);

    let response = get_workout_list(&service, path(&key_path)).await;
    assert_eq!(response.status_code, 200);
    assert_eq!(
        body_of(&response)["workoutPlan"],
        serde_json::to_value(WorkoutPlan::starter()).unwrap()
    );

    let body = json!({"date": today, "workoutPlan": sample_plan()});
    let response = upsert_workout(&service, upsert_request(FIXED_USER_ID, &body)).await;
    assert_eq!(response.status_code, 200);

    let response = get_workout_list(&service, path(&key_path)).await;
    assert_eq!(body_of(&response)["workoutPlan"], sample_plan());
}

#[tokio::test]
async fn test_delete_all_succeeds_when_one_row_fails() {
    let inner = MemoryTable::new();
    for date in ["2025-05-10", "2025-05-11", "2025-05-12"] {
        inner
            .update_workout_plan(&TableKey::new("abcd1234", date), &WorkoutPlan::starter())
            .await
            .unwrap();
    }
    let table = Arc::new(FlakyDeleteTable::new(inner).failing_on(&["2025-05-11"]));
    let service = service_with(table.clone(), BulkDeleteConfig::default());

    let response = delete_all_workouts(&service, path(&[("id", "abcd1234")])).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(
        body_of(&response),
        json!({"message": "User data deleted successfully!"})
    );
    assert_eq!(table.query_partition("abcd1234").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_all_strict_policy_reports_row_failure() {
    let inner = MemoryTable::new();
    inner
        .update_workout_plan(&TableKey::new("abcd1234", "2025-05-10"), &WorkoutPlan::starter())
        .await
        .unwrap();
    let table = Arc::new(FlakyDeleteTable::new(inner).failing_on(&["2025-05-10"]));
    let service = service_with(
        table,
        BulkDeleteConfig {
            max_concurrency: None,
            failure_policy: FailurePolicy::FailOnAnyError,
        },
    );

    let response = delete_all_workouts(&service, path(&[("id", "abcd1234")])).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(body_of(&response)["message"], "Error while deleting a user");
}

// ============================================================================
// Store failures
// ============================================================================

#[tokio::test]
async fn test_store_error_maps_to_400_with_detail() {
    let service = service_with(Arc::new(FaultyTable(Fault::Error)), BulkDeleteConfig::default());
    let response = create_user(&service, HandlerRequest::with_body(sample_user().to_string())).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(
        body_of(&response),
        json!({
            "message": "Error while creating a new user",
            "error": "put_item failed: connection reset"
        })
    );
}

#[tokio::test]
async fn test_partition_query_failure_names_the_user() {
    let service = service_with(Arc::new(FaultyTable(Fault::Error)), BulkDeleteConfig::default());
    let response = delete_all_workouts(&service, path(&[("id", "abcd1234")])).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(
        body_of(&response)["error"],
        "Delete operation failed to delete for userId: abcd1234: query_partition failed: connection reset"
    );
}

#[tokio::test]
async fn test_store_panic_maps_to_generic_500() {
    let service = service_with(Arc::new(FaultyTable(Fault::Panic)), BulkDeleteConfig::default());
    let response = get_workout_list(
        &service,
        path(&[("id", "abcd1234"), ("date", "2025-05-10")]),
    )
    .await;

    assert_eq!(response.status_code, 500);
    assert_eq!(body_of(&response), json!({"message": "Internal server error"}));
}
