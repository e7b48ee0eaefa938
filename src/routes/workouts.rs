// ABOUTME: HTTP routes for users and their workout log rows
// ABOUTME: Adapts axum requests to handler envelopes and handler envelopes back to responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Workout log routes
//!
//! Routes are thin: they collect the raw body and path parameters, call the
//! matching handler, and copy its status code and JSON body onto the HTTP
//! response. An empty HTTP body reaches the handler as an absent body. A body
//! that is not UTF-8 or a path that cannot be decoded is answered here with
//! the same JSON validation failure a handler would produce.

use crate::handlers::{self, HandlerRequest, HandlerResponse};
use crate::resources::ServerResources;
use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use std::collections::HashMap;
use std::sync::Arc;

type PathParams = HashMap<String, String>;
type PathResult = Result<Path<PathParams>, PathRejection>;

/// Workout log routes
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout log routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/users", post(Self::handle_create_user))
            .route("/users/:id", delete(Self::handle_delete_all_workouts))
            .route("/users/:id/workouts", put(Self::handle_upsert_workout))
            .route(
                "/users/:id/workouts/:date",
                get(Self::handle_get_workout_list).delete(Self::handle_delete_workout),
            )
            .with_state(resources)
    }

    async fn handle_create_user(
        State(resources): State<Arc<ServerResources>>,
        body: Bytes,
    ) -> Response {
        let body = match decode_body(&body) {
            Ok(body) => body,
            Err(rejected) => return into_http(rejected),
        };
        let request = HandlerRequest {
            body,
            path_parameters: None,
        };
        into_http(handlers::create_user(&resources.workouts, request).await)
    }

    async fn handle_delete_all_workouts(
        State(resources): State<Arc<ServerResources>>,
        path: PathResult,
    ) -> Response {
        match path_only(path) {
            Ok(request) => into_http(handlers::delete_all_workouts(&resources.workouts, request).await),
            Err(rejected) => into_http(rejected),
        }
    }

    async fn handle_upsert_workout(
        State(resources): State<Arc<ServerResources>>,
        path: PathResult,
        body: Bytes,
    ) -> Response {
        let request = match decode_path(path).and_then(|params| {
            Ok(HandlerRequest {
                body: decode_body(&body)?,
                path_parameters: Some(params),
            })
        }) {
            Ok(request) => request,
            Err(rejected) => return into_http(rejected),
        };
        into_http(handlers::upsert_workout(&resources.workouts, request).await)
    }

    async fn handle_get_workout_list(
        State(resources): State<Arc<ServerResources>>,
        path: PathResult,
    ) -> Response {
        match path_only(path) {
            Ok(request) => into_http(handlers::get_workout_list(&resources.workouts, request).await),
            Err(rejected) => into_http(rejected),
        }
    }

    async fn handle_delete_workout(
        State(resources): State<Arc<ServerResources>>,
        path: PathResult,
    ) -> Response {
        match path_only(path) {
            Ok(request) => into_http(handlers::delete_workout(&resources.workouts, request).await),
            Err(rejected) => into_http(rejected),
        }
    }
}

/// Empty bodies are absent; non-UTF-8 bodies are rejected as malformed JSON
fn decode_body(body: &Bytes) -> Result<Option<String>, HandlerResponse> {
    if body.is_empty() {
        return Ok(None);
    }
    String::from_utf8(body.to_vec())
        .map(Some)
        .map_err(|e| handlers::malformed_request(format!("Invalid JSON: {e}")))
}

fn decode_path(path: PathResult) -> Result<PathParams, HandlerResponse> {
    path.map(|Path(params)| params)
        .map_err(|e| handlers::malformed_request(format!("Invalid path: {}", e.body_text())))
}

fn path_only(path: PathResult) -> Result<HandlerRequest, HandlerResponse> {
    decode_path(path).map(|params| HandlerRequest {
        body: None,
        path_parameters: Some(params),
    })
}

fn into_http(response: HandlerResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        response.body,
    )
        .into_response()
}
