// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `POST /api/v1/events`: the HTTP-facing entry point into
//! [`aviary_ingress::Ingress::submit`]. Status codes are part of the
//! contract: 202 on enqueue, 200 on idempotent duplicate, 429 on
//! backpressure, 400 on validation failure.

use crate::error::ApiError;
use crate::state::AppState;
use aviary_core::{CoreError, Event, EventKind};
use aviary_ingress::SubmitOutcome;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub struct SubmitEventBody {
    /// Caller-supplied idempotency token. If omitted, one is generated and
    /// the submission can never be detected as a duplicate — callers that
    /// need at-least-once-with-dedup semantics over retries should set it.
    #[serde(default)]
    pub id: Option<String>,
    pub source: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub session_id: String,
    pub content: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

pub async fn submit_event(State(state): State<AppState>, Json(body): Json<SubmitEventBody>) -> Response {
    if body.source.is_empty() {
        return ApiError(CoreError::invalid_input("source must not be empty")).into_response();
    }

    let id = body.id.unwrap_or_else(|| state.id_gen.next());
    let event = Event {
        id: id.clone(),
        source: body.source,
        kind: body.kind,
        workspace_id: String::new(),
        session_id: body.session_id,
        content: body.content,
        metadata: body.metadata,
        created_at_ms: state.clock.now_ms(),
    };

    match state.ingress.submit(event, &state.cancel).await {
        Ok(SubmitOutcome::Enqueued) | Ok(SubmitOutcome::HandledInline) => {
            (StatusCode::ACCEPTED, Json(json!({ "status": "accepted", "id": id }))).into_response()
        }
        Ok(SubmitOutcome::Dropped) => (StatusCode::ACCEPTED, Json(json!({ "status": "dropped", "id": id }))).into_response(),
        Err(CoreError::DuplicateEvent { .. }) => (StatusCode::OK, Json(json!({ "status": "duplicate", "id": id }))).into_response(),
        Err(err) => ApiError(err).into_response(),
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
