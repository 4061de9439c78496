// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `GET /api/v1/sessions` and `GET /api/v1/sessions/{id}/stream`: list
//! sessions via the filesystem-reconciled view, and stream a transcript as
//! Server-Sent Events by polling [`aviary_storage::StoreHandle::read_transcript_from_offset`]
//! on an interval until the client disconnects or the server shuts down.

use crate::error::ApiError;
use crate::state::AppState;
use async_stream::stream;
use aviary_core::CoreError;
use axum::extract::{Path, Query, State};
use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::convert::Infallible;
use tokio_stream::Stream;

pub async fn list_sessions(State(state): State<AppState>) -> Response {
    let paths = state.stores.paths_for(&state.default_workspace_id);
    let sessions = aviary_storage::list_sessions_reconciled(&paths);
    Json(json!({ "sessions": sessions })).into_response()
}

#[derive(Debug, Default, Deserialize)]
pub struct StreamQuery {
    #[serde(default)]
    pub from: u64,
}

pub async fn stream_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(query): Query<StreamQuery>,
) -> Response {
    let store = match state.stores.get_or_start(&state.default_workspace_id, state.clock.now_ms()).await {
        Ok(store) => store,
        Err(err) => return ApiError(err).into_response(),
    };

    if store.get_session(session_id.clone()).await.is_none() {
        return ApiError(CoreError::not_found(format!("session {session_id}"))).into_response();
    }

    let poll_interval = state.sse_poll_interval;
    let cancel = state.cancel.clone();

    let body: std::pin::Pin<Box<dyn Stream<Item = Result<SseEvent, Infallible>> + Send>> = Box::pin(stream! {
        yield Ok(SseEvent::default().data("connected"));

        let mut offset = query.from;
        loop {
            if cancel.is_cancelled() {
                break;
            }
            match store.read_transcript_from_offset(session_id.clone(), offset).await {
                Ok((lines, next_offset)) => {
                    offset = next_offset;
                    for line in lines {
                        yield Ok(SseEvent::default().data(line));
                    }
                }
                Err(_) => break,
            }
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(poll_interval) => {}
            }
        }
    });

    Sse::new(body).keep_alive(KeepAlive::default()).into_response()
}

#[cfg(test)]
#[path = "sessions_tests.rs"]
mod tests;
