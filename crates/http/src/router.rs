// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Route table for the HTTP boundary.

use crate::handlers::{approvals, events, health, sessions, zanshin};
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/v1/events", post(events::submit_event))
        .route("/api/v1/sessions", get(sessions::list_sessions))
        .route("/api/v1/sessions/{id}/stream", get(sessions::stream_session))
        .route("/api/v1/approvals", get(approvals::list_approvals))
        .route("/api/v1/approvals/{id}/resolve", post(approvals::resolve_approval))
        .route("/api/v1/zanshin/status", get(zanshin::status))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()))
        .with_state(state)
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
