// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `GET /api/v1/approvals` and `POST /api/v1/approvals/{id}`: the
//! pending-approval ledger, proxied straight through to the StoreWorker's
//! `ApprovalStore`.

use crate::error::ApiError;
use crate::state::AppState;
use aviary_core::CoreError;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

pub async fn list_approvals(State(state): State<AppState>) -> Response {
    let store = match state.stores.get_or_start(&state.default_workspace_id, state.clock.now_ms()).await {
        Ok(store) => store,
        Err(err) => return ApiError(err).into_response(),
    };
    Json(store.pending_approvals().await).into_response()
}

#[derive(Debug, Deserialize)]
pub struct ResolveApprovalBody {
    pub approve: bool,
}

pub async fn resolve_approval(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ResolveApprovalBody>,
) -> Response {
    let store = match state.stores.get_or_start(&state.default_workspace_id, state.clock.now_ms()).await {
        Ok(store) => store,
        Err(err) => return ApiError(err).into_response(),
    };

    match store.resolve_approval(id.clone(), body.approve, state.clock.now_ms()).await {
        Ok(Some(record)) => Json(record).into_response(),
        Ok(None) => ApiError(CoreError::not_found(format!("approval {id}"))).into_response(),
        Err(err) => ApiError(err.into()).into_response(),
    }
}

#[cfg(test)]
#[path = "approvals_tests.rs"]
mod tests;
