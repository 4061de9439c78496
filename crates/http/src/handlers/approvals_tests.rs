// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::build_state;
use tempfile::tempdir;

#[tokio::test]
async fn lists_pending_approval_created_out_of_band() {
    let dir = tempdir().unwrap();
    let (state, _irx, _brx) = build_state(dir.path());
    let store = state.stores.get_or_start(&state.default_workspace_id, 1_000).await.unwrap();
    store.create_approval("a1", "needs human sign-off", 1_000).await.unwrap();

    let response = list_approvals(State(state)).await;
    assert_eq!(response.into_response().status(), axum::http::StatusCode::OK);
}

#[tokio::test]
async fn resolve_unknown_approval_is_not_found() {
    let dir = tempdir().unwrap();
    let (state, _irx, _brx) = build_state(dir.path());

    let response = resolve_approval(State(state), Path("missing".to_string()), Json(ResolveApprovalBody { approve: true })).await;
    assert_eq!(response.into_response().status(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn resolve_known_approval_returns_decided_record() {
    let dir = tempdir().unwrap();
    let (state, _irx, _brx) = build_state(dir.path());
    let store = state.stores.get_or_start(&state.default_workspace_id, 1_000).await.unwrap();
    store.create_approval("a1", "needs human sign-off", 1_000).await.unwrap();

    let response = resolve_approval(State(state), Path("a1".to_string()), Json(ResolveApprovalBody { approve: true })).await;
    assert_eq!(response.into_response().status(), axum::http::StatusCode::OK);
}
