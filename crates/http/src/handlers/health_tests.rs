// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::build_state;
use axum::extract::State;
use tempfile::tempdir;

#[tokio::test]
async fn reports_healthy_with_no_components() {
    let dir = tempdir().unwrap();
    let (state, _irx, _brx) = build_state(dir.path());

    let Json(body) = health(State(state)).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], "test");
    assert_eq!(body["components"], serde_json::json!({}));
}
