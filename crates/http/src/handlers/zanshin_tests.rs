// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::build_state;
use tempfile::tempdir;

#[tokio::test]
async fn default_orchestrator_reports_empty_status() {
    let dir = tempdir().unwrap();
    let (state, _irx, _brx) = build_state(dir.path());

    let Json(body) = status(State(state)).await;
    assert!(body.is_empty());
}
