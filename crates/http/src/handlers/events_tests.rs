// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::build_state;
use axum::extract::State;
use tempfile::tempdir;

fn body(source: &str, kind: EventKind, content: &str) -> SubmitEventBody {
    SubmitEventBody {
        id: None,
        source: source.to_string(),
        kind,
        session_id: String::new(),
        content: content.to_string(),
        metadata: Default::default(),
    }
}

#[tokio::test]
async fn user_message_is_accepted() {
    let dir = tempdir().unwrap();
    let (state, mut irx, _brx) = build_state(dir.path());

    let response = submit_event(State(state), Json(body("cli", EventKind::UserMessage, "hi"))).await;
    assert_eq!(response.into_response().status(), StatusCode::ACCEPTED);

    assert!(irx.recv().await.is_some());
}

#[tokio::test]
async fn duplicate_submission_with_explicit_id_returns_ok() {
    let dir = tempdir().unwrap();
    let (state, mut irx, _brx) = build_state(dir.path());

    let mut first = body("cli", EventKind::UserMessage, "hi");
    first.id = Some("fixed-id".to_string());
    let response = submit_event(State(state.clone()), Json(first)).await;
    assert_eq!(response.into_response().status(), StatusCode::ACCEPTED);
    irx.recv().await.unwrap();

    let mut second = body("cli", EventKind::UserMessage, "hi");
    second.id = Some("fixed-id".to_string());
    let response = submit_event(State(state), Json(second)).await;
    assert_eq!(response.into_response().status(), StatusCode::OK);
}

#[tokio::test]
async fn empty_source_is_rejected() {
    let dir = tempdir().unwrap();
    let (state, _irx, _brx) = build_state(dir.path());

    let response = submit_event(State(state), Json(body("", EventKind::UserMessage, "hi"))).await;
    assert_eq!(response.into_response().status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn full_interactive_lane_is_too_many_requests() {
    let dir = tempdir().unwrap();
    let (state, irx, _brx) = build_state(dir.path());
    drop(irx);

    let response = submit_event(State(state), Json(body("cli", EventKind::UserMessage, "hi"))).await;
    assert_eq!(response.into_response().status(), StatusCode::TOO_MANY_REQUESTS);
}
