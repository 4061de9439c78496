// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `GET /api/v1/zanshin/status`: an opaque status map surfaced
//! verbatim from [`aviary_core::Orchestrator::status`]. Nothing in this
//! crate interprets its contents.

use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use serde_json::Value;
use std::collections::BTreeMap;

pub async fn status(State(state): State<AppState>) -> Json<BTreeMap<String, Value>> {
    Json(state.orchestrator.status())
}

#[cfg(test)]
#[path = "zanshin_tests.rs"]
mod tests;
