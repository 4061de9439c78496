// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `GET /health`: overall status plus per-component health, sourced
//! straight from the [`aviary_supervisor::Supervisor`] this server was
//! registered with.

use crate::state::AppState;
use aviary_core::HealthStatus;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let components = state.supervisor.get().map(|s| s.health()).unwrap_or_default();
    let overall_healthy = components.values().all(HealthStatus::is_healthy);

    let components: BTreeMap<String, Value> = components
        .into_iter()
        .map(|(name, status)| {
            let body = match status {
                HealthStatus::Healthy => json!({ "healthy": true }),
                HealthStatus::Transient(reason) => json!({ "healthy": false, "error": reason }),
                HealthStatus::Internal(reason) => json!({ "healthy": false, "error": reason }),
            };
            (name, body)
        })
        .collect();

    Json(json!({
        "status": if overall_healthy { "healthy" } else { "degraded" },
        "version": state.version,
        "components": components,
    }))
}

#[cfg(test)]
#[path = "health_tests.rs"]
mod tests;
