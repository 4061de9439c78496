// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage-layer error taxonomy. Converts into [`aviary_core::CoreError`] at
//! the component boundary (StoreWorker replies, scheduler store callers).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("locked by another instance: {workspace_id}")]
    Locked { workspace_id: String },

    #[error("store worker inbox closed")]
    WorkerGone,

    #[error("unknown vector collection: {0}")]
    UnknownCollection(String),
}

impl From<StoreError> for aviary_core::CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Locked { workspace_id } => {
                aviary_core::CoreError::conflict(format!("workspace locked: {workspace_id}"))
            }
            StoreError::UnknownCollection(name) => aviary_core::CoreError::not_found(format!("collection {name}")),
            StoreError::WorkerGone => aviary_core::CoreError::transient("store worker unavailable"),
            StoreError::Io(e) => aviary_core::CoreError::Io(e),
            StoreError::Json(e) => aviary_core::CoreError::Json(e),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
