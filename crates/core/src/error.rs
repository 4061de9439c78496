// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The error taxonomy shared by every component in the core.
//!
//! Every fallible operation in the runtime returns a `CoreError` variant, not
//! a string or `anyhow::Error`. HTTP handlers map each variant to a status
//! code in a single place (see `aviary-http`).

use thiserror::Error;

/// The error taxonomy of the runtime.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Idempotent suppression: the event was already processed.
    #[error("duplicate event: {key}")]
    DuplicateEvent { key: String },

    /// The policy engine requires approval before the turn can proceed.
    #[error("approval required: {reason}")]
    ApprovalRequired { reason: String },

    /// Terminal for the turn; the caller is not authorized.
    #[error("permission denied: {reason}")]
    PermissionDenied { reason: String },

    /// Validation failure on the input.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// The requested resource does not exist.
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// Retryable with backoff; a concurrent writer won a race.
    #[error("conflict: {reason}")]
    Conflict { reason: String },

    /// Retryable; used for backpressure (queue full) and transient I/O.
    #[error("transient error: {reason}")]
    Transient { reason: String },

    /// A parsing failure downstream of the orchestrator.
    #[error("invalid model output: {reason}")]
    InvalidModelOutput { reason: String },

    /// Generic internal error; retried once then surfaced.
    #[error("internal error: {0}")]
    Internal(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// `Transient` and `Conflict` are retryable; everything else (including a
    /// tripped cancellation token, which is never represented as a
    /// `CoreError`) is terminal for the turn.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::Transient { .. } | CoreError::Conflict { .. })
    }

    pub fn transient(reason: impl Into<String>) -> Self {
        CoreError::Transient {
            reason: reason.into(),
        }
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        CoreError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        CoreError::Conflict {
            reason: reason.into(),
        }
    }

    pub fn duplicate(key: impl Into<String>) -> Self {
        CoreError::DuplicateEvent { key: key.into() }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
