// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Maps `CoreError` to an HTTP status code in exactly one place.

use aviary_core::CoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub struct ApiError(pub CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            CoreError::DuplicateEvent { key } => (StatusCode::OK, format!("duplicate event: {key}")),
            CoreError::ApprovalRequired { reason } => (StatusCode::ACCEPTED, reason.clone()),
            CoreError::PermissionDenied { reason } => (StatusCode::FORBIDDEN, reason.clone()),
            CoreError::InvalidInput { reason } => (StatusCode::BAD_REQUEST, reason.clone()),
            CoreError::NotFound { resource } => (StatusCode::NOT_FOUND, format!("not found: {resource}")),
            CoreError::Conflict { reason } => (StatusCode::CONFLICT, reason.clone()),
            CoreError::Transient { reason } => (StatusCode::TOO_MANY_REQUESTS, reason.clone()),
            CoreError::InvalidModelOutput { reason } => (StatusCode::INTERNAL_SERVER_ERROR, reason.clone()),
            CoreError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
            CoreError::Io(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            CoreError::Json(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
