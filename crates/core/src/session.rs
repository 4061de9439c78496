// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session identifier and metadata.
//!
//! A session is a logically ordered conversation; all events sharing a
//! `session_id` are serialized by the session lock manager so the transcript
//! for a session has a total order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

crate::define_id! {
    /// Unique identifier for a session.
    pub struct SessionId;
}

/// Lifecycle status of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Active,
    Archived,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Active => write!(f, "active"),
            SessionStatus::Archived => write!(f, "archived"),
        }
    }
}

/// Session metadata as persisted in `sessions/index.json`.
///
/// Created lazily by the resolver on first event, updated by the
/// StoreWorker, and destroyed only by an explicit reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMeta {
    pub id: SessionId,
    pub title: String,
    pub status: SessionStatus,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl SessionMeta {
    /// A freshly created session: `title = "New Session"`, `status = active`.
    pub fn new_lazy(id: SessionId, now_ms: u64) -> Self {
        Self {
            id,
            title: "New Session".to_string(),
            status: SessionStatus::Active,
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
            metadata: BTreeMap::new(),
        }
    }

    pub fn touch(&mut self, now_ms: u64) {
        self.updated_at_ms = now_ms;
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
