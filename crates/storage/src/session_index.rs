// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sessions/index.json`: the in-memory `SessionIndex`, loaded at StoreWorker
//! startup (tolerating corruption by starting fresh) and atomically
//! rewritten on every `SaveSession`.

use crate::atomic::write_json_atomic;
use crate::StoreError;
use aviary_core::SessionMeta;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionIndex {
    pub sessions: BTreeMap<String, SessionMeta>,
}

impl SessionIndex {
    /// Load the index from `path`. A missing file is an empty index; a
    /// corrupt file is logged and treated as an empty index rather than
    /// failing startup: tolerate corruption, start fresh, and warn.
    pub fn load(path: &Path) -> Self {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&contents) {
            Ok(index) => index,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "corrupt session index, starting fresh");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        write_json_atomic(path, self)
    }

    pub fn get(&self, session_id: &str) -> Option<&SessionMeta> {
        self.sessions.get(session_id)
    }

    pub fn upsert(&mut self, meta: SessionMeta) {
        self.sessions.insert(meta.id.as_str().to_string(), meta);
    }

    pub fn remove(&mut self, session_id: &str) -> Option<SessionMeta> {
        self.sessions.remove(session_id)
    }

    pub fn list(&self) -> Vec<SessionMeta> {
        self.sessions.values().cloned().collect()
    }
}

#[cfg(test)]
#[path = "session_index_tests.rs"]
mod tests;
