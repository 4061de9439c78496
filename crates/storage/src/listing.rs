// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem-backed session listing for the HTTP boundary's session-list
//! endpoint. Unlike `StoreHandle::get_session` (which trusts the StoreWorker's
//! in-memory index on the hot path), this re-scans `sessions/*.jsonl` and
//! `sessions/index.json` directly on every call, so a session file created
//! or removed by hand is visible without restarting the worker. The two
//! views may disagree transiently after such a manual edit; that is accepted.

use crate::paths::WorkspacePaths;
use crate::session_index::SessionIndex;
use aviary_core::{SessionId, SessionMeta, SessionStatus};
use std::collections::BTreeMap;

/// List every session known to the workspace: the indexed ones as recorded,
/// plus a synthesized entry for any `.jsonl` transcript file that has no
/// matching index entry.
pub fn list_sessions_reconciled(paths: &WorkspacePaths) -> Vec<SessionMeta> {
    let index = SessionIndex::load(&paths.session_index());
    let mut sessions: BTreeMap<String, SessionMeta> = index.sessions.clone();

    let Ok(entries) = std::fs::read_dir(paths.sessions_dir()) else {
        return sessions.into_values().collect();
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("jsonl") {
            continue;
        }
        let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if sessions.contains_key(id) {
            continue;
        }
        let (created_ms, updated_ms) = file_times_ms(&path);
        sessions.insert(
            id.to_string(),
            SessionMeta {
                id: SessionId::new(id),
                title: "Recovered session".to_string(),
                status: SessionStatus::Active,
                created_at_ms: created_ms,
                updated_at_ms: updated_ms,
                metadata: BTreeMap::new(),
            },
        );
    }

    sessions.into_values().collect()
}

fn file_times_ms(path: &std::path::Path) -> (u64, u64) {
    let Ok(meta) = std::fs::metadata(path) else {
        return (0, 0);
    };
    let to_ms = |t: std::io::Result<std::time::SystemTime>| {
        t.ok()
            .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    };
    (to_ms(meta.created()), to_ms(meta.modified()))
}

#[cfg(test)]
#[path = "listing_tests.rs"]
mod tests;
