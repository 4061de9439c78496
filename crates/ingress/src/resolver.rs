// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace and session resolution.

use aviary_core::{CoreError, Event, IdGen, SessionMeta, WorkspaceId};
use aviary_storage::StoreHandle;
use std::sync::Arc;

pub struct Resolver {
    default_workspace_id: String,
    id_gen: Arc<dyn IdGen>,
}

impl Resolver {
    pub fn new(default_workspace_id: impl Into<String>, id_gen: Arc<dyn IdGen>) -> Self {
        Self {
            default_workspace_id: default_workspace_id.into(),
            id_gen,
        }
    }

    /// Event field, else `metadata["workspace_id"]`, else the configured default.
    pub fn resolve_workspace(&self, event: &Event) -> WorkspaceId {
        if !event.workspace_id.is_empty() {
            return WorkspaceId::new(event.workspace_id.clone());
        }
        if let Some(id) = event.metadata.get("workspace_id") {
            if !id.is_empty() {
                return WorkspaceId::new(id.clone());
            }
        }
        WorkspaceId::new(self.default_workspace_id.clone())
    }

    /// Event field if non-empty, else a source-specific derivation.
    pub fn resolve_session_id(&self, event: &Event, workspace_id: &WorkspaceId) -> String {
        if !event.session_id.is_empty() {
            return event.session_id.clone();
        }
        match event.source.as_str() {
            "slack" => event
                .metadata
                .get("thread_ts")
                .or_else(|| event.metadata.get("channel_id"))
                .cloned()
                .unwrap_or_else(|| format!("sess_{}", self.id_gen.next())),
            "telegram" => event
                .metadata
                .get("chat_id")
                .cloned()
                .unwrap_or_else(|| format!("sess_{}", self.id_gen.next())),
            // Stable per workspace so repeated heartbeats share one session.
            "scheduler" => format!("scheduler:{workspace_id}"),
            "cli" => format!("cli:{}", self.id_gen.next()),
            _ => format!("sess_{}", self.id_gen.next()),
        }
    }

    /// Lazily create a session index entry (`Title = "New Session"`,
    /// `status = active`) if one doesn't already exist.
    pub async fn ensure_session(&self, session_id: &str, store: &StoreHandle, now_ms: u64) -> Result<(), CoreError> {
        if store.get_session(session_id).await.is_some() {
            return Ok(());
        }
        let meta = SessionMeta::new_lazy(aviary_core::SessionId::new(session_id.to_string()), now_ms);
        store.save_session(meta).await.map_err(CoreError::from)
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
