// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The per-lane Worker: one instance for the interactive lane, one
//! for the background lane. Each consumes events off its own queue,
//! serializes turns per session via the [`SessionLockManager`], persists the
//! user-visible transcript line, then hands off to the opaque orchestrator.

use crate::session_lock::SessionLockManager;
use crate::stores::WorkspaceStores;
use aviary_core::{CoreError, Event, EventKind, Orchestrator, TranscriptRecord, WorkspaceId};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, warn};

pub struct Worker {
    name: &'static str,
    orchestrator: Arc<dyn Orchestrator>,
    session_locks: Arc<SessionLockManager>,
    stores: Arc<WorkspaceStores>,
}

impl Worker {
    pub fn new(
        name: &'static str,
        orchestrator: Arc<dyn Orchestrator>,
        session_locks: Arc<SessionLockManager>,
        stores: Arc<WorkspaceStores>,
    ) -> Self {
        Self {
            name,
            orchestrator,
            session_locks,
            stores,
        }
    }

    /// Spawn the consume loop on the current runtime. Returns a handle that
    /// resolves once `rx` is closed and drained — the shutdown protocol
    /// is: drop every sender, then `shutdown_timeout`-bounded `await` on the
    /// returned handle.
    pub fn spawn(self, mut rx: mpsc::Receiver<Event>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                self.process(event).await;
            }
        })
    }

    async fn process(&self, event: Event) {
        if event.id.is_empty() || event.session_id.is_empty() {
            warn!(lane = self.name, "dropping event with missing id or session_id");
            return;
        }

        let _guard = self.session_locks.lock(&event.session_id).await;

        let workspace_id = WorkspaceId::new(event.workspace_id.clone());
        let store = match self.stores.get_or_start(&workspace_id, event.created_at_ms).await {
            Ok(store) => store,
            Err(err) => {
                error!(lane = self.name, error = %err, "failed to open workspace store, dropping event");
                return;
            }
        };

        if event.kind == EventKind::UserMessage {
            let record = TranscriptRecord::user_event(event.id.clone(), event.content.clone(), event.created_at_ms);
            if let Err(err) = store.write_transcript(event.session_id.clone(), record).await {
                error!(lane = self.name, error = %err, "failed to persist transcript, continuing turn");
            }
        }

        if let Err(err) = self.orchestrator.execute(&event).await {
            error!(lane = self.name, event_id = %event.id, error = %err, "orchestrator turn failed");
        }
        // Session lock releases here regardless of orchestrator outcome.
    }
}

/// Stop protocol helper: await `handle` for up to `timeout`, returning an
/// internal error (but not panicking) on timeout.
pub async fn stop(handle: JoinHandle<()>, timeout: Duration) -> Result<(), CoreError> {
    match tokio::time::timeout(timeout, handle).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(_join_err)) => Err(CoreError::Internal("worker task panicked".to_string())),
        Err(_elapsed) => Err(CoreError::Internal("worker shutdown timed out".to_string())),
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
