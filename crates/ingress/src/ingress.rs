// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Submission, Close, and Health: the three operations exposed to
//! callers of ingress. Routing and resolution are delegated to [`Router`]
//! and [`Resolver`]; persistence to the per-workspace [`WorkspaceStores`].

use crate::router::{Destination, Router};
use crate::resolver::Resolver;
use crate::stores::WorkspaceStores;
use aviary_core::config::IngressConfig;
use aviary_core::{CoreError, Event, EventKind, HealthStatus};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Enqueued,
    Dropped,
    HandledInline,
}

pub struct Ingress {
    router: Router,
    resolver: Resolver,
    stores: Arc<WorkspaceStores>,
    config: IngressConfig,
    interactive_tx: mpsc::Sender<Event>,
    background_tx: mpsc::Sender<Event>,
}

impl Ingress {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        router: Router,
        resolver: Resolver,
        stores: Arc<WorkspaceStores>,
        config: IngressConfig,
        interactive_tx: mpsc::Sender<Event>,
        background_tx: mpsc::Sender<Event>,
    ) -> Self {
        Self {
            router,
            resolver,
            stores,
            config,
            interactive_tx,
            background_tx,
        }
    }

    /// Submit an event for processing.
    pub async fn submit(&self, mut event: Event, cancel: &CancellationToken) -> Result<SubmitOutcome, CoreError> {
        if event.id.is_empty() || event.source.is_empty() {
            return Err(CoreError::invalid_input("event must have a non-empty id and source"));
        }

        let workspace_id = self.resolver.resolve_workspace(&event);
        let store = self.stores.get_or_start(&workspace_id, event.created_at_ms).await?;

        if store.check_and_mark_idempotent(&event.source, &event.id, event.created_at_ms) {
            return Err(CoreError::duplicate(event.idempotency_key()));
        }

        match self.router.route(&mut event) {
            Destination::Drop => return Ok(SubmitOutcome::Dropped),
            Destination::Command(handler) => {
                handler.handle(&event)?;
                return Ok(SubmitOutcome::HandledInline);
            }
            Destination::Pipeline => {}
        }

        event.workspace_id = workspace_id.as_str().to_string();
        let session_id = self.resolver.resolve_session_id(&event, &workspace_id);
        event.session_id = session_id.clone();
        self.resolver.ensure_session(&session_id, &store, event.created_at_ms).await?;

        match event.kind {
            EventKind::UserMessage | EventKind::Command => {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Err(CoreError::transient("submit cancelled")),
                    result = tokio::time::timeout(self.config.interactive_submit_timeout, self.interactive_tx.send(event)) => {
                        match result {
                            Ok(Ok(())) => Ok(SubmitOutcome::Enqueued),
                            Ok(Err(_)) => Err(CoreError::transient("interactive lane closed")),
                            Err(_elapsed) => Err(CoreError::transient("interactive queue full")),
                        }
                    }
                }
            }
            _ => match self.background_tx.try_send(event) {
                Ok(()) => Ok(SubmitOutcome::Enqueued),
                Err(_) => Err(CoreError::transient("background queue full")),
            },
        }
    }

    /// Health: transient when either lane is over 90% utilized.
    pub fn health(&self) -> HealthStatus {
        if is_over_90_percent(&self.interactive_tx) {
            return HealthStatus::Transient("interactive queue over 90% utilized".to_string());
        }
        if is_over_90_percent(&self.background_tx) {
            return HealthStatus::Transient("background queue over 90% utilized".to_string());
        }
        HealthStatus::Healthy
    }

    /// Close: drop both senders so the worker loops drain naturally,
    /// then wait up to `drain_timeout` for the given worker handles to
    /// finish, polling every `drain_poll_interval`. Logs a stall if the
    /// finished count stops advancing before the timeout.
    pub async fn close(self, worker_handles: Vec<JoinHandle<()>>, drain_timeout: Duration, drain_poll_interval: Duration) {
        drop(self.interactive_tx);
        drop(self.background_tx);

        let deadline = tokio::time::Instant::now() + drain_timeout;
        let mut handles = worker_handles;
        let mut previous_remaining = handles.len();
        let mut stalled_logged = false;

        loop {
            handles.retain(|h| !h.is_finished());
            if handles.is_empty() {
                return;
            }
            if tokio::time::Instant::now() >= deadline {
                warn!("ingress close: drain timeout elapsed with {} worker(s) still running", handles.len());
                return;
            }
            if handles.len() == previous_remaining && !stalled_logged {
                warn!("ingress close: queue drain has stalled at {} worker(s) remaining", handles.len());
                stalled_logged = true;
            }
            previous_remaining = handles.len();
            tokio::time::sleep(drain_poll_interval).await;
        }
    }
}

fn is_over_90_percent(tx: &mpsc::Sender<Event>) -> bool {
    let max = tx.max_capacity();
    if max == 0 {
        return false;
    }
    let used = max - tx.capacity();
    (used * 10) >= (max * 9)
}

#[cfg(test)]
#[path = "ingress_tests.rs"]
mod tests;
