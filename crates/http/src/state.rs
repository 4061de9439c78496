// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use aviary_core::{Clock, IdGen, Orchestrator, WorkspaceId};
use aviary_ingress::{Ingress, WorkspaceStores};
use aviary_supervisor::Supervisor;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Shared state handed to every handler: the runtime API surface the thin
/// HTTP layer sits in front of. Cloning is cheap — every field is an `Arc`,
/// a small `Copy`/value type, or a clonable token.
#[derive(Clone)]
pub struct AppState {
    pub ingress: Arc<Ingress>,
    pub stores: Arc<WorkspaceStores>,
    pub default_workspace_id: WorkspaceId,
    pub id_gen: Arc<dyn IdGen>,
    pub clock: Arc<dyn Clock>,
    /// Published once the supervisor managing this server exists. The
    /// supervisor can't be constructed until every component it manages
    /// (this one included) does, so the cell is empty for the brief window
    /// between this state's construction and `Supervisor::new` returning.
    pub supervisor: Arc<OnceLock<Arc<Supervisor>>>,
    pub orchestrator: Arc<dyn Orchestrator>,
    pub cancel: CancellationToken,
    pub version: &'static str,
    pub sse_poll_interval: Duration,
}
