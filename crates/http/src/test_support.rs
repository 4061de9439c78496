// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::state::AppState;
use aviary_core::{Event, FakeClock, IdGen, Orchestrator, SequentialIdGen, WorkspaceId};
use aviary_ingress::{Ingress, Resolver, Router, WorkspaceStores};
use aviary_storage::StoreWorkerConfig;
use aviary_supervisor::Supervisor;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub struct NoopOrchestrator;

#[async_trait::async_trait]
impl Orchestrator for NoopOrchestrator {
    async fn execute(&self, _event: &Event) -> Result<(), aviary_core::CoreError> {
        Ok(())
    }
}

/// An `AppState` over a tempdir-backed workspace, wired with fakes
/// throughout so handler tests are deterministic. The two lane receivers are
/// returned alongside so a test can drain them; dropping them is also fine,
/// it just turns further submissions into `Transient` lane-closed errors.
pub fn build_state(root: &std::path::Path) -> (AppState, mpsc::Receiver<Event>, mpsc::Receiver<Event>) {
    let stores = Arc::new(WorkspaceStores::new(root.to_path_buf(), StoreWorkerConfig::default()));
    let id_gen: Arc<dyn IdGen> = Arc::new(SequentialIdGen::new("evt"));
    let resolver = Resolver::new("default", id_gen.clone());
    let (itx, irx) = mpsc::channel(16);
    let (btx, brx) = mpsc::channel(16);
    let ingress = Arc::new(Ingress::new(
        Router::new(),
        resolver,
        stores.clone(),
        Default::default(),
        itx,
        btx,
    ));

    let supervisor_cell = OnceLock::new();
    let _ = supervisor_cell.set(Arc::new(
        Supervisor::new(vec![], Duration::from_secs(60), Duration::from_secs(5)).expect("empty supervisor never cycles"),
    ));

    let state = AppState {
        ingress,
        stores,
        default_workspace_id: WorkspaceId::new("default"),
        id_gen,
        clock: Arc::new(FakeClock::new(1_000)),
        supervisor: Arc::new(supervisor_cell),
        orchestrator: Arc::new(NoopOrchestrator),
        cancel: CancellationToken::new(),
        version: "test",
        sse_poll_interval: Duration::from_millis(10),
    };
    (state, irx, brx)
}
