// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! aviaryd: the agent daemon's process entry point.
//!
//! Wires the event-ingestion, storage, scheduling, and HTTP boundary crates
//! into one supervised process: builds the two ingestion lanes and their
//! Workers directly (their shutdown needs sole ownership of the channel
//! senders, so they're managed here rather than as Supervisor components),
//! registers the Scheduler and HTTP server with a `Supervisor`, then blocks
//! until SIGTERM/SIGINT.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod components;
mod lock;
mod logging;
mod orchestrator;

use std::sync::{Arc, OnceLock};

use aviary_core::config::RuntimeConfig;
use aviary_core::{SystemClock, UuidIdGen};
use aviary_http::{AppState, HttpServer};
use aviary_ingress::{Ingress, Resolver, Router, SessionLockManager, Worker, WorkspaceStores};
use aviary_scheduler::Scheduler;
use aviary_storage::StoreWorkerConfig;
use aviary_supervisor::{Component, Supervisor};
use components::SchedulerComponent;
use orchestrator::PlaceholderOrchestrator;
use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("aviaryd {VERSION}");
                return Ok(());
            }
            "--help" | "-h" => {
                println!("aviaryd {VERSION}");
                println!("Background process that owns event ingestion, scheduling, and the HTTP boundary.");
                println!();
                println!("USAGE:\n    aviaryd");
                return Ok(());
            }
            other => {
                eprintln!("error: unexpected argument '{other}'");
                std::process::exit(1);
            }
        }
    }

    let config = RuntimeConfig::load()?;

    let lock_path = config
        .workspace_root
        .parent()
        .map(|state_dir| state_dir.join("aviaryd.pid"))
        .unwrap_or_else(|| config.workspace_root.join("aviaryd.pid"));
    let _lock = match lock::DaemonLock::acquire(lock_path) {
        Ok(lock) => lock,
        Err(err) => {
            eprintln!("aviaryd is already running: {err}");
            std::process::exit(1);
        }
    };

    let _log_guard = logging::setup_logging(&config.log_dir, &config.log_filter)?;

    info!("starting aviaryd {VERSION}");

    let stores = Arc::new(WorkspaceStores::new(
        config.workspace_root.clone(),
        StoreWorkerConfig {
            lock: aviary_storage::FileLockConfig {
                timeout: config.store.lock_timeout,
                retry_interval: config.store.lock_retry,
                max_retries: config.store.lock_max_retry,
            },
            inbox_size: config.store.inbox_size,
            transcript_rotate_max_bytes: config.store.transcript_rotate_max_bytes,
            idempotency_ttl_ms: u64::try_from(config.ingress.idempotency_ttl.as_millis()).unwrap_or(u64::MAX),
        },
    ));

    let id_gen: Arc<dyn aviary_core::IdGen> = Arc::new(UuidIdGen);
    let clock: Arc<dyn aviary_core::Clock> = Arc::new(SystemClock);
    let resolver = Resolver::new(config.default_workspace_id.clone(), id_gen.clone());

    let (interactive_tx, interactive_rx) = tokio::sync::mpsc::channel(config.ingress.interactive_queue_size);
    let (background_tx, background_rx) = tokio::sync::mpsc::channel(config.ingress.background_queue_size);

    let ingress = Arc::new(Ingress::new(
        Router::new(),
        resolver,
        stores.clone(),
        config.ingress.clone(),
        interactive_tx,
        background_tx,
    ));

    let orchestrator: Arc<dyn aviary_core::Orchestrator> = Arc::new(PlaceholderOrchestrator);
    let session_locks = Arc::new(SessionLockManager::new());

    let interactive_worker = Worker::new("interactive", orchestrator.clone(), session_locks.clone(), stores.clone());
    let background_worker = Worker::new("background", orchestrator.clone(), session_locks.clone(), stores.clone());
    let worker_handles = vec![interactive_worker.spawn(interactive_rx), background_worker.spawn(background_rx)];

    let scheduler = Arc::new(Scheduler::load(
        config.workspace_root.join(&config.default_workspace_id).join("scheduler").join("tasks.json"),
        ingress.clone(),
        id_gen.clone(),
        clock.clone(),
        config.scheduler.clone(),
    ));
    let scheduler_component: Arc<dyn Component> = Arc::new(SchedulerComponent::new(scheduler));

    let cancel = CancellationToken::new();
    let supervisor_cell: Arc<OnceLock<Arc<Supervisor>>> = Arc::new(OnceLock::new());
    let app_state = AppState {
        ingress: ingress.clone(),
        stores: stores.clone(),
        default_workspace_id: aviary_core::WorkspaceId::new(config.default_workspace_id.clone()),
        id_gen: id_gen.clone(),
        clock: clock.clone(),
        supervisor: supervisor_cell.clone(),
        orchestrator: orchestrator.clone(),
        cancel: cancel.clone(),
        version: VERSION,
        sse_poll_interval: config.http.sse_poll_interval,
    };
    let http_component: Arc<dyn Component> = Arc::new(HttpServer::new(app_state, config.http.clone()));

    let supervisor = Arc::new(Supervisor::new(
        vec![scheduler_component, http_component],
        config.daemon.health_check_interval,
        config.daemon.startup_shutdown_timeout,
    )?);
    supervisor_cell.set(Arc::clone(&supervisor)).ok();

    let panic_rx = aviary_supervisor::install_panic_hook();
    aviary_supervisor::spawn_panic_logger(panic_rx);

    if let Err(err) = supervisor.start_all().await {
        error!(error = %err, "failed to start components");
        return Err(err.into());
    }
    supervisor.spawn_health_monitor();

    info!("aviaryd ready");

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
        _ = sigint.recv() => info!("received SIGINT, shutting down"),
    }

    cancel.cancel();
    supervisor.stop_all().await;
    drop(supervisor);

    match Arc::try_unwrap(ingress) {
        Ok(ingress) => {
            ingress
                .close(worker_handles, config.ingress.drain_timeout, config.ingress.drain_poll_interval)
                .await;
        }
        Err(_) => {
            error!("ingress still has outstanding references at shutdown, skipping drain wait");
        }
    }

    info!("aviaryd stopped");
    Ok(())
}
