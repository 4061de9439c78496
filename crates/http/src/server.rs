// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The HTTP boundary as a supervised [`Component`]: binds a listener
//! in `start`, serves the router on a spawned task until the shared
//! cancellation token fires, and waits (bounded by `shutdown_timeout`) for
//! that task to exit in `stop`.

use crate::router::build_router;
use crate::state::AppState;
use aviary_core::config::HttpConfig;
use aviary_core::{CoreError, HealthStatus};
use aviary_supervisor::Component;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

pub struct HttpServer {
    state: AppState,
    config: HttpConfig,
    join: Mutex<Option<JoinHandle<()>>>,
    bound_addr: Mutex<Option<SocketAddr>>,
    running: AtomicBool,
}

impl HttpServer {
    pub fn new(state: AppState, config: HttpConfig) -> Self {
        Self {
            state,
            config,
            join: Mutex::new(None),
            bound_addr: Mutex::new(None),
            running: AtomicBool::new(false),
        }
    }

    /// The address actually bound, once `start` has run. Useful in tests and
    /// logs when `config.port` is `0` and the OS assigns an ephemeral port.
    pub fn bound_addr(&self) -> Option<SocketAddr> {
        *self.bound_addr.lock()
    }
}

#[async_trait]
impl Component for HttpServer {
    fn name(&self) -> &str {
        "http"
    }

    async fn start(&self) -> Result<(), CoreError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|err| CoreError::Internal(format!("http listen on {addr}: {err}")))?;
        let bound = listener.local_addr().map_err(|err| CoreError::Internal(err.to_string()))?;
        *self.bound_addr.lock() = Some(bound);

        let router = build_router(self.state.clone());
        let cancel = self.state.cancel.clone();

        let handle = tokio::spawn(async move {
            let shutdown = async move { cancel.cancelled().await };
            if let Err(err) = axum::serve(listener, router).with_graceful_shutdown(shutdown).await {
                error!(error = %err, "http server exited with error");
            }
        });

        *self.join.lock() = Some(handle);
        self.running.store(true, Ordering::SeqCst);
        info!(%bound, "http server listening");
        Ok(())
    }

    async fn stop(&self) {
        self.state.cancel.cancel();
        let handle = self.join.lock().take();
        if let Some(handle) = handle {
            match tokio::time::timeout(self.config.shutdown_timeout, handle).await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => error!(error = %err, "http server task panicked"),
                Err(_) => error!("http server did not shut down within shutdown_timeout"),
            }
        }
        self.running.store(false, Ordering::SeqCst);
    }

    fn health(&self) -> HealthStatus {
        if self.running.load(Ordering::SeqCst) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Transient("http server not running".to_string())
        }
    }
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
