// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Supervisor: owns every long-running component, starts them in
//! dependency order with rollback on failure, stops them in the reverse
//! order, and polls their health on an interval.

use crate::component::Component;
use crate::graph::{topo_sort, GraphError};
use aviary_core::HealthStatus;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

pub struct Supervisor {
    by_name: HashMap<String, Arc<dyn Component>>,
    /// Dependency-resolved order, used for `Init` only.
    init_order: Vec<String>,
    /// Registration order, as passed to `new`. Used for `Start` and for both
    /// shutdown paths (`stop_all`, the Start-failure path) — shutdown is the
    /// inverse of registration, not of dependency resolution.
    registration_order: Vec<String>,
    health_check_interval: Duration,
    startup_shutdown_timeout: Duration,
    monitor_cancel: CancellationToken,
}

impl Supervisor {
    pub fn new(
        components: Vec<Arc<dyn Component>>,
        health_check_interval: Duration,
        startup_shutdown_timeout: Duration,
    ) -> Result<Self, GraphError> {
        let registration_order: Vec<String> = components.iter().map(|c| c.name().to_string()).collect();
        let dependencies: HashMap<String, Vec<String>> = components
            .iter()
            .map(|c| (c.name().to_string(), c.dependencies().to_vec()))
            .collect();
        let init_order = topo_sort(&registration_order, &dependencies)?;

        let by_name = components.into_iter().map(|c| (c.name().to_string(), c)).collect();

        Ok(Self {
            by_name,
            init_order,
            registration_order,
            health_check_interval,
            startup_shutdown_timeout,
            monitor_cancel: CancellationToken::new(),
        })
    }

    /// Init every component in dependency-resolved order, then start every
    /// component in registration order. The two phases fail differently:
    /// an Init failure rolls back (reverse-order `Stop` of whatever was
    /// already inited) immediately; a Start failure instead gives the
    /// components already started a bounded `startup_shutdown_timeout` to
    /// stop before returning.
    pub async fn start_all(&self) -> Result<(), aviary_core::CoreError> {
        let mut inited = Vec::with_capacity(self.init_order.len());
        for name in &self.init_order {
            let component = &self.by_name[name];
            if let Err(err) = component.init().await {
                error!(component = %name, error = %err, "component init failed, rolling back");
                self.stop_listed(&inited).await;
                return Err(err);
            }
            inited.push(name.clone());
        }

        let mut started = Vec::with_capacity(self.registration_order.len());
        for name in &self.registration_order {
            let component = &self.by_name[name];
            if let Err(err) = component.start().await {
                error!(component = %name, error = %err, "component start failed, shutting down within startup_shutdown_timeout");
                if tokio::time::timeout(self.startup_shutdown_timeout, self.stop_listed(&started)).await.is_err() {
                    warn!(
                        timeout_secs = self.startup_shutdown_timeout.as_secs(),
                        "startup shutdown exceeded startup_shutdown_timeout, some components may still be running"
                    );
                }
                return Err(err);
            }

            info!(component = %name, "component started");
            started.push(name.clone());
        }

        Ok(())
    }

    /// Stop every name in `names`, in reverse order.
    async fn stop_listed(&self, names: &[String]) {
        for name in names.iter().rev() {
            self.by_name[name].stop().await;
        }
    }

    /// Stop every component in reverse registration order.
    pub async fn stop_all(&self) {
        self.monitor_cancel.cancel();
        for name in self.registration_order.iter().rev() {
            info!(component = %name, "stopping component");
            self.by_name[name].stop().await;
        }
    }

    /// Current health of every managed component, keyed by name.
    pub fn health(&self) -> HashMap<String, HealthStatus> {
        self.by_name.iter().map(|(name, c)| (name.clone(), c.health())).collect()
    }

    /// Spawn a background task that polls [`Supervisor::health`] on an
    /// interval and logs any component that isn't healthy. Stops when
    /// [`Supervisor::stop_all`] is called.
    pub fn spawn_health_monitor(self: &Arc<Self>) {
        let supervisor = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(supervisor.health_check_interval);
            loop {
                tokio::select! {
                    _ = supervisor.monitor_cancel.cancelled() => return,
                    _ = interval.tick() => {
                        for (name, status) in supervisor.health() {
                            match status {
                                HealthStatus::Healthy => {}
                                HealthStatus::Transient(reason) => warn!(component = %name, reason, "component transiently unhealthy"),
                                HealthStatus::Internal(reason) => error!(component = %name, reason, "component internally unhealthy"),
                            }
                        }
                    }
                }
            }
        });
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
