// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapts [`aviary_scheduler::Scheduler`] to the [`Component`] contract the
//! Supervisor drives. `aviary-http`'s `HttpServer` already implements
//! `Component` itself; the Scheduler's `start`/`stop`/`health` methods match
//! the trait's shape exactly but its tick loop takes `Arc<Self>` (it needs
//! to outlive any single call), so the wrapper lives here instead of in the
//! scheduler crate.

use aviary_core::{CoreError, HealthStatus};
use aviary_scheduler::Scheduler;
use aviary_supervisor::Component;
use async_trait::async_trait;
use std::sync::Arc;

pub struct SchedulerComponent {
    scheduler: Arc<Scheduler>,
}

impl SchedulerComponent {
    pub fn new(scheduler: Arc<Scheduler>) -> Self {
        Self { scheduler }
    }
}

#[async_trait]
impl Component for SchedulerComponent {
    fn name(&self) -> &str {
        "scheduler"
    }

    async fn start(&self) -> Result<(), CoreError> {
        self.scheduler.start().await?;
        tokio::spawn(Arc::clone(&self.scheduler).run());
        Ok(())
    }

    async fn stop(&self) {
        self.scheduler.stop().await;
    }

    fn health(&self) -> HealthStatus {
        self.scheduler.health()
    }
}
