// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Placeholder [`Orchestrator`]: the cognitive kernel this daemon dispatches
//! turns to is opaque and out of scope here (tool execution, policy
//! approval, and skill loading all live on the other side of that seam).
//! This stub acknowledges every turn without acting on it, so the daemon
//! binary has something concrete to wire the Worker lanes to.

use aviary_core::{CoreError, Event, Orchestrator};
use async_trait::async_trait;
use tracing::info;

pub struct PlaceholderOrchestrator;

#[async_trait]
impl Orchestrator for PlaceholderOrchestrator {
    async fn execute(&self, event: &Event) -> Result<(), CoreError> {
        info!(event_id = %event.id, source = %event.source, "no cognitive kernel wired, turn acknowledged only");
        Ok(())
    }
}
