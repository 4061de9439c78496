// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The component lifecycle contract: every managed component
//! declares its name, its dependencies by name, and the three lifecycle
//! hooks the supervisor drives in dependency order.

use aviary_core::{CoreError, HealthStatus};
use async_trait::async_trait;

#[async_trait]
pub trait Component: Send + Sync {
    /// Unique name used in dependency declarations and log output.
    fn name(&self) -> &str;

    /// Names of components that must be started before this one.
    fn dependencies(&self) -> &[String] {
        &[]
    }

    /// One-time setup before `start`. Default no-op; components without
    /// preconditions (e.g. the scheduler's lease recovery) don't override it.
    async fn init(&self) -> Result<(), CoreError> {
        Ok(())
    }

    /// Begin steady-state operation. Must return once the component is ready
    /// to serve, not block for the component's whole lifetime.
    async fn start(&self) -> Result<(), CoreError>;

    /// Gracefully stop. Must not panic; a component that can't stop cleanly
    /// logs and returns rather than holding up the rest of the shutdown order.
    async fn stop(&self);

    fn health(&self) -> HealthStatus;
}
