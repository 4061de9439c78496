// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The seam between the Worker and the cognitive kernel: an opaque
//! `Execute(ctx, event) -> Result<(), CoreError>` call. Nothing on this side
//! of the boundary looks inside what `execute` does — no tool execution,
//! policy approval, or skill loading lives in this crate.

use crate::error::CoreError;
use crate::event::Event;
use async_trait::async_trait;
use std::collections::BTreeMap;

#[async_trait]
pub trait Orchestrator: Send + Sync {
    async fn execute(&self, event: &Event) -> Result<(), CoreError>;

    /// An opaque status map surfaced verbatim by the HTTP boundary's status
    /// endpoint. Nothing on this side of the boundary interprets the
    /// contents; an orchestrator that has nothing to report returns an
    /// empty map.
    fn status(&self) -> BTreeMap<String, serde_json::Value> {
        BTreeMap::new()
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
