// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace identifier.
//!
//! A workspace is a filesystem-scoped, single-writer unit of runtime state,
//! owned by exactly one running StoreWorker at a time.

crate::define_id! {
    /// Unique identifier for a workspace.
    pub struct WorkspaceId;
}

impl WorkspaceId {
    /// The configured default workspace id used when none is resolved.
    pub fn default_workspace() -> Self {
        Self::new("default")
    }
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
