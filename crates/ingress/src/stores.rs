// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A small per-process registry of [`StoreHandle`]s, one per workspace,
//! started lazily the first time an event resolves to that workspace.
//! Ingress and the two-lane Worker share this registry so every component
//! talking to a workspace's files goes through the same StoreWorker.

use aviary_core::{CoreError, WorkspaceId};
use aviary_storage::{StoreHandle, StoreWorkerConfig, WorkspacePaths};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

pub struct WorkspaceStores {
    workspace_root: PathBuf,
    config: StoreWorkerConfig,
    /// One [`OnceCell`] per workspace, populated lazily. The outer `Mutex`
    /// is held only long enough to get-or-insert a workspace's cell, never
    /// across the StoreWorker startup itself — `FileLock` contention on one
    /// workspace must not block every other workspace's `get_or_start`.
    handles: Mutex<HashMap<String, Arc<OnceCell<StoreHandle>>>>,
}

impl WorkspaceStores {
    pub fn new(workspace_root: PathBuf, config: StoreWorkerConfig) -> Self {
        Self {
            workspace_root,
            config,
            handles: Mutex::new(HashMap::new()),
        }
    }

    pub async fn get_or_start(&self, workspace_id: &WorkspaceId, now_ms: u64) -> Result<StoreHandle, CoreError> {
        let key = workspace_id.as_str().to_string();

        loop {
            let cell = {
                let mut handles = self.handles.lock().await;
                Arc::clone(handles.entry(key.clone()).or_insert_with(|| Arc::new(OnceCell::new())))
            };

            let handle = cell
                .get_or_try_init(|| aviary_storage::start(self.workspace_root.clone(), workspace_id.clone(), self.config.clone(), now_ms))
                .await
                .map_err(CoreError::from)?;

            if handle.is_healthy() {
                return Ok(handle.clone());
            }

            // The cached worker died; evict it and let the next iteration
            // install a fresh cell in its place.
            let mut handles = self.handles.lock().await;
            handles.remove(&key);
        }
    }

    /// Filesystem layout for `workspace_id`, for callers (e.g. the HTTP
    /// boundary's session listing) that read the workspace directory
    /// directly rather than through a running StoreWorker.
    pub fn paths_for(&self, workspace_id: &WorkspaceId) -> WorkspacePaths {
        WorkspacePaths::new(&self.workspace_root, workspace_id)
    }
}

#[cfg(test)]
#[path = "stores_tests.rs"]
mod tests;
