// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The scheduler's own persisted task table: `scheduler/tasks.json`,
//! a flat map keyed by task id, rewritten atomically on every lease
//! acquisition and release. Distinct from `StoreWorker` — the scheduler owns
//! this file directly rather than routing through the workspace actor.

use aviary_storage::{write_json_atomic, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lease {
    pub run_id: String,
    pub expires_at_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub schedule: String,
    pub workspace_id: String,
    pub next_run_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lease: Option<Lease>,
}

impl Task {
    pub fn new(id: impl Into<String>, schedule: impl Into<String>, workspace_id: impl Into<String>, next_run_ms: u64) -> Self {
        Self {
            id: id.into(),
            schedule: schedule.into(),
            workspace_id: workspace_id.into(),
            next_run_ms,
            lease: None,
        }
    }

    pub fn has_unexpired_lease(&self, now_ms: u64) -> bool {
        self.lease.as_ref().is_some_and(|lease| lease.expires_at_ms > now_ms)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskStore {
    pub tasks: BTreeMap<String, Task>,
}

impl TaskStore {
    pub fn load(path: &Path) -> Self {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&contents).unwrap_or_default()
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        write_json_atomic(path, self)
    }

    pub fn upsert(&mut self, task: Task) {
        self.tasks.insert(task.id.clone(), task);
    }

    pub fn get(&self, task_id: &str) -> Option<&Task> {
        self.tasks.get(task_id)
    }

    pub fn get_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.get_mut(task_id)
    }

    pub fn values(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
