// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace directory layout:
//!
//! ```text
//! <workspace_root>/<workspace_id>/
//!   workspace.lock
//!   sessions/index.json
//!   sessions/<id>.jsonl
//!   governance/processed_keys.json
//!   governance/approvals.json
//!   scheduler/tasks.json
//!   vectors/
//! ```

use aviary_core::WorkspaceId;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    root: PathBuf,
}

impl WorkspacePaths {
    pub fn new(workspace_root: &Path, workspace_id: &WorkspaceId) -> Self {
        Self {
            root: workspace_root.join(workspace_id.as_str()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn lock_file(&self) -> PathBuf {
        self.root.join("workspace.lock")
    }

    pub fn sessions_dir(&self) -> PathBuf {
        self.root.join("sessions")
    }

    pub fn session_index(&self) -> PathBuf {
        self.sessions_dir().join("index.json")
    }

    pub fn transcript(&self, session_id: &str) -> PathBuf {
        self.sessions_dir().join(format!("{session_id}.jsonl"))
    }

    pub fn governance_dir(&self) -> PathBuf {
        self.root.join("governance")
    }

    pub fn processed_keys(&self) -> PathBuf {
        self.governance_dir().join("processed_keys.json")
    }

    pub fn approvals(&self) -> PathBuf {
        self.governance_dir().join("approvals.json")
    }

    pub fn scheduler_dir(&self) -> PathBuf {
        self.root.join("scheduler")
    }

    pub fn scheduler_tasks(&self) -> PathBuf {
        self.scheduler_dir().join("tasks.json")
    }

    pub fn vectors_dir(&self) -> PathBuf {
        self.root.join("vectors")
    }

    pub fn vector_collection(&self, name: &str) -> PathBuf {
        self.vectors_dir().join(format!("{name}.json"))
    }

    /// Create every directory this layout needs. Called once at StoreWorker
    /// startup.
    pub fn create_all(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::create_dir_all(self.sessions_dir())?;
        std::fs::create_dir_all(self.governance_dir())?;
        std::fs::create_dir_all(self.scheduler_dir())?;
        std::fs::create_dir_all(self.vectors_dir())?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
