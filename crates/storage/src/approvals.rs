// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `governance/approvals.json`: the pending/decided approval ledger the HTTP
//! boundary's approvals endpoints read and write directly. Policy-engine
//! internals that decide *whether* an approval is required live upstream of
//! this crate; this store only persists the record once one exists.

use crate::atomic::write_json_atomic;
use crate::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalRecord {
    pub id: String,
    pub reason: String,
    pub created_at_ms: u64,
    #[serde(default)]
    pub approved: Option<bool>,
    #[serde(default)]
    pub decided_at_ms: Option<u64>,
}

impl ApprovalRecord {
    pub fn is_pending(&self) -> bool {
        self.approved.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApprovalStore {
    approvals: BTreeMap<String, ApprovalRecord>,
}

impl ApprovalStore {
    pub fn load(path: &Path) -> Self {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&contents).unwrap_or_default()
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        write_json_atomic(path, self)
    }

    pub fn create(&mut self, id: impl Into<String>, reason: impl Into<String>, now_ms: u64) -> ApprovalRecord {
        let record = ApprovalRecord {
            id: id.into(),
            reason: reason.into(),
            created_at_ms: now_ms,
            approved: None,
            decided_at_ms: None,
        };
        self.approvals.insert(record.id.clone(), record.clone());
        record
    }

    pub fn pending(&self) -> Vec<ApprovalRecord> {
        self.approvals.values().filter(|a| a.is_pending()).cloned().collect()
    }

    pub fn all(&self) -> Vec<ApprovalRecord> {
        self.approvals.values().cloned().collect()
    }

    /// Resolve a pending approval. Returns `None` if `id` is unknown;
    /// resolving an already-decided approval overwrites the prior decision.
    pub fn resolve(&mut self, id: &str, approve: bool, now_ms: u64) -> Option<ApprovalRecord> {
        let record = self.approvals.get_mut(id)?;
        record.approved = Some(approve);
        record.decided_at_ms = Some(now_ms);
        Some(record.clone())
    }
}

#[cfg(test)]
#[path = "approvals_tests.rs"]
mod tests;
