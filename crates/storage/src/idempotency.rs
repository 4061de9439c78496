// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Idempotency ledger: `hash(source:event_id) -> first_seen_at`.
//!
//! `check_and_mark` is the hot path — called from ingress submission before
//! routing, not round-tripped through the StoreWorker's request channel —
//! so the ledger is designed to be held directly behind a
//! `parking_lot::Mutex` shared between ingress and the StoreWorker (which
//! owns persistence).

use crate::atomic::write_json_atomic;
use crate::StoreError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdempotencyLedger {
    /// hashed key -> first-seen epoch millis
    keys: BTreeMap<String, u64>,
}

impl IdempotencyLedger {
    pub fn load(path: &Path) -> Self {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&contents).unwrap_or_default()
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        write_json_atomic(path, self)
    }

    /// Hash `source:event_id` into a ledger key. SHA-256, hex-encoded.
    pub fn hash_key(source: &str, event_id: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(source.as_bytes());
        hasher.update(b":");
        hasher.update(event_id.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Returns `true` if `key` was already present; on a miss, inserts it
    /// with `now_ms` as the first-seen timestamp.
    pub fn check_and_mark(&mut self, key: &str, now_ms: u64) -> bool {
        if self.keys.contains_key(key) {
            return true;
        }
        self.keys.insert(key.to_string(), now_ms);
        false
    }

    /// Remove every entry older than `ttl_ms` relative to `now_ms`. Runs on
    /// StoreWorker start and then periodically from the actor loop.
    pub fn prune(&mut self, ttl_ms: u64, now_ms: u64) -> usize {
        let before = self.keys.len();
        self.keys.retain(|_, first_seen| now_ms.saturating_sub(*first_seen) <= ttl_ms);
        before - self.keys.len()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
#[path = "idempotency_tests.rs"]
mod tests;
